use core::fmt;

/// Errors of the file system.
///
/// Running out of slots is split by pool: `OutOfSpace` for data blocks,
/// `OutOfInodes` for inodes. Callers that only care that *some* pool is full
/// should use [`FsError::is_out_of_space`], which matches both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    OutOfSpace,      // Data pool exhausted
    OutOfInodes,     // Inode pool exhausted
    InvalidIndex,    // Slot index out of range or not live
    NotFound,        // Name missing in the directory, or of the wrong kind
    AlreadyExists,
    InvalidFileName,
    InvalidConfig,
    InvalidUtf8,
}

impl FsError {
    /// Routine name-resolution miss; callers are expected to branch on it.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound)
    }

    pub fn is_out_of_space(&self) -> bool {
        matches!(self, FsError::OutOfSpace | FsError::OutOfInodes)
    }
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            FsError::OutOfSpace => "no free data blocks",
            FsError::OutOfInodes => "no free inodes",
            FsError::InvalidIndex => "invalid slot index",
            FsError::NotFound => "no such file or directory",
            FsError::AlreadyExists => "name already exists",
            FsError::InvalidFileName => "invalid file name",
            FsError::InvalidConfig => "invalid file system configuration",
            FsError::InvalidUtf8 => "file content is not valid UTF-8",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FsError {}

pub type Result<T> = core::result::Result<T, FsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_space_covers_both_pools() {
        assert!(FsError::OutOfSpace.is_out_of_space());
        assert!(FsError::OutOfInodes.is_out_of_space());
        assert!(!FsError::NotFound.is_out_of_space());
        assert!(FsError::NotFound.is_not_found());
    }
}
