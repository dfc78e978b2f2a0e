use crate::error::{FsError, Result};

pub const DEFAULT_TOTAL_BLOCKS: usize = 100;
pub const DEFAULT_BLOCK_SIZE: usize = 10;
pub const INODE_CAPACITY: usize = 10; // Inode pool size carved out of the total block count

pub const ROOT_INODE_ID: usize = 0; // Inode ID for the root directory
pub const ROOT_BLOCK_ID: usize = 0; // Data block holding the root directory table

pub const MAX_FILE_NAME_LEN: usize = 60; // Bytes; keeps listings and rendered paths readable
pub const DOT_NAME: &str = ".";
pub const DOTDOT_NAME: &str = "..";

/// Construction parameters of a [`FileSystem`](crate::FileSystem).
/// The data pool gets whatever is left of `total_blocks` after the inode pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsConfig {
    pub total_blocks: usize,
    pub block_size: usize,
    pub inode_capacity: usize,
}

impl FsConfig {
    pub const fn new(total_blocks: usize, block_size: usize) -> Self {
        Self {
            total_blocks,
            block_size,
            inode_capacity: INODE_CAPACITY,
        }
    }

    pub const fn with_inode_capacity(mut self, inode_capacity: usize) -> Self {
        self.inode_capacity = inode_capacity;
        self
    }

    pub const fn data_capacity(&self) -> usize {
        self.total_blocks.saturating_sub(self.inode_capacity)
    }

    /// Both pools must hold at least the root directory, and chunking needs a non-zero block size.
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 || self.inode_capacity == 0 {
            return Err(FsError::InvalidConfig);
        }
        if self.total_blocks <= self.inode_capacity {
            return Err(FsError::InvalidConfig);
        }
        Ok(())
    }
}

impl Default for FsConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_BLOCKS, DEFAULT_BLOCK_SIZE)
    }
}
