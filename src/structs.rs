use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::directory::Directory;
use crate::time::Timestamp;

/// Index of a slot in the inode pool.
pub type InodeId = usize;
/// Index of a slot in the data pool.
pub type BlockId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Regular,
    Directory,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Regular => f.write_str("file"),
            FileType::Directory => f.write_str("directory"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inode {
    pub id: InodeId,            // Slot index, assigned by the inode pool
    pub ftype: FileType,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,  // Refreshed only when file content is overwritten
    pub blocks: Vec<BlockId>,   // File: content chunks in order. Directory: exactly one table block.
}

impl Inode {
    /// A fresh inode with no blocks. `id` is filled in when the inode pool takes it.
    pub fn new(ftype: FileType, now: Timestamp) -> Self {
        Self {
            id: 0,
            ftype,
            created_at: now,
            updated_at: now,
            blocks: Vec::new(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.ftype == FileType::Directory
    }

    pub fn is_file(&self) -> bool {
        self.ftype == FileType::Regular
    }
}

impl fmt::Display for Inode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Inode({}, type={}, blocks={:?})", self.id, self.ftype, self.blocks)
    }
}

/// Payload of one data slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Chunk(Vec<u8>),
    Dir(Directory),
}

impl Block {
    pub fn as_chunk(&self) -> Option<&[u8]> {
        match self {
            Block::Chunk(bytes) => Some(bytes),
            Block::Dir(_) => None,
        }
    }

    pub fn as_dir(&self) -> Option<&Directory> {
        match self {
            Block::Dir(dir) => Some(dir),
            Block::Chunk(_) => None,
        }
    }

    pub fn as_dir_mut(&mut self) -> Option<&mut Directory> {
        match self {
            Block::Dir(dir) => Some(dir),
            Block::Chunk(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub inode_id: InodeId,
}

impl DirEntry {
    pub fn new(name: &str, inode_id: InodeId) -> Self {
        Self {
            name: String::from(name),
            inode_id,
        }
    }

    pub fn is_dot(&self) -> bool {
        self.name == crate::DOT_NAME || self.name == crate::DOTDOT_NAME
    }
}

impl fmt::Display for DirEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> inode {}", self.name, self.inode_id)
    }
}
