//! Muon-mem is a tiny in-memory file system in the spirit of Muon.
//! Nothing touches real storage: two fixed slot pools stand in for the disk.
//! For simplicity, no support for permissions, links, or multi-component paths.
//!
//! Layout of the simulated disk:
//! - Inode pool (fixed at 10 slots by default)
//! - Data pool (the remaining blocks), each slot holding either a file chunk
//!   or one directory table
//!
//! Layers (from bottom to top):
//! 1. Slot: first-fit allocation of data blocks and inodes.
//! 2. Inode: inode lifecycle, block ownership.
//! 3. Directory/Path: name tables with `.` and `..`, path rendering.
//! 4. File: chunked content read and overwrite.
//! 5. FileSystem: the user-facing operations around a current-directory cursor.
//!
//! The crate logs through the `log` facade and never installs a logger itself.

#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate alloc;

mod config;
mod error;
mod time;
mod structs;
mod slot;
mod inode;
mod directory;
mod path;
mod file;
mod fs;

pub use config::*;
pub use error::FsError as Error;
pub use error::Result;
pub use time::*;
pub use structs::*;
pub use slot::SlotStore;
pub use directory::Directory;
pub use fs::*;
