//! Rendering the absolute path of a directory.
//! Directories only know their parent through `..`, so the path is rebuilt
//! bottom-up by asking each parent which of its entries points back down.

use alloc::string::String;
use alloc::vec::Vec;

use crate::directory::{dir_lookup, dir_table};
use crate::error::{FsError, Result};
use crate::slot::SlotStore;
use crate::structs::InodeId;
use crate::DOTDOT_NAME;

/// Absolute path of directory `dir_id`, `/` for the root.
pub fn dir_path(store: &SlotStore, dir_id: InodeId) -> Result<String> {
    let mut components: Vec<&str> = Vec::new();
    let mut current = dir_id;

    // Depth is bounded by the number of live inodes; a longer walk means a `..` cycle.
    for _ in 0..=store.inode_capacity() {
        let parent = dir_lookup(store, current, DOTDOT_NAME)?;
        if parent == current {
            let mut path = String::new();
            for name in components.iter().rev() {
                path.push('/');
                path.push_str(name);
            }
            if path.is_empty() {
                path.push('/');
            }
            return Ok(path);
        }
        let name = dir_table(store, parent)?
            .children()
            .find(|e| e.inode_id == current)
            .map(|e| e.name.as_str())
            .ok_or(FsError::NotFound)?;
        components.push(name);
        current = parent;
    }

    Err(FsError::InvalidIndex)
}
