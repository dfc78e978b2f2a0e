//! Inode lifecycle over the slot store.

use alloc::vec::Vec;

use crate::directory::Directory;
use crate::error::{FsError, Result};
use crate::slot::SlotStore;
use crate::structs::*;
use crate::time::Timestamp;

pub fn get_inode(store: &SlotStore, inode_id: InodeId) -> Result<&Inode> {
    store.inode(inode_id)
}

/// Allocates a blockless inode of kind `ftype`.
pub fn alloc_inode(store: &mut SlotStore, ftype: FileType, now: Timestamp) -> Result<InodeId> {
    store.alloc_inode(Inode::new(ftype, now))
}

/// Allocates a directory inode together with its table block.
/// `parent` of `None` makes the directory its own parent (the root).
/// Nothing is left allocated if either pool is full.
pub fn alloc_dir_inode(
    store: &mut SlotStore,
    parent: Option<InodeId>,
    now: Timestamp,
) -> Result<InodeId> {
    if store.free_data_slots() == 0 {
        return Err(FsError::OutOfSpace);
    }
    let inode_id = alloc_inode(store, FileType::Directory, now)?;
    let table = Directory::new(inode_id, parent.unwrap_or(inode_id));
    let block_id = store.alloc_data(Block::Dir(table))?;
    store.inode_mut(inode_id)?.blocks.push(block_id);
    Ok(inode_id)
}

/// Frees every data block owned by the inode, leaving its block list empty.
/// Returns the ids that were released.
pub fn free_blocks(store: &mut SlotStore, inode_id: InodeId) -> Result<Vec<BlockId>> {
    let blocks = core::mem::take(&mut store.inode_mut(inode_id)?.blocks);
    for &block_id in &blocks {
        store.free_data(block_id)?;
    }
    Ok(blocks)
}

/// Frees the inode's blocks, then the inode slot itself.
pub fn free_inode(store: &mut SlotStore, inode_id: InodeId) -> Result<()> {
    free_blocks(store, inode_id)?;
    store.free_inode(inode_id)?;
    Ok(())
}
