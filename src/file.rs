//! Encapsulation of file content operations.
//! Content is cut into `block_size` chunks, one data slot per chunk.

use alloc::vec::Vec;

use crate::error::{FsError, Result};
use crate::inode::free_blocks;
use crate::slot::SlotStore;
use crate::structs::*;

/// Number of chunks `len` bytes occupy. Empty content takes none.
pub fn blocks_needed(len: usize, block_size: usize) -> usize {
    len.div_ceil(block_size)
}

/// Reads the whole content of a file by concatenating its chunks in order.
pub fn fread(store: &SlotStore, inode_id: InodeId) -> Result<Vec<u8>> {
    let inode = store.inode(inode_id)?;
    if !inode.is_file() {
        return Err(FsError::NotFound);
    }
    let mut content = Vec::new();
    for &block_id in &inode.blocks {
        let chunk = store.data(block_id)?.as_chunk().ok_or(FsError::InvalidIndex)?;
        content.extend_from_slice(chunk);
    }
    Ok(content)
}

/// Replaces the whole content of a file.
/// Capacity is checked up front, counting the blocks about to be released,
/// so on `OutOfSpace` the old content is still in place.
/// Returns the number of blocks the file now holds.
pub fn fwrite(
    store: &mut SlotStore,
    inode_id: InodeId,
    content: &[u8],
    block_size: usize,
) -> Result<usize> {
    let inode = store.inode(inode_id)?;
    if !inode.is_file() {
        return Err(FsError::NotFound);
    }
    let held = inode.blocks.len();
    let needed = blocks_needed(content.len(), block_size);
    if needed > store.free_data_slots() + held {
        return Err(FsError::OutOfSpace);
    }

    free_blocks(store, inode_id)?;
    let mut blocks = Vec::with_capacity(needed);
    for chunk in content.chunks(block_size) {
        blocks.push(store.alloc_data(Block::Chunk(chunk.to_vec()))?);
    }
    store.inode_mut(inode_id)?.blocks = blocks;
    Ok(needed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_needed() {
        assert_eq!(blocks_needed(0, 10), 0);
        assert_eq!(blocks_needed(1, 10), 1);
        assert_eq!(blocks_needed(10, 10), 1);
        assert_eq!(blocks_needed(11, 10), 2);
        assert_eq!(blocks_needed(40, 10), 4);
    }
}
