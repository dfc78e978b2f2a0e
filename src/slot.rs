//! Management of the data pool and the inode pool.
//! Both pools are fixed-length slot arrays allocated first-fit from index 0;
//! a freed slot becomes the next candidate for reuse.

use alloc::vec::Vec;

use crate::error::{FsError, Result};
use crate::structs::{Block, BlockId, Inode, InodeId};

/// Fixed-capacity array of optional slots.
/// `exhausted` is the error reported when no slot is free, so each pool can
/// report its own flavour of running out.
#[derive(Debug, Clone)]
struct Pool<T> {
    slots: Vec<Option<T>>,
    used: usize,
    exhausted: FsError,
}

impl<T> Pool<T> {
    fn new(capacity: usize, exhausted: FsError) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            used: 0,
            exhausted,
        }
    }

    /// Take the first empty slot.
    fn alloc(&mut self, item: T) -> Result<usize> {
        let index = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(self.exhausted)?;
        self.slots[index] = Some(item);
        self.used += 1;
        Ok(index)
    }

    /// Empty a live slot and hand its payload back.
    fn free(&mut self, index: usize) -> Result<T> {
        let item = self
            .slots
            .get_mut(index)
            .and_then(Option::take)
            .ok_or(FsError::InvalidIndex)?;
        self.used -= 1;
        Ok(item)
    }

    fn get(&self, index: usize) -> Result<&T> {
        self.slots
            .get(index)
            .and_then(Option::as_ref)
            .ok_or(FsError::InvalidIndex)
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        self.slots
            .get_mut(index)
            .and_then(Option::as_mut)
            .ok_or(FsError::InvalidIndex)
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn free_slots(&self) -> usize {
        self.slots.len() - self.used
    }
}

#[derive(Debug, Clone)]
pub struct SlotStore {
    data: Pool<Block>,
    inodes: Pool<Inode>,
}

impl SlotStore {
    pub fn new(data_capacity: usize, inode_capacity: usize) -> Self {
        Self {
            data: Pool::new(data_capacity, FsError::OutOfSpace),
            inodes: Pool::new(inode_capacity, FsError::OutOfInodes),
        }
    }

    pub fn alloc_data(&mut self, block: Block) -> Result<BlockId> {
        let block_id = self.data.alloc(block)?;
        log::trace!("[slot] data block {} allocated", block_id);
        Ok(block_id)
    }

    /// Fails with `InvalidIndex` for an index past the pool or a slot that is already free.
    pub fn free_data(&mut self, block_id: BlockId) -> Result<Block> {
        let block = self.data.free(block_id)?;
        log::trace!("[slot] data block {} freed", block_id);
        Ok(block)
    }

    /// Stores the inode and stamps it with the slot index it landed in.
    pub fn alloc_inode(&mut self, inode: Inode) -> Result<InodeId> {
        let inode_id = self.inodes.alloc(inode)?;
        self.inodes.get_mut(inode_id)?.id = inode_id;
        log::trace!("[slot] inode {} allocated", inode_id);
        Ok(inode_id)
    }

    pub fn free_inode(&mut self, inode_id: InodeId) -> Result<Inode> {
        let inode = self.inodes.free(inode_id)?;
        log::trace!("[slot] inode {} freed", inode_id);
        Ok(inode)
    }

    pub fn data(&self, block_id: BlockId) -> Result<&Block> {
        self.data.get(block_id)
    }

    pub fn data_mut(&mut self, block_id: BlockId) -> Result<&mut Block> {
        self.data.get_mut(block_id)
    }

    pub fn inode(&self, inode_id: InodeId) -> Result<&Inode> {
        self.inodes.get(inode_id)
    }

    pub fn inode_mut(&mut self, inode_id: InodeId) -> Result<&mut Inode> {
        self.inodes.get_mut(inode_id)
    }

    pub fn data_capacity(&self) -> usize {
        self.data.capacity()
    }

    pub fn inode_capacity(&self) -> usize {
        self.inodes.capacity()
    }

    pub fn free_data_slots(&self) -> usize {
        self.data.free_slots()
    }

    pub fn free_inode_slots(&self) -> usize {
        self.inodes.free_slots()
    }
}
