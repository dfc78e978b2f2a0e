//! Directory tables and the lookups the engine performs through them.

use alloc::vec::Vec;

use crate::config::*;
use crate::error::{FsError, Result};
use crate::slot::SlotStore;
use crate::structs::*;

/// Insertion-ordered name to inode table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    entries: Vec<DirEntry>,
}

impl Directory {
    /// A table already holding `.` and `..`.
    pub fn new(self_id: InodeId, parent_id: InodeId) -> Self {
        let mut dir = Self::default();
        dir.add(DOT_NAME, self_id);
        dir.add(DOTDOT_NAME, parent_id);
        dir
    }

    /// Last write wins: an existing name keeps its position and gets the new inode.
    pub fn add(&mut self, name: &str, inode_id: InodeId) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.inode_id = inode_id,
            None => self.entries.push(DirEntry::new(name, inode_id)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<InodeId> {
        let pos = self.entries.iter().position(|e| e.name == name)?;
        Some(self.entries.remove(pos).inode_id)
    }

    pub fn get(&self, name: &str) -> Option<InodeId> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.inode_id)
    }

    pub fn list(&self) -> &[DirEntry] {
        &self.entries
    }

    /// Entries other than `.` and `..`.
    pub fn children(&self) -> impl Iterator<Item = &DirEntry> {
        self.entries.iter().filter(|e| !e.is_dot())
    }

    /// Number of entries, not counting `.` and `..`.
    pub fn len(&self) -> usize {
        self.children().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Rejects names that cannot become a new entry.
pub fn check_name(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > MAX_FILE_NAME_LEN || name.contains('/') {
        return Err(FsError::InvalidFileName);
    }
    if name == DOT_NAME || name == DOTDOT_NAME {
        return Err(FsError::InvalidFileName);
    }
    Ok(())
}

/// The table owned by directory inode `dir_id`.
pub fn dir_table(store: &SlotStore, dir_id: InodeId) -> Result<&Directory> {
    let inode = store.inode(dir_id)?;
    if !inode.is_dir() {
        return Err(FsError::NotFound);
    }
    let block_id = *inode.blocks.first().ok_or(FsError::InvalidIndex)?;
    store.data(block_id)?.as_dir().ok_or(FsError::InvalidIndex)
}

pub fn dir_table_mut(store: &mut SlotStore, dir_id: InodeId) -> Result<&mut Directory> {
    let inode = store.inode(dir_id)?;
    if !inode.is_dir() {
        return Err(FsError::NotFound);
    }
    let block_id = *inode.blocks.first().ok_or(FsError::InvalidIndex)?;
    store.data_mut(block_id)?.as_dir_mut().ok_or(FsError::InvalidIndex)
}

/// Query the inode of `name` in directory `dir_id`.
pub fn dir_lookup(store: &SlotStore, dir_id: InodeId, name: &str) -> Result<InodeId> {
    dir_table(store, dir_id)?.get(name).ok_or(FsError::NotFound)
}

/// Query `name` in `dir_id` and require it to be of kind `ftype`.
/// A name of the wrong kind is reported the same as a missing one.
pub fn dir_lookup_typed(
    store: &SlotStore,
    dir_id: InodeId,
    name: &str,
    ftype: FileType,
) -> Result<InodeId> {
    let inode_id = dir_lookup(store, dir_id, name)?;
    if store.inode(inode_id)?.ftype != ftype {
        return Err(FsError::NotFound);
    }
    Ok(inode_id)
}

/// Add a new entry to `dir_id`. Fails if the name is taken.
pub fn dir_add_entry(
    store: &mut SlotStore,
    dir_id: InodeId,
    name: &str,
    inode_id: InodeId,
) -> Result<()> {
    let dir = dir_table_mut(store, dir_id)?;
    if dir.get(name).is_some() {
        return Err(FsError::AlreadyExists);
    }
    dir.add(name, inode_id);
    Ok(())
}

pub fn dir_rm_entry(store: &mut SlotStore, dir_id: InodeId, name: &str) -> Result<InodeId> {
    dir_table_mut(store, dir_id)?
        .remove(name)
        .ok_or(FsError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    fn names(dir: &Directory) -> Vec<String> {
        dir.list().iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn test_dot_entries() {
        let dir = Directory::new(3, 1);
        assert_eq!(names(&dir), [".", ".."]);
        assert_eq!(dir.get("."), Some(3));
        assert_eq!(dir.get(".."), Some(1));
        assert!(dir.is_empty());
    }

    #[test]
    fn test_insertion_order_and_overwrite() {
        let mut dir = Directory::new(0, 0);
        dir.add("a", 1);
        dir.add("b", 2);
        dir.add("c", 3);
        assert_eq!(names(&dir), [".", "..", "a", "b", "c"]);

        dir.add("a", 7);
        assert_eq!(names(&dir), [".", "..", "a", "b", "c"]);
        assert_eq!(dir.get("a"), Some(7));
        assert_eq!(dir.len(), 3);
    }

    #[test]
    fn test_remove() {
        let mut dir = Directory::new(0, 0);
        dir.add("a", 1);
        dir.add("b", 2);
        assert_eq!(dir.remove("a"), Some(1));
        assert_eq!(dir.remove("a"), None);
        assert_eq!(dir.get("a"), None);
        assert_eq!(names(&dir), [".", "..", "b"]);
    }

    #[test]
    fn test_check_name() {
        assert!(check_name("notes.txt").is_ok());
        assert_eq!(check_name(""), Err(FsError::InvalidFileName));
        assert_eq!(check_name("."), Err(FsError::InvalidFileName));
        assert_eq!(check_name(".."), Err(FsError::InvalidFileName));
        assert_eq!(check_name("a/b"), Err(FsError::InvalidFileName));
        assert!(check_name(&"x".repeat(MAX_FILE_NAME_LEN)).is_ok());
        let long = "x".repeat(MAX_FILE_NAME_LEN + 1);
        assert_eq!(check_name(&long), Err(FsError::InvalidFileName));
    }
}
