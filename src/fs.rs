use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::{self, Write};

use crate::config::*;
use crate::directory::*;
use crate::error::{FsError, Result};
use crate::file::{blocks_needed, fread, fwrite};
use crate::inode::{alloc_dir_inode, alloc_inode, free_inode, get_inode};
use crate::path::dir_path;
use crate::slot::SlotStore;
use crate::structs::*;
use crate::time::Clock;

/// A file system handle shared between threads; one lock guards the whole engine.
pub type SharedFileSystem = Arc<spin::Mutex<FileSystem>>;

/// In-memory file system with a single current-directory cursor.
///
/// Every name is resolved inside the current directory only. Internally each
/// operation works on an explicit directory inode; the public methods pass the
/// cursor in.
pub struct FileSystem {
    store: SlotStore,
    config: FsConfig,
    root: InodeId,
    cwd: InodeId,
    clock: Box<dyn Clock>,
}

impl fmt::Debug for FileSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSystem")
            .field("config", &self.config)
            .field("root", &self.root)
            .field("cwd", &self.cwd)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl FileSystem {
    /// `total_blocks` slots split into a fixed inode pool and a data pool, timestamps from the wall clock.
    #[cfg(feature = "std")]
    pub fn new(total_blocks: usize, block_size: usize) -> Result<Self> {
        Self::format(FsConfig::new(total_blocks, block_size))
    }

    #[cfg(feature = "std")]
    pub fn format(config: FsConfig) -> Result<Self> {
        Self::with_clock(config, Box::new(crate::time::SystemClock))
    }

    /// Builds the pools and the root directory (`.` and `..` both pointing at itself).
    pub fn with_clock(config: FsConfig, clock: Box<dyn Clock>) -> Result<Self> {
        config.validate()?;
        let mut store = SlotStore::new(config.data_capacity(), config.inode_capacity);
        let root = alloc_dir_inode(&mut store, None, clock.now())?;
        debug_assert_eq!(root, ROOT_INODE_ID);
        log::debug!(
            "[fs] formatted: {} data blocks of {} bytes, {} inodes",
            config.data_capacity(),
            config.block_size,
            config.inode_capacity
        );
        Ok(Self {
            store,
            config,
            root,
            cwd: root,
            clock,
        })
    }

    pub fn into_shared(self) -> SharedFileSystem {
        Arc::new(spin::Mutex::new(self))
    }

    // Following methods resolve names in the current directory only.

    /// Creates a regular file holding `content`. Returns its inode id.
    pub fn create_file(&mut self, name: &str, content: impl AsRef<[u8]>) -> Result<InodeId> {
        self.create_file_in(self.cwd, name, content.as_ref())
    }

    /// Creates an empty directory whose `..` is the current directory.
    pub fn create_directory(&mut self, name: &str) -> Result<InodeId> {
        self.create_directory_in(self.cwd, name)
    }

    /// Moves the cursor into `name`, which may be `.` or `..`.
    pub fn change_directory(&mut self, name: &str) -> Result<()> {
        let target = dir_lookup_typed(&self.store, self.cwd, name, FileType::Directory)?;
        log::debug!("[fs] cd '{}' (inode {} -> {})", name, self.cwd, target);
        self.cwd = target;
        Ok(())
    }

    /// Entries of the current directory in insertion order, `.` and `..` first.
    pub fn list_directory(&self) -> Result<Vec<DirEntry>> {
        Ok(dir_table(&self.store, self.cwd)?.list().to_vec())
    }

    pub fn display_file_content(&self, name: &str) -> Result<Vec<u8>> {
        let inode_id = dir_lookup_typed(&self.store, self.cwd, name, FileType::Regular)?;
        fread(&self.store, inode_id)
    }

    pub fn read_to_string(&self, name: &str) -> Result<String> {
        let content = self.display_file_content(name)?;
        String::from_utf8(content).map_err(|_| FsError::InvalidUtf8)
    }

    /// Replaces the whole content of `name` and refreshes its update time.
    pub fn write_file(&mut self, name: &str, content: impl AsRef<[u8]>) -> Result<()> {
        let inode_id = dir_lookup_typed(&self.store, self.cwd, name, FileType::Regular)?;
        let blocks = fwrite(&mut self.store, inode_id, content.as_ref(), self.config.block_size)?;
        self.store.inode_mut(inode_id)?.updated_at = self.clock.now();
        log::debug!("[fs] file '{}' rewritten with {} data blocks", name, blocks);
        Ok(())
    }

    /// Moves file `file_name` into the sibling directory `dest_dir`.
    /// The inode and its blocks are kept as they are.
    pub fn move_file(&mut self, file_name: &str, dest_dir: &str) -> Result<()> {
        let file_id = dir_lookup_typed(&self.store, self.cwd, file_name, FileType::Regular)?;
        let dest_id = dir_lookup_typed(&self.store, self.cwd, dest_dir, FileType::Directory)?;
        if dir_table(&self.store, dest_id)?.get(file_name).is_some() {
            return Err(FsError::AlreadyExists);
        }
        dir_rm_entry(&mut self.store, self.cwd, file_name)?;
        dir_add_entry(&mut self.store, dest_id, file_name, file_id)?;
        log::debug!("[fs] file '{}' moved into '{}'", file_name, dest_dir);
        Ok(())
    }

    pub fn delete_file(&mut self, name: &str) -> Result<()> {
        self.delete_file_in(self.cwd, name)
    }

    /// Deletes `name` and everything below it. The cursor does not move.
    pub fn delete_directory(&mut self, name: &str) -> Result<()> {
        self.delete_directory_in(self.cwd, name)
    }

    /// Metadata of `name` in the current directory.
    pub fn stat(&self, name: &str) -> Result<Inode> {
        let inode_id = dir_lookup(&self.store, self.cwd, name)?;
        get_inode(&self.store, inode_id).cloned()
    }

    pub fn current_dir(&self) -> InodeId {
        self.cwd
    }

    pub fn root_inode_id(&self) -> InodeId {
        self.root
    }

    pub fn current_path(&self) -> Result<String> {
        dir_path(&self.store, self.cwd)
    }

    pub fn config(&self) -> &FsConfig {
        &self.config
    }

    pub fn store(&self) -> &SlotStore {
        &self.store
    }

    pub fn free_data_slots(&self) -> usize {
        self.store.free_data_slots()
    }

    pub fn free_inode_slots(&self) -> usize {
        self.store.free_inode_slots()
    }

    /// Human readable summary of both pools and the cursor.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let data_cap = self.store.data_capacity();
        let inode_cap = self.store.inode_capacity();
        let _ = writeln!(out, "block size:  {}", self.config.block_size);
        let _ = writeln!(
            out,
            "data blocks: {}/{} used",
            data_cap - self.store.free_data_slots(),
            data_cap
        );
        let _ = writeln!(
            out,
            "inodes:      {}/{} used",
            inode_cap - self.store.free_inode_slots(),
            inode_cap
        );
        match self.current_path() {
            Ok(path) => {
                let _ = write!(out, "cwd:         {} (inode {})", path, self.cwd);
            }
            Err(e) => {
                let _ = write!(out, "cwd:         inode {} ({})", self.cwd, e);
            }
        }
        out
    }

    // Explicit-directory forms of the operations above.

    fn create_file_in(&mut self, dir: InodeId, name: &str, content: &[u8]) -> Result<InodeId> {
        check_name(name)?;
        if dir_table(&self.store, dir)?.get(name).is_some() {
            return Err(FsError::AlreadyExists);
        }
        if blocks_needed(content.len(), self.config.block_size) > self.store.free_data_slots() {
            return Err(FsError::OutOfSpace);
        }

        let inode_id = alloc_inode(&mut self.store, FileType::Regular, self.clock.now())?;
        let blocks = match fwrite(&mut self.store, inode_id, content, self.config.block_size) {
            Ok(blocks) => blocks,
            Err(e) => {
                free_inode(&mut self.store, inode_id)?;
                return Err(e);
            }
        };
        dir_add_entry(&mut self.store, dir, name, inode_id)?;
        log::debug!(
            "[fs] file '{}' created with inode {} and {} data blocks",
            name,
            inode_id,
            blocks
        );
        Ok(inode_id)
    }

    fn create_directory_in(&mut self, dir: InodeId, name: &str) -> Result<InodeId> {
        check_name(name)?;
        if dir_table(&self.store, dir)?.get(name).is_some() {
            return Err(FsError::AlreadyExists);
        }
        let inode_id = alloc_dir_inode(&mut self.store, Some(dir), self.clock.now())?;
        dir_add_entry(&mut self.store, dir, name, inode_id)?;
        log::debug!("[fs] directory '{}' created with inode {}", name, inode_id);
        Ok(inode_id)
    }

    fn delete_file_in(&mut self, dir: InodeId, name: &str) -> Result<()> {
        let inode_id = dir_lookup_typed(&self.store, dir, name, FileType::Regular)?;
        free_inode(&mut self.store, inode_id)?;
        dir_rm_entry(&mut self.store, dir, name)?;
        log::debug!("[fs] file '{}' (inode {}) deleted", name, inode_id);
        Ok(())
    }

    fn delete_directory_in(&mut self, dir: InodeId, name: &str) -> Result<()> {
        check_name(name)?;
        let target = dir_lookup_typed(&self.store, dir, name, FileType::Directory)?;

        // Post-order: empty the table, then release the directory itself.
        let children: Vec<DirEntry> = dir_table(&self.store, target)?.children().cloned().collect();
        for child in children {
            // A child whose inode cannot be read counts as unresolved, like a missing name.
            let result = match get_inode(&self.store, child.inode_id).map(|inode| inode.ftype) {
                Ok(FileType::Regular) => self.delete_file_in(target, &child.name),
                Ok(FileType::Directory) => self.delete_directory_in(target, &child.name),
                Err(_) => Err(FsError::NotFound),
            };
            match result {
                Ok(()) => {}
                Err(e) if e.is_not_found() => {
                    log::warn!("[fs] skipping '{}' in '{}': {}", child.name, name, e);
                }
                Err(e) => return Err(e),
            }
        }

        free_inode(&mut self.store, target)?;
        dir_rm_entry(&mut self.store, dir, name)?;
        log::debug!("[fs] directory '{}' (inode {}) deleted", name, target);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{ManualClock, Timestamp};

    fn test_fs() -> FileSystem {
        let clock = ManualClock::new(Timestamp::EPOCH);
        FileSystem::with_clock(FsConfig::default(), Box::new(clock)).unwrap()
    }

    fn names(fs: &FileSystem) -> Vec<String> {
        fs.list_directory().unwrap().into_iter().map(|e| e.name).collect()
    }

    #[test]
    fn test_delete_directory_skips_dangling_child() {
        let mut fs = test_fs();
        let d = fs.create_directory("d").unwrap();
        // Listed before the real files, so they are only reached if the walk goes on.
        dir_table_mut(&mut fs.store, d).unwrap().add("ghost", 9);
        fs.change_directory("d").unwrap();
        fs.create_file("a", "0123456789ab").unwrap();
        fs.create_file("b", "x").unwrap();
        fs.change_directory("..").unwrap();
        assert_eq!(fs.free_data_slots(), 85);

        fs.delete_directory("d").unwrap();
        assert_eq!(names(&fs), [".", ".."]);
        assert_eq!(fs.free_data_slots(), 89);
        assert_eq!(fs.free_inode_slots(), 9);
    }

    #[test]
    fn test_delete_directory_skips_dangling_child_in_subdirectory() {
        let mut fs = test_fs();
        fs.create_directory("d").unwrap();
        fs.change_directory("d").unwrap();
        let e = fs.create_directory("e").unwrap();
        fs.create_file("after", "kept going").unwrap();
        dir_table_mut(&mut fs.store, e).unwrap().add("ghost", 7);
        fs.change_directory("..").unwrap();

        fs.delete_directory("d").unwrap();
        assert_eq!(names(&fs), [".", ".."]);
        assert_eq!(fs.free_data_slots(), 89);
        assert_eq!(fs.free_inode_slots(), 9);
    }
}
