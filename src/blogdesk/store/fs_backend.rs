use super::backend::{StorageBackend, StorageKey};
use crate::error::{BlogError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File-backed storage: one `<key>.json` file per key inside a data
/// directory.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    /// Opens (and creates, if needed) the data directory.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.exists() {
            fs::create_dir_all(&root).map_err(BlogError::Io)?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn item_path(&self, key: StorageKey) -> PathBuf {
        self.root.join(format!("{}.json", key.as_str()))
    }
}

impl StorageBackend for FsBackend {
    fn is_available(&self) -> bool {
        self.root.is_dir()
    }

    fn get_item(&self, key: StorageKey) -> Result<Option<String>> {
        match fs::read_to_string(self.item_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BlogError::Io(e)),
        }
    }

    fn set_item(&self, key: StorageKey, value: &str) -> Result<()> {
        let target = self.item_path(key);

        // Atomic write
        let tmp = self
            .root
            .join(format!(".{}-{}.tmp", key.as_str(), Uuid::new_v4()));
        fs::write(&tmp, value).map_err(BlogError::Io)?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(BlogError::Io(e));
        }
        Ok(())
    }

    fn remove_item(&self, key: StorageKey) -> Result<()> {
        match fs::remove_file(self.item_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BlogError::Io(e)),
        }
    }
}
