//! JSON-file backend.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::{CacheError, KeyValueStore};

/// Key-value store persisted as a single JSON object on disk.
///
/// Every key maps to the UTF-8 text of its value. The whole file is read on
/// each access and rewritten on each change; writes go to a sibling temp file
/// that is then renamed over the existing one, so a crash never leaves a torn
/// file behind. A missing file reads as an empty store; a file that is not
/// valid JSON fails reads and is replaced by the next write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open a store at `path`, creating parent directories as needed.
    ///
    /// The file itself is created lazily on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                CacheError::OpenError(format!("{}: {}", parent.display(), e))
            })?;
        }
        if path.is_dir() {
            return Err(CacheError::OpenError(format!(
                "{} is a directory",
                path.display()
            )));
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, CacheError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Sibling temp file named after the full file name (`cart.json.tmp`).
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec_pretty(entries)?;
        let tmp = self.temp_path();
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        tracing::trace!(path = %self.path.display(), keys = entries.len(), "file store written");
        Ok(())
    }

    fn modify<F>(&self, f: F) -> Result<(), CacheError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| CacheError::StoreError("file store lock poisoned".to_string()))?;
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(CacheError::SerializeError(e)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "store file is not valid JSON, starting over"
                );
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        f(&mut entries);
        self.write_all(&entries)
    }
}

impl KeyValueStore for FileStore {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.read_all()?.remove(key).map(String::into_bytes))
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let text = std::str::from_utf8(value)
            .map_err(|e| CacheError::StoreError(format!("value for {} is not UTF-8: {}", key, e)))?
            .to_string();
        self.modify(|entries| {
            entries.insert(key.to_string(), text);
        })
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.modify(|entries| {
            entries.remove(key);
        })
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.read_all()?.into_keys().collect())
    }
}
