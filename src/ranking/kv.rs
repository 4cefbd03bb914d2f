//! Key-value storage abstraction for ranking persistence
//!
//! The ranking store depends on this trait rather than any concrete
//! backend. Values are JSON strings under string keys. Two backends are
//! provided: an in-memory map for tests and ephemeral play, and a
//! single-file store whose on-disk representation is one JSON object
//! holding the whole key space, rewritten atomically on every mutation.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// String-keyed JSON blob storage.
///
/// `get` of a missing key is `None`; `remove` of a missing key succeeds.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// In-memory backend
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed backend: the entire key space lives in one JSON object.
///
/// Mutations rewrite the file through a temp-file + rename so readers never
/// observe a partially written state.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open (or create) the store at `path`.
    ///
    /// A missing file starts empty; a corrupt file also degrades to empty
    /// rather than failing, matching the read semantics of the ranking
    /// layer.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err),
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> io::Result<()> {
        let raw = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("tui-pairs-{}-{}-{}.json", tag, std::process::id(), nanos))
    }

    #[test]
    fn test_memory_store_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a"), None);

        store.set("a", "1").unwrap();
        assert_eq!(store.get("a"), Some("1".to_string()));

        store.remove("a").unwrap();
        assert_eq!(store.get("a"), None);
        // Removing a missing key succeeds.
        store.remove("a").unwrap();
    }

    #[test]
    fn test_file_store_roundtrip_across_reopen() {
        let path = temp_path("roundtrip");

        {
            let mut store = FileStore::open(&path).unwrap();
            store.set("rankings-16", "[]").unwrap();
            store.set("other", "{\"x\":1}").unwrap();
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("rankings-16"), Some("[]".to_string()));
        assert_eq!(store.get("other"), Some("{\"x\":1}".to_string()));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_corrupt_file_degrades_to_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json at all {{{").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("rankings-16"), None);

        let _ = fs::remove_file(&path);
    }
}
