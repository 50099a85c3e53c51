//! JSON-file backed store.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use dashmap::DashMap;

use super::KeyValueStore;

/// Store persisted as a flat JSON object. Every mutation rewrites the file.
///
/// Write failures are logged and swallowed; the in-memory view stays current.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    data: DashMap<String, String>,
}

impl FileStore {
    /// Open `path`, loading existing entries. A missing file starts empty.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = DashMap::new();

        if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            let map: BTreeMap<String, String> = serde_json::from_reader(reader)?;
            for (k, v) in map {
                data.insert(k, v);
            }
            tracing::debug!(path = %path.display(), entries = data.len(), "Loaded storage file");
        }

        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let map: BTreeMap<String, String> = self
            .data
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();

        let writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(writer, &map)?;
        Ok(())
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to write storage file");
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.get(key).map(|r| r.value().clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.data.insert(key.to_string(), value.to_string());
        self.persist();
    }

    fn remove(&self, key: &str) {
        if self.data.remove(key).is_some() {
            self.persist();
        }
    }
}
