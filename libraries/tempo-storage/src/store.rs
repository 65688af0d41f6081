//! Key-value store backends
//!
//! - [`MemoryStore`]: process-local map, for tests and ephemeral sessions
//! - [`JsonFileStore`]: one JSON object on disk, rewritten on every set

use crate::error::{Result, StorageError};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tempo_core::KeyValueStore;
use tracing::debug;

/// In-memory key-value store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> tempo_core::Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> tempo_core::Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// JSON file backed key-value store
///
/// The whole file is one JSON object keyed by store key. It is read once on
/// open and rewritten on every `set`; last write wins.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the store at `path`
    ///
    /// A missing or empty file opens as an empty store. The parent directory
    /// is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let values = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Map::new(),
            Ok(text) => match serde_json::from_str::<Value>(&text)? {
                Value::Object(map) => map,
                other => {
                    return Err(StorageError::Corrupt {
                        key: path.display().to_string(),
                        reason: format!("expected an object, found {}", kind_of(&other)),
                    })
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), keys = values.len(), "Opened state file");
        Ok(Self { path, values })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, values: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let bytes = serde_json::to_vec_pretty(values)?;
        std::fs::write(&self.path, bytes)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> tempo_core::Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    /// Memory only changes once the file write succeeded
    fn set(&mut self, key: &str, value: Value) -> tempo_core::Result<()> {
        let mut values = self.values.clone();
        values.insert(key.to_string(), value);
        self.write(&values)?;
        self.values = values;
        Ok(())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
