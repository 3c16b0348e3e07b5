//! JSON-document persistence backend.
//!
//! Stores the collection as one JSON array in a single file, the durable
//! "key" of the system. Compatible with documents written by earlier
//! releases (camelCase field names, `area: null` for absent areas).

use crate::models::Record;
use crate::storage::RecordPersistence;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed persistence for the record collection.
pub struct JsonFileBackend {
    /// Path of the JSON document.
    path: PathBuf,
}

impl JsonFileBackend {
    /// Creates a backend for the given document path, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn with_create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::OperationFailed {
                operation: "create_data_dir".to_string(),
                cause: e.to_string(),
            })?;
        }
        Ok(Self { path })
    }

    /// Returns the document path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordPersistence for JsonFileBackend {
    fn load(&self) -> Result<Vec<Record>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(Error::OperationFailed {
                    operation: "load_records".to_string(),
                    cause: e.to_string(),
                });
            },
        };
        serde_json::from_str(&raw).map_err(|e| Error::OperationFailed {
            operation: "parse_records".to_string(),
            cause: e.to_string(),
        })
    }

    fn save(&mut self, records: &[Record]) -> Result<()> {
        let json = serde_json::to_string(records).map_err(|e| Error::OperationFailed {
            operation: "serialize_records".to_string(),
            cause: e.to_string(),
        })?;

        // Write to a sibling temp file and rename, so a failed write never
        // truncates the previously persisted document.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| Error::OperationFailed {
            operation: "write_records".to_string(),
            cause: e.to_string(),
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| Error::OperationFailed {
            operation: "commit_records".to_string(),
            cause: e.to_string(),
        })
    }
}
