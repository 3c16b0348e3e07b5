//! CLI command implementations.
//!
//! One module per command family; `main.rs` parses arguments and dispatches
//! here. Commands open the store from the resolved configuration, run one
//! operation and print a short human summary to stdout (logs go to stderr).

mod capture;
mod records;
mod stats;
mod transfer;

pub use capture::{CaptureArgs, cmd_capture};
pub use records::{EditArgs, cmd_delete, cmd_edit, cmd_list};
pub use stats::cmd_stats;
pub use transfer::{ImportMode, cmd_export, cmd_import};

use crate::config::GeocampoConfig;
use crate::photos::DirPhotoStore;
use crate::storage::JsonFileBackend;
use crate::store::RecordStore;
use crate::Result;

/// Opens the record store for the configured data directory.
pub fn open_store(config: &GeocampoConfig) -> Result<RecordStore> {
    let persistence = JsonFileBackend::with_create(config.records_path())?;
    let photos = DirPhotoStore::with_create(config.photos_dir())?;
    RecordStore::open(Box::new(persistence), Box::new(photos))
}

/// Reads a yes/no answer from stdin. Anything but `y`/`yes`
/// (case-insensitive) is a no.
pub(crate) fn ask_yes_no(question: &str) -> bool {
    use std::io::Write;
    print!("{question} [y/N] ");
    let _ = std::io::stdout().flush();
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
