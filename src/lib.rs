//! # Geocampo
//!
//! Field inventory of geotagged structure records.
//!
//! Geocampo keeps an ordered collection of photographic field observations
//! (billboards, signs, screens) annotated with location, account and
//! dimensional metadata, and moves data in and out of the system through a
//! single CSV interchange format.
//!
//! ## Architecture
//!
//! - [`models`] — the record value type and its pure derivations (area,
//!   map URL, account mask)
//! - [`io`] — the CSV codec plus the import/export orchestrators
//! - [`storage`] — whole-collection durable persistence behind a trait
//! - [`store`] — the canonical most-recent-first record collection
//! - [`photos`] — the photo resource collaborator
//!
//! ## Example
//!
//! ```rust,ignore
//! use geocampo::{MemoryBackend, NullPhotoStore, RecordStore};
//!
//! let mut store = RecordStore::open(Box::new(MemoryBackend::new()), Box::new(NullPhotoStore))?;
//! store.create(record)?; // newest first
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use thiserror::Error as ThisError;

// Module declarations
pub mod capture;
pub mod cli;
pub mod config;
pub mod io;
pub mod models;
pub mod observability;
pub mod photos;
pub mod stats;
pub mod storage;
pub mod store;

// Re-exports for convenience
pub use capture::{CaptureRequest, CaptureService};
pub use config::GeocampoConfig;
pub use io::{
    ExportOutcome, ExportService, FilePicker, ImportChoice, ImportOutcome, ImportPrompt,
    ImportService, ShareSink,
};
pub use models::{Coordinates, Record, RecordId, RecordPatch, calc_area, mask_account};
pub use photos::{DirPhotoStore, NullPhotoStore, PhotoStore};
pub use stats::InventoryStats;
pub use storage::{JsonFileBackend, MemoryBackend, RecordPersistence};
pub use store::RecordStore;

/// Error type for geocampo operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Non-finite coordinates, malformed CLI arguments |
/// | `OperationFailed` | Storage read/write fails, photo copy fails, share sink fails |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - Coordinates are not finite at record construction
    /// - A caller hands an unusable argument to a service entry point
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - The durable document cannot be read, parsed or written
    /// - A photo resource cannot be copied to permanent storage
    /// - An import file cannot be read or a share sink rejects the export
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for geocampo operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns the current Unix timestamp in milliseconds.
///
/// Record identifiers are derived from this value (collision avoidance only,
/// not cryptographic). Falls back to 0 if the system clock is before the
/// Unix epoch.
#[must_use]
pub fn current_timestamp_millis() -> u128 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("latitude is NaN".to_string());
        assert_eq!(err.to_string(), "invalid input: latitude is NaN");

        let err = Error::OperationFailed {
            operation: "save_records".to_string(),
            cause: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "operation 'save_records' failed: disk full");
    }

    #[test]
    fn test_timestamp_is_reasonable() {
        // Anything after 2020-01-01 in milliseconds.
        assert!(current_timestamp_millis() > 1_577_836_800_000);
    }
}
