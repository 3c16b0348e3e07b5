//! Export orchestrator.
//!
//! Serializes the full collection and hands the bytes to an external sharing
//! facility. Fails fast when the store is empty; the share result is
//! reported, never retried.

use crate::io::csv;
use crate::store::RecordStore;
use crate::Result;
use chrono::{DateTime, Local};

/// MIME type of the interchange format.
pub const CSV_MIME: &str = "text/csv";

/// External sharing facility. Receives the encoded bytes, a suggested
/// filename and a MIME type; success or failure is reported upward once.
pub trait ShareSink {
    /// Delivers an export.
    fn share(&mut self, bytes: &[u8], filename: &str, mime: &str) -> Result<()>;
}

/// Terminal state of one export invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The store was empty; nothing was serialized.
    NothingToExport,
    /// The encoded collection was handed to the sink.
    Shared {
        /// Number of records exported.
        records: usize,
        /// Filename suggested to the sink.
        filename: String,
    },
}

/// Builds the export filename for the given moment, minute precision.
///
/// Repeated exports within the same minute collide; that resolution is
/// accepted.
#[must_use]
pub fn export_filename(now: DateTime<Local>) -> String {
    format!("geocampo-{}.csv", now.format("%Y-%m-%d_%H-%M"))
}

/// Orchestrates CSV export from a [`RecordStore`].
#[derive(Debug, Default)]
pub struct ExportService;

impl ExportService {
    /// Creates the orchestrator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Runs one export: encode everything, stamp a filename, share.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the sink reports failure.
    pub fn run(&self, store: &RecordStore, sink: &mut dyn ShareSink) -> Result<ExportOutcome> {
        self.run_at(store, sink, Local::now())
    }

    /// Same as [`run`](Self::run) with an explicit clock, for tests.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the sink reports failure.
    pub fn run_at(
        &self,
        store: &RecordStore,
        sink: &mut dyn ShareSink,
        now: DateTime<Local>,
    ) -> Result<ExportOutcome> {
        if store.is_empty() {
            tracing::debug!("export skipped, store is empty");
            return Ok(ExportOutcome::NothingToExport);
        }

        let text = csv::encode(store.records())?;
        let filename = export_filename(now);
        sink.share(text.as_bytes(), &filename, CSV_MIME)?;
        tracing::info!(records = store.len(), filename, "export shared");
        Ok(ExportOutcome::Shared {
            records: store.len(),
            filename,
        })
    }
}
