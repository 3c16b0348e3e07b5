//! CSV interchange: codec and import/export orchestration.
//!
//! CSV is the only externally-facing data format. The codec owns the
//! quoting/escaping grammar; the orchestrators drive file picking, decoding,
//! the merge-vs-replace decision and the share hand-off through caller-owned
//! collaborator traits.

pub mod csv;
mod export;
mod import;

pub use csv::{CSV_HEADERS, decode, encode};
pub use export::{CSV_MIME, ExportOutcome, ExportService, ShareSink, export_filename};
pub use import::{FilePicker, ImportChoice, ImportOutcome, ImportPrompt, ImportService};
