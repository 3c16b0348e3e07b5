//! `import` and `export` commands: CSV interchange with other installations.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::config::GeocampoConfig;
use crate::io::{
    ExportOutcome, ExportService, ImportChoice, ImportOutcome, ImportPrompt, ImportService,
    ShareSink,
};
use crate::{Error, Result};

/// How decoded records join the existing collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImportMode {
    /// Add the imported records ahead of the existing ones.
    Merge,
    /// Discard the existing collection and keep only the imported records.
    Replace,
    /// Decide interactively.
    Ask,
}

/// Terminal prompt backing the import decision flow.
struct TerminalPrompt {
    mode: ImportMode,
    yes: bool,
}

impl ImportPrompt for TerminalPrompt {
    fn choose(&mut self, candidates: usize, existing: usize) -> ImportChoice {
        match self.mode {
            ImportMode::Merge => ImportChoice::Merge,
            ImportMode::Replace => ImportChoice::Replace,
            ImportMode::Ask => {
                println!(
                    "{candidates} record(s) to import; {existing} already stored."
                );
                if super::ask_yes_no("Merge with the existing records? (no = replace)") {
                    ImportChoice::Merge
                } else if super::ask_yes_no("Replace the existing records instead?") {
                    ImportChoice::Replace
                } else {
                    ImportChoice::Cancel
                }
            },
        }
    }

    fn confirm_replace(&mut self, existing: usize, candidates: usize) -> bool {
        if self.yes {
            return true;
        }
        super::ask_yes_no(&format!(
            "Replace {existing} stored record(s) with {candidates} imported \
             one(s)? This cannot be undone."
        ))
    }
}

/// Runs the `import` command for a CSV file on disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a store write fails.
pub fn cmd_import(
    config: &GeocampoConfig,
    file: &Path,
    mode: ImportMode,
    yes: bool,
) -> Result<()> {
    let mut store = super::open_store(config)?;
    let mut prompt = TerminalPrompt { mode, yes };
    let outcome = ImportService::new().run_with_file(file, &mut prompt, &mut store)?;
    match outcome {
        ImportOutcome::Cancelled => println!("Import cancelled."),
        ImportOutcome::NoValidRecords => {
            println!("No valid records found in {}.", file.display());
        },
        ImportOutcome::Merged { added, total } => {
            println!("Imported {added} record(s); {total} total.");
        },
        ImportOutcome::Replaced { total } => {
            println!("Replaced the collection; {total} record(s) now stored.");
        },
    }
    Ok(())
}

/// Share sink that writes the encoded bytes to a file.
struct FileSink {
    directory: PathBuf,
    written: Option<PathBuf>,
}

impl ShareSink for FileSink {
    fn share(&mut self, bytes: &[u8], filename: &str, _mime: &str) -> Result<()> {
        let path = self.directory.join(filename);
        let mut file = std::fs::File::create(&path).map_err(|e| Error::OperationFailed {
            operation: "write_export_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;
        file.write_all(bytes).map_err(|e| Error::OperationFailed {
            operation: "write_export_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;
        self.written = Some(path);
        Ok(())
    }
}

/// Runs the `export` command, writing the timestamped CSV file into `output`
/// (or the current directory).
///
/// # Errors
///
/// Returns an error if encoding or the file write fails.
pub fn cmd_export(config: &GeocampoConfig, output: Option<PathBuf>) -> Result<()> {
    let store = super::open_store(config)?;
    let mut sink = FileSink {
        directory: output.unwrap_or_else(|| PathBuf::from(".")),
        written: None,
    };
    match ExportService::new().run(&store, &mut sink)? {
        ExportOutcome::NothingToExport => println!("Nothing to export."),
        ExportOutcome::Shared { records, .. } => {
            let path = sink.written.ok_or_else(|| Error::OperationFailed {
                operation: "export".to_string(),
                cause: "sink reported success without a file".to_string(),
            })?;
            println!("Exported {records} record(s) to {}", path.display());
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::export_filename;
    use chrono::Local;

    #[test]
    fn test_file_sink_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink {
            directory: dir.path().to_path_buf(),
            written: None,
        };
        let filename = export_filename(Local::now());
        sink.share(b"id,savedAt\r\n", &filename, "text/csv").unwrap();

        let path = sink.written.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"id,savedAt\r\n");
        assert!(path.ends_with(&filename));
    }
}
