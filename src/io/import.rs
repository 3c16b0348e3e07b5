//! Import orchestrator.
//!
//! Drives the flow `idle → picking-file → decoding → awaiting-user-choice →
//! {merging | replacing} → idle`. The caller owns the file picker and the
//! decision prompt; the orchestrator never silently picks between merge and
//! replace, and replace never executes without a second confirmation.

use crate::io::csv;
use crate::store::RecordStore;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// File-picking collaborator. Returns `None` on cancellation, which is
/// treated as "no file chosen", never as an error.
pub trait FilePicker {
    /// Asks for a file to import.
    fn pick_file(&mut self) -> Option<PathBuf>;
}

/// The caller's decision for a successfully decoded candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportChoice {
    /// Add the decoded records ahead of the existing collection.
    Merge,
    /// Discard the existing collection and substitute the decoded records.
    Replace,
    /// Abandon the import.
    Cancel,
}

/// Decision prompt collaborator, owned by the UI layer.
pub trait ImportPrompt {
    /// Chooses between merge, replace and cancel for `candidates` decoded
    /// records, given `existing` records currently in the store.
    fn choose(&mut self, candidates: usize, existing: usize) -> ImportChoice;

    /// Second confirmation gate before a destructive replace. Returning
    /// `false` abandons the import.
    fn confirm_replace(&mut self, existing: usize, candidates: usize) -> bool;
}

/// Terminal state of one import invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The file pick or a confirmation was abandoned. Not an error.
    Cancelled,
    /// The file decoded to zero valid records. Distinct from a cancelled
    /// pick: a file was chosen but nothing in it was importable.
    NoValidRecords,
    /// Records were prepended to the existing collection.
    Merged {
        /// Number of records added.
        added: usize,
        /// Collection size after the merge.
        total: usize,
    },
    /// The collection was replaced.
    Replaced {
        /// Collection size after the replacement.
        total: usize,
    },
}

/// Orchestrates CSV import into a [`RecordStore`].
#[derive(Debug, Default)]
pub struct ImportService;

impl ImportService {
    /// Creates the orchestrator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Runs one full import interaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or a store write
    /// fails; validation problems inside the file are not errors (rows are
    /// dropped and only the aggregate outcome is reported).
    pub fn run(
        &self,
        picker: &mut dyn FilePicker,
        prompt: &mut dyn ImportPrompt,
        store: &mut RecordStore,
    ) -> Result<ImportOutcome> {
        let Some(path) = picker.pick_file() else {
            tracing::debug!("import cancelled at file pick");
            return Ok(ImportOutcome::Cancelled);
        };
        self.run_with_file(&path, prompt, store)
    }

    /// Runs the import for an already-chosen file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a store write fails.
    pub fn run_with_file(
        &self,
        path: &Path,
        prompt: &mut dyn ImportPrompt,
        store: &mut RecordStore,
    ) -> Result<ImportOutcome> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_import_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        let candidates = csv::decode(&text);
        if candidates.is_empty() {
            tracing::info!(file = %path.display(), "import found no valid records");
            return Ok(ImportOutcome::NoValidRecords);
        }
        tracing::info!(
            file = %path.display(),
            candidates = candidates.len(),
            "import decoded candidate records"
        );

        match prompt.choose(candidates.len(), store.len()) {
            ImportChoice::Cancel => Ok(ImportOutcome::Cancelled),
            ImportChoice::Merge => {
                let added = candidates.len();
                store.merge_from(candidates)?;
                Ok(ImportOutcome::Merged {
                    added,
                    total: store.len(),
                })
            },
            ImportChoice::Replace => {
                if !prompt.confirm_replace(store.len(), candidates.len()) {
                    tracing::debug!("replace import abandoned at confirmation");
                    return Ok(ImportOutcome::Cancelled);
                }
                store.replace_all(candidates)?;
                Ok(ImportOutcome::Replaced { total: store.len() })
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photos::NullPhotoStore;
    use crate::storage::MemoryBackend;
    use std::io::Write;

    struct FixedPicker(Option<PathBuf>);

    impl FilePicker for FixedPicker {
        fn pick_file(&mut self) -> Option<PathBuf> {
            self.0.take()
        }
    }

    struct ScriptedPrompt {
        choice: ImportChoice,
        confirm: bool,
        choose_calls: usize,
        confirm_calls: usize,
    }

    impl ScriptedPrompt {
        fn new(choice: ImportChoice, confirm: bool) -> Self {
            Self {
                choice,
                confirm,
                choose_calls: 0,
                confirm_calls: 0,
            }
        }
    }

    impl ImportPrompt for ScriptedPrompt {
        fn choose(&mut self, _candidates: usize, _existing: usize) -> ImportChoice {
            self.choose_calls += 1;
            self.choice
        }

        fn confirm_replace(&mut self, _existing: usize, _candidates: usize) -> bool {
            self.confirm_calls += 1;
            self.confirm
        }
    }

    fn empty_store() -> RecordStore {
        RecordStore::open(Box::new(MemoryBackend::new()), Box::new(NullPhotoStore))
            .unwrap()
    }

    fn csv_file(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("import.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    const TWO_ROWS: &str =
        "id,savedAt,latitude,longitude\r\nx,t1,1.0,2.0\r\ny,t2,3.0,4.0\r\n";

    #[test]
    fn test_cancelled_pick_is_not_an_error() {
        let mut store = empty_store();
        let mut prompt = ScriptedPrompt::new(ImportChoice::Merge, true);
        let outcome = ImportService::new()
            .run(&mut FixedPicker(None), &mut prompt, &mut store)
            .unwrap();
        assert_eq!(outcome, ImportOutcome::Cancelled);
        assert_eq!(prompt.choose_calls, 0);
    }

    #[test]
    fn test_no_valid_records_is_distinct_from_cancel() {
        let dir = tempfile::tempdir().unwrap();
        let path = csv_file(&dir, "id,savedAt,latitude,longitude\r\n");
        let mut store = empty_store();
        let mut prompt = ScriptedPrompt::new(ImportChoice::Merge, true);
        let outcome = ImportService::new()
            .run_with_file(&path, &mut prompt, &mut store)
            .unwrap();
        assert_eq!(outcome, ImportOutcome::NoValidRecords);
        // The caller is never prompted when there is nothing to import.
        assert_eq!(prompt.choose_calls, 0);
    }

    #[test]
    fn test_merge_prepends_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let path = csv_file(&dir, TWO_ROWS);
        let mut store = empty_store();
        let mut prompt = ScriptedPrompt::new(ImportChoice::Merge, true);
        let outcome = ImportService::new()
            .run_with_file(&path, &mut prompt, &mut store)
            .unwrap();
        assert_eq!(outcome, ImportOutcome::Merged { added: 2, total: 2 });
        assert_eq!(store.records()[0].id.as_str(), "x");
        assert_eq!(prompt.confirm_calls, 0);
    }

    #[test]
    fn test_replace_requires_second_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let path = csv_file(&dir, TWO_ROWS);
        let mut store = empty_store();

        // Declined confirmation leaves the store untouched.
        let mut declined = ScriptedPrompt::new(ImportChoice::Replace, false);
        let outcome = ImportService::new()
            .run_with_file(&path, &mut declined, &mut store)
            .unwrap();
        assert_eq!(outcome, ImportOutcome::Cancelled);
        assert_eq!(declined.confirm_calls, 1);
        assert!(store.is_empty());

        // Confirmed replace goes through.
        let mut confirmed = ScriptedPrompt::new(ImportChoice::Replace, true);
        let outcome = ImportService::new()
            .run_with_file(&path, &mut confirmed, &mut store)
            .unwrap();
        assert_eq!(outcome, ImportOutcome::Replaced { total: 2 });
    }

    #[test]
    fn test_unreadable_file_surfaces_io_error() {
        let mut store = empty_store();
        let mut prompt = ScriptedPrompt::new(ImportChoice::Merge, true);
        let err = ImportService::new()
            .run_with_file(Path::new("/nonexistent/import.csv"), &mut prompt, &mut store)
            .unwrap_err();
        assert!(err.to_string().contains("read_import_file"));
    }
}
