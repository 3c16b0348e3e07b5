//! Configuration: where the durable document and the photos live.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "GEOCAMPO_DATA_DIR";

/// Resolved paths for one geocampo installation.
#[derive(Debug, Clone)]
pub struct GeocampoConfig {
    /// Root data directory.
    pub data_dir: PathBuf,
}

impl GeocampoConfig {
    /// Resolves the configuration.
    ///
    /// Precedence: `GEOCAMPO_DATA_DIR`, then the platform data directory
    /// (`~/.local/share/geocampo` on Linux), then `./.geocampo` as a last
    /// resort.
    #[must_use]
    pub fn resolve() -> Self {
        let data_dir = std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| {
                directories::ProjectDirs::from("", "", "geocampo")
                    .map(|dirs| dirs.data_dir().to_path_buf())
            })
            .unwrap_or_else(|| PathBuf::from(".geocampo"));
        Self { data_dir }
    }

    /// Creates a configuration rooted at an explicit directory.
    #[must_use]
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Path of the record collection document, the single durable key.
    #[must_use]
    pub fn records_path(&self) -> PathBuf {
        self.data_dir.join("records.json")
    }

    /// Directory holding permanent photo copies.
    #[must_use]
    pub fn photos_dir(&self) -> PathBuf {
        self.data_dir.join("photos")
    }

    /// Returns the root data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_hang_off_data_dir() {
        let config = GeocampoConfig::with_data_dir("/tmp/geocampo-test");
        assert_eq!(
            config.records_path(),
            PathBuf::from("/tmp/geocampo-test/records.json")
        );
        assert_eq!(
            config.photos_dir(),
            PathBuf::from("/tmp/geocampo-test/photos")
        );
    }
}
