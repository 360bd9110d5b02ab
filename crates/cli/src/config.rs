//! Runtime settings: command-line flags first, then environment, then defaults.

use std::path::PathBuf;

/// Data file used when neither `--file` nor the environment names one.
pub const DEFAULT_DATA_FILE: &str = "data/inventory.csv";

pub const DATA_FILE_ENV: &str = "STOCKROOM_DATA_FILE";
pub const NO_HISTORY_ENV: &str = "STOCKROOM_NO_HISTORY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Table the inventory is loaded from at start-up and saved back to.
    pub data_file: PathBuf,
    /// Record undo/redo snapshots.
    pub history: bool,
}

impl Config {
    pub fn resolve(file_flag: Option<PathBuf>, no_history_flag: bool) -> Self {
        Self::resolve_with(file_flag, no_history_flag, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::resolve`] with an injectable environment lookup.
    pub fn resolve_with(
        file_flag: Option<PathBuf>,
        no_history_flag: bool,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let data_file = file_flag
            .or_else(|| env(DATA_FILE_ENV).filter(|v| !v.trim().is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        let no_history = no_history_flag || env(NO_HISTORY_ENV).is_some_and(|v| is_truthy(&v));

        Self {
            data_file,
            history: !no_history,
        }
    }
}

fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
