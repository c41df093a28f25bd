//! Runtime configuration for the terminal host.
//!
//! Resolved from environment variables first, then overridden by command
//! line flags in `main`.

use std::env;
use std::path::PathBuf;

/// File name of the tracing log inside the data directory
pub const LOG_FILE_NAME: &str = "blockfall.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where the session and high-score records (and the log) live
    pub data_dir: PathBuf,
    /// Start with sound off
    pub muted: bool,
    /// Fixed randomizer seed; OS entropy when `None`
    pub seed: Option<u64>,
    /// Ignore any saved session
    pub fresh: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(env::var_os("HOME").map(PathBuf::from)),
            muted: false,
            seed: None,
            fresh: false,
        }
    }
}

impl Config {
    /// Create from environment variables
    ///
    /// - `BLOCKFALL_DATA_DIR`: data directory
    /// - `BLOCKFALL_MUTE`: `1`/`true`/`yes`/`on` to start muted
    /// - `BLOCKFALL_SEED`: unsigned integer seed
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let data_dir = non_empty("BLOCKFALL_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_data_dir(non_empty("HOME").map(PathBuf::from)));

        let muted = non_empty("BLOCKFALL_MUTE")
            .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        let seed = non_empty("BLOCKFALL_SEED").and_then(|s| s.parse().ok());

        Self {
            data_dir,
            muted,
            seed,
            fresh: false,
        }
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_fresh(mut self, fresh: bool) -> Self {
        self.fresh = fresh;
        self
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }
}

fn default_data_dir(home: Option<PathBuf>) -> PathBuf {
    home.unwrap_or_else(|| PathBuf::from("."))
        .join(".blockfall")
}
