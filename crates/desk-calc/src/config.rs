//! Application configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// File name of the history file inside the documents directory
pub const HISTORY_FILE_NAME: &str = "CalculatorHistory.txt";

/// Environment variable overriding the history file location
pub const HISTORY_ENV_VAR: &str = "DESK_CALC_HISTORY";

/// Log verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - warnings and errors
    #[default]
    Normal,
    /// Verbose - informational messages
    Verbose,
    /// Debug - every accumulator event
    Debug,
}

impl Verbosity {
    /// Maps `-q` and repeated `-v` flags to a level; quiet wins
    #[must_use]
    pub const fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Default `tracing` filter directive for this level
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// Resolved application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where calculation history is persisted
    pub history_path: PathBuf,
    /// Log verbosity
    pub verbosity: Verbosity,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history_path: default_history_path(),
            verbosity: Verbosity::Normal,
        }
    }
}

impl AppConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the history file path
    #[must_use]
    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = path.into();
        self
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }
}

/// `CalculatorHistory.txt` in the user's documents directory, falling back
/// to the home directory and then the working directory
#[must_use]
pub fn default_history_path() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(HISTORY_FILE_NAME)
}
