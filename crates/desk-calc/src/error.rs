//! Error types for the application

use thiserror::Error;

use crate::core::history::HistoryError;
use crate::core::CalcError;
use crate::tools::ToolError;

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Errors that can surface from a command
#[derive(Debug, Error)]
pub enum AppError {
    /// Calculator error
    #[error("{0}")]
    Calc(#[from] CalcError),

    /// History persistence error
    #[error(transparent)]
    History(#[from] HistoryError),

    /// Age or currency tool error
    #[error("{0}")]
    Tool(#[from] ToolError),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
