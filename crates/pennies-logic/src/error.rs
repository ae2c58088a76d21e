//! Error types for game construction and execution

use thiserror::Error;

/// Errors raised while configuring or running a game
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A strategy or game parameter is outside its valid domain
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// An agent's history and feedback fell out of step
    #[error("agent state out of step: {history} choices recorded against {feedback} feedback entries")]
    StateInvariantViolation { history: usize, feedback: usize },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
