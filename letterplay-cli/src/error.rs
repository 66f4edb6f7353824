use thiserror::Error;

use letterplay_client::ClientError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Request to the backend failed
    #[error("{0}")]
    Client(#[from] ClientError),

    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Bad interactive input
    #[error("{0}")]
    Input(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    pub(crate) fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// What the user can do about it, when there is something obvious.
    pub(crate) fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Client(e) if e.is_auth() => {
                Some("Run 'letterplay login <username>' to sign in again.")
            }
            Self::Client(ClientError::Http(_)) => {
                Some("Is the LetterPlay API reachable? Check 'letterplay config show'.")
            }
            _ => None,
        }
    }
}
