use thiserror::Error;

/// Errors produced while talking to the recordings backend or the desktop.
///
/// The console never lets these escape `dispatch`; they are logged and turned
/// into alerts or placeholder rows.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConsoleError {
    /// HTTP status for server-side failures
    pub fn status(&self) -> Option<u16> {
        match self {
            ConsoleError::Server { status, .. } => Some(*status),
            ConsoleError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T, E = ConsoleError> = std::result::Result<T, E>;
