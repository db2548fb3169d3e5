use thiserror::Error;

/// Failure classes surfaced to the dashboard. Every variant carries a
/// rendered message so errors can be stored in view state and cloned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Backend unreachable: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Backend rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Validation,
    Conflict,
    Rejected,
    Config,
}

impl ClientError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ClientError::Transport(_) => FailureKind::Transport,
            ClientError::Validation(_) => FailureKind::Validation,
            ClientError::Conflict(_) => FailureKind::Conflict,
            ClientError::Rejected { .. } => FailureKind::Rejected,
            ClientError::Config(_) => FailureKind::Config,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind() == FailureKind::Transport
    }

    /// Classifies a non-success HTTP status.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            format!("HTTP {}", status)
        } else {
            body.trim().to_string()
        };
        match status {
            409 => ClientError::Conflict(message),
            500..=599 => ClientError::Transport(format!("HTTP {}: {}", status, message)),
            _ => ClientError::Rejected { status, message },
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        tracing::debug!("Mapping reqwest error to ClientError: {:?}", err);
        if err.is_decode() {
            ClientError::Validation(err.to_string())
        } else if err.is_builder() {
            ClientError::Config(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Validation(err.to_string())
    }
}
