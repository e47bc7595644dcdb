use thiserror::Error;

/// Every way a call can fail, normalized.
///
/// Callers that only care whether a call worked can treat all variants alike;
/// [`ApiError::message`] is always a human-readable string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (connect failure, timeout, bad URL).
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A success response whose body does not match the expected envelope.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The server reported `success: false`.
    #[error("{0}")]
    Application(String),

    /// A success envelope without the `data` the caller asked for.
    #[error("response contained no data")]
    MissingData,

    /// The request could not be built (bad header, unserializable body).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status, when the failure came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn transport(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if message.is_empty() {
            ApiError::Transport("Network error".to_string())
        } else {
            ApiError::Transport(message)
        }
    }
}
