use thiserror::Error;

/// Errors produced while sending a notification.
///
/// Every variant is returned to the caller as-is. The notifier never retries
/// and never downgrades a failure into a successful result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// A credential or the message was missing or empty. Raised before any I/O.
    #[error("Invalid argument {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    /// The transport failed before a response was received
    #[error("Network error: {0}")]
    Network(String),

    /// Telegram answered, but refused the message
    #[error("{0}")]
    RemoteRejection(String),

    /// Telegram answered with a body that is not JSON
    #[error("Invalid response: {0}")]
    MalformedResponse(String),
}

/// Payload-free discriminant of [`NotifyError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Network,
    RemoteRejection,
    MalformedResponse,
}

impl NotifyError {
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn network(detail: impl Into<String>) -> Self {
        Self::Network(detail.into())
    }

    pub fn remote_rejection(description: impl Into<String>) -> Self {
        Self::RemoteRejection(description.into())
    }

    pub fn malformed_response(detail: impl Into<String>) -> Self {
        Self::MalformedResponse(detail.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            NotifyError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            NotifyError::Network(_) => ErrorKind::Network,
            NotifyError::RemoteRejection(_) => ErrorKind::RemoteRejection,
            NotifyError::MalformedResponse(_) => ErrorKind::MalformedResponse,
        }
    }
}

impl From<reqwest::Error> for NotifyError {
    /// The request URL carries the bot token, so it is stripped before the
    /// error text is kept.
    fn from(error: reqwest::Error) -> Self {
        let error = error.without_url();
        NotifyError::Network(error_chain(&error))
    }
}

/// `error: cause: root cause`, skipping causes already quoted by their parent
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}

/// Type alias for Result with NotifyError
pub type NotifyResult<T> = Result<T, NotifyError>;
