//! Mail delivery errors.

use thiserror::Error;

use saveurl_core::error::{AppError, ErrorKind};

/// Failures while building or delivering a message.
#[derive(Debug, Error)]
pub enum MailError {
    /// A sender or recipient address did not parse.
    #[error("invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },
    /// The message could not be assembled.
    #[error("failed to build message: {0}")]
    Build(String),
    /// The relay rejected the message or was unreachable.
    #[error("failed to deliver message: {0}")]
    Transport(String),
}

impl From<MailError> for AppError {
    fn from(err: MailError) -> Self {
        AppError::with_source(ErrorKind::ExternalService, "Failed to send email", err)
    }
}
