//! Convenience result type alias for SaveUrURL.

use crate::error::AppError;

/// A specialized `Result` type for SaveUrURL operations.
pub type AppResult<T> = Result<T, AppError>;
