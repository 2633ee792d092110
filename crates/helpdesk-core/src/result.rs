//! Convenience result type alias for the helpdesk.

use crate::error::AppError;

/// A specialized `Result` type for helpdesk operations.
pub type AppResult<T> = Result<T, AppError>;
