//! Convenience result type alias for Field Journal.

use crate::error::AppError;

/// A specialized `Result` type for Field Journal operations.
pub type AppResult<T> = Result<T, AppError>;
