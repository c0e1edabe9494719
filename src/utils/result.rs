use crate::utils::error::AppError;

/// Result type for HTTP handlers and services.
pub type AppResult<T> = Result<T, AppError>;
