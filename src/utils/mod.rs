//! Shared utilities: error surface, logging, ids, time.

pub mod error;
pub mod ids;
pub mod logger;
pub mod result;
pub mod time;

pub use error::AppError;
pub use result::AppResult;
