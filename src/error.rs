//! Application-wide error types.
//!
//! Errors raised while starting the application. Runtime failures of the
//! stores and the backend are logged or shown on the view that caused them.

pub use crate::config::ConfigError;

/// Main application error type.
///
/// This is the top-level error type for startup. It uses `thiserror` for
/// automatic error derivation and conversion.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logger initialization errors
    #[error("Logger error: {0}")]
    Logger(String),
}

/// Convenience type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
