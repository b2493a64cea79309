//! Application-wide error types.
//!
//! This module defines the main error type hierarchy for the application,
//! allowing for type-safe error handling throughout the codebase.

pub use crate::auth::AuthError;
pub use crate::config::ConfigError;
pub use crate::firestore::FirestoreError;
pub use crate::navigation::NavigationError;
pub use crate::state::StateError;
pub use crate::upload::UploadError;

/// Main application error type.
///
/// This is the top-level error type that encompasses all error types
/// in the application. It uses `thiserror` for automatic error derivation
/// and conversion.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Firestore API errors
    #[error("Firestore error: {0}")]
    Firestore(#[from] FirestoreError),

    /// Sign-in and session errors
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// File upload errors
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// Page list edits that break a navigation rule
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// State management errors
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Logger initialization errors
    #[error("Logger error: {0}")]
    Logger(String),

    /// Runtime creation errors
    #[error("Failed to create runtime: {0}")]
    RuntimeCreation(String),
}

/// Convenience type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let config_error = ConfigError::FilePathNotSet;
        let app_error: AppError = config_error.into();
        assert!(matches!(app_error, AppError::Config(_)));
        assert!(app_error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_app_error_from_firestore_error() {
        let firestore_error = FirestoreError::NotSignedIn;
        let app_error: AppError = firestore_error.into();
        assert!(matches!(app_error, AppError::Firestore(_)));
        assert!(app_error.to_string().contains("Firestore error"));
    }

    #[test]
    fn test_app_error_from_auth_error() {
        let app_error: AppError = AuthError::InvalidCredentials.into();
        assert!(matches!(app_error, AppError::Auth(_)));
        assert!(app_error.to_string().starts_with("Authentication error"));
    }

    #[test]
    fn test_app_error_from_upload_error() {
        let app_error: AppError = UploadError::NotConfigured.into();
        assert!(matches!(app_error, AppError::Upload(_)));
    }

    #[test]
    fn test_app_error_from_navigation_error() {
        let nav_error = NavigationError::BuiltinPage {
            id: "about".to_string(),
        };
        let app_error: AppError = nav_error.into();
        assert!(matches!(app_error, AppError::Navigation(_)));
        assert!(app_error.to_string().contains("Navigation error"));
    }

    #[test]
    fn test_app_error_from_state_error() {
        let state_error = StateError::NotSignedIn;
        let app_error: AppError = state_error.into();
        assert!(matches!(app_error, AppError::State(_)));
        assert!(app_error.to_string().contains("State error"));
    }

    #[test]
    fn test_app_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let app_error: AppError = io_error.into();
        assert!(matches!(app_error, AppError::Io(_)));
        assert!(app_error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_app_error_terminal() {
        let error = AppError::Terminal("Terminal error".to_string());
        assert!(error.to_string().contains("Terminal error"));
    }
}
