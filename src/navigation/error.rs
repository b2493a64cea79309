//! Page editor error types.

/// Errors that can occur while editing the navigation pages.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// Index outside the page list
    #[error("No page at position {0}")]
    IndexOutOfRange(usize),

    /// Built-in pages keep their path and cannot be removed
    #[error("'{id}' is a built-in page")]
    BuiltinPage { id: String },

    /// Another page already uses the path
    #[error("Path {0} is already used by another page")]
    PathTaken(String),

    /// Path is empty or contains characters not allowed in a route
    #[error("Invalid page path: {0}")]
    InvalidPath(String),
}
