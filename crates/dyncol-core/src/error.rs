//! Error types for dynamic-column expression encoding.

use thiserror::Error;

/// Errors that can occur while turning a document into a dynamic-column expression.
#[derive(Error, Debug)]
pub enum DynColError {
    /// The input string was not valid JSON (string entry points only).
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The top-level value is not a mapping. Dynamic columns are always
    /// keyed, so a bare scalar or null has no expression form.
    #[error("Invalid root: expected a mapping, found {found}")]
    InvalidRoot { found: &'static str },
}

/// Convenience alias used throughout dyncol-core.
pub type Result<T> = std::result::Result<T, DynColError>;
