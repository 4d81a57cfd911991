//! Error type for declaration-bundle parsing.

/// Lightweight error wrapper carrying the parse failure message.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct DeclError(pub String);

impl From<String> for DeclError {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DeclError {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
