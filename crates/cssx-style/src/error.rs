//! Error types for style resolution.

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading layers or resolving styles.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A `var()` reference that cannot be parsed.
    #[error("Malformed variable reference in '{value}': {message}")]
    MalformedVariable { value: String, message: String },

    /// Dynamic interpolation where only literal text is supported.
    #[error("Interpolated expression in '{value}' is not supported; only literal values can be resolved")]
    InterpolatedValue { value: String },

    /// A variable with no registry entry and no fallback (strict mode only).
    #[error("Variable '{name}' is not defined and has no fallback")]
    UnresolvedVariable { name: String },

    /// Invalid compiled selector key.
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// Structurally invalid compiled layer document.
    #[error("Invalid style layer: {message}")]
    InvalidLayer { message: String },

    /// JSON decoding error.
    #[error("Failed to decode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a malformed variable error.
    pub fn malformed_variable(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedVariable {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create an interpolation error.
    pub fn interpolated(value: impl Into<String>) -> Self {
        Self::InterpolatedValue {
            value: value.into(),
        }
    }

    /// Create an unresolved variable error.
    pub fn unresolved_variable(name: impl Into<String>) -> Self {
        Self::UnresolvedVariable { name: name.into() }
    }

    /// Create a selector error.
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Create a layer structure error.
    pub fn invalid_layer(message: impl Into<String>) -> Self {
        Self::InvalidLayer {
            message: message.into(),
        }
    }
}
