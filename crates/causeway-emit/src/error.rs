//! Emitter errors.

/// Errors that can occur while rendering or writing a proxy unit.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// A member could not be rendered (e.g. a missing forwarding plan).
    #[error("render failed for `{type_name}`: {detail}")]
    Render { type_name: String, detail: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for emit operations.
pub type Result<T> = std::result::Result<T, EmitError>;
