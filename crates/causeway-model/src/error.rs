//! Model and declaration errors.

/// Errors that can occur while loading and resolving bridge declarations.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Malformed declaration content.
    #[error("invalid bridge declaration: {detail}")]
    InvalidDeclaration { detail: String },

    /// A member referenced a type that is neither declared, well-known, nor
    /// primitive.
    #[error("unknown type reference `{name}`")]
    UnknownType { name: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
