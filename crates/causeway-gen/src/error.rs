//! Generation errors.
//!
//! Each error aborts assembly of the single offending type; sibling types in
//! the same batch are unaffected. The offending type's qualified name is
//! always attached for the driver.

/// Errors that can occur during proxy assembly.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// Two distinct generated members would share one final public name.
    #[error("duplicate member `{member}` in `{type_name}`")]
    DuplicateMember { type_name: String, member: String },

    /// A property/event side whose value type cannot be resolved from either
    /// its counterpart or its trailing parameter.
    #[error("member `{member}` of `{type_name}` has no resolvable value type")]
    IncompleteMemberPair { type_name: String, member: String },

    /// Contract violation: a conversion plan came back empty. The decision
    /// table ends in a total fallback, so this indicates a programming error,
    /// never a silent omission.
    #[error("no conversion rule matched `{value_type}` ({direction}) in `{type_name}`")]
    UnreachableConversion {
        type_name: String,
        value_type: String,
        direction: String,
    },
}

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, GenError>;
