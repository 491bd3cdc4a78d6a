//! Type classification and conversion dispatch for the Causeway proxy
//! generator.
//!
//! Given immutable descriptors for a type and its raw members, this crate
//! classifies each member into its canonical generated shape, selects the
//! marshalling primitive that converts each value across the runtime
//! boundary, and assembles a name-collision-free set of generated members per
//! proxy type.
//!
//! ## Modules
//!
//! - [`convert`] — The priority-ordered conversion decision table
//! - [`classify`] — Member shape classification and accessor pair merging
//! - [`names`] — Internal forwarding names and public name collision checks
//! - [`member`] — The generated member model handed to the emitter
//! - [`context`] — Immutable per-type generation context
//! - [`assemble`] — Per-type orchestration producing a [`ProxyUnit`]

pub mod assemble;
pub mod classify;
pub mod context;
pub mod convert;
pub mod error;
pub mod member;
pub mod names;

// Re-export key types for convenience
pub use assemble::{assemble_proxy, ProxyUnit};
pub use context::{GenOptions, GenerationContext};
pub use convert::{select, Conversion, Direction, TypeCategory, ValueRole};
pub use error::GenError;
pub use member::GeneratedMember;
