//! Source rendering and file output for assembled proxy units.
//!
//! Consumes the abstract member model produced by `causeway-gen` and turns
//! it into host-language source text on disk. A unit is rendered completely
//! in memory before anything touches the filesystem, so a failed type never
//! leaves a partial file behind.
//!
//! ## Modules
//!
//! - [`path`] — Output path derivation from namespace and type name
//! - [`render`] — Textual rendering of one proxy unit
//! - [`writer`] — Directory creation and write-on-success

pub mod error;
pub mod path;
pub mod render;
pub mod writer;

// Re-export key types for convenience
pub use error::EmitError;
pub use path::unit_path;
pub use render::render_unit;
pub use writer::write_unit;
