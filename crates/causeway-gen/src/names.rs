//! Internal forwarding names and public-name collision detection.
//!
//! Intermediate marshalling call sites cannot rely on overload resolution
//! the way source-level calls can, so every forwarding member gets an
//! internal name made unique by an ordinal over the full member sequence.

use std::collections::HashMap;

/// Fixed prefix of internal forwarding names.
pub const INTERNAL_PREFIX: &str = "cw_";

/// Produces `cw_<declared><ordinal>` names with a counter that increases
/// monotonically over the full ordered member sequence of one type, so
/// same-named members inherited from unrelated interfaces stay distinct.
#[derive(Debug, Default)]
pub struct NameUniquifier {
    ordinal: usize,
}

impl NameUniquifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next internal name. The ordinal advances on every call, whether
    /// or not the caller ends up using the name.
    pub fn next_internal(&mut self, declared: &str) -> String {
        let name = format!("{INTERNAL_PREFIX}{declared}{}", self.ordinal);
        self.ordinal += 1;
        name
    }
}

/// Shape of a name on the public surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameShape {
    Method,
    Property,
    Event,
    Constructor,
}

impl NameShape {
    /// Methods and constructors may legally share a declared name.
    fn overloadable(self) -> bool {
        matches!(self, NameShape::Method | NameShape::Constructor)
    }
}

/// Tracks final public names within one generated type.
#[derive(Debug, Default)]
pub struct PublicNameLedger {
    taken: HashMap<String, NameShape>,
}

impl PublicNameLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a public name. Returns false when a distinct member already
    /// holds the name and the pair is not a legal overload.
    pub fn reserve(&mut self, name: &str, shape: NameShape) -> bool {
        match self.taken.get(name) {
            Some(&existing) => existing == shape && shape.overloadable(),
            None => {
                self.taken.insert(name.to_string(), shape);
                true
            }
        }
    }
}
