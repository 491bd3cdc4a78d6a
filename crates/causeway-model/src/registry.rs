//! Well-known type names and type reference resolution.
//!
//! The bridge relies on a handful of well-known types: the guest-side
//! universal object and throwable types (the root singletons), the string
//! alias on each side, and the class-reflection alias. Everything else is
//! resolved from declared descriptors, the fixed primitive set, or `Name[]`
//! array references.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::descriptor::TypeDescriptor;
use crate::error::{ModelError, Result};

/// The fixed primitive set resolvable without declaration.
pub const PRIMITIVES: &[&str] = &[
    "void", "bool", "byte", "char", "int16", "int32", "int64", "float", "double",
];

/// Qualified names of the well-known bridge types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WellKnown {
    /// Guest-side universal object type.
    #[serde(default = "default_guest_object")]
    pub guest_object: String,
    /// Guest-side universal throwable/exception type.
    #[serde(default = "default_guest_throwable")]
    pub guest_throwable: String,
    /// Host-side string alias.
    #[serde(default = "default_host_string")]
    pub host_string: String,
    /// Guest-side string alias.
    #[serde(default = "default_guest_string")]
    pub guest_string: String,
    /// Class-reflection alias type.
    #[serde(default = "default_class_alias")]
    pub class_alias: String,
}

fn default_guest_object() -> String {
    "java.lang.Object".to_string()
}

fn default_guest_throwable() -> String {
    "java.lang.Throwable".to_string()
}

fn default_host_string() -> String {
    "System.String".to_string()
}

fn default_guest_string() -> String {
    "java.lang.String".to_string()
}

fn default_class_alias() -> String {
    "java.lang.Class".to_string()
}

impl Default for WellKnown {
    fn default() -> Self {
        Self {
            guest_object: default_guest_object(),
            guest_throwable: default_guest_throwable(),
            host_string: default_host_string(),
            guest_string: default_guest_string(),
            class_alias: default_class_alias(),
        }
    }
}

impl WellKnown {
    /// Whether the type is one of the two root singletons (guest object or
    /// guest throwable). These are exempt from "new" qualification on
    /// generated static descriptor fields and properties.
    pub fn is_root_singleton(&self, ty: &TypeDescriptor) -> bool {
        let q = ty.qualified_name();
        q == self.guest_object || q == self.guest_throwable
    }

    pub fn is_host_string(&self, ty: &TypeDescriptor) -> bool {
        ty.qualified_name() == self.host_string
    }

    pub fn is_guest_string(&self, ty: &TypeDescriptor) -> bool {
        ty.qualified_name() == self.guest_string
    }

    pub fn is_class_alias(&self, ty: &TypeDescriptor) -> bool {
        ty.qualified_name() == self.class_alias
    }

    /// Descriptors pre-registered for the well-known names, used when a
    /// declaration references them without declaring them.
    fn builtin_descriptors(&self) -> Vec<TypeDescriptor> {
        vec![
            split_qualified(&self.guest_object).guest_root(),
            split_qualified(&self.guest_throwable).guest_real(),
            split_qualified(&self.host_string).host_real(),
            split_qualified(&self.guest_string).guest_real(),
            split_qualified(&self.class_alias).guest_real(),
        ]
    }
}

fn split_qualified(qualified: &str) -> TypeDescriptor {
    match qualified.rsplit_once('.') {
        Some((ns, name)) => TypeDescriptor::new(ns, name),
        None => TypeDescriptor::new("", qualified),
    }
}

/// Registry of resolvable type descriptors, keyed by qualified name.
///
/// Pre-seeds the fixed primitive set and the well-known descriptors;
/// declared types are registered on top and override the builtins.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    entries: BTreeMap<String, TypeDescriptor>,
}

impl TypeRegistry {
    /// Create a registry seeded with primitives and the well-known types.
    pub fn with_well_known(well_known: &WellKnown) -> Self {
        let mut entries = BTreeMap::new();
        for name in PRIMITIVES {
            entries.insert(name.to_string(), TypeDescriptor::primitive(name));
        }
        for ty in well_known.builtin_descriptors() {
            entries.insert(ty.qualified_name(), ty);
        }
        Self { entries }
    }

    /// Register a descriptor under its qualified name, replacing any builtin.
    pub fn register(&mut self, ty: TypeDescriptor) {
        self.entries.insert(ty.qualified_name(), ty);
    }

    /// Look up a descriptor by qualified name.
    pub fn get(&self, qualified: &str) -> Option<&TypeDescriptor> {
        self.entries.get(qualified)
    }

    /// Resolve a type reference string.
    ///
    /// Accepts qualified names, primitive names, and `Name[]` array suffixes
    /// (nested suffixes produce nested array descriptors).
    pub fn resolve(&self, reference: &str) -> Result<TypeDescriptor> {
        let reference = reference.trim();
        if let Some(element) = reference.strip_suffix("[]") {
            let element = self.resolve(element)?;
            return Ok(TypeDescriptor::array_of(element));
        }
        self.entries
            .get(reference)
            .cloned()
            .ok_or_else(|| ModelError::UnknownType {
                name: reference.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_name_the_conventional_types() {
        let wk = WellKnown::default();
        assert_eq!(wk.guest_object, "java.lang.Object");
        assert_eq!(wk.host_string, "System.String");
    }

    #[test]
    fn root_singletons() {
        let wk = WellKnown::default();
        assert!(wk.is_root_singleton(&TypeDescriptor::new("java.lang", "Object")));
        assert!(wk.is_root_singleton(&TypeDescriptor::new("java.lang", "Throwable")));
        assert!(!wk.is_root_singleton(&TypeDescriptor::new("java.lang", "String")));
    }

    #[test]
    fn resolve_primitives_and_arrays() {
        let registry = TypeRegistry::with_well_known(&WellKnown::default());
        assert!(registry.resolve("int32").unwrap().is_primitive);

        let arr = registry.resolve("int32[]").unwrap();
        assert!(arr.is_array());
        assert!(arr.element().unwrap().is_primitive);

        let nested = registry.resolve("int32[][]").unwrap();
        assert!(nested.element().unwrap().is_array());
    }

    #[test]
    fn resolve_well_known_without_declaration() {
        let registry = TypeRegistry::with_well_known(&WellKnown::default());
        let s = registry.resolve("java.lang.String").unwrap();
        assert!(s.guest.is_real_type);
        let o = registry.resolve("java.lang.Object").unwrap();
        assert!(o.guest.is_root_type);
    }

    #[test]
    fn declared_type_overrides_builtin() {
        let mut registry = TypeRegistry::with_well_known(&WellKnown::default());
        let custom = TypeDescriptor::new("java.lang", "String")
            .guest_real()
            .with_interface();
        registry.register(custom);
        assert!(registry.resolve("java.lang.String").unwrap().is_interface);
    }

    #[test]
    fn unknown_reference_errors() {
        let registry = TypeRegistry::with_well_known(&WellKnown::default());
        let err = registry.resolve("no.such.Type").unwrap_err();
        assert!(matches!(err, ModelError::UnknownType { .. }));
    }
}
