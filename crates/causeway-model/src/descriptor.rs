//! Type descriptors.
//!
//! A [`TypeDescriptor`] describes one type as seen from both sides of the
//! bridge. The per-side [`SideTraits`] carry the two independent
//! "is-real-type-here / is-root-type-here" predicates that drive conversion
//! selection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How one runtime side sees a type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideTraits {
    /// Concrete, non-interface, non-root type native to this side.
    #[serde(default)]
    pub is_real_type: bool,
    /// The universal base object type of this side.
    #[serde(default)]
    pub is_root_type: bool,
}

/// Immutable description of a type on either side of the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Simple name (e.g. "String", "int32", "Animal[]").
    pub name: String,
    /// Namespace (e.g. "java.lang"); empty for primitives and arrays.
    #[serde(default)]
    pub namespace: String,
    /// Element descriptor; present iff this descriptor is an array.
    #[serde(default)]
    pub array_element: Option<Box<TypeDescriptor>>,
    #[serde(default)]
    pub is_primitive: bool,
    #[serde(default)]
    pub is_interface: bool,
    #[serde(default)]
    pub is_delegate: bool,
    /// Registration opt-out: no wrapper methods are generated for this type.
    #[serde(default)]
    pub no_methods: bool,
    /// How the host runtime sees this type.
    #[serde(default)]
    pub host: SideTraits,
    /// How the guest runtime sees this type.
    #[serde(default)]
    pub guest: SideTraits,
}

impl TypeDescriptor {
    /// Create a plain descriptor with all flags cleared.
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
            array_element: None,
            is_primitive: false,
            is_interface: false,
            is_delegate: false,
            no_methods: false,
            host: SideTraits::default(),
            guest: SideTraits::default(),
        }
    }

    /// Create a primitive descriptor (no namespace).
    pub fn primitive(name: &str) -> Self {
        let mut ty = Self::new("", name);
        ty.is_primitive = true;
        ty
    }

    /// Create an array descriptor wrapping the given element.
    pub fn array_of(element: TypeDescriptor) -> Self {
        let mut ty = Self::new(&element.namespace, &format!("{}[]", element.name));
        ty.array_element = Some(Box::new(element));
        ty
    }

    /// Whether this descriptor is an array.
    pub fn is_array(&self) -> bool {
        self.array_element.is_some()
    }

    /// The array element descriptor, if any.
    pub fn element(&self) -> Option<&TypeDescriptor> {
        self.array_element.as_deref()
    }

    /// The `void` pseudo-type used for absent return values.
    pub fn void() -> Self {
        Self::primitive("void")
    }

    /// Whether this descriptor is the `void` pseudo-type.
    pub fn is_void(&self) -> bool {
        self.is_primitive && self.name == "void"
    }

    /// Namespace-qualified name (`namespace.name`, or bare name without one).
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Builder: mark as interface.
    pub fn with_interface(mut self) -> Self {
        self.is_interface = true;
        self
    }

    /// Builder: mark as delegate/callable.
    pub fn with_delegate(mut self) -> Self {
        self.is_delegate = true;
        self
    }

    /// Builder: mark as real on the host side.
    pub fn host_real(mut self) -> Self {
        self.host.is_real_type = true;
        self
    }

    /// Builder: mark as real on the guest side.
    pub fn guest_real(mut self) -> Self {
        self.guest.is_real_type = true;
        self
    }

    /// Builder: mark as the host-side root type.
    pub fn host_root(mut self) -> Self {
        self.host.is_root_type = true;
        self
    }

    /// Builder: mark as the guest-side root type.
    pub fn guest_root(mut self) -> Self {
        self.guest.is_root_type = true;
        self
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())
    }
}
