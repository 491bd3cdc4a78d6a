//! Member descriptors.
//!
//! A [`MethodDescriptor`] describes one raw member declaration drawn from the
//! guest runtime's metadata: a plain method, constructor, field, or one side
//! of a property/event accessor pair. The classifier in `causeway-gen` merges
//! paired declarations into single generated members using the descriptor
//! identities recorded here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::descriptor::TypeDescriptor;

/// Unique member identity, used for accessor pair merging.
pub type MemberId = Uuid;

/// The raw declaration kind of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Method,
    Constructor,
    Field,
    Property,
    Event,
}

/// Which accessor side a property/event descriptor declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessor {
    Getter,
    Setter,
    Add,
    Remove,
}

impl Accessor {
    /// Whether this is the writing side of its pair (setter or remove).
    pub fn is_writer(&self) -> bool {
        matches!(self, Accessor::Setter | Accessor::Remove)
    }
}

/// Member visibility in the generated host source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Internal,
    Private,
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub ty: TypeDescriptor,
    /// Interface-facing type reference used in generated plain-method
    /// signatures; falls back to `ty` when absent.
    #[serde(default)]
    pub interface_type: Option<TypeDescriptor>,
}

impl ParameterDescriptor {
    pub fn new(name: &str, ty: TypeDescriptor) -> Self {
        Self {
            name: name.to_string(),
            ty,
            interface_type: None,
        }
    }

    /// The type to use in generated signatures.
    pub fn signature_type(&self) -> &TypeDescriptor {
        self.interface_type.as_ref().unwrap_or(&self.ty)
    }
}

/// One raw member declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Identity used for pair merging; assigned by the loader.
    pub id: MemberId,
    pub kind: MemberKind,
    pub declared_name: String,
    pub parameters: Vec<ParameterDescriptor>,
    pub return_type: TypeDescriptor,
    pub is_static: bool,
    /// Accessor side for Property/Event kinds; None otherwise.
    pub accessor: Option<Accessor>,
    /// The other half of a getter/setter or add/remove pair, if any.
    pub counterpart: Option<MemberId>,
    /// Qualified name of the declaring type.
    pub declaring_type: String,
    /// Member must be reachable only through the declaring interface.
    pub explicit_interface: bool,
    pub visibility: Visibility,
    /// Opaque guest-ABI signature token, carried through uninterpreted.
    pub signature: Option<String>,
}

impl MethodDescriptor {
    /// Create a plain method descriptor with a fresh identity.
    pub fn method(declaring_type: &str, name: &str, return_type: TypeDescriptor) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: MemberKind::Method,
            declared_name: name.to_string(),
            parameters: Vec::new(),
            return_type,
            is_static: false,
            accessor: None,
            counterpart: None,
            declaring_type: declaring_type.to_string(),
            explicit_interface: false,
            visibility: Visibility::Public,
            signature: None,
        }
    }

    /// Create a constructor descriptor, named after the declaring type.
    pub fn constructor(declaring_type: &str) -> Self {
        let simple = declaring_type
            .rsplit('.')
            .next()
            .unwrap_or(declaring_type)
            .to_string();
        let mut m = Self::method(declaring_type, &simple, TypeDescriptor::void());
        m.kind = MemberKind::Constructor;
        m
    }

    /// Create a static field descriptor with the given value type.
    pub fn static_field(declaring_type: &str, name: &str, value_type: TypeDescriptor) -> Self {
        let mut m = Self::method(declaring_type, name, value_type);
        m.kind = MemberKind::Field;
        m.is_static = true;
        m
    }

    /// Create one accessor side of a property.
    pub fn property(
        declaring_type: &str,
        name: &str,
        accessor: Accessor,
        return_type: TypeDescriptor,
    ) -> Self {
        let mut m = Self::method(declaring_type, name, return_type);
        m.kind = MemberKind::Property;
        m.accessor = Some(accessor);
        m
    }

    /// Create one accessor side of an event.
    pub fn event(declaring_type: &str, name: &str, accessor: Accessor) -> Self {
        let mut m = Self::method(declaring_type, name, TypeDescriptor::void());
        m.kind = MemberKind::Event;
        m.accessor = Some(accessor);
        m
    }

    /// Builder: append a parameter.
    pub fn with_param(mut self, name: &str, ty: TypeDescriptor) -> Self {
        self.parameters.push(ParameterDescriptor::new(name, ty));
        self
    }

    /// Whether this descriptor declares the writing side of its pair.
    pub fn is_writer_side(&self) -> bool {
        self.accessor.map(|a| a.is_writer()).unwrap_or(false)
    }

    /// The trailing synthetic parameter carrying a property/event value type.
    pub fn trailing_value_type(&self) -> Option<&TypeDescriptor> {
        self.parameters.last().map(|p| &p.ty)
    }
}
