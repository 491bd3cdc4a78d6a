//! The generated member model.
//!
//! Output shapes handed to the emitter. Forwarding bodies are abstract
//! [`ForwardPlan`]s — the dispatch direction, the internal call-site name,
//! and the conversion selected for each value — so the emitter renders
//! members directly from the model with no text fixups.

use causeway_model::{MemberId, TypeDescriptor, Visibility};

use crate::convert::{Conversion, Direction};

/// Name of the static descriptor field holding the guest-side class handle.
pub const STATIC_FIELD: &str = "classDescriptor";
/// Name of the initialization entry point that stores the class handle.
pub const INIT_METHOD: &str = "initBridge";
/// Name of the environment-handle parameter in generated bodies.
pub const ENV_PARAM: &str = "env";
/// Name of the nested construction-helper type.
pub const HELPER_TYPE: &str = "ConstructionHelper";

/// Visibility and qualifier flags on a generated member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub is_static: bool,
    /// Dispatch-only forwarding shapes are sealed against further overriding.
    pub is_final: bool,
    /// "new" qualifier shadowing an inherited declaration.
    pub is_new: bool,
}

impl Modifiers {
    pub fn new(visibility: Visibility, is_static: bool) -> Self {
        Self {
            visibility,
            is_static,
            is_final: false,
            is_new: false,
        }
    }
}

/// A parameter of a generated member.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedParameter {
    pub name: String,
    pub ty: TypeDescriptor,
}

/// The abstract body of one forwarding direction.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardPlan {
    /// Direction values move toward when dispatched.
    pub dispatch: Direction,
    /// Unique internal name of the underlying call site.
    pub call_target: String,
    /// Conversion per declared parameter, in order.
    pub arg_conversions: Vec<Conversion>,
    /// Conversion applied to the dispatched result, absent for void.
    pub return_conversion: Option<Conversion>,
}

impl ForwardPlan {
    pub fn new(dispatch: Direction, call_target: &str) -> Self {
        Self {
            dispatch,
            call_target: call_target.to_string(),
            arg_conversions: Vec::new(),
            return_conversion: None,
        }
    }
}

/// Static field caching the guest-side class handle.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticDescriptorField {
    pub name: String,
    /// Cleared only for the two root singletons.
    pub is_new: bool,
}

/// The single blessed mutation point for the static descriptor field.
#[derive(Debug, Clone, PartialEq)]
pub struct InitMethod {
    pub name: String,
    pub env_param: String,
    pub class_param: String,
    pub target_field: String,
}

/// A public forwarding method on the proxy surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardingMethod {
    pub name: String,
    pub parameters: Vec<GeneratedParameter>,
    pub return_type: TypeDescriptor,
    pub plan: Option<ForwardPlan>,
    pub modifiers: Modifiers,
    /// Qualified interface name when dispatch must resolve through it.
    pub explicit_interface: Option<String>,
    pub signature: Option<String>,
}

/// An internal guest→host wrapper registration.
#[derive(Debug, Clone, PartialEq)]
pub struct WrapperMethod {
    /// Internal name; wrappers never join the public surface.
    pub name: String,
    /// Declared name of the member being wrapped.
    pub source_name: String,
    pub parameters: Vec<GeneratedParameter>,
    pub return_type: TypeDescriptor,
    pub plan: ForwardPlan,
    pub signature: Option<String>,
}

/// A computed property, indexed when `parameters` is non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyMember {
    pub name: String,
    pub value_type: TypeDescriptor,
    pub parameters: Vec<GeneratedParameter>,
    pub getter: Option<ForwardPlan>,
    pub setter: Option<ForwardPlan>,
    /// Descriptor identities recorded for pair merging.
    pub getter_source: Option<MemberId>,
    pub setter_source: Option<MemberId>,
    pub modifiers: Modifiers,
    pub explicit_interface: Option<String>,
    pub signature: Option<String>,
}

/// An event with add/remove accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct EventMember {
    pub name: String,
    pub value_type: TypeDescriptor,
    pub parameters: Vec<GeneratedParameter>,
    pub add: Option<ForwardPlan>,
    pub remove: Option<ForwardPlan>,
    pub add_source: Option<MemberId>,
    pub remove_source: Option<MemberId>,
    pub modifiers: Modifiers,
    pub explicit_interface: Option<String>,
    pub signature: Option<String>,
}

/// A forwarding constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorMember {
    pub parameters: Vec<GeneratedParameter>,
    pub plan: Option<ForwardPlan>,
    /// Chain to a base constructor taking the environment handle with a null
    /// placeholder; cleared when the type is the bridge's root.
    pub chains_env_base: bool,
    pub modifiers: Modifiers,
}

/// The environment-handle constructor every proxy type carries exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvConstructor {
    pub env_param: String,
}

/// The nested type implementing "construct a proxy given an environment
/// handle", used by the two-runtime bootstrap.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructionHelper {
    pub proxy_type: String,
}

/// One generated member of a proxy type.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedMember {
    StaticField(StaticDescriptorField),
    Init(InitMethod),
    Method(ForwardingMethod),
    Wrapper(WrapperMethod),
    Property(PropertyMember),
    Event(EventMember),
    Constructor(ConstructorMember),
    EnvConstructor(EnvConstructor),
    Helper(ConstructionHelper),
}

impl GeneratedMember {
    /// The member's name on the type's public surface, if it has one.
    ///
    /// Wrapper registrations, explicit-interface members, and the fixed
    /// infrastructure members are excluded.
    pub fn public_name(&self) -> Option<&str> {
        match self {
            GeneratedMember::Method(m) if m.explicit_interface.is_none() => Some(&m.name),
            GeneratedMember::Property(p) if p.explicit_interface.is_none() => Some(&p.name),
            GeneratedMember::Event(e) if e.explicit_interface.is_none() => Some(&e.name),
            _ => None,
        }
    }

    /// Short label for diagnostics and the inspect view.
    pub fn kind_label(&self) -> &'static str {
        match self {
            GeneratedMember::StaticField(_) => "static-field",
            GeneratedMember::Init(_) => "init",
            GeneratedMember::Method(_) => "method",
            GeneratedMember::Wrapper(_) => "wrapper",
            GeneratedMember::Property(p) if !p.parameters.is_empty() => "indexed-property",
            GeneratedMember::Property(_) => "property",
            GeneratedMember::Event(_) => "event",
            GeneratedMember::Constructor(_) => "constructor",
            GeneratedMember::EnvConstructor(_) => "env-constructor",
            GeneratedMember::Helper(_) => "construction-helper",
        }
    }
}
