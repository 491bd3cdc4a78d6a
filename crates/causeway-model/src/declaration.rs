//! Bridge declaration file (`.bridge.toml`) parsing.
//!
//! A `.bridge.toml` file declares the types crossing the bridge and their raw
//! members, as exported from the guest runtime's metadata. Parsing produces
//! the immutable descriptor model consumed by the generation engine; member
//! type references are resolved against the declared types, the well-known
//! names, the fixed primitive set, and `Name[]` array suffixes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::descriptor::TypeDescriptor;
use crate::error::{ModelError, Result};
use crate::member::{
    Accessor, MemberKind, MethodDescriptor, ParameterDescriptor, Visibility,
};
use crate::registry::{TypeRegistry, WellKnown};

/// A complete bridge declaration parsed from a `.bridge.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeDeclaration {
    /// Metadata about the bridged library.
    pub bridge: BridgeInfo,
    /// Well-known type names; defaults name the conventional JVM/CLR types.
    #[serde(default, rename = "well-known")]
    pub well_known: WellKnown,
    /// The types to generate proxies for.
    #[serde(default, rename = "types")]
    pub types: Vec<TypeDecl>,
}

/// Metadata about the bridged library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeInfo {
    /// Declaration name (e.g. "animals").
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A single type declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Simple type name.
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub primitive: bool,
    #[serde(default)]
    pub interface: bool,
    #[serde(default)]
    pub delegate: bool,
    /// Registration opt-out: skip wrapper method generation.
    #[serde(default, alias = "no-methods")]
    pub no_methods: bool,
    #[serde(default, alias = "host-real")]
    pub host_real: bool,
    #[serde(default, alias = "guest-real")]
    pub guest_real: bool,
    #[serde(default, alias = "host-root")]
    pub host_root: bool,
    #[serde(default, alias = "guest-root")]
    pub guest_root: bool,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
}

impl TypeDecl {
    fn to_descriptor(&self) -> TypeDescriptor {
        let mut ty = TypeDescriptor::new(&self.namespace, &self.name);
        ty.is_primitive = self.primitive;
        ty.is_interface = self.interface;
        ty.is_delegate = self.delegate;
        ty.no_methods = self.no_methods;
        ty.host.is_real_type = self.host_real;
        ty.host.is_root_type = self.host_root;
        ty.guest.is_real_type = self.guest_real;
        ty.guest.is_root_type = self.guest_root;
        ty
    }
}

/// A single raw member declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDecl {
    pub kind: MemberKind,
    /// Declared name; defaults to the type name for constructors.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub accessor: Option<Accessor>,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    /// Return type reference; defaults to `void`.
    #[serde(default)]
    pub returns: Option<String>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, alias = "explicit-interface")]
    pub explicit_interface: bool,
    #[serde(default)]
    pub visibility: Visibility,
    /// Opaque guest-ABI signature token.
    #[serde(default)]
    pub signature: Option<String>,
}

/// A declared parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, alias = "interface-type")]
    pub interface_type: Option<String>,
}

/// A fully resolved bridge: descriptors plus linked member lists.
#[derive(Debug, Clone)]
pub struct ResolvedBridge {
    pub name: String,
    pub well_known: WellKnown,
    pub types: Vec<ResolvedType>,
}

/// One resolved type with its raw member descriptors.
#[derive(Debug, Clone)]
pub struct ResolvedType {
    pub descriptor: TypeDescriptor,
    pub members: Vec<MethodDescriptor>,
}

impl BridgeDeclaration {
    /// Parse a bridge declaration from a TOML string.
    pub fn parse(input: &str) -> Result<Self> {
        let decl: BridgeDeclaration = toml::from_str(input).map_err(ModelError::Toml)?;

        if decl.bridge.name.is_empty() {
            return Err(ModelError::InvalidDeclaration {
                detail: "bridge.name is required".to_string(),
            });
        }

        Ok(decl)
    }

    /// Parse a bridge declaration from a file path.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Resolve all type references and link accessor counterparts.
    pub fn resolve(&self) -> Result<ResolvedBridge> {
        let mut registry = TypeRegistry::with_well_known(&self.well_known);
        for decl in &self.types {
            registry.register(decl.to_descriptor());
        }

        let mut types = Vec::new();
        for decl in &self.types {
            let descriptor = decl.to_descriptor();
            let mut members = Vec::new();
            for member in &decl.members {
                members.push(resolve_member(&registry, &descriptor, member)?);
            }
            link_counterparts(&mut members);
            types.push(ResolvedType {
                descriptor,
                members,
            });
        }

        Ok(ResolvedBridge {
            name: self.bridge.name.clone(),
            well_known: self.well_known.clone(),
            types,
        })
    }
}

fn resolve_member(
    registry: &TypeRegistry,
    declaring: &TypeDescriptor,
    decl: &MemberDecl,
) -> Result<MethodDescriptor> {
    let name = match (&decl.name, decl.kind) {
        (Some(name), _) => name.clone(),
        (None, MemberKind::Constructor) => declaring.name.clone(),
        (None, kind) => {
            return Err(ModelError::InvalidDeclaration {
                detail: format!("{kind:?} member of `{declaring}` is missing a name"),
            })
        }
    };

    if matches!(decl.kind, MemberKind::Property | MemberKind::Event) && decl.accessor.is_none() {
        return Err(ModelError::InvalidDeclaration {
            detail: format!("{:?} `{name}` of `{declaring}` is missing an accessor", decl.kind),
        });
    }

    let mut parameters = Vec::new();
    for param in &decl.params {
        let ty = registry.resolve(&param.ty)?;
        let interface_type = match &param.interface_type {
            Some(reference) => Some(registry.resolve(reference)?),
            None => None,
        };
        parameters.push(ParameterDescriptor {
            name: param.name.clone(),
            ty,
            interface_type,
        });
    }

    let return_type = match &decl.returns {
        Some(reference) => registry.resolve(reference)?,
        None => TypeDescriptor::void(),
    };

    Ok(MethodDescriptor {
        id: Uuid::new_v4(),
        kind: decl.kind,
        declared_name: name,
        parameters,
        return_type,
        is_static: decl.is_static,
        accessor: decl.accessor,
        counterpart: None,
        declaring_type: declaring.qualified_name(),
        explicit_interface: decl.explicit_interface,
        visibility: decl.visibility,
        signature: decl.signature.clone(),
    })
}

/// Link getter/setter and add/remove pairs by declared name and identical
/// leading-parameter list. Pairing is order-independent: the first unpaired
/// complementary side wins.
fn link_counterparts(members: &mut [MethodDescriptor]) {
    let mut pending: HashMap<(MemberKind, String, Vec<String>), usize> = HashMap::new();

    for i in 0..members.len() {
        let accessor = match members[i].accessor {
            Some(a) => a,
            None => continue,
        };
        let key = (
            members[i].kind,
            members[i].declared_name.clone(),
            leading_param_key(&members[i]),
        );
        match pending.get(&key).copied() {
            Some(j) if complementary(members[j].accessor, Some(accessor)) => {
                let (a, b) = (members[j].id, members[i].id);
                members[j].counterpart = Some(b);
                members[i].counterpart = Some(a);
                pending.remove(&key);
            }
            _ => {
                pending.insert(key, i);
            }
        }
    }
}

fn complementary(a: Option<Accessor>, b: Option<Accessor>) -> bool {
    matches!(
        (a, b),
        (Some(Accessor::Getter), Some(Accessor::Setter))
            | (Some(Accessor::Setter), Some(Accessor::Getter))
            | (Some(Accessor::Add), Some(Accessor::Remove))
            | (Some(Accessor::Remove), Some(Accessor::Add))
    )
}

/// The user-visible leading parameters of an accessor descriptor: the
/// trailing synthetic value parameter is dropped from event sides and from
/// property setters.
fn leading_param_key(member: &MethodDescriptor) -> Vec<String> {
    let params = &member.parameters;
    let count = match member.kind {
        MemberKind::Event => params.len().saturating_sub(1),
        MemberKind::Property if member.is_writer_side() => params.len().saturating_sub(1),
        _ => params.len(),
    };
    params[..count]
        .iter()
        .map(|p| p.ty.qualified_name())
        .collect()
}
