//! Member shape classification and accessor pair merging.
//!
//! Decides the canonical generated shape of a raw member declaration and
//! merges paired declarations (getter+setter, add+remove) into one generated
//! member. First-creation is the only insertion point into the member list,
//! so a pair never produces a duplicate declaration regardless of which side
//! is discovered first.

use causeway_model::{Accessor, MemberId, MemberKind, MethodDescriptor};

use crate::context::GenerationContext;
use crate::error::{GenError, Result};
use crate::member::{
    ConstructorMember, EventMember, ForwardingMethod, GeneratedMember, GeneratedParameter,
    Modifiers, PropertyMember,
};
use crate::names::{NameShape, PublicNameLedger};

/// Classify one raw member into its generated shape.
///
/// Returns the index of the created-or-reused member and whether it was
/// newly created. Forwarding plans are filled by the assembler afterwards;
/// property/event value types and declared parameter lists are settled here.
pub fn classify(
    ctx: &GenerationContext<'_>,
    members: &mut Vec<GeneratedMember>,
    ledger: &mut PublicNameLedger,
    method: &MethodDescriptor,
    is_proxy: bool,
) -> Result<(usize, bool)> {
    match method.kind {
        MemberKind::Constructor => new_constructor(ctx, members, ledger, method, is_proxy),
        MemberKind::Field => field_property(ctx, members, ledger, method, is_proxy),
        MemberKind::Event => event_member(ctx, members, ledger, method, is_proxy),
        MemberKind::Property => property_member(ctx, members, ledger, method, is_proxy),
        MemberKind::Method => plain_method(ctx, members, ledger, method, is_proxy),
    }
}

fn base_modifiers(method: &MethodDescriptor, is_proxy: bool) -> Modifiers {
    let mut modifiers = Modifiers::new(method.visibility, method.is_static);
    // Dispatch-only forwarding code must not be overridden further.
    modifiers.is_final = is_proxy;
    modifiers
}

fn explicit_target(method: &MethodDescriptor) -> Option<String> {
    method
        .explicit_interface
        .then(|| method.declaring_type.clone())
}

fn signature_token(
    ctx: &GenerationContext<'_>,
    method: &MethodDescriptor,
    is_proxy: bool,
) -> Option<String> {
    if ctx.options.skip_signatures || is_proxy {
        None
    } else {
        method.signature.clone()
    }
}

fn duplicate(ctx: &GenerationContext<'_>, name: &str) -> GenError {
    GenError::DuplicateMember {
        type_name: ctx.qualified_name(),
        member: name.to_string(),
    }
}

fn incomplete(ctx: &GenerationContext<'_>, name: &str) -> GenError {
    GenError::IncompleteMemberPair {
        type_name: ctx.qualified_name(),
        member: name.to_string(),
    }
}

fn declared_parameters(method: &MethodDescriptor, count: usize) -> Vec<GeneratedParameter> {
    method.parameters[..count]
        .iter()
        .map(|p| GeneratedParameter {
            name: p.name.clone(),
            ty: p.ty.clone(),
        })
        .collect()
}

/// Constructors are always new; a fresh member per declaration.
fn new_constructor(
    ctx: &GenerationContext<'_>,
    members: &mut Vec<GeneratedMember>,
    ledger: &mut PublicNameLedger,
    method: &MethodDescriptor,
    is_proxy: bool,
) -> Result<(usize, bool)> {
    if !ledger.reserve(&method.declared_name, NameShape::Constructor) {
        return Err(duplicate(ctx, &method.declared_name));
    }
    let parameters = method
        .parameters
        .iter()
        .map(|p| GeneratedParameter {
            name: p.name.clone(),
            ty: p.signature_type().clone(),
        })
        .collect();
    members.push(GeneratedMember::Constructor(ConstructorMember {
        parameters,
        plan: None,
        chains_env_base: !ctx.ty.guest.is_root_type,
        modifiers: base_modifiers(method, is_proxy),
    }));
    Ok((members.len() - 1, true))
}

/// Fields become computed properties; at most one per declared name, found
/// by linear scan.
fn field_property(
    ctx: &GenerationContext<'_>,
    members: &mut Vec<GeneratedMember>,
    ledger: &mut PublicNameLedger,
    method: &MethodDescriptor,
    is_proxy: bool,
) -> Result<(usize, bool)> {
    for (i, member) in members.iter_mut().enumerate() {
        if let GeneratedMember::Property(p) = member {
            if p.name == method.declared_name {
                p.modifiers = base_modifiers(method, is_proxy);
                return Ok((i, false));
            }
        }
    }

    if !ledger.reserve(&method.declared_name, NameShape::Property) {
        return Err(duplicate(ctx, &method.declared_name));
    }
    members.push(GeneratedMember::Property(PropertyMember {
        name: method.declared_name.clone(),
        value_type: method.return_type.clone(),
        parameters: Vec::new(),
        getter: None,
        setter: None,
        getter_source: None,
        setter_source: None,
        modifiers: base_modifiers(method, is_proxy),
        explicit_interface: None,
        signature: signature_token(ctx, method, is_proxy),
    }));
    Ok((members.len() - 1, true))
}

/// Events merge by recorded descriptor identity, so add/remove pairs fold
/// into one member even when discovered on separate passes.
fn event_member(
    ctx: &GenerationContext<'_>,
    members: &mut Vec<GeneratedMember>,
    ledger: &mut PublicNameLedger,
    method: &MethodDescriptor,
    is_proxy: bool,
) -> Result<(usize, bool)> {
    for (i, member) in members.iter_mut().enumerate() {
        if let GeneratedMember::Event(e) = member {
            if e.add_source == Some(method.id) || e.remove_source == Some(method.id) {
                e.modifiers = base_modifiers(method, is_proxy);
                return Ok((i, false));
            }
        }
    }

    let value_type = method
        .trailing_value_type()
        .cloned()
        .ok_or_else(|| incomplete(ctx, &method.declared_name))?;
    let (add_source, remove_source): (Option<MemberId>, Option<MemberId>) =
        match method.accessor {
            Some(Accessor::Add) => (Some(method.id), method.counterpart),
            _ => (method.counterpart, Some(method.id)),
        };

    let explicit_interface = explicit_target(method);
    if explicit_interface.is_none() && !ledger.reserve(&method.declared_name, NameShape::Event) {
        return Err(duplicate(ctx, &method.declared_name));
    }
    members.push(GeneratedMember::Event(EventMember {
        name: method.declared_name.clone(),
        value_type,
        parameters: declared_parameters(method, method.parameters.len() - 1),
        add: None,
        remove: None,
        add_source,
        remove_source,
        modifiers: base_modifiers(method, is_proxy),
        explicit_interface,
        signature: signature_token(ctx, method, is_proxy),
    }));
    Ok((members.len() - 1, true))
}

/// Properties use the same identity-keyed merge strategy as events. The
/// value type comes from the return type on the getter side and from the
/// trailing parameter on the setter side.
fn property_member(
    ctx: &GenerationContext<'_>,
    members: &mut Vec<GeneratedMember>,
    ledger: &mut PublicNameLedger,
    method: &MethodDescriptor,
    is_proxy: bool,
) -> Result<(usize, bool)> {
    for (i, member) in members.iter_mut().enumerate() {
        if let GeneratedMember::Property(p) = member {
            if p.getter_source == Some(method.id) || p.setter_source == Some(method.id) {
                p.modifiers = base_modifiers(method, is_proxy);
                return Ok((i, false));
            }
        }
    }

    let writer = method.is_writer_side();
    let value_type = if writer {
        method
            .trailing_value_type()
            .cloned()
            .ok_or_else(|| incomplete(ctx, &method.declared_name))?
    } else {
        if method.return_type.is_void() {
            return Err(incomplete(ctx, &method.declared_name));
        }
        method.return_type.clone()
    };
    let declared_count = method.parameters.len() - usize::from(writer);
    let (getter_source, setter_source): (Option<MemberId>, Option<MemberId>) = if writer {
        (method.counterpart, Some(method.id))
    } else {
        (Some(method.id), method.counterpart)
    };

    let explicit_interface = explicit_target(method);
    if explicit_interface.is_none() && !ledger.reserve(&method.declared_name, NameShape::Property)
    {
        return Err(duplicate(ctx, &method.declared_name));
    }
    members.push(GeneratedMember::Property(PropertyMember {
        name: method.declared_name.clone(),
        value_type,
        parameters: declared_parameters(method, declared_count),
        getter: None,
        setter: None,
        getter_source,
        setter_source,
        modifiers: base_modifiers(method, is_proxy),
        explicit_interface,
        signature: signature_token(ctx, method, is_proxy),
    }));
    Ok((members.len() - 1, true))
}

/// Plain methods are always new; parameters keep their interface-facing type
/// references so generated signatures stay stable across implementations.
fn plain_method(
    ctx: &GenerationContext<'_>,
    members: &mut Vec<GeneratedMember>,
    ledger: &mut PublicNameLedger,
    method: &MethodDescriptor,
    is_proxy: bool,
) -> Result<(usize, bool)> {
    let explicit_interface = explicit_target(method);
    if explicit_interface.is_none() && !ledger.reserve(&method.declared_name, NameShape::Method) {
        return Err(duplicate(ctx, &method.declared_name));
    }
    let parameters = method
        .parameters
        .iter()
        .map(|p| GeneratedParameter {
            name: p.name.clone(),
            ty: p.signature_type().clone(),
        })
        .collect();
    members.push(GeneratedMember::Method(ForwardingMethod {
        name: method.declared_name.clone(),
        parameters,
        return_type: method.return_type.clone(),
        plan: None,
        modifiers: base_modifiers(method, is_proxy),
        explicit_interface,
        signature: signature_token(ctx, method, is_proxy),
    }));
    Ok((members.len() - 1, true))
}
