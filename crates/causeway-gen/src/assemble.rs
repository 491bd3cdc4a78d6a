//! Per-type proxy assembly.
//!
//! Drives the classifier, the name uniquifier, and the conversion selector
//! over one type's member list and produces the full ordered member set for
//! its proxy compile unit. The unit is buffered completely in memory; a
//! failed type never hands a partial member list to the writer.

use causeway_model::{Accessor, MemberKind, MethodDescriptor, TypeDescriptor, WellKnown};
use tracing::debug;

use crate::classify::classify;
use crate::context::{GenOptions, GenerationContext};
use crate::convert::{select, Conversion, Direction, ValueRole};
use crate::error::{GenError, Result};
use crate::member::{
    ConstructionHelper, EnvConstructor, ForwardPlan, GeneratedMember, GeneratedParameter,
    InitMethod, StaticDescriptorField, WrapperMethod, ENV_PARAM, INIT_METHOD, STATIC_FIELD,
};
use crate::names::{NameUniquifier, PublicNameLedger};

/// One fully assembled proxy compile unit.
#[derive(Debug, Clone)]
pub struct ProxyUnit {
    pub namespace: String,
    pub type_name: String,
    pub qualified_name: String,
    /// Name of the generated proxy type (`__Name`).
    pub proxy_type: String,
    /// Name of the generated companion type (`Name_`).
    pub static_type: String,
    /// Qualified name of the guest-side root type the proxy extends.
    pub base_type: String,
    /// Interface the proxy implements, for interface-shaped types.
    pub implements: Option<String>,
    /// Generated members, in emission order.
    pub members: Vec<GeneratedMember>,
}

/// Assemble the full member set for one type's proxy.
///
/// Member order: static descriptor field, init entry point, forwarding
/// members (methods, then constructors), wrapper registrations, construction
/// helper, environment-handle constructor.
pub fn assemble_proxy(
    ty: &TypeDescriptor,
    methods: &[MethodDescriptor],
    well_known: &WellKnown,
    options: &GenOptions,
) -> Result<ProxyUnit> {
    let ctx = GenerationContext::new(ty, well_known, options.clone());
    debug!(ty = %ctx.qualified_name(), members = methods.len(), "assembling proxy unit");

    let mut members: Vec<GeneratedMember> = Vec::new();
    let mut ledger = PublicNameLedger::new();
    let mut names = NameUniquifier::new();

    // Static descriptor field, qualified "new" unless the type is one of the
    // two root singletons.
    members.push(GeneratedMember::StaticField(StaticDescriptorField {
        name: STATIC_FIELD.to_string(),
        is_new: !well_known.is_root_singleton(ty),
    }));

    // The init entry point is the single blessed mutation point for the
    // static descriptor field.
    members.push(GeneratedMember::Init(InitMethod {
        name: INIT_METHOD.to_string(),
        env_param: ENV_PARAM.to_string(),
        class_param: "handle".to_string(),
        target_field: STATIC_FIELD.to_string(),
    }));

    let forwarding = ty.is_interface || ty.is_delegate;

    // Methods first, then constructors: the internal-name ordinal spans the
    // whole sequence.
    for method in methods.iter().filter(|m| m.kind != MemberKind::Constructor) {
        let internal = names.next_internal(&method.declared_name);
        if method.kind == MemberKind::Field {
            add_field_accessors(&ctx, &mut members, &mut ledger, method, &internal)?;
        } else if forwarding {
            add_proxy_member(&ctx, &mut members, &mut ledger, method, &internal)?;
        }
    }
    if forwarding {
        for ctor in methods.iter().filter(|m| m.kind == MemberKind::Constructor) {
            let internal = names.next_internal(&ctor.declared_name);
            let (index, _) = classify(&ctx, &mut members, &mut ledger, ctor, true)?;
            let plan = forward_plan(&ctx, ctor, Direction::ToGuest, &internal)?;
            if let GeneratedMember::Constructor(c) = &mut members[index] {
                c.plan = Some(plan);
            }
        }
    }

    // Mirrored guest→host wrapper registrations, unless the registration
    // opted out.
    if !ty.no_methods {
        for method in methods.iter().filter(|m| wraps(m.kind)) {
            let internal = names.next_internal(&method.declared_name);
            let plan = forward_plan(&ctx, method, Direction::ToHost, &internal)?;
            let parameters = method
                .parameters
                .iter()
                .map(|p| GeneratedParameter {
                    name: p.name.clone(),
                    ty: p.ty.clone(),
                })
                .collect();
            members.push(GeneratedMember::Wrapper(WrapperMethod {
                name: internal,
                source_name: method.declared_name.clone(),
                parameters,
                return_type: method.return_type.clone(),
                plan,
                signature: if options.skip_signatures {
                    None
                } else {
                    method.signature.clone()
                },
            }));
        }
    }

    // Exactly one construction helper and one environment-handle constructor.
    members.push(GeneratedMember::Helper(ConstructionHelper {
        proxy_type: ctx.proxy_type.clone(),
    }));
    members.push(GeneratedMember::EnvConstructor(EnvConstructor {
        env_param: ENV_PARAM.to_string(),
    }));

    debug!(ty = %ctx.qualified_name(), generated = members.len(), "proxy unit complete");

    Ok(ProxyUnit {
        namespace: ty.namespace.clone(),
        type_name: ty.name.clone(),
        qualified_name: ty.qualified_name(),
        proxy_type: ctx.proxy_type,
        static_type: ctx.static_type,
        base_type: well_known.guest_object.clone(),
        implements: ty.is_interface.then(|| ty.qualified_name()),
        members,
    })
}

/// Member kinds that get a guest→host wrapper registration.
fn wraps(kind: MemberKind) -> bool {
    matches!(
        kind,
        MemberKind::Method | MemberKind::Property | MemberKind::Event
    )
}

/// Classify one member for the proxy surface and fill its forwarding plan.
fn add_proxy_member(
    ctx: &GenerationContext<'_>,
    members: &mut Vec<GeneratedMember>,
    ledger: &mut PublicNameLedger,
    method: &MethodDescriptor,
    internal: &str,
) -> Result<()> {
    let (index, _) = classify(ctx, members, ledger, method, true)?;
    let plan = forward_plan(ctx, method, Direction::ToGuest, internal)?;
    match &mut members[index] {
        GeneratedMember::Method(m) => m.plan = Some(plan),
        GeneratedMember::Property(p) => {
            if method.is_writer_side() {
                p.setter = Some(plan);
            } else {
                p.getter = Some(plan);
            }
        }
        GeneratedMember::Event(e) => match method.accessor {
            Some(Accessor::Remove) => e.remove = Some(plan),
            _ => e.add = Some(plan),
        },
        GeneratedMember::Constructor(c) => c.plan = Some(plan),
        _ => {}
    }
    Ok(())
}

/// Fields become a computed property with both accessor plans filled from
/// the single field descriptor.
fn add_field_accessors(
    ctx: &GenerationContext<'_>,
    members: &mut Vec<GeneratedMember>,
    ledger: &mut PublicNameLedger,
    method: &MethodDescriptor,
    internal: &str,
) -> Result<()> {
    let (index, _) = classify(ctx, members, ledger, method, false)?;
    let getter = forward_plan(ctx, method, Direction::ToGuest, internal)?;
    let mut setter = ForwardPlan::new(Direction::ToGuest, internal);
    setter.arg_conversions.push(checked(
        ctx,
        Direction::ToGuest,
        &method.return_type,
        ValueRole::Param,
    )?);
    if let GeneratedMember::Property(p) = &mut members[index] {
        p.getter = Some(getter);
        p.setter = Some(setter);
    }
    Ok(())
}

/// Build the forwarding plan for one descriptor: arguments convert toward
/// the dispatch side, the result converts back.
fn forward_plan(
    ctx: &GenerationContext<'_>,
    method: &MethodDescriptor,
    dispatch: Direction,
    call_target: &str,
) -> Result<ForwardPlan> {
    let mut plan = ForwardPlan::new(dispatch, call_target);
    for param in &method.parameters {
        plan.arg_conversions
            .push(checked(ctx, dispatch, &param.ty, ValueRole::Param)?);
    }
    if !method.return_type.is_void() {
        plan.return_conversion = Some(checked(
            ctx,
            dispatch.reverse(),
            &method.return_type,
            ValueRole::ReturnOrArg,
        )?);
    }
    Ok(plan)
}

/// Select a conversion and enforce the totality contract. The decision table
/// ends in a total fallback, so an empty primitive name is a programming
/// error and aborts the type's assembly rather than emitting no conversion.
fn checked(
    ctx: &GenerationContext<'_>,
    direction: Direction,
    ty: &TypeDescriptor,
    role: ValueRole,
) -> Result<Conversion> {
    let conversion = select(direction, ty, role, ctx.well_known);
    if conversion.primitive.is_empty() {
        return Err(GenError::UnreachableConversion {
            type_name: ctx.qualified_name(),
            value_type: ty.qualified_name(),
            direction: direction.token().to_string(),
        });
    }
    Ok(conversion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use causeway_model::MethodDescriptor;

    fn wk() -> WellKnown {
        WellKnown::default()
    }

    fn guest_string() -> TypeDescriptor {
        TypeDescriptor::new("java.lang", "String").guest_real()
    }

    fn animal() -> TypeDescriptor {
        TypeDescriptor::new("com.example", "Animal")
            .with_interface()
            .guest_real()
    }

    fn name_pair() -> (MethodDescriptor, MethodDescriptor) {
        let mut getter = MethodDescriptor::property(
            "com.example.Animal",
            "Name",
            Accessor::Getter,
            guest_string(),
        );
        let mut setter = MethodDescriptor::property(
            "com.example.Animal",
            "Name",
            Accessor::Setter,
            TypeDescriptor::void(),
        )
        .with_param("value", guest_string());
        getter.counterpart = Some(setter.id);
        setter.counterpart = Some(getter.id);
        (getter, setter)
    }

    fn property_of(unit: &ProxyUnit, name: &str) -> crate::member::PropertyMember {
        unit.members
            .iter()
            .find_map(|m| match m {
                GeneratedMember::Property(p) if p.name == name => Some(p.clone()),
                _ => None,
            })
            .expect("property not generated")
    }

    #[test]
    fn animal_name_property_scenario() {
        let ty = animal();
        let (getter, setter) = name_pair();
        let unit =
            assemble_proxy(&ty, &[getter, setter], &wk(), &GenOptions::default()).unwrap();

        let properties: Vec<_> = unit
            .members
            .iter()
            .filter(|m| matches!(m, GeneratedMember::Property(_)))
            .collect();
        assert_eq!(properties.len(), 1);

        let name = property_of(&unit, "Name");
        let getter_plan = name.getter.expect("getter plan");
        let setter_plan = name.setter.expect("setter plan");

        let ret = getter_plan.return_conversion.expect("getter conversion");
        assert_eq!(ret.primitive, "StrongToHostString");
        assert!(ret.needs_env);

        assert_eq!(setter_plan.arg_conversions.len(), 1);
        assert_eq!(setter_plan.arg_conversions[0].primitive, "StrongToGuestString");
        assert!(setter_plan.arg_conversions[0].needs_env);
    }

    #[test]
    fn member_order_is_fixed() {
        let ty = animal();
        let count = MethodDescriptor::method(
            "com.example.Animal",
            "legCount",
            TypeDescriptor::primitive("int32"),
        );
        let unit = assemble_proxy(&ty, &[count], &wk(), &GenOptions::default()).unwrap();

        let labels: Vec<_> = unit.members.iter().map(|m| m.kind_label()).collect();
        assert_eq!(
            labels,
            vec![
                "static-field",
                "init",
                "method",
                "wrapper",
                "construction-helper",
                "env-constructor",
            ]
        );
    }

    #[test]
    fn primitive_return_selects_prim_to_host() {
        let ty = animal();
        let count = MethodDescriptor::method(
            "com.example.Animal",
            "count",
            TypeDescriptor::primitive("int32"),
        );
        let unit = assemble_proxy(&ty, &[count], &wk(), &GenOptions::default()).unwrap();
        let method = unit
            .members
            .iter()
            .find_map(|m| match m {
                GeneratedMember::Method(m) => Some(m.clone()),
                _ => None,
            })
            .unwrap();
        let plan = method.plan.unwrap();
        let ret = plan.return_conversion.unwrap();
        assert_eq!(ret.primitive, "PrimToHostInt32");
        assert!(!ret.needs_env);
    }

    #[test]
    fn root_singletons_skip_the_new_qualifier() {
        let object = TypeDescriptor::new("java.lang", "Object").guest_root();
        let unit = assemble_proxy(&object, &[], &wk(), &GenOptions::default()).unwrap();
        match &unit.members[0] {
            GeneratedMember::StaticField(f) => assert!(!f.is_new),
            other => panic!("expected static field first, got {other:?}"),
        }

        let other = assemble_proxy(&animal(), &[], &wk(), &GenOptions::default()).unwrap();
        match &other.members[0] {
            GeneratedMember::StaticField(f) => assert!(f.is_new),
            other => panic!("expected static field first, got {other:?}"),
        }
    }

    #[test]
    fn exactly_one_helper_and_env_constructor() {
        let unit = assemble_proxy(&animal(), &[], &wk(), &GenOptions::default()).unwrap();
        let helpers = unit
            .members
            .iter()
            .filter(|m| matches!(m, GeneratedMember::Helper(_)))
            .count();
        let env_ctors = unit
            .members
            .iter()
            .filter(|m| matches!(m, GeneratedMember::EnvConstructor(_)))
            .count();
        assert_eq!(helpers, 1);
        assert_eq!(env_ctors, 1);
    }

    #[test]
    fn overloads_get_distinct_call_targets() {
        let ty = animal();
        let a = MethodDescriptor::method("com.example.Animal", "speak", TypeDescriptor::void());
        let b = MethodDescriptor::method("com.example.Animal", "speak", TypeDescriptor::void())
            .with_param("volume", TypeDescriptor::primitive("int32"));
        let unit = assemble_proxy(&ty, &[a, b], &wk(), &GenOptions::default()).unwrap();

        let targets: Vec<_> = unit
            .members
            .iter()
            .filter_map(|m| match m {
                GeneratedMember::Method(m) => Some(m.plan.clone().unwrap().call_target),
                _ => None,
            })
            .collect();
        assert_eq!(targets.len(), 2);
        assert_ne!(targets[0], targets[1]);
    }

    #[test]
    fn wrapper_params_take_the_param_prefixed_primitives() {
        let ty = animal();
        let feed = MethodDescriptor::method("com.example.Animal", "feed", TypeDescriptor::void())
            .with_param("meals", TypeDescriptor::primitive("int32"))
            .with_param("diet", guest_string());
        let unit = assemble_proxy(&ty, &[feed], &wk(), &GenOptions::default()).unwrap();

        let wrapper = unit
            .members
            .iter()
            .find_map(|m| match m {
                GeneratedMember::Wrapper(w) => Some(w.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(wrapper.plan.dispatch, Direction::ToHost);
        assert_eq!(wrapper.plan.arg_conversions[0].primitive, "ParamPrimToHostInt32");
        assert_eq!(
            wrapper.plan.arg_conversions[1].primitive,
            "ParamStrongToHostString"
        );
    }

    #[test]
    fn no_methods_suppresses_wrappers_only() {
        let mut ty = animal();
        ty.no_methods = true;
        let run = MethodDescriptor::method("com.example.Animal", "run", TypeDescriptor::void());
        let unit = assemble_proxy(&ty, &[run], &wk(), &GenOptions::default()).unwrap();

        assert!(unit
            .members
            .iter()
            .all(|m| !matches!(m, GeneratedMember::Wrapper(_))));
        assert!(unit
            .members
            .iter()
            .any(|m| matches!(m, GeneratedMember::Method(_))));
    }

    #[test]
    fn class_shapes_get_wrappers_but_no_forwarding_methods() {
        let ty = TypeDescriptor::new("com.example", "Zoo").guest_real();
        let run = MethodDescriptor::method("com.example.Zoo", "open", TypeDescriptor::void());
        let unit = assemble_proxy(&ty, &[run], &wk(), &GenOptions::default()).unwrap();

        assert!(unit
            .members
            .iter()
            .all(|m| !matches!(m, GeneratedMember::Method(_))));
        assert!(unit
            .members
            .iter()
            .any(|m| matches!(m, GeneratedMember::Wrapper(_))));
    }

    #[test]
    fn static_fields_generate_both_accessor_plans() {
        let ty = TypeDescriptor::new("com.example", "Zoo").guest_real();
        let field = MethodDescriptor::static_field(
            "com.example.Zoo",
            "CAPACITY",
            TypeDescriptor::primitive("int32"),
        );
        let unit = assemble_proxy(&ty, &[field], &wk(), &GenOptions::default()).unwrap();

        let prop = property_of(&unit, "CAPACITY");
        assert!(prop.modifiers.is_static);
        let getter = prop.getter.unwrap();
        assert_eq!(getter.return_conversion.unwrap().primitive, "PrimToHostInt32");
        let setter = prop.setter.unwrap();
        assert_eq!(setter.arg_conversions[0].primitive, "PrimToGuestInt32");
    }

    #[test]
    fn array_of_host_real_parameter_avoids_the_fallback() {
        let ty = animal();
        let herd = TypeDescriptor::array_of(TypeDescriptor::new("System", "Tag").host_real());
        let tag = MethodDescriptor::method("com.example.Animal", "tag", TypeDescriptor::void())
            .with_param("tags", herd);
        let unit = assemble_proxy(&ty, &[tag], &wk(), &GenOptions::default()).unwrap();

        let method = unit
            .members
            .iter()
            .find_map(|m| match m {
                GeneratedMember::Method(m) => Some(m.clone()),
                _ => None,
            })
            .unwrap();
        let plan = method.plan.unwrap();
        assert_eq!(plan.arg_conversions[0].primitive, "ArrayStrongToGuestp");
    }

    #[test]
    fn duplicate_member_aborts_the_type() {
        let ty = animal();
        let (getter, setter) = name_pair();
        let clash = MethodDescriptor::method("com.example.Animal", "Name", guest_string());
        let err =
            assemble_proxy(&ty, &[getter, setter, clash], &wk(), &GenOptions::default())
                .unwrap_err();
        assert!(matches!(err, GenError::DuplicateMember { type_name, .. }
            if type_name == "com.example.Animal"));
    }

    #[test]
    fn skip_signatures_drops_the_tokens() {
        let ty = animal();
        let mut run = MethodDescriptor::method("com.example.Animal", "run", TypeDescriptor::void());
        run.signature = Some("()V".to_string());

        let with = assemble_proxy(&ty, &[run.clone()], &wk(), &GenOptions::default()).unwrap();
        let wrapper = with
            .members
            .iter()
            .find_map(|m| match m {
                GeneratedMember::Wrapper(w) => Some(w.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(wrapper.signature.as_deref(), Some("()V"));

        let options = GenOptions {
            skip_signatures: true,
        };
        let without = assemble_proxy(&ty, &[run], &wk(), &options).unwrap();
        let wrapper = without
            .members
            .iter()
            .find_map(|m| match m {
                GeneratedMember::Wrapper(w) => Some(w.clone()),
                _ => None,
            })
            .unwrap();
        assert!(wrapper.signature.is_none());
    }

    #[test]
    fn constructor_forwarding_for_delegate_shapes() {
        let ty = TypeDescriptor::new("com.example", "Callback")
            .with_delegate()
            .guest_real();
        let ctor = MethodDescriptor::constructor("com.example.Callback")
            .with_param("target", guest_string());
        let unit = assemble_proxy(&ty, &[ctor], &wk(), &GenOptions::default()).unwrap();

        let generated = unit
            .members
            .iter()
            .find_map(|m| match m {
                GeneratedMember::Constructor(c) => Some(c.clone()),
                _ => None,
            })
            .unwrap();
        assert!(generated.chains_env_base);
        let plan = generated.plan.unwrap();
        assert_eq!(plan.arg_conversions[0].primitive, "StrongToGuestString");
    }
}
