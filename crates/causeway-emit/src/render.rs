//! Textual rendering of one proxy unit.
//!
//! Line-oriented rendering of the abstract member model into host-language
//! source. Conversion calls go through the runtime's `Bridge` support type;
//! cross-runtime dispatch goes through `Dispatch`. Event accessors are
//! rendered directly from the event member — there is no pattern-based text
//! rewriting of property output.

use causeway_gen::member::{
    ConstructorMember, EventMember, ForwardPlan, ForwardingMethod, GeneratedMember,
    GeneratedParameter, Modifiers, PropertyMember, WrapperMethod,
};
use causeway_gen::ProxyUnit;
use causeway_model::{TypeDescriptor, Visibility};

use crate::error::{EmitError, Result};

const INDENT: &str = "    ";

/// Render a complete proxy unit to host source text.
pub fn render_unit(unit: &ProxyUnit) -> Result<String> {
    let mut lines: Vec<String> = Vec::new();
    lines.push("// Generated by causeway. Do not edit.".to_string());
    lines.push(String::new());

    let has_namespace = !unit.namespace.is_empty();
    let mut depth = 0;
    if has_namespace {
        lines.push(format!("namespace {} {{", unit.namespace));
        lines.push(String::new());
        depth = 1;
    }

    let mut bases = vec![unit.base_type.clone()];
    if let Some(implements) = &unit.implements {
        bases.push(implements.clone());
    }
    push(&mut lines, depth, &format!(
        "internal sealed partial class {} : {} {{",
        unit.proxy_type,
        bases.join(", ")
    ));

    for member in &unit.members {
        lines.push(String::new());
        render_member(&mut lines, depth + 1, unit, member)?;
    }

    push(&mut lines, depth, "}");
    if has_namespace {
        lines.push(String::new());
        lines.push("}".to_string());
    }
    lines.push(String::new());
    Ok(lines.join("\n"))
}

fn push(lines: &mut Vec<String>, depth: usize, text: &str) {
    lines.push(format!("{}{}", INDENT.repeat(depth), text));
}

fn render_member(
    lines: &mut Vec<String>,
    depth: usize,
    unit: &ProxyUnit,
    member: &GeneratedMember,
) -> Result<()> {
    match member {
        GeneratedMember::StaticField(field) => {
            let qualifier = if field.is_new { "new " } else { "" };
            push(lines, depth, &format!(
                "internal static {qualifier}ClassHandle {};",
                field.name
            ));
        }
        GeneratedMember::Init(init) => {
            push(lines, depth, &format!(
                "internal static void {}(EnvHandle {}, ClassHandle {}) {{",
                init.name, init.env_param, init.class_param
            ));
            push(lines, depth + 1, &format!(
                "{} = {};",
                init.target_field, init.class_param
            ));
            push(lines, depth, "}");
        }
        GeneratedMember::Method(method) => render_method(lines, depth, unit, method)?,
        GeneratedMember::Wrapper(wrapper) => render_wrapper(lines, depth, wrapper),
        GeneratedMember::Property(property) => render_property(lines, depth, property),
        GeneratedMember::Event(event) => render_event(lines, depth, event),
        GeneratedMember::Constructor(ctor) => render_constructor(lines, depth, unit, ctor)?,
        GeneratedMember::EnvConstructor(ctor) => {
            push(lines, depth, &format!(
                "internal {}(EnvHandle {}) : base({}) {{ }}",
                unit.proxy_type, ctor.env_param, ctor.env_param
            ));
        }
        GeneratedMember::Helper(helper) => {
            push(lines, depth, "internal sealed class ConstructionHelper : IConstructionHelper {");
            push(lines, depth + 1, "public IProxy createProxy(EnvHandle env) {");
            push(lines, depth + 2, &format!("return new {}(env);", helper.proxy_type));
            push(lines, depth + 1, "}");
            push(lines, depth, "}");
        }
    }
    Ok(())
}

fn render_method(
    lines: &mut Vec<String>,
    depth: usize,
    unit: &ProxyUnit,
    method: &ForwardingMethod,
) -> Result<()> {
    let plan = method.plan.as_ref().ok_or_else(|| EmitError::Render {
        type_name: unit.qualified_name.clone(),
        detail: format!("method `{}` has no forwarding plan", method.name),
    })?;

    render_signature_attribute(lines, depth, method.signature.as_deref());
    let name = match &method.explicit_interface {
        Some(interface) => format!("{interface}.{}", method.name),
        None => method.name.clone(),
    };
    let head = match &method.explicit_interface {
        // Explicit interface members carry no visibility of their own.
        Some(_) => String::new(),
        None => modifier_prefix(&method.modifiers),
    };
    push(lines, depth, &format!(
        "{head}{} {name}({}) {{",
        type_name(&method.return_type),
        parameter_list(&method.parameters)
    ));

    let args: Vec<String> = method
        .parameters
        .iter()
        .enumerate()
        .map(|(i, p)| converted_arg(plan, i, &p.name))
        .collect();
    let call = dispatch_call(plan, &args);
    match &plan.return_conversion {
        Some(conversion) => {
            push(lines, depth + 1, &format!(
                "return {};",
                conversion_expr(conversion, &call)
            ));
        }
        None => push(lines, depth + 1, &format!("{call};")),
    }
    push(lines, depth, "}");
    Ok(())
}

fn render_wrapper(lines: &mut Vec<String>, depth: usize, wrapper: &WrapperMethod) {
    render_signature_attribute(lines, depth, wrapper.signature.as_deref());
    push(lines, depth, &format!(
        "internal static object {}(EnvHandle env, object[] args) {{",
        wrapper.name
    ));

    let args: Vec<String> = wrapper
        .plan
        .arg_conversions
        .iter()
        .enumerate()
        .map(|(i, conversion)| conversion_expr(conversion, &format!("args[{i}]")))
        .collect();
    let invoke = if args.is_empty() {
        format!("Host.invoke(\"{}\")", wrapper.source_name)
    } else {
        format!("Host.invoke(\"{}\", {})", wrapper.source_name, args.join(", "))
    };
    match &wrapper.plan.return_conversion {
        Some(conversion) => {
            push(lines, depth + 1, &format!(
                "return {};",
                conversion_expr(conversion, &invoke)
            ));
        }
        None => {
            push(lines, depth + 1, &format!("{invoke};"));
            push(lines, depth + 1, "return null;");
        }
    }
    push(lines, depth, "}");
}

fn render_property(lines: &mut Vec<String>, depth: usize, property: &PropertyMember) {
    render_signature_attribute(lines, depth, property.signature.as_deref());
    let head = match &property.explicit_interface {
        Some(_) => String::new(),
        None => modifier_prefix(&property.modifiers),
    };
    let name = match &property.explicit_interface {
        Some(interface) => format!("{interface}.{}", property.name),
        None => property.name.clone(),
    };
    let indexer = if property.parameters.is_empty() {
        String::new()
    } else {
        format!("[{}]", parameter_list(&property.parameters))
    };
    push(lines, depth, &format!(
        "{head}{} {name}{indexer} {{",
        type_name(&property.value_type)
    ));

    if let Some(plan) = &property.getter {
        render_accessor(lines, depth + 1, "get", plan, &property.parameters, None);
    }
    if let Some(plan) = &property.setter {
        render_accessor(lines, depth + 1, "set", plan, &property.parameters, Some("value"));
    }
    push(lines, depth, "}");
}

fn render_event(lines: &mut Vec<String>, depth: usize, event: &EventMember) {
    render_signature_attribute(lines, depth, event.signature.as_deref());
    let head = match &event.explicit_interface {
        Some(_) => String::new(),
        None => modifier_prefix(&event.modifiers),
    };
    let name = match &event.explicit_interface {
        Some(interface) => format!("{interface}.{}", event.name),
        None => event.name.clone(),
    };
    push(lines, depth, &format!(
        "{head}event {} {name} {{",
        type_name(&event.value_type)
    ));

    if let Some(plan) = &event.add {
        render_accessor(lines, depth + 1, "add", plan, &event.parameters, Some("value"));
    }
    if let Some(plan) = &event.remove {
        render_accessor(lines, depth + 1, "remove", plan, &event.parameters, Some("value"));
    }
    push(lines, depth, "}");
}

/// Render one accessor body. Declared parameters convert first; the trailing
/// `value` conversion (when present) is the plan's last argument slot.
fn render_accessor(
    lines: &mut Vec<String>,
    depth: usize,
    keyword: &str,
    plan: &ForwardPlan,
    parameters: &[GeneratedParameter],
    value_name: Option<&str>,
) {
    push(lines, depth, &format!("{keyword} {{"));
    let mut args: Vec<String> = parameters
        .iter()
        .enumerate()
        .map(|(i, p)| converted_arg(plan, i, &p.name))
        .collect();
    if let Some(value) = value_name {
        let slot = parameters.len();
        args.push(converted_arg(plan, slot, value));
    }
    let call = dispatch_call(plan, &args);
    match &plan.return_conversion {
        Some(conversion) => {
            push(lines, depth + 1, &format!(
                "return {};",
                conversion_expr(conversion, &call)
            ));
        }
        None => push(lines, depth + 1, &format!("{call};")),
    }
    push(lines, depth, "}");
}

fn render_constructor(
    lines: &mut Vec<String>,
    depth: usize,
    unit: &ProxyUnit,
    ctor: &ConstructorMember,
) -> Result<()> {
    let plan = ctor.plan.as_ref().ok_or_else(|| EmitError::Render {
        type_name: unit.qualified_name.clone(),
        detail: "constructor has no forwarding plan".to_string(),
    })?;

    // The real environment handle is supplied by the body; the base chain
    // takes a null placeholder.
    let chain = if ctor.chains_env_base {
        " : base((EnvHandle) null)"
    } else {
        ""
    };
    push(lines, depth, &format!(
        "{}{}({}){chain} {{",
        modifier_prefix(&ctor.modifiers),
        unit.proxy_type,
        parameter_list(&ctor.parameters)
    ));
    let args: Vec<String> = ctor
        .parameters
        .iter()
        .enumerate()
        .map(|(i, p)| converted_arg(plan, i, &p.name))
        .collect();
    push(lines, depth + 1, &format!(
        "Dispatch.construct(env, {}{});",
        plan.call_target,
        args.iter().map(|a| format!(", {a}")).collect::<String>()
    ));
    push(lines, depth, "}");
    Ok(())
}

fn render_signature_attribute(lines: &mut Vec<String>, depth: usize, signature: Option<&str>) {
    if let Some(signature) = signature {
        push(lines, depth, &format!("[GuestMethod(\"{signature}\")]"));
    }
}

fn modifier_prefix(modifiers: &Modifiers) -> String {
    let mut head = String::new();
    head.push_str(match modifiers.visibility {
        Visibility::Public => "public ",
        Visibility::Protected => "protected ",
        Visibility::Internal => "internal ",
        Visibility::Private => "private ",
    });
    if modifiers.is_new {
        head.push_str("new ");
    }
    if modifiers.is_static {
        head.push_str("static ");
    }
    if modifiers.is_final {
        head.push_str("sealed ");
    }
    head
}

fn parameter_list(parameters: &[GeneratedParameter]) -> String {
    parameters
        .iter()
        .map(|p| format!("{} {}", type_name(&p.ty), p.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn type_name(ty: &TypeDescriptor) -> String {
    ty.qualified_name()
}

fn converted_arg(plan: &ForwardPlan, index: usize, name: &str) -> String {
    match plan.arg_conversions.get(index) {
        Some(conversion) => conversion_expr(conversion, name),
        None => name.to_string(),
    }
}

fn conversion_expr(conversion: &causeway_gen::Conversion, inner: &str) -> String {
    if conversion.needs_env {
        format!("Bridge.{}(env, {inner})", conversion.primitive)
    } else {
        format!("Bridge.{}({inner})", conversion.primitive)
    }
}

fn dispatch_call(plan: &ForwardPlan, args: &[String]) -> String {
    let mut call = format!("Dispatch.call(env, {}", plan.call_target);
    for arg in args {
        call.push_str(", ");
        call.push_str(arg);
    }
    call.push(')');
    call
}
