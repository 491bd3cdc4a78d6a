//! The conversion decision table.
//!
//! Maps (direction, type, role) to the marshalling primitive that moves a
//! value across the runtime boundary, plus whether that primitive takes the
//! runtime-environment handle as its first argument.
//!
//! The original chained-predicate rules are re-expressed as a closed
//! [`TypeCategory`] computed once per descriptor and matched exhaustively, so
//! rule order and totality are checkable in one place. Rule priority is
//! fixed: the first matching category wins, and a descriptor satisfying two
//! terminal rules (say, delegate and host-real) classifies by the
//! earlier-listed one.

use std::fmt;

use causeway_model::{TypeDescriptor, WellKnown};

/// Conversion direction across the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Guest representation → host representation.
    ToHost,
    /// Host representation → guest representation.
    ToGuest,
}

impl Direction {
    /// The token spliced into primitive names.
    pub fn token(&self) -> &'static str {
        match self {
            Direction::ToHost => "ToHost",
            Direction::ToGuest => "ToGuest",
        }
    }

    /// The opposite direction.
    pub fn reverse(&self) -> Direction {
        match self {
            Direction::ToHost => Direction::ToGuest,
            Direction::ToGuest => Direction::ToHost,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Positional role of the converted value.
///
/// Inbound parameters are converted independently from outbound return
/// values, even though the category logic is identical: the `Param` role
/// selects a distinguished `Param`-prefixed primitive for the primitive and
/// string/class-alias rules in the guest→host direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueRole {
    ReturnOrArg,
    Param,
}

/// Category of a non-array descriptor, in rule priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarCategory {
    Primitive,
    HostString,
    GuestString,
    ClassAlias,
    Delegate,
    HostReal,
    GuestReal,
    Other,
}

/// Closed category of a descriptor. Array element categorization recurses
/// exactly one level: the element is classified as a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    Array(ScalarCategory),
    Scalar(ScalarCategory),
}

/// A selected marshalling primitive and its calling convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Name of the marshalling primitive to invoke.
    pub primitive: String,
    /// Whether the primitive takes the environment handle first.
    pub needs_env: bool,
}

/// Compute the category of a descriptor.
pub fn categorize(ty: &TypeDescriptor, well_known: &WellKnown) -> TypeCategory {
    match ty.element() {
        Some(element) => TypeCategory::Array(scalar_category(element, well_known)),
        None => TypeCategory::Scalar(scalar_category(ty, well_known)),
    }
}

fn scalar_category(ty: &TypeDescriptor, well_known: &WellKnown) -> ScalarCategory {
    if ty.is_primitive {
        ScalarCategory::Primitive
    } else if well_known.is_host_string(ty) {
        ScalarCategory::HostString
    } else if well_known.is_guest_string(ty) {
        ScalarCategory::GuestString
    } else if well_known.is_class_alias(ty) {
        ScalarCategory::ClassAlias
    } else if ty.is_delegate {
        ScalarCategory::Delegate
    } else if !ty.is_interface && !ty.host.is_root_type && ty.host.is_real_type {
        ScalarCategory::HostReal
    } else if !ty.is_interface && !ty.guest.is_root_type && ty.guest.is_real_type {
        ScalarCategory::GuestReal
    } else {
        ScalarCategory::Other
    }
}

/// Select the marshalling primitive for one value.
///
/// Total over every reachable category combination: the `Full` fallback
/// closes the table, so a non-empty primitive name always comes back.
pub fn select(
    direction: Direction,
    ty: &TypeDescriptor,
    role: ValueRole,
    well_known: &WellKnown,
) -> Conversion {
    let d = direction.token();
    match categorize(ty, well_known) {
        TypeCategory::Array(element) => {
            let primitive = match element {
                ScalarCategory::Primitive => {
                    let name = ty.element().map(|e| capitalize(&e.name)).unwrap_or_default();
                    format!("ArrayPrim{d}{name}")
                }
                ScalarCategory::GuestString => format!("ArrayStrong{d}String"),
                ScalarCategory::ClassAlias => format!("ArrayStrong{d}Class"),
                ScalarCategory::HostReal => format!("ArrayStrong{d}p"),
                ScalarCategory::GuestReal => format!("ArrayStrong{d}"),
                // No dedicated array rule: fully-wrapped proxy path.
                ScalarCategory::HostString | ScalarCategory::Delegate | ScalarCategory::Other => {
                    format!("ArrayFull{d}")
                }
            };
            Conversion {
                primitive,
                needs_env: true,
            }
        }
        TypeCategory::Scalar(category) => {
            let p = param_prefix(direction, role, category);
            match category {
                ScalarCategory::Primitive => Conversion {
                    primitive: format!("{p}Prim{d}{}", capitalize(&ty.name)),
                    needs_env: false,
                },
                ScalarCategory::HostString => Conversion {
                    primitive: format!("{p}Strong{d}pString"),
                    needs_env: true,
                },
                ScalarCategory::GuestString => Conversion {
                    primitive: format!("{p}Strong{d}String"),
                    needs_env: true,
                },
                ScalarCategory::ClassAlias => Conversion {
                    primitive: format!("{p}Strong{d}pClass"),
                    needs_env: true,
                },
                ScalarCategory::Delegate => Conversion {
                    primitive: format!("Strong{d}pDelegate"),
                    needs_env: true,
                },
                ScalarCategory::HostReal => Conversion {
                    primitive: format!("Strong{d}p"),
                    needs_env: true,
                },
                ScalarCategory::GuestReal => Conversion {
                    primitive: format!("Strong{d}"),
                    needs_env: true,
                },
                ScalarCategory::Other => Conversion {
                    primitive: format!("Full{d}"),
                    needs_env: true,
                },
            }
        }
    }
}

/// The `Param` prefix applies to exactly the primitive and string/class-alias
/// rules, and only in the guest→host direction.
fn param_prefix(direction: Direction, role: ValueRole, category: ScalarCategory) -> &'static str {
    let prefixed_rule = matches!(
        category,
        ScalarCategory::Primitive
            | ScalarCategory::HostString
            | ScalarCategory::GuestString
            | ScalarCategory::ClassAlias
    );
    if role == ValueRole::Param && direction == Direction::ToHost && prefixed_rule {
        "Param"
    } else {
        ""
    }
}

/// Uppercase the first ASCII character ("int32" → "Int32").
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use causeway_model::TypeDescriptor;

    fn wk() -> WellKnown {
        WellKnown::default()
    }

    fn host_string() -> TypeDescriptor {
        TypeDescriptor::new("System", "String").host_real()
    }

    fn guest_string() -> TypeDescriptor {
        TypeDescriptor::new("java.lang", "String").guest_real()
    }

    fn class_alias() -> TypeDescriptor {
        TypeDescriptor::new("java.lang", "Class").guest_real()
    }

    fn every_scalar() -> Vec<TypeDescriptor> {
        vec![
            TypeDescriptor::primitive("int32"),
            host_string(),
            guest_string(),
            class_alias(),
            TypeDescriptor::new("demo", "Handler").with_delegate(),
            TypeDescriptor::new("demo", "HostThing").host_real(),
            TypeDescriptor::new("demo", "GuestThing").guest_real(),
            TypeDescriptor::new("demo", "Anything").with_interface(),
        ]
    }

    #[test]
    fn selection_is_total() {
        let wk = wk();
        let mut candidates = Vec::new();
        for scalar in every_scalar() {
            candidates.push(TypeDescriptor::array_of(scalar.clone()));
            candidates.push(scalar);
        }
        for ty in &candidates {
            for direction in [Direction::ToHost, Direction::ToGuest] {
                for role in [ValueRole::ReturnOrArg, ValueRole::Param] {
                    let conv = select(direction, ty, role, &wk);
                    assert!(!conv.primitive.is_empty(), "empty primitive for {ty}");
                }
            }
        }
    }

    #[test]
    fn primitive_return_guest_to_host() {
        let conv = select(
            Direction::ToHost,
            &TypeDescriptor::primitive("int32"),
            ValueRole::ReturnOrArg,
            &wk(),
        );
        assert_eq!(conv.primitive, "PrimToHostInt32");
        assert!(!conv.needs_env);
    }

    #[test]
    fn param_prefix_only_for_to_host_alias_rules() {
        let wk = wk();

        let prim = select(
            Direction::ToHost,
            &TypeDescriptor::primitive("double"),
            ValueRole::Param,
            &wk,
        );
        assert_eq!(prim.primitive, "ParamPrimToHostDouble");

        let hs = select(Direction::ToHost, &host_string(), ValueRole::Param, &wk);
        assert_eq!(hs.primitive, "ParamStrongToHostpString");

        let gs = select(Direction::ToHost, &guest_string(), ValueRole::Param, &wk);
        assert_eq!(gs.primitive, "ParamStrongToHostString");

        let cls = select(Direction::ToHost, &class_alias(), ValueRole::Param, &wk);
        assert_eq!(cls.primitive, "ParamStrongToHostpClass");

        // Later rules never take the prefix.
        let real = select(
            Direction::ToHost,
            &TypeDescriptor::new("demo", "HostThing").host_real(),
            ValueRole::Param,
            &wk,
        );
        assert_eq!(real.primitive, "StrongToHostp");

        // Nor does the opposite direction.
        let rev = select(
            Direction::ToGuest,
            &TypeDescriptor::primitive("double"),
            ValueRole::Param,
            &wk,
        );
        assert_eq!(rev.primitive, "PrimToGuestDouble");
    }

    #[test]
    fn string_and_class_aliases() {
        let wk = wk();
        let hs = select(Direction::ToGuest, &host_string(), ValueRole::ReturnOrArg, &wk);
        assert_eq!(hs.primitive, "StrongToGuestpString");
        assert!(hs.needs_env);

        let gs = select(Direction::ToHost, &guest_string(), ValueRole::ReturnOrArg, &wk);
        assert_eq!(gs.primitive, "StrongToHostString");
        assert!(gs.needs_env);

        let cls = select(Direction::ToGuest, &class_alias(), ValueRole::ReturnOrArg, &wk);
        assert_eq!(cls.primitive, "StrongToGuestpClass");
    }

    #[test]
    fn alias_rules_win_over_real_flags() {
        // The guest string alias is also guest-real; rule 4 still wins.
        let conv = select(
            Direction::ToHost,
            &guest_string(),
            ValueRole::ReturnOrArg,
            &wk(),
        );
        assert_eq!(conv.primitive, "StrongToHostString");
    }

    #[test]
    fn delegate_wins_over_host_real() {
        let ty = TypeDescriptor::new("demo", "Handler")
            .with_delegate()
            .host_real();
        let conv = select(Direction::ToGuest, &ty, ValueRole::ReturnOrArg, &wk());
        assert_eq!(conv.primitive, "StrongToGuestpDelegate");
    }

    #[test]
    fn host_real_wins_over_guest_real() {
        let ty = TypeDescriptor::new("demo", "Both").host_real().guest_real();
        let conv = select(Direction::ToHost, &ty, ValueRole::ReturnOrArg, &wk());
        assert_eq!(conv.primitive, "StrongToHostp");
    }

    #[test]
    fn interface_and_root_flags_disable_real_rules() {
        let wk = wk();
        let iface = TypeDescriptor::new("demo", "Iface").with_interface().host_real();
        assert_eq!(
            select(Direction::ToHost, &iface, ValueRole::ReturnOrArg, &wk).primitive,
            "FullToHost"
        );

        let root = TypeDescriptor::new("demo", "Root").host_real().host_root();
        assert_eq!(
            select(Direction::ToGuest, &root, ValueRole::ReturnOrArg, &wk).primitive,
            "FullToGuest"
        );
    }

    #[test]
    fn fallback_always_needs_env() {
        let conv = select(
            Direction::ToGuest,
            &TypeDescriptor::new("demo", "Opaque"),
            ValueRole::ReturnOrArg,
            &wk(),
        );
        assert_eq!(conv.primitive, "FullToGuest");
        assert!(conv.needs_env);
    }

    #[test]
    fn array_of_primitive() {
        let arr = TypeDescriptor::array_of(TypeDescriptor::primitive("int32"));
        let conv = select(Direction::ToGuest, &arr, ValueRole::ReturnOrArg, &wk());
        assert_eq!(conv.primitive, "ArrayPrimToGuestInt32");
        assert!(conv.needs_env);
    }

    #[test]
    fn array_of_guest_string() {
        let arr = TypeDescriptor::array_of(guest_string());
        let conv = select(Direction::ToHost, &arr, ValueRole::ReturnOrArg, &wk());
        assert_eq!(conv.primitive, "ArrayStrongToHostString");
    }

    #[test]
    fn array_of_class_alias() {
        let arr = TypeDescriptor::array_of(class_alias());
        let conv = select(Direction::ToHost, &arr, ValueRole::ReturnOrArg, &wk());
        assert_eq!(conv.primitive, "ArrayStrongToHostClass");
    }

    #[test]
    fn array_of_host_real_is_not_the_fallback() {
        let arr = TypeDescriptor::array_of(TypeDescriptor::new("demo", "HostThing").host_real());
        let conv = select(Direction::ToGuest, &arr, ValueRole::ReturnOrArg, &wk());
        assert_eq!(conv.primitive, "ArrayStrongToGuestp");

        let guest = TypeDescriptor::array_of(TypeDescriptor::new("demo", "GuestThing").guest_real());
        let conv = select(Direction::ToGuest, &guest, ValueRole::ReturnOrArg, &wk());
        assert_eq!(conv.primitive, "ArrayStrongToGuest");
    }

    #[test]
    fn array_without_dedicated_rule_takes_full() {
        let wk = wk();
        let host_str_arr = TypeDescriptor::array_of(host_string());
        assert_eq!(
            select(Direction::ToHost, &host_str_arr, ValueRole::ReturnOrArg, &wk).primitive,
            "ArrayFullToHost"
        );

        let delegate_arr =
            TypeDescriptor::array_of(TypeDescriptor::new("demo", "Handler").with_delegate());
        assert_eq!(
            select(Direction::ToGuest, &delegate_arr, ValueRole::ReturnOrArg, &wk).primitive,
            "ArrayFullToGuest"
        );
    }

    #[test]
    fn array_param_role_is_unprefixed() {
        let arr = TypeDescriptor::array_of(TypeDescriptor::primitive("byte"));
        let conv = select(Direction::ToHost, &arr, ValueRole::Param, &wk());
        assert_eq!(conv.primitive, "ArrayPrimToHostByte");
    }

    #[test]
    fn categorize_recurses_one_level() {
        let nested = TypeDescriptor::array_of(TypeDescriptor::array_of(
            TypeDescriptor::primitive("int32"),
        ));
        // The element of the outer array is itself an array: no dedicated
        // scalar rule matches, so it classifies as Other.
        assert_eq!(
            categorize(&nested, &wk()),
            TypeCategory::Array(ScalarCategory::Other)
        );
    }
}
