//! Per-type generation context.
//!
//! The context is an explicit, immutable value passed to every assembly
//! operation, replacing any mutable shared state during a batch run.

use causeway_model::{TypeDescriptor, WellKnown};

use crate::member::ENV_PARAM;

/// Generation options shared across a batch.
#[derive(Debug, Clone, Default)]
pub struct GenOptions {
    /// Drop the opaque guest-ABI signature tokens from generated members.
    pub skip_signatures: bool,
}

/// Immutable context for assembling one proxy type.
#[derive(Debug)]
pub struct GenerationContext<'a> {
    /// The type a proxy is being generated for.
    pub ty: &'a TypeDescriptor,
    pub well_known: &'a WellKnown,
    /// Name of the generated proxy type (`__Name`).
    pub proxy_type: String,
    /// Name of the generated companion type (`Name_`).
    pub static_type: String,
    /// Name of the environment-handle variable in generated bodies.
    pub env_param: &'static str,
    pub options: GenOptions,
}

impl<'a> GenerationContext<'a> {
    pub fn new(ty: &'a TypeDescriptor, well_known: &'a WellKnown, options: GenOptions) -> Self {
        Self {
            ty,
            well_known,
            proxy_type: format!("__{}", ty.name),
            static_type: format!("{}_", ty.name),
            env_param: ENV_PARAM,
            options,
        }
    }

    pub fn qualified_name(&self) -> String {
        self.ty.qualified_name()
    }
}
