//! Animals — small Causeway example bridge.
//!
//! Declares a guest-side `Animal` interface with a merged `Name` property, a
//! plain method, an event, and a concrete `Dog` class with a constructor and
//! a static field. Demonstrates the basic Causeway workflow: declaration
//! parsing, resolution, proxy assembly, and emission.

use causeway_model::{BridgeDeclaration, ModelError, ResolvedBridge};

/// The demo declaration source.
pub const DECLARATION: &str = r#"
[bridge]
name = "animals"
description = "Demo bridge for a small animal hierarchy"

[[types]]
name = "Animal"
namespace = "com.example.zoo"
interface = true
guest-real = true

[[types.members]]
kind = "property"
name = "Name"
accessor = "getter"
returns = "java.lang.String"
signature = "()Ljava/lang/String;"

[[types.members]]
kind = "property"
name = "Name"
accessor = "setter"
params = [{ name = "value", type = "java.lang.String" }]
signature = "(Ljava/lang/String;)V"

[[types.members]]
kind = "method"
name = "legCount"
returns = "int32"
signature = "()I"

[[types.members]]
kind = "event"
name = "Moved"
accessor = "add"
params = [{ name = "handler", type = "com.example.zoo.MoveHandler" }]

[[types.members]]
kind = "event"
name = "Moved"
accessor = "remove"
params = [{ name = "handler", type = "com.example.zoo.MoveHandler" }]

[[types]]
name = "MoveHandler"
namespace = "com.example.zoo"
delegate = true
guest-real = true

[[types.members]]
kind = "method"
name = "onMove"
params = [{ name = "distance", type = "double" }]

[[types]]
name = "Dog"
namespace = "com.example.zoo"
guest-real = true

[[types.members]]
kind = "constructor"
params = [{ name = "name", type = "java.lang.String" }]

[[types.members]]
kind = "field"
name = "PACK_SIZE"
static = true
returns = "int32"

[[types.members]]
kind = "method"
name = "fetch"
params = [{ name = "toys", type = "java.lang.String[]" }]
returns = "bool"
"#;

/// Parse and resolve the demo declaration.
pub fn load_bridge() -> Result<ResolvedBridge, ModelError> {
    BridgeDeclaration::parse(DECLARATION)?.resolve()
}
