// ABOUTME: Built-in component units, registered under their namespaces.
// ABOUTME: Currently the local venue lookup tool and its URL normalizer.

mod venue_lookup;

pub use venue_lookup::{
    DEFAULT_SOURCES_PATH, VenueLookupArgs, VenueLookupSettings, VenueLookupTool, normalize_url,
};

use crate::component::{ComponentRegistry, Signature};

/// Namespace of the venue lookup units.
pub const VENUE_LOOKUP_NAMESPACE: &str = "tools.venue_lookup";

/// Register every built-in unit.
pub fn register_builtins(registry: &mut ComponentRegistry) {
    registry
        .register_tool::<VenueLookupTool>(VENUE_LOOKUP_NAMESPACE, "VenueLookupTool")
        .register_function(
            VENUE_LOOKUP_NAMESPACE,
            "normalize_url",
            "Normalize a URL to its bare host for venue comparison.",
            Signature::fixed(["url"]),
            venue_lookup::normalize_url_fn,
        )
        .register_constant(
            VENUE_LOOKUP_NAMESPACE,
            "DEFAULT_SOURCES_PATH",
            DEFAULT_SOURCES_PATH,
        );
}
