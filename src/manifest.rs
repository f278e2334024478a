//! Renders the loaded-component manifest appended to every published log.
//!
//! Pure function over externally supplied component descriptors; the crate
//! never enumerates components itself.

use serde::{Deserialize, Serialize};

/// Header line of the rendered manifest.
pub const MANIFEST_HEADER: &str = "Loaded components:\n";

/// Placeholder for components that loaded no binary sub-units.
pub const NO_ASSEMBLIES_PLACEHOLDER: &str = "(no assemblies)";

/// One loaded binary sub-unit of a component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyDescriptor {
    pub name: String,
    pub version: String,
}

/// External metadata record describing one loaded extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    pub name: String,
    /// Version the component declares for itself, overriding assembly versions.
    #[serde(default)]
    pub override_version: Option<String>,
    #[serde(default)]
    pub assemblies: Vec<AssemblyDescriptor>,
}

/// Renders the components in load order, one line each:
/// `Name[override]: assembly(version), other(version)` with the bracketed
/// override present only when declared, and `(no assemblies)` when the
/// component loaded no sub-units.
pub fn render_manifest(components: &[ComponentDescriptor]) -> String {
    let mut out = String::from(MANIFEST_HEADER);
    for component in components {
        out.push_str(&component.name);
        match &component.override_version {
            Some(version) => {
                out.push_str(&format!("[{version}]: "));
            }
            None => out.push_str(": "),
        }
        if component.assemblies.is_empty() {
            out.push_str(NO_ASSEMBLIES_PLACEHOLDER);
        } else {
            for (i, assembly) in component.assemblies.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&format!("{}({})", assembly.name, assembly.version));
            }
        }
        out.push('\n');
    }
    out
}
