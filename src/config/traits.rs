//! Config sections and their introspection manifest. A section is a plain
//! serde struct owning one table of the flame file; the manifest is the
//! machine-readable form printed by `--config-manifest`, so a host driving
//! the engine can discover the run knobs without parsing this crate.

use crate::error::FlameError;
use serde::{Deserialize, Serialize};

/// One named table of the flame file. Validation runs on load and on every
/// update, so a section held by the manager is always internally valid.
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    /// Key of the section's table in the TOML file.
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), FlameError>;
    fn to_manifest(&self) -> ConfigManifest;
}

/// Everything a host needs to assemble or pre-check a section of a flame
/// file: field names, types, defaults and the bounds `validate` enforces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigManifest {
    pub section: String,
    pub fields: Vec<FieldManifest>,
}

/// One field of a section. `min`/`max` mirror the section's `validate`
/// bounds, letting hosts reject a bad value before a load round-trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldManifest {
    pub name: String,
    pub field_type: String,
    pub default: serde_json::Value,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub description: String,
}
