//! Registry settings.

use serde::{Deserialize, Serialize};

/// Options fixed when a registry is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySettings {
    /// Accept `1` / `0` as booleans in addition to `true` / `false`.
    #[serde(default = "default_true")]
    pub numeric_booleans: bool,

    /// List the valid member names when an enumeration value is rejected.
    #[serde(default = "default_true")]
    pub list_enum_choices: bool,

    /// Memoize synthesized enum and nullable strategies per type.
    #[serde(default)]
    pub cache_synthesized: bool,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            numeric_booleans: true,
            list_enum_choices: true,
            cache_synthesized: false,
        }
    }
}

fn default_true() -> bool {
    true
}
