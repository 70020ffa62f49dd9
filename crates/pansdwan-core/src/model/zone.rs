use std::fmt;

use super::require;
use crate::error::CoreError;

/// Binding of one interface into a zone's layer-3 member list.
///
/// Every field is identity: a change to any of them is a different binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZoneEntry {
    pub template: String,
    pub vsys: String,
    pub zone: String,
    pub interface: String,
}

impl ZoneEntry {
    pub fn new(
        template: impl Into<String>,
        vsys: impl Into<String>,
        zone: impl Into<String>,
        interface: impl Into<String>,
    ) -> Self {
        Self {
            template: template.into(),
            vsys: vsys.into(),
            zone: zone.into(),
            interface: interface.into(),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        require("template", &self.template)?;
        require("vsys", &self.vsys)?;
        require("zone", &self.zone)?;
        require("interface", &self.interface)
    }
}

impl fmt::Display for ZoneEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.template, self.zone, self.interface)
    }
}
