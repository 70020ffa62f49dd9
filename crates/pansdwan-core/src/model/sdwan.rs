use std::fmt;

use pansdwan_api::SdwanUnitEntry;

use super::require;
use crate::error::CoreError;

/// Protocol assigned when the caller does not choose one.
pub const DEFAULT_PROTOCOL: &str = "ipv4";

/// Identity of an SD-WAN interface unit. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SdwanInterfaceKey {
    pub template: String,
    pub name: String,
}

impl SdwanInterfaceKey {
    pub fn new(template: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for SdwanInterfaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.template, self.name)
    }
}

/// Desired state of an SD-WAN interface unit.
///
/// `members` is ordered; the device keeps the order it is given.
/// `vsys` is not stored on the unit node itself but in the vsys's import
/// list, which is why reads cannot report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdwanInterface {
    pub key: SdwanInterfaceKey,
    pub protocol: String,
    pub comment: String,
    pub members: Vec<String>,
    pub vsys: String,
}

impl SdwanInterface {
    pub fn new(
        template: impl Into<String>,
        name: impl Into<String>,
        members: Vec<String>,
        vsys: impl Into<String>,
    ) -> Self {
        Self {
            key: SdwanInterfaceKey::new(template, name),
            protocol: DEFAULT_PROTOCOL.into(),
            comment: String::new(),
            members,
            vsys: vsys.into(),
        }
    }

    #[must_use]
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// The part of this record a read can confirm.
    pub fn state(&self) -> SdwanInterfaceState {
        SdwanInterfaceState {
            protocol: self.protocol.clone(),
            comment: self.comment.clone(),
            members: self.members.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        require("template", &self.key.template)?;
        require("name", &self.key.name)?;
        require("protocol", &self.protocol)?;
        require("vsys", &self.vsys)?;
        if self.members.is_empty() {
            return Err(CoreError::ValidationFailed {
                message: format!("{} needs at least one member interface", self.key),
            });
        }
        for member in &self.members {
            require("member interface", member)?;
        }
        Ok(())
    }
}

/// Server-confirmed fields of an SD-WAN unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdwanInterfaceState {
    pub protocol: String,
    pub comment: String,
    pub members: Vec<String>,
}

impl From<SdwanUnitEntry> for SdwanInterfaceState {
    fn from(entry: SdwanUnitEntry) -> Self {
        Self {
            protocol: entry.protocol.unwrap_or_else(|| DEFAULT_PROTOCOL.into()),
            comment: entry.comment.unwrap_or_default(),
            members: entry.interface.member,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn unit() -> SdwanInterface {
        SdwanInterface::new("branch", "sdwan.1", vec!["ethernet1/1".into()], "vsys1")
    }

    #[test]
    fn defaults_to_ipv4_and_empty_comment() {
        let unit = unit();
        assert_eq!(unit.protocol, "ipv4");
        assert_eq!(unit.comment, "");
        assert!(unit.validate().is_ok());
    }

    #[test]
    fn rejects_missing_members() {
        let mut unit = unit();
        unit.members.clear();
        assert!(matches!(unit.validate(), Err(CoreError::ValidationFailed { .. })));
    }

    #[test]
    fn rejects_blank_identity() {
        let unit = SdwanInterface::new("branch", " ", vec!["ethernet1/1".into()], "vsys1");
        let err = unit.validate().unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn rejects_blank_vsys() {
        let unit = SdwanInterface::new("branch", "sdwan.1", vec!["ethernet1/1".into()], "");
        assert!(unit.validate().is_err());
    }

    #[test]
    fn state_from_sparse_entry() {
        let entry = SdwanUnitEntry {
            name: "sdwan.1".into(),
            protocol: None,
            comment: None,
            interface: pansdwan_api::MemberList {
                member: vec!["ethernet1/3".into()],
            },
        };
        let state = SdwanInterfaceState::from(entry);
        assert_eq!(state.protocol, "ipv4");
        assert_eq!(state.comment, "");
        assert_eq!(state.members, vec!["ethernet1/3"]);
    }
}
