// ── Domain model ──
//
// Statically typed desired-state records, validated once at the boundary
// and consumed by value by the reconcilers.

pub mod sdwan;
pub mod zone;

pub use sdwan::{DEFAULT_PROTOCOL, SdwanInterface, SdwanInterfaceKey, SdwanInterfaceState};
pub use zone::ZoneEntry;

use crate::error::CoreError;

/// Outcome of a read: the object as the device reports it, or nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observed<T> {
    Present(T),
    Absent,
}

impl<T> Observed<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn present(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent => None,
        }
    }
}

impl<T> From<Option<T>> for Observed<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::Present)
    }
}

pub(crate) fn require(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::ValidationFailed {
            message: format!("{field} must not be empty"),
        });
    }
    Ok(())
}
