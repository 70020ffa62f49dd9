// ── Core error types ──
//
// User-facing errors from pansdwan-core. Consumers see an error kind and a
// message; raw HTTP and XML failures are folded in through
// `From<pansdwan_api::Error>`.

use strum::{AsRefStr, Display};
use thiserror::Error;

/// Coarse classification of a [`CoreError`], stable for callers to match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Transport,
    Authentication,
    Device,
    Malformed,
    PartialFailure,
    RequiresReplacement,
    Validation,
    Config,
}

/// A step of a multi-call operation, named in [`CoreError::StepFailed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Step {
    #[strum(serialize = "unit settings update")]
    SetSettings,
    #[strum(serialize = "vsys import")]
    BindVsys,
    #[strum(serialize = "vsys remove")]
    UnbindVsys,
    #[strum(serialize = "virtual-router remove")]
    UnbindVirtualRouter,
    #[strum(serialize = "zone remove")]
    UnbindZone,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach device: {message}")]
    Transport { message: String, status: Option<u16> },

    #[error("Device call timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Device errors ────────────────────────────────────────────────
    #[error("Device rejected request (code {}): {}", code.as_deref().unwrap_or("none"), lines.join(" "))]
    Device {
        code: Option<String>,
        lines: Vec<String>,
    },

    #[error("Malformed device response: {message}")]
    Malformed { message: String, body: String },

    // ── Operation errors ─────────────────────────────────────────────
    /// The unit exists on the device but its vsys import did not happen.
    #[error("{unit} was created but could not be imported into its vsys: {source}")]
    PartialFailure {
        unit: String,
        source: Box<CoreError>,
    },

    #[error("{step} failed: {source}")]
    StepFailed {
        step: Step,
        source: Box<CoreError>,
    },

    #[error("Changing {field} requires replacing the object")]
    RequiresReplacement { field: &'static str },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Classify this error. Step failures report the kind of their cause.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } | Self::Timeout { .. } => ErrorKind::Transport,
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::Device { .. } => ErrorKind::Device,
            Self::Malformed { .. } => ErrorKind::Malformed,
            Self::PartialFailure { .. } => ErrorKind::PartialFailure,
            Self::StepFailed { source, .. } => source.kind(),
            Self::RequiresReplacement { .. } => ErrorKind::RequiresReplacement,
            Self::ValidationFailed { .. } => ErrorKind::Validation,
            Self::Config { .. } => ErrorKind::Config,
        }
    }

    /// The step that failed, for saga-style operations.
    pub fn failed_step(&self) -> Option<Step> {
        match self {
            Self::StepFailed { step, .. } => Some(*step),
            Self::PartialFailure { source, .. } => source.failed_step(),
            _ => None,
        }
    }

    /// Device diagnostic lines, looking through step wrappers.
    pub fn device_lines(&self) -> Option<&[String]> {
        match self {
            Self::Device { lines, .. } => Some(lines),
            Self::StepFailed { source, .. } | Self::PartialFailure { source, .. } => {
                source.device_lines()
            }
            _ => None,
        }
    }

    pub(crate) fn step(step: Step) -> impl FnOnce(pansdwan_api::Error) -> Self {
        move |err| Self::StepFailed {
            step,
            source: Box::new(err.into()),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<pansdwan_api::Error> for CoreError {
    fn from(err: pansdwan_api::Error) -> Self {
        use pansdwan_api::Error as Api;

        match err {
            Api::Authentication { message } => Self::Authentication { message },
            Api::Transport(e) => Self::Transport {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            },
            Api::InvalidUrl(e) => Self::Config {
                message: format!("Invalid URL: {e}"),
            },
            Api::Timeout { timeout_secs } => Self::Timeout { timeout_secs },
            Api::Tls(msg) => Self::Transport {
                message: format!("TLS error: {msg}"),
                status: None,
            },
            Api::HttpStatus { status, body } => Self::Transport {
                message: Api::HttpStatus { status, body }.to_string(),
                status: Some(status),
            },
            Api::Device { code, lines } => Self::Device { code, lines },
            Api::Deserialization { message, body } => Self::Malformed { message, body },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_failure_reports_cause_kind() {
        let err = CoreError::step(Step::UnbindVsys)(pansdwan_api::Error::Device {
            code: Some("12".into()),
            lines: vec!["no such member".into()],
        });

        assert_eq!(err.kind(), ErrorKind::Device);
        assert_eq!(err.failed_step(), Some(Step::UnbindVsys));
        assert_eq!(err.device_lines().map(<[String]>::len), Some(1));
        assert!(err.to_string().starts_with("vsys remove failed:"));
    }

    #[test]
    fn http_status_is_transport_kind() {
        let err = CoreError::from(pansdwan_api::Error::HttpStatus {
            status: 404,
            body: "not found".into(),
        });
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(matches!(err, CoreError::Transport { status: Some(404), .. }));
    }

    #[test]
    fn kind_names_are_snake_case() {
        assert_eq!(ErrorKind::PartialFailure.to_string(), "partial_failure");
        assert_eq!(ErrorKind::RequiresReplacement.as_ref(), "requires_replacement");
    }
}
