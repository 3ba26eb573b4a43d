use crate::availability::CapabilityKind;

/// Failure of a capability call, already phrased for the user
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CapabilityError {
    #[error("{capability} not available. {hint}")]
    Unavailable {
        capability: CapabilityKind,
        hint: String,
    },

    #[error("{capability} not ready. Status: {status}")]
    NotReady {
        capability: CapabilityKind,
        status: String,
        progress: Option<f32>,
    },

    #[error("{capability} failed: {message}")]
    Operation {
        capability: CapabilityKind,
        message: String,
    },

    /// Rejected before any capability call
    #[error("{0}")]
    Validation(String),
}

impl CapabilityError {
    pub fn unavailable(capability: CapabilityKind) -> Self {
        Self::Unavailable {
            capability,
            hint: capability.hint().to_string(),
        }
    }

    pub fn operation(capability: CapabilityKind, message: impl Into<String>) -> Self {
        Self::Operation {
            capability,
            message: message.into(),
        }
    }

    /// Validation failures render as warnings, everything else as errors
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
