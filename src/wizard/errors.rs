//! Error types for the wizard state machine

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// The input was rejected; the state is unchanged
    #[error("Invalid input: {}", errors.join("; "))]
    Invalid { errors: Vec<String> },

    #[error("Cannot apply '{event}' during step '{step}'")]
    InvalidTransition { step: &'static str, event: &'static str },

    #[error("No {category} at position {index}")]
    IndexOutOfRange { category: &'static str, index: usize },
}

impl WizardError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        WizardError::Invalid {
            errors: vec![message.into()],
        }
    }

    /// Messages to show the user
    pub fn messages(&self) -> Vec<String> {
        match self {
            WizardError::Invalid { errors } => errors.clone(),
            other => vec![other.to_string()],
        }
    }
}
