//! Four-step server wizard: basic info, configuration, review, generate

pub mod errors;
pub mod parameters;
pub mod state;

pub use errors::WizardError;
pub use parameters::parse_parameter_lines;
pub use state::{BasicInfoDraft, ServerHeader, WizardEvent, WizardState};
