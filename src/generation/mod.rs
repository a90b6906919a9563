//! Generation domain module
//!
//! Describes the server to generate ([`ServerSpec`]), validates it, and
//! defines the ports ([`CodeGenerator`], [`ProtocolRuntime`],
//! [`TextGenerationClient`]) that the infrastructure layer implements.

pub mod context;
pub mod errors;
pub mod examples;
pub mod extract;
pub mod prompt;
pub mod rules;
pub mod sanitizers;
pub mod traits;
pub mod types;
pub mod utils;
pub mod validator;

pub use context::*;
pub use errors::*;
pub use traits::*;
pub use types::*;
pub use validator::{ValidationReport, validate, validate_config};
