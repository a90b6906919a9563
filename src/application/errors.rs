//! Application layer error types

use thiserror::Error;

use crate::generation::GenerationError;

/// Application layer errors
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Generation error: {0}")]
    GenerationError(#[from] GenerationError),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Output error: {0}")]
    OutputError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Validation errors for requests, raised before a spec exists
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Server name is required")]
    MissingName,

    #[error("Description is required")]
    MissingDescription,

    #[error("Server type is required")]
    MissingServerType,

    #[error("Unknown server type: {0}")]
    UnknownServerType(String),
}
