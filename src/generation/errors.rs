//! Error types for the generation domain

use thiserror::Error;

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Invalid server spec: {}", errors.join("; "))]
    InvalidSpec { errors: Vec<String> },

    #[error("Unsupported server kind: {0}")]
    UnsupportedKind(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("External generation failed: {0}")]
    ExternalGeneration(String),

    #[error("Duplicate artifact path: {0}")]
    DuplicateArtifact(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl GenerationError {
    /// Validation messages carried by an `InvalidSpec` error
    pub fn validation_errors(&self) -> Option<&[String]> {
        match self {
            GenerationError::InvalidSpec { errors } => Some(errors),
            _ => None,
        }
    }
}
