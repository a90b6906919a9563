//! Request and response types for the application layer

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::ValidationError;
use crate::generation::{Capabilities, GeneratorBackend, ServerKind, ServerSpec};

/// Request to generate a server, in the wire format used by the web API and
/// by spec files on the command line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateServerRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub server_type: Option<String>,

    #[serde(default)]
    pub config: Capabilities,
}

fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl GenerateServerRequest {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: ServerKind,
        config: Capabilities,
    ) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            server_type: Some(kind.as_str().to_string()),
            config,
        }
    }

    /// Check the required top-level fields and resolve the server kind
    pub fn validate(&self) -> Result<ServerKind, ValidationError> {
        required(&self.name).ok_or(ValidationError::MissingName)?;
        required(&self.description).ok_or(ValidationError::MissingDescription)?;
        let server_type =
            required(&self.server_type).ok_or(ValidationError::MissingServerType)?;

        server_type
            .parse::<ServerKind>()
            .map_err(|_| ValidationError::UnknownServerType(server_type.to_string()))
    }

    pub fn into_spec(self) -> Result<ServerSpec, ValidationError> {
        let kind = self.validate()?;
        Ok(ServerSpec::new(
            self.name.unwrap_or_default(),
            self.description.unwrap_or_default(),
            kind,
        )
        .with_capabilities(self.config))
    }
}

impl From<&ServerSpec> for GenerateServerRequest {
    fn from(spec: &ServerSpec) -> Self {
        Self::new(
            spec.name.clone(),
            spec.description.clone(),
            spec.kind,
            spec.capabilities(),
        )
    }
}

/// Response from server generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateServerResponse {
    pub success: bool,
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,

    pub files: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    pub backend: GeneratorBackend,
}
