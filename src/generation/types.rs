//! Core types for the generation domain

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::generation::GenerationError;

/// Primary server source file name
pub const SERVER_FILE: &str = "server.py";
/// Dependency manifest file name
pub const MANIFEST_FILE: &str = "requirements.txt";
/// Usage document file name
pub const README_FILE: &str = "README.md";

/// The kind of MCP server to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerKind {
    Tool,
    Resource,
    Full,
}

impl ServerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerKind::Tool => "tool",
            ServerKind::Resource => "resource",
            ServerKind::Full => "full",
        }
    }

    /// Get the display name for this kind
    pub fn display_name(&self) -> &'static str {
        match self {
            ServerKind::Tool => "Tool Server",
            ServerKind::Resource => "Resource Server",
            ServerKind::Full => "Full Server",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            ServerKind::Tool => "Provides executable functions that an assistant can call",
            ServerKind::Resource => "Provides data and content that an assistant can read",
            ServerKind::Full => "Includes tools, resources, and optional prompt templates",
        }
    }

    pub fn uses_tools(&self) -> bool {
        matches!(self, ServerKind::Tool | ServerKind::Full)
    }

    pub fn uses_resources(&self) -> bool {
        matches!(self, ServerKind::Resource | ServerKind::Full)
    }

    pub fn uses_prompts(&self) -> bool {
        matches!(self, ServerKind::Full)
    }

    /// Get all supported kinds
    pub fn all() -> [ServerKind; 3] {
        [ServerKind::Tool, ServerKind::Resource, ServerKind::Full]
    }
}

impl fmt::Display for ServerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServerKind {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tool" => Ok(ServerKind::Tool),
            "resource" => Ok(ServerKind::Resource),
            "full" => Ok(ServerKind::Full),
            _ => Err(GenerationError::UnsupportedKind(s.to_string())),
        }
    }
}

/// Which code generator produces the server source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorBackend {
    /// Fixed Tera templates
    #[default]
    Template,
    /// Delegated to an external text-generation API
    External,
}

impl GeneratorBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorBackend::Template => "template",
            GeneratorBackend::External => "external",
        }
    }
}

impl fmt::Display for GeneratorBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratorBackend {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "template" | "templates" => Ok(GeneratorBackend::Template),
            "external" | "ai" | "model" => Ok(GeneratorBackend::External),
            _ => Err(GenerationError::InvalidConfiguration(format!(
                "Unknown generator backend: {s}"
            ))),
        }
    }
}

/// JSON-schema style parameter type.
///
/// Unknown type names are kept so the validator can warn about them; they
/// render as strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParameterType {
    #[default]
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Other(String),
}

impl ParameterType {
    pub fn as_str(&self) -> &str {
        match self {
            ParameterType::String => "string",
            ParameterType::Number => "number",
            ParameterType::Integer => "integer",
            ParameterType::Boolean => "boolean",
            ParameterType::Object => "object",
            ParameterType::Array => "array",
            ParameterType::Other(other) => other,
        }
    }

    /// Type name used in the generated input schema
    pub fn json_type(&self) -> &'static str {
        match self {
            ParameterType::String | ParameterType::Other(_) => "string",
            ParameterType::Number => "number",
            ParameterType::Integer => "integer",
            ParameterType::Boolean => "boolean",
            ParameterType::Object => "object",
            ParameterType::Array => "array",
        }
    }

    /// Python type hint for the generated stub
    pub fn python_type(&self) -> &'static str {
        match self {
            ParameterType::String | ParameterType::Other(_) => "str",
            ParameterType::Number => "float",
            ParameterType::Integer => "int",
            ParameterType::Boolean => "bool",
            ParameterType::Object => "dict[str, Any]",
            ParameterType::Array => "list[Any]",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ParameterType::Other(_))
    }
}

impl From<String> for ParameterType {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "" | "string" | "str" => ParameterType::String,
            "number" | "float" => ParameterType::Number,
            "integer" | "int" => ParameterType::Integer,
            "boolean" | "bool" => ParameterType::Boolean,
            "object" | "dict" => ParameterType::Object,
            "array" | "list" => ParameterType::Array,
            _ => ParameterType::Other(value),
        }
    }
}

impl From<ParameterType> for String {
    fn from(value: ParameterType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single tool parameter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParameterType,
    pub description: String,
    pub required: bool,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, param_type: ParameterType, required: bool) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: String::new(),
            required,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A callable tool exposed by the generated server
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParameterDescriptor>,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }
}

/// A readable resource exposed by the generated server
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "mimeType", alias = "type", alias = "mime_type")]
    pub mime_type: String,
}

impl ResourceDescriptor {
    pub fn new(
        uri: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            description: description.into(),
            mime_type: String::new(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// Resolve the short `json`/`text` aliases and the empty default
    pub fn effective_mime_type(&self) -> &str {
        match self.mime_type.trim() {
            "" | "json" => "application/json",
            "text" => "text/plain",
            other => other,
        }
    }

    pub fn is_json(&self) -> bool {
        let mime = self.effective_mime_type();
        mime == "application/json" || mime.ends_with("+json")
    }
}

/// A prompt template exposed by the generated server
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptDescriptor {
    pub name: String,
    pub description: String,
}

impl PromptDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// The descriptor lists of a server, as carried in the `config` object on the wire
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub tools: Vec<ToolDescriptor>,
    pub resources: Vec<ResourceDescriptor>,
    pub prompts: Vec<PromptDescriptor>,
}

impl Capabilities {
    /// Keep only the categories the given kind uses
    pub fn restricted_to(mut self, kind: ServerKind) -> Self {
        if !kind.uses_tools() {
            self.tools.clear();
        }
        if !kind.uses_resources() {
            self.resources.clear();
        }
        if !kind.uses_prompts() {
            self.prompts.clear();
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty() && self.resources.is_empty() && self.prompts.is_empty()
    }
}

/// Structured description of the server to generate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSpec {
    pub name: String,
    pub description: String,
    pub kind: ServerKind,
    #[serde(default)]
    pub tools: Vec<ToolDescriptor>,
    #[serde(default)]
    pub resources: Vec<ResourceDescriptor>,
    #[serde(default)]
    pub prompts: Vec<PromptDescriptor>,
}

impl ServerSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: ServerKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            tools: Vec::new(),
            resources: Vec::new(),
            prompts: Vec::new(),
        }
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.tools = capabilities.tools;
        self.resources = capabilities.resources;
        self.prompts = capabilities.prompts;
        self
    }

    pub fn with_tool(mut self, tool: ToolDescriptor) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn with_resource(mut self, resource: ResourceDescriptor) -> Self {
        self.resources.push(resource);
        self
    }

    pub fn with_prompt(mut self, prompt: PromptDescriptor) -> Self {
        self.prompts.push(prompt);
        self
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            tools: self.tools.clone(),
            resources: self.resources.clone(),
            prompts: self.prompts.clone(),
        }
    }
}

/// Generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
    pub permissions: Option<u32>,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            permissions: None,
        }
    }

    pub fn executable(mut self) -> Self {
        self.permissions = Some(0o755);
        self
    }
}

/// Ordered set of generated files with unique relative paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedArtifact {
    files: Vec<Artifact>,
}

impl GeneratedArtifact {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file, rejecting a path that is already present
    pub fn insert(&mut self, artifact: Artifact) -> Result<(), GenerationError> {
        if self.files.iter().any(|f| f.path == artifact.path) {
            return Err(GenerationError::DuplicateArtifact(
                artifact.path.display().to_string(),
            ));
        }
        self.files.push(artifact);
        Ok(())
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        let path = path.as_ref();
        self.files
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.content.as_str())
    }

    pub fn files(&self) -> &[Artifact] {
        &self.files
    }

    pub fn filenames(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|f| f.path.to_string_lossy().into_owned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
