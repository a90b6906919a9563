//! Port interfaces for the generation domain

use async_trait::async_trait;

use crate::generation::{GeneratedArtifact, GenerationError, GeneratorBackend, ServerSpec};

/// Produces the generated server files for a spec
///
/// Implementations validate the spec themselves; a generator never returns
/// a partial artifact.
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    /// Which backend this generator implements
    fn backend(&self) -> GeneratorBackend;

    /// Generate all files for the given spec
    async fn generate(&self, spec: &ServerSpec) -> Result<GeneratedArtifact, GenerationError>;
}

/// The protocol library the generated server is written against
pub trait ProtocolRuntime: Send + Sync {
    /// Package name as it appears in the dependency manifest
    fn package(&self) -> &str;

    /// Minimum supported package version
    fn min_version(&self) -> &str;

    /// Module providing the low-level `Server` class
    fn server_module(&self) -> &str;

    /// Module providing the stdio transport
    fn stdio_module(&self) -> &str;

    /// Module providing the protocol types (`Tool`, `Resource`, ...)
    fn types_module(&self) -> &str;

    /// Executable used to launch the generated server
    fn launcher(&self) -> &str;

    /// Dependency line for the manifest, e.g. `mcp>=1.0.0`
    fn requirement(&self) -> String {
        format!("{}>={}", self.package(), self.min_version())
    }
}

/// Sends a single prompt to a text-generation service and returns its reply
#[async_trait]
pub trait TextGenerationClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}
