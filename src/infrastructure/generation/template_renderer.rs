//! Tera-based code generator backed by embedded templates

use async_trait::async_trait;
use rust_embed::RustEmbed;
use std::sync::Arc;
use tera::Tera;
use tracing::{debug, warn};

use crate::generation::{
    Artifact, CodeGenerator, GeneratedArtifact, GenerationError, GeneratorBackend,
    MANIFEST_FILE, ProtocolRuntime, README_FILE, RenderContext, SERVER_FILE, ServerSpec,
    validate,
};

use super::context_builders::PythonContextBuilder;

/// Container for all templates embedded at compile time
#[derive(RustEmbed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const TEMPLATE_DIR: &str = "python";
const SERVER_TEMPLATE: &str = "server.py.tera";
const MANIFEST_TEMPLATE: &str = "requirements.txt.tera";
const README_TEMPLATE: &str = "README.md.tera";

/// Renders server source, manifest and README from fixed templates
pub struct TemplateCodeGenerator {
    tera: Tera,
    context_builder: PythonContextBuilder,
}

impl TemplateCodeGenerator {
    /// Load the embedded templates and bind them to a protocol runtime
    pub fn new(runtime: Arc<dyn ProtocolRuntime>) -> Result<Self, GenerationError> {
        let mut tera = Tera::default();

        for name in [SERVER_TEMPLATE, MANIFEST_TEMPLATE, README_TEMPLATE] {
            let path = format!("{TEMPLATE_DIR}/{name}");
            let file = EmbeddedTemplates::get(&path).ok_or_else(|| {
                GenerationError::RenderError(format!("Embedded template not found: {path}"))
            })?;
            let content = std::str::from_utf8(file.data.as_ref()).map_err(|e| {
                GenerationError::RenderError(format!("Template {path} is not valid UTF-8: {e}"))
            })?;
            tera.add_raw_template(name, content)?;
        }

        debug!(templates = 3, "Loaded embedded templates");

        Ok(Self {
            tera,
            context_builder: PythonContextBuilder::new(runtime),
        })
    }

    pub fn runtime(&self) -> &dyn ProtocolRuntime {
        self.context_builder.runtime()
    }

    /// Validate and render the full artifact for a spec
    pub fn render(&self, spec: &ServerSpec) -> Result<GeneratedArtifact, GenerationError> {
        let context = self.prepare(spec)?;
        let server_source = self.render_template(SERVER_TEMPLATE, &context)?;
        self.assemble(server_source, &context)
    }

    /// Validate the spec and build its render context
    pub fn prepare(&self, spec: &ServerSpec) -> Result<RenderContext, GenerationError> {
        let warnings = validate(spec).into_result()?;
        for message in &warnings {
            warn!(server = %spec.name, "{message}");
        }
        self.context_builder.build(spec)
    }

    /// Combine a server source with the templated manifest and README
    pub fn assemble(
        &self,
        server_source: String,
        context: &RenderContext,
    ) -> Result<GeneratedArtifact, GenerationError> {
        let mut artifact = GeneratedArtifact::new();
        artifact.insert(Artifact::new(SERVER_FILE, server_source).executable())?;
        artifact.insert(Artifact::new(
            MANIFEST_FILE,
            self.render_template(MANIFEST_TEMPLATE, context)?,
        ))?;
        artifact.insert(Artifact::new(
            README_FILE,
            self.render_template(README_TEMPLATE, context)?,
        ))?;
        Ok(artifact)
    }

    fn render_template(
        &self,
        template_name: &str,
        context: &RenderContext,
    ) -> Result<String, GenerationError> {
        let rendered = self
            .tera
            .render(template_name, &context.to_tera_context())
            .map_err(|e| {
                GenerationError::RenderError(format!("Failed to render {template_name}: {e}"))
            })?;

        // Exactly one trailing newline regardless of template endings
        Ok(format!("{}\n", rendered.trim_end()))
    }
}

#[async_trait]
impl CodeGenerator for TemplateCodeGenerator {
    fn backend(&self) -> GeneratorBackend {
        GeneratorBackend::Template
    }

    async fn generate(&self, spec: &ServerSpec) -> Result<GeneratedArtifact, GenerationError> {
        debug!(server = %spec.name, kind = %spec.kind, "Rendering server from templates");
        self.render(spec)
    }
}
