//! Use case for generating server implementations

use std::sync::Arc;
use tracing::info;

use crate::application::{
    ApplicationError, GenerateServerRequest, GenerateServerResponse, OutputService,
    PublishedOutput,
};
use crate::generation::{CodeGenerator, GenerationError, ServerSpec, validate};

/// Use case for generating server implementations
pub struct GenerateServerUseCase {
    generator: Arc<dyn CodeGenerator>,
    output_service: Arc<dyn OutputService>,
}

impl GenerateServerUseCase {
    pub fn new(generator: Arc<dyn CodeGenerator>, output_service: Arc<dyn OutputService>) -> Self {
        Self {
            generator,
            output_service,
        }
    }

    pub async fn execute(
        &self,
        request: GenerateServerRequest,
    ) -> Result<GenerateServerResponse, ApplicationError> {
        // 1. Check required fields and resolve the kind
        let spec = request.into_spec()?;

        self.execute_spec(&spec).await
    }

    pub async fn execute_spec(
        &self,
        spec: &ServerSpec,
    ) -> Result<GenerateServerResponse, ApplicationError> {
        // 2. Validate up front so invalid specs never reach the generator.
        // The generator logs the warnings; the response carries them.
        let warnings = validate(spec).into_result()?;

        // 3. Generate
        let backend = self.generator.backend();
        info!(server = %spec.name, kind = %spec.kind, %backend, "Generating server");
        let artifact = self.generator.generate(spec).await?;
        if artifact.is_empty() {
            return Err(GenerationError::RenderError("Generator produced no files".to_string()).into());
        }

        // 4. Publish
        let published = self.output_service.publish(&spec.name, &artifact).await?;
        info!(server = %spec.name, files = artifact.len(), output = ?published, "Server generated");

        let mut response = GenerateServerResponse {
            success: true,
            message: format!("Server '{}' generated successfully!", spec.name),
            filename: None,
            download_url: None,
            output_path: None,
            files: artifact.filenames(),
            warnings,
            backend,
        };

        match published {
            PublishedOutput::Directory(path) => response.output_path = Some(path),
            PublishedOutput::ZipFile(path) => {
                response.filename = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned());
                response.output_path = Some(path);
            }
            PublishedOutput::Archive { key } => {
                response.download_url = Some(format!("/api/download/{key}"));
                response.filename = Some(key);
            }
        }

        Ok(response)
    }
}
