//! Factory for selecting the code generation backend

use std::sync::Arc;
use tracing::info;

use crate::generation::{CodeGenerator, GenerationError, GeneratorBackend, ProtocolRuntime};

use super::{AnthropicClient, AnthropicSettings, ExternalModelGenerator, TemplateCodeGenerator};

/// Build the code generator for the configured backend
pub fn select_generator(
    backend: GeneratorBackend,
    runtime: Arc<dyn ProtocolRuntime>,
    external: AnthropicSettings,
) -> Result<Arc<dyn CodeGenerator>, GenerationError> {
    let templates = Arc::new(TemplateCodeGenerator::new(runtime)?);

    match backend {
        GeneratorBackend::Template => Ok(templates),
        GeneratorBackend::External => {
            if external.api_key.is_none() {
                tracing::warn!("External backend selected but no API key is configured");
            }
            info!(model = %external.model, base_url = %external.base_url, "Using external model backend");
            let client = Arc::new(AnthropicClient::new(external)?);
            Ok(Arc::new(ExternalModelGenerator::new(client, templates)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::runtime::PythonMcpRuntime;
    use std::time::Duration;

    fn settings() -> AnthropicSettings {
        AnthropicSettings {
            base_url: "https://api.example.com".to_string(),
            model: "test-model".to_string(),
            max_tokens: 100,
            timeout: Duration::from_secs(1),
            api_key: None,
        }
    }

    #[test]
    fn test_select_generator() {
        let runtime: Arc<dyn ProtocolRuntime> = Arc::new(PythonMcpRuntime::default());

        let generator =
            select_generator(GeneratorBackend::Template, runtime.clone(), settings()).unwrap();
        assert_eq!(generator.backend(), GeneratorBackend::Template);

        let generator = select_generator(GeneratorBackend::External, runtime, settings()).unwrap();
        assert_eq!(generator.backend(), GeneratorBackend::External);
    }

    #[test]
    fn test_invalid_external_settings() {
        let mut external = settings();
        external.base_url = "::".to_string();

        let result = select_generator(
            GeneratorBackend::External,
            Arc::new(PythonMcpRuntime::default()),
            external,
        );
        assert!(matches!(result, Err(GenerationError::InvalidConfiguration(_))));
    }
}
