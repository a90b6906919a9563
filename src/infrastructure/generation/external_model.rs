//! Delegated generation through an external text-generation API

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::generation::{
    CodeGenerator, GeneratedArtifact, GenerationError, GeneratorBackend, ServerSpec,
    TextGenerationClient, extract::extract_code, prompt::build_generation_prompt,
};

use super::TemplateCodeGenerator;

/// Version header required by the Messages API
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Connection settings for [`AnthropicClient`]
#[derive(Debug, Clone)]
pub struct AnthropicSettings {
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub api_key: Option<String>,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [RequestMessage<'a>; 1],
}

#[derive(Serialize)]
struct RequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Client for the Anthropic Messages API
pub struct AnthropicClient {
    client: Client,
    endpoint: Url,
    model: String,
    max_tokens: u32,
    api_key: Option<String>,
}

impl AnthropicClient {
    pub fn new(settings: AnthropicSettings) -> Result<Self, GenerationError> {
        let base = if settings.base_url.ends_with('/') {
            settings.base_url.clone()
        } else {
            format!("{}/", settings.base_url)
        };
        let endpoint = Url::parse(&base)
            .and_then(|url| url.join("v1/messages"))
            .map_err(|e| {
                GenerationError::InvalidConfiguration(format!(
                    "Invalid model base URL '{}': {e}",
                    settings.base_url
                ))
            })?;

        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| {
                GenerationError::InvalidConfiguration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint,
            model: settings.model,
            max_tokens: settings.max_tokens,
            api_key: settings.api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerationClient for AnthropicClient {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            GenerationError::ExternalGeneration("No API key configured".to_string())
        })?;

        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: [RequestMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(endpoint = %self.endpoint, model = %self.model, "Sending generation request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::ExternalGeneration(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(200).collect();
            return Err(GenerationError::ExternalGeneration(format!(
                "HTTP {status}: {snippet}"
            )));
        }

        let parsed: MessagesResponse = response.json().await.map_err(|e| {
            GenerationError::ExternalGeneration(format!("Malformed response body: {e}"))
        })?;

        let text: String = parsed
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect();

        if text.trim().is_empty() {
            return Err(GenerationError::ExternalGeneration(
                "Response contained no text".to_string(),
            ));
        }

        Ok(text)
    }
}

/// Generates `server.py` with an external model; manifest and README still
/// come from the templates
pub struct ExternalModelGenerator {
    client: Arc<dyn TextGenerationClient>,
    templates: Arc<TemplateCodeGenerator>,
}

impl ExternalModelGenerator {
    pub fn new(client: Arc<dyn TextGenerationClient>, templates: Arc<TemplateCodeGenerator>) -> Self {
        Self { client, templates }
    }
}

#[async_trait]
impl CodeGenerator for ExternalModelGenerator {
    fn backend(&self) -> GeneratorBackend {
        GeneratorBackend::External
    }

    async fn generate(&self, spec: &ServerSpec) -> Result<GeneratedArtifact, GenerationError> {
        let context = self.templates.prepare(spec)?;
        let prompt = build_generation_prompt(spec, self.templates.runtime());

        info!(server = %spec.name, prompt_chars = prompt.len(), "Delegating generation to external model");
        let reply = self.client.complete(&prompt).await?;

        let source = extract_code(&reply);
        if source.is_empty() {
            return Err(GenerationError::ExternalGeneration(
                "Model reply did not contain any source code".to_string(),
            ));
        }

        self.templates.assemble(format!("{source}\n"), &context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{ServerKind, ToolDescriptor};
    use crate::infrastructure::runtime::PythonMcpRuntime;
    use std::sync::Mutex;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(base_url: &str, api_key: Option<&str>) -> AnthropicSettings {
        AnthropicSettings {
            base_url: base_url.to_string(),
            model: "test-model".to_string(),
            max_tokens: 512,
            timeout: Duration::from_secs(5),
            api_key: api_key.map(str::to_string),
        }
    }

    fn templates() -> Arc<TemplateCodeGenerator> {
        Arc::new(TemplateCodeGenerator::new(Arc::new(PythonMcpRuntime::default())).unwrap())
    }

    fn spec() -> ServerSpec {
        ServerSpec::new("echo-server", "Echoes input", ServerKind::Tool)
            .with_tool(ToolDescriptor::new("echo", "Echo a message"))
    }

    struct FakeClient {
        reply: Result<String, String>,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerationClient for FakeClient {
        async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply
                .clone()
                .map_err(GenerationError::ExternalGeneration)
        }
    }

    fn fake(reply: Result<&str, &str>) -> Arc<FakeClient> {
        Arc::new(FakeClient {
            reply: reply.map(str::to_string).map_err(str::to_string),
            prompts: Mutex::new(Vec::new()),
        })
    }

    #[test]
    fn test_endpoint_join() {
        let client = AnthropicClient::new(settings("https://api.example.com", None)).unwrap();
        assert_eq!(client.endpoint().as_str(), "https://api.example.com/v1/messages");

        let client = AnthropicClient::new(settings("http://proxy.local/anthropic/", None)).unwrap();
        assert_eq!(client.endpoint().as_str(), "http://proxy.local/anthropic/v1/messages");

        let err = AnthropicClient::new(settings("not a url", None)).err().unwrap();
        assert!(matches!(err, GenerationError::InvalidConfiguration(_)));
    }

    #[tokio::test]
    async fn test_client_sends_messages_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "secret"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .and(body_partial_json(serde_json::json!({
                "model": "test-model",
                "max_tokens": 512,
                "messages": [{"role": "user", "content": "hello"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [
                    {"type": "text", "text": "first "},
                    {"type": "tool_use", "id": "x"},
                    {"type": "text", "text": "second"}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = AnthropicClient::new(settings(&mock_server.uri(), Some("secret"))).unwrap();
        let reply = client.complete("hello").await.unwrap();
        assert_eq!(reply, "first second");
    }

    #[tokio::test]
    async fn test_client_maps_http_errors() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
            .mount(&mock_server)
            .await;

        let client = AnthropicClient::new(settings(&mock_server.uri(), Some("secret"))).unwrap();
        match client.complete("hello").await {
            Err(GenerationError::ExternalGeneration(message)) => {
                assert!(message.contains("529"), "{message}");
                assert!(message.contains("overloaded"));
            }
            other => panic!("Expected ExternalGeneration, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_client_requires_api_key() {
        let client = AnthropicClient::new(settings("http://127.0.0.1:9", Some("  "))).unwrap();
        let err = client.complete("hello").await.unwrap_err();
        assert_eq!(err.to_string(), "External generation failed: No API key configured");
    }

    #[tokio::test]
    async fn test_client_rejects_empty_reply() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"content": []})))
            .mount(&mock_server)
            .await;

        let client = AnthropicClient::new(settings(&mock_server.uri(), Some("k"))).unwrap();
        assert!(matches!(
            client.complete("hello").await,
            Err(GenerationError::ExternalGeneration(_))
        ));
    }

    #[tokio::test]
    async fn test_generator_uses_extracted_code() {
        let client = fake(Ok("Here it is:\n```python\nprint('echo')\n```\n"));
        let generator = ExternalModelGenerator::new(client.clone(), templates());

        let artifact = generator.generate(&spec()).await.unwrap();
        assert_eq!(generator.backend(), GeneratorBackend::External);
        assert_eq!(
            artifact.filenames(),
            vec!["server.py", "requirements.txt", "README.md"]
        );
        assert_eq!(artifact.get("server.py"), Some("print('echo')\n"));
        assert_eq!(artifact.get("requirements.txt"), Some("mcp>=1.0.0\n"));

        let prompts = client.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("- echo: Echo a message"));
    }

    #[tokio::test]
    async fn test_generator_validates_before_calling() {
        let client = fake(Ok("print(1)"));
        let generator = ExternalModelGenerator::new(client.clone(), templates());

        let invalid = ServerSpec::new("echo-server", "Echoes input", ServerKind::Tool);
        let err = generator.generate(&invalid).await.unwrap_err();

        assert!(matches!(err, GenerationError::InvalidSpec { .. }));
        assert!(client.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generator_propagates_failures() {
        let generator = ExternalModelGenerator::new(fake(Err("timeout")), templates());
        let err = generator.generate(&spec()).await.unwrap_err();
        assert_eq!(err.to_string(), "External generation failed: timeout");

        let generator = ExternalModelGenerator::new(fake(Ok("```python\n```")), templates());
        let err = generator.generate(&spec()).await.unwrap_err();
        assert!(matches!(err, GenerationError::ExternalGeneration(_)));
    }
}
