//! Generation infrastructure implementations

pub mod context_builders;
pub mod external_model;
pub mod generator_factory;
pub mod template_renderer;

pub use context_builders::PythonContextBuilder;
pub use external_model::{AnthropicClient, AnthropicSettings, ExternalModelGenerator};
pub use generator_factory::select_generator;
pub use template_renderer::TemplateCodeGenerator;
