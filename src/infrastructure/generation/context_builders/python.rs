//! Python-specific context builder for MCP server generation

use serde::Serialize;
use serde_json::json;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::generation::{
    GenerationError, ParameterDescriptor, PromptDescriptor, ProtocolRuntime, RenderContext,
    ResourceDescriptor, ServerSpec, ToolDescriptor,
    sanitizers::{python_string_literal, sanitize_docstring, sanitize_markdown_inline},
    utils::{to_python_identifier, to_snake_case, to_title_case},
};

/// Parameter of a generated tool stub
#[derive(Clone, Debug, Serialize)]
pub struct PythonParameterInfo {
    pub ident: String,
    pub name: String,
    pub name_literal: String,
    pub hint: String,
    pub json_type: String,
    pub description_doc: String,
    pub description_literal: String,
    pub description_md: String,
    pub required: bool,
}

/// Generated tool stub
#[derive(Clone, Debug, Serialize)]
pub struct PythonToolInfo {
    pub fn_name: String,
    pub name: String,
    pub name_literal: String,
    pub description_doc: String,
    pub description_literal: String,
    pub description_md: String,
    pub signature: String,
    pub params: Vec<PythonParameterInfo>,
    pub required: Vec<String>,
}

/// Generated resource handler
#[derive(Clone, Debug, Serialize)]
pub struct PythonResourceInfo {
    pub fn_name: String,
    pub uri: String,
    pub uri_literal: String,
    pub name_literal: String,
    pub name_md: String,
    pub description_doc: String,
    pub description_literal: String,
    pub description_md: String,
    pub mime_type: String,
    pub mime_literal: String,
    pub is_json: bool,
}

/// Generated prompt entry
#[derive(Clone, Debug, Serialize)]
pub struct PythonPromptInfo {
    pub name: String,
    pub name_literal: String,
    pub description_literal: String,
    pub description_md: String,
}

/// Builds the render context for the Python templates
pub struct PythonContextBuilder {
    runtime: Arc<dyn ProtocolRuntime>,
}

impl PythonContextBuilder {
    pub fn new(runtime: Arc<dyn ProtocolRuntime>) -> Self {
        Self { runtime }
    }

    pub fn runtime(&self) -> &dyn ProtocolRuntime {
        self.runtime.as_ref()
    }

    /// Build a render context for an already validated spec
    ///
    /// Categories the server kind does not use are left out entirely.
    pub fn build(&self, spec: &ServerSpec) -> Result<RenderContext, GenerationError> {
        let kind = spec.kind;
        let mut render_context = RenderContext::new();

        render_context.add_variable(
            "server",
            json!({
                "name": spec.name,
                "name_literal": python_string_literal(&spec.name),
                "title": to_title_case(&spec.name),
                "description_doc": sanitize_docstring(&spec.description),
                "description_literal": python_string_literal(&spec.description),
                "description_md": sanitize_markdown_inline(&spec.description),
                "kind": kind.as_str(),
                "kind_label": kind.display_name(),
            }),
        );

        let runtime = self.runtime();
        render_context.add_variable(
            "runtime",
            json!({
                "package": runtime.package(),
                "min_version": runtime.min_version(),
                "requirement": runtime.requirement(),
                "server_module": runtime.server_module(),
                "stdio_module": runtime.stdio_module(),
                "types_module": runtime.types_module(),
                "launcher": runtime.launcher(),
            }),
        );

        let tools = if kind.uses_tools() {
            spec.tools
                .iter()
                .map(build_tool_info)
                .collect::<Result<Vec<_>, _>>()?
        } else {
            Vec::new()
        };

        let mut used_names: HashSet<String> = tools.iter().map(|t| t.fn_name.clone()).collect();
        let resources = if kind.uses_resources() {
            spec.resources
                .iter()
                .map(|r| build_resource_info(r, &mut used_names))
                .collect()
        } else {
            Vec::new()
        };

        let prompts: Vec<PythonPromptInfo> = if kind.uses_prompts() {
            spec.prompts.iter().map(build_prompt_info).collect()
        } else {
            Vec::new()
        };

        let mut typing_imports = BTreeSet::from(["Any"]);
        if tools
            .iter()
            .flat_map(|t| t.params.iter())
            .any(|p| !p.required)
        {
            typing_imports.insert("Optional");
        }

        let mut type_imports = BTreeSet::new();
        if !tools.is_empty() {
            type_imports.extend(["TextContent", "Tool"]);
        }
        if !resources.is_empty() {
            type_imports.insert("Resource");
        }
        if !prompts.is_empty() {
            type_imports.extend(["GetPromptResult", "Prompt", "PromptMessage", "TextContent"]);
        }

        render_context.add_variable("has_tools", json!(!tools.is_empty()));
        render_context.add_variable("has_resources", json!(!resources.is_empty()));
        render_context.add_variable("has_prompts", json!(!prompts.is_empty()));
        render_context.add_variable("typing_imports", json!(typing_imports));
        render_context.add_variable("type_imports", json!(type_imports));
        render_context.add_variable("tools", serde_json::to_value(&tools)?);
        render_context.add_variable("resources", serde_json::to_value(&resources)?);
        render_context.add_variable("prompts", serde_json::to_value(&prompts)?);

        Ok(render_context)
    }
}

fn identifier(name: &str) -> Result<String, GenerationError> {
    to_python_identifier(name).ok_or_else(|| {
        GenerationError::RenderError(format!("'{name}' cannot be turned into an identifier"))
    })
}

fn build_tool_info(tool: &ToolDescriptor) -> Result<PythonToolInfo, GenerationError> {
    let fn_name = identifier(&tool.name)?;
    let params = tool
        .parameters
        .iter()
        .map(build_parameter_info)
        .collect::<Result<Vec<_>, _>>()?;

    let signature = if params.is_empty() {
        String::new()
    } else {
        let args = params
            .iter()
            .map(|p| format!("{}: {}", p.ident, p.hint))
            .collect::<Vec<_>>()
            .join(", ");
        format!("*, {args}")
    };

    let description_doc = match sanitize_docstring(&tool.description) {
        doc if doc.is_empty() => format!("Handle the {} tool.", sanitize_docstring(&tool.name)),
        doc => doc,
    };

    Ok(PythonToolInfo {
        fn_name,
        name: tool.name.clone(),
        name_literal: python_string_literal(&tool.name),
        description_doc,
        description_literal: python_string_literal(&tool.description),
        description_md: sanitize_markdown_inline(&tool.description),
        signature,
        required: tool
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| python_string_literal(&p.name))
            .collect(),
        params,
    })
}

fn build_parameter_info(
    parameter: &ParameterDescriptor,
) -> Result<PythonParameterInfo, GenerationError> {
    let python_type = parameter.param_type.python_type();
    let hint = if parameter.required {
        python_type.to_string()
    } else {
        format!("Optional[{python_type}] = None")
    };

    let description_doc = match sanitize_docstring(&parameter.description) {
        doc if doc.is_empty() => "No description provided.".to_string(),
        doc => doc,
    };

    Ok(PythonParameterInfo {
        ident: identifier(&parameter.name)?,
        name: parameter.name.clone(),
        name_literal: python_string_literal(&parameter.name),
        hint,
        json_type: parameter.param_type.json_type().to_string(),
        description_doc,
        description_literal: python_string_literal(&parameter.description),
        description_md: sanitize_markdown_inline(&parameter.description),
        required: parameter.required,
    })
}

fn build_resource_info(
    resource: &ResourceDescriptor,
    used_names: &mut HashSet<String>,
) -> PythonResourceInfo {
    let slug = match to_snake_case(&resource.name) {
        s if s.is_empty() => to_snake_case(&resource.uri),
        s => s,
    };
    let base = if slug.is_empty() {
        "resource".to_string()
    } else {
        format!("resource_{slug}")
    };

    let mut fn_name = base.clone();
    let mut suffix = 2;
    while !used_names.insert(fn_name.clone()) {
        fn_name = format!("{base}_{suffix}");
        suffix += 1;
    }

    let description_doc = match sanitize_docstring(&resource.description) {
        doc if doc.is_empty() => format!("Read {}.", sanitize_docstring(&resource.name)),
        doc => doc,
    };
    let mime_type = resource.effective_mime_type();

    PythonResourceInfo {
        fn_name,
        uri: resource.uri.clone(),
        uri_literal: python_string_literal(&resource.uri),
        name_literal: python_string_literal(&resource.name),
        name_md: sanitize_markdown_inline(&resource.name),
        description_doc,
        description_literal: python_string_literal(&resource.description),
        description_md: sanitize_markdown_inline(&resource.description),
        mime_type: mime_type.to_string(),
        mime_literal: python_string_literal(mime_type),
        is_json: resource.is_json(),
    }
}

fn build_prompt_info(prompt: &PromptDescriptor) -> PythonPromptInfo {
    PythonPromptInfo {
        name: prompt.name.clone(),
        name_literal: python_string_literal(&prompt.name),
        description_literal: python_string_literal(&prompt.description),
        description_md: sanitize_markdown_inline(&prompt.description),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{ParameterType, ServerKind};
    use crate::infrastructure::runtime::PythonMcpRuntime;

    fn builder() -> PythonContextBuilder {
        PythonContextBuilder::new(Arc::new(PythonMcpRuntime::default()))
    }

    #[test]
    fn test_tool_signature_and_hints() {
        let spec = ServerSpec::new("calc", "Calculator", ServerKind::Tool).with_tool(
            ToolDescriptor::new("add", "Add")
                .with_parameter(ParameterDescriptor::new("a", ParameterType::Number, true))
                .with_parameter(ParameterDescriptor::new(
                    "precision",
                    ParameterType::Integer,
                    false,
                )),
        );

        let context = builder().build(&spec).unwrap();
        let tool = &context.get("tools").unwrap()[0];

        assert_eq!(tool["fn_name"], "add");
        assert_eq!(tool["signature"], "*, a: float, precision: Optional[int] = None");
        assert_eq!(tool["required"], json!(["\"a\""]));
        assert_eq!(context.get("typing_imports"), Some(&json!(["Any", "Optional"])));
        assert_eq!(context.get("type_imports"), Some(&json!(["TextContent", "Tool"])));
        assert_eq!(context.get("has_prompts"), Some(&json!(false)));
    }

    #[test]
    fn test_unused_categories_are_left_out() {
        let spec = ServerSpec::new("docs", "Docs", ServerKind::Resource)
            .with_tool(ToolDescriptor::new("ignored", ""))
            .with_resource(ResourceDescriptor::new("docs://readme", "Readme", "").with_mime_type("text"));

        let context = builder().build(&spec).unwrap();
        assert_eq!(context.get("tools"), Some(&json!([])));
        assert_eq!(context.get("type_imports"), Some(&json!(["Resource"])));

        let resource = &context.get("resources").unwrap()[0];
        assert_eq!(resource["fn_name"], "resource_readme");
        assert_eq!(resource["mime_literal"], "\"text/plain\"");
        assert_eq!(resource["is_json"], false);
        assert_eq!(resource["description_doc"], "Read Readme.");
    }

    #[test]
    fn test_resource_function_names_are_unique() {
        let spec = ServerSpec::new("data", "Data", ServerKind::Full)
            .with_tool(ToolDescriptor::new("resource_config", "clashes"))
            .with_resource(ResourceDescriptor::new("cfg://a", "Config", ""))
            .with_resource(ResourceDescriptor::new("cfg://b", "config", ""))
            .with_resource(ResourceDescriptor::new("cfg://c", "", ""));

        let context = builder().build(&spec).unwrap();
        let names: Vec<&str> = context.get("resources").unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["fn_name"].as_str().unwrap())
            .collect();

        assert_eq!(names, vec!["resource_config_2", "resource_config_3", "resource_cfg_c"]);
    }

    #[test]
    fn test_runtime_is_injected() {
        let runtime = PythonMcpRuntime::new("mcp", "1.4.1", "python3");
        let builder = PythonContextBuilder::new(Arc::new(runtime));
        let spec = ServerSpec::new("x", "y", ServerKind::Tool).with_tool(ToolDescriptor::new("t", "d"));

        let context = builder.build(&spec).unwrap();
        assert_eq!(context.get("runtime").unwrap()["requirement"], "mcp>=1.4.1");
        assert_eq!(context.get("server").unwrap()["title"], "X");
    }
}
