//! Natural-language request sent to the external generation service

use crate::generation::{ProtocolRuntime, ServerSpec};

/// Describe the spec as a code-generation request
///
/// Only the categories the server kind uses are included.
pub fn build_generation_prompt(spec: &ServerSpec, runtime: &dyn ProtocolRuntime) -> String {
    let kind = spec.kind;
    let mut lines = vec![
        format!(
            "Write a complete Python MCP server using the `{}` package ({}).",
            runtime.package(),
            runtime.requirement()
        ),
        String::new(),
        format!("Server name: {}", spec.name),
        format!("Description: {}", spec.description),
        format!("Server type: {} ({})", kind.display_name(), kind.summary()),
    ];

    if kind.uses_tools() && !spec.tools.is_empty() {
        lines.push(String::new());
        lines.push("Tools:".to_string());
        for tool in &spec.tools {
            lines.push(format!("- {}: {}", tool.name, tool.description));
            lines.extend(tool.parameters.iter().map(|param| {
                format!(
                    "  - {} ({}, {}): {}",
                    param.name,
                    param.param_type.json_type(),
                    if param.required { "required" } else { "optional" },
                    param.description
                )
            }));
        }
    }

    if kind.uses_resources() && !spec.resources.is_empty() {
        lines.push(String::new());
        lines.push("Resources:".to_string());
        lines.extend(spec.resources.iter().map(|resource| {
            format!(
                "- {} \"{}\" [{}]: {}",
                resource.uri,
                resource.name,
                resource.effective_mime_type(),
                resource.description
            )
        }));
    }

    if kind.uses_prompts() && !spec.prompts.is_empty() {
        lines.push(String::new());
        lines.push("Prompts:".to_string());
        lines.extend(
            spec.prompts
                .iter()
                .map(|p| format!("- {}: {}", p.name, p.description)),
        );
    }

    lines.push(String::new());
    lines.push(format!(
        "Use `{}` for the server, `{}` for the stdio transport and `{}` for protocol types.",
        runtime.server_module(),
        runtime.stdio_module(),
        runtime.types_module()
    ));
    lines.push("Implement each handler with a clear placeholder body and a docstring.".to_string());
    lines.push(
        "Reply with the contents of server.py only, in a single ```python code block.".to_string(),
    );

    lines.join("\n")
}
