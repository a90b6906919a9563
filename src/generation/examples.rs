//! Starter configurations offered by the wizard for each server kind

use crate::generation::{
    Capabilities, ParameterDescriptor, ParameterType, PromptDescriptor, ResourceDescriptor,
    ServerKind, ToolDescriptor,
};

fn example_tool() -> ToolDescriptor {
    ToolDescriptor::new("example_tool", "An example tool").with_parameter(
        ParameterDescriptor::new("input", ParameterType::String, true)
            .with_description("Input parameter"),
    )
}

fn example_resource() -> ResourceDescriptor {
    ResourceDescriptor::new("data://example", "Example Resource", "An example resource")
        .with_mime_type("json")
}

/// Example `config` object for the given kind
pub fn example_config(kind: ServerKind) -> Capabilities {
    match kind {
        ServerKind::Tool => Capabilities {
            tools: vec![example_tool()],
            ..Default::default()
        },
        ServerKind::Resource => Capabilities {
            resources: vec![example_resource()],
            ..Default::default()
        },
        ServerKind::Full => Capabilities {
            tools: vec![example_tool()],
            resources: vec![example_resource()],
            prompts: vec![PromptDescriptor::new("example_prompt", "An example prompt")],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::validator::validate_config;

    #[test]
    fn test_examples_are_valid() {
        for kind in ServerKind::all() {
            let report = validate_config(&example_config(kind));
            assert!(report.is_valid(), "{kind}: {:?}", report.errors);
            assert!(report.warnings.is_empty());
        }
    }

    #[test]
    fn test_example_shapes() {
        let tool = example_config(ServerKind::Tool);
        assert_eq!(tool.tools.len(), 1);
        assert!(tool.resources.is_empty());

        let full = example_config(ServerKind::Full);
        assert_eq!(full.prompts[0].name, "example_prompt");

        let json = serde_json::to_value(example_config(ServerKind::Resource)).unwrap();
        assert_eq!(json["resources"][0]["uri"], "data://example");
        assert_eq!(json["resources"][0]["mimeType"], "json");
    }
}
