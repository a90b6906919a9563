//! Field validation for server specs and their descriptors
//!
//! Validation never fails fast: every problem is collected into a
//! [`ValidationReport`] so callers can show the full list at once. Errors
//! block generation, warnings never do.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::generation::{
    Capabilities, GenerationError, PromptDescriptor, ResourceDescriptor, ServerSpec,
    ToolDescriptor, rules, utils::to_python_identifier,
};

/// Outcome of validating a spec or a bare descriptor configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Convert into a result, keeping the warnings on success
    pub fn into_result(self) -> Result<Vec<String>, GenerationError> {
        if self.errors.is_empty() {
            Ok(self.warnings)
        } else {
            Err(GenerationError::InvalidSpec {
                errors: self.errors,
            })
        }
    }
}

/// Validate descriptor fields only, without any server-level rules
pub fn validate_config(capabilities: &Capabilities) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_tools(&capabilities.tools, &mut report);
    validate_resources(&capabilities.resources, &mut report);
    validate_prompts(&capabilities.prompts, &mut report);
    report
}

/// Validate a complete server spec
pub fn validate(spec: &ServerSpec) -> ValidationReport {
    let mut report = ValidationReport::default();

    if let Err(message) = rules::validate_server_name(&spec.name) {
        report.error(message);
    }
    if let Err(message) = rules::validate_description(&spec.description) {
        report.error(message);
    }

    let kind = spec.kind;
    if kind.uses_tools() {
        validate_tools(&spec.tools, &mut report);
    } else if !spec.tools.is_empty() {
        report.warning(format!("Tools are ignored for {kind} servers"));
    }

    if kind.uses_resources() {
        validate_resources(&spec.resources, &mut report);
    } else if !spec.resources.is_empty() {
        report.warning(format!("Resources are ignored for {kind} servers"));
    }

    if kind.uses_prompts() {
        validate_prompts(&spec.prompts, &mut report);
    } else if !spec.prompts.is_empty() {
        report.warning(format!("Prompts are ignored for {kind} servers"));
    }

    let tool_count = if kind.uses_tools() { spec.tools.len() } else { 0 };
    let resource_count = if kind.uses_resources() {
        spec.resources.len()
    } else {
        0
    };
    if let Err(message) = rules::validate_kind_requirements(kind, tool_count, resource_count) {
        report.error(message);
    }

    report
}

fn validate_tools(tools: &[ToolDescriptor], report: &mut ValidationReport) {
    // identifier -> original tool name
    let mut identifiers: HashMap<String, &str> = HashMap::new();

    for (i, tool) in tools.iter().enumerate() {
        let i = i + 1;

        if tool.name.trim().is_empty() {
            report.error(format!("Tool {i}: Missing 'name' field"));
        } else {
            match to_python_identifier(&tool.name) {
                None => report.error(format!(
                    "Tool {i}: Name '{}' does not contain any identifier characters",
                    tool.name
                )),
                Some(ident) => match identifiers.get(ident.as_str()) {
                    Some(existing) if *existing == tool.name => {
                        report.error(format!("Tool {i}: Duplicate tool name '{}'", tool.name))
                    }
                    Some(existing) => report.error(format!(
                        "Tool {i}: Name '{}' conflicts with tool '{existing}'",
                        tool.name
                    )),
                    None => {
                        identifiers.insert(ident, &tool.name);
                    }
                },
            }
        }

        if tool.description.trim().is_empty() {
            report.warning(format!("Tool {i}: Missing 'description' field"));
        }

        let mut parameter_identifiers: HashSet<String> = HashSet::new();
        for (j, parameter) in tool.parameters.iter().enumerate() {
            let j = j + 1;

            if parameter.name.trim().is_empty() {
                report.error(format!("Tool {i}, Parameter {j}: Missing 'name' field"));
                continue;
            }

            match to_python_identifier(&parameter.name) {
                None => report.error(format!(
                    "Tool {i}, Parameter {j}: Name '{}' does not contain any identifier characters",
                    parameter.name
                )),
                Some(ident) => {
                    if !parameter_identifiers.insert(ident) {
                        report.error(format!(
                            "Tool {i}, Parameter {j}: Duplicate parameter name '{}'",
                            parameter.name
                        ));
                    }
                }
            }

            if !parameter.param_type.is_known() {
                report.warning(format!(
                    "Tool {i}, Parameter {j}: Unknown type '{}', treated as string",
                    parameter.param_type
                ));
            }
        }
    }
}

fn validate_resources(resources: &[ResourceDescriptor], report: &mut ValidationReport) {
    let mut uris: HashSet<&str> = HashSet::new();

    for (i, resource) in resources.iter().enumerate() {
        let i = i + 1;

        if resource.uri.trim().is_empty() {
            report.error(format!("Resource {i}: Missing 'uri' field"));
        } else if !uris.insert(resource.uri.as_str()) {
            report.error(format!(
                "Resource {i}: Duplicate resource URI '{}'",
                resource.uri
            ));
        }

        if resource.name.trim().is_empty() {
            report.error(format!("Resource {i}: Missing 'name' field"));
        }
    }
}

fn validate_prompts(prompts: &[PromptDescriptor], report: &mut ValidationReport) {
    let mut identifiers: HashMap<String, &str> = HashMap::new();

    for (i, prompt) in prompts.iter().enumerate() {
        let i = i + 1;

        if prompt.name.trim().is_empty() {
            report.error(format!("Prompt {i}: Missing 'name' field"));
            continue;
        }

        match to_python_identifier(&prompt.name) {
            None => report.error(format!(
                "Prompt {i}: Name '{}' does not contain any identifier characters",
                prompt.name
            )),
            Some(ident) => match identifiers.get(ident.as_str()) {
                Some(existing) if *existing == prompt.name => {
                    report.error(format!("Prompt {i}: Duplicate prompt name '{}'", prompt.name))
                }
                Some(existing) => report.error(format!(
                    "Prompt {i}: Name '{}' conflicts with prompt '{existing}'",
                    prompt.name
                )),
                None => {
                    identifiers.insert(ident, &prompt.name);
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{ParameterDescriptor, ParameterType, ServerKind};

    fn calculator() -> ServerSpec {
        ServerSpec::new("calculator-server", "A calculator", ServerKind::Tool).with_tool(
            ToolDescriptor::new("add", "Add two numbers")
                .with_parameter(ParameterDescriptor::new("a", ParameterType::Number, true))
                .with_parameter(ParameterDescriptor::new("b", ParameterType::Number, true)),
        )
    }

    #[test]
    fn test_valid_spec() {
        let report = validate(&calculator());
        assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_missing_tool_name_is_an_error() {
        let mut spec = calculator();
        spec.tools.push(ToolDescriptor::new("", "Nameless"));

        let report = validate(&spec);
        assert_eq!(report.errors, vec!["Tool 2: Missing 'name' field"]);
    }

    #[test]
    fn test_missing_tool_description_is_a_warning() {
        let mut spec = calculator();
        spec.tools[0].description.clear();

        let report = validate(&spec);
        assert!(report.is_valid());
        assert_eq!(report.warnings, vec!["Tool 1: Missing 'description' field"]);
    }

    #[test]
    fn test_missing_parameter_name() {
        let caps = Capabilities {
            tools: vec![
                ToolDescriptor::new("", "A test tool")
                    .with_parameter(ParameterDescriptor::new("", ParameterType::String, true)),
            ],
            ..Default::default()
        };

        let report = validate_config(&caps);
        assert_eq!(
            report.errors,
            vec![
                "Tool 1: Missing 'name' field",
                "Tool 1, Parameter 1: Missing 'name' field",
            ]
        );
    }

    #[test]
    fn test_resource_and_prompt_fields() {
        let caps = Capabilities {
            resources: vec![
                ResourceDescriptor::new("", "", "nothing"),
                ResourceDescriptor::new("data://a", "A", ""),
            ],
            prompts: vec![PromptDescriptor::new("", "")],
            ..Default::default()
        };

        let report = validate_config(&caps);
        assert_eq!(
            report.errors,
            vec![
                "Resource 1: Missing 'uri' field",
                "Resource 1: Missing 'name' field",
                "Prompt 1: Missing 'name' field",
            ]
        );
    }

    #[test]
    fn test_full_requires_a_resource() {
        let spec = ServerSpec::new("search-server", "Search", ServerKind::Full).with_tool(
            ToolDescriptor::new("search", "Search for information").with_parameter(
                ParameterDescriptor::new("query", ParameterType::String, true),
            ),
        );

        let report = validate(&spec);
        assert_eq!(
            report.errors,
            vec!["Full servers require at least one tool and one resource"]
        );
    }

    #[test]
    fn test_server_level_rules() {
        let spec = ServerSpec::new("Bad Name", "", ServerKind::Resource);
        let report = validate(&spec);

        assert_eq!(report.errors.len(), 3);
        assert!(report.errors[0].contains("must start with a lowercase letter"));
        assert_eq!(report.errors[1], "Description is required");
        assert_eq!(
            report.errors[2],
            "Resource servers require at least one resource"
        );
    }

    #[test]
    fn test_duplicates_and_conflicts() {
        let spec = calculator()
            .with_tool(ToolDescriptor::new("add", "again"))
            .with_tool(ToolDescriptor::new("search-docs", "one"))
            .with_tool(ToolDescriptor::new("search_docs", "two"));

        let report = validate(&spec);
        assert_eq!(
            report.errors,
            vec![
                "Tool 2: Duplicate tool name 'add'",
                "Tool 4: Name 'search_docs' conflicts with tool 'search-docs'",
            ]
        );
    }

    #[test]
    fn test_duplicate_parameters_and_unknown_types() {
        let spec = ServerSpec::new("dup", "dup", ServerKind::Tool).with_tool(
            ToolDescriptor::new("lookup", "Lookup")
                .with_parameter(ParameterDescriptor::new("id", ParameterType::String, true))
                .with_parameter(ParameterDescriptor::new(
                    "id",
                    ParameterType::Other("uuid".into()),
                    false,
                )),
        );

        let report = validate(&spec);
        assert_eq!(
            report.errors,
            vec!["Tool 1, Parameter 2: Duplicate parameter name 'id'"]
        );
        assert_eq!(
            report.warnings,
            vec!["Tool 1, Parameter 2: Unknown type 'uuid', treated as string"]
        );
    }

    #[test]
    fn test_unused_categories_are_warnings() {
        let spec = calculator().with_prompt(PromptDescriptor::new("", ""));

        let report = validate(&spec);
        assert!(report.is_valid());
        assert_eq!(report.warnings, vec!["Prompts are ignored for tool servers"]);
    }

    #[test]
    fn test_into_result() {
        let ok = validate(&calculator()).into_result();
        assert!(ok.is_ok());

        let err = validate(&ServerSpec::new("x", "", ServerKind::Tool))
            .into_result()
            .unwrap_err();
        assert_eq!(err.validation_errors().map(|e| e.len()), Some(2));
    }
}
