//! Parsing of the one-parameter-per-line text format used by the wizard

use crate::generation::{ParameterDescriptor, ParameterType};
use crate::wizard::WizardError;

/// Parse `name:type:description` lines into parameters
///
/// Blank lines are skipped. The description is optional and may itself
/// contain colons. Parameters entered this way are required.
///
/// ```
/// use mcp_forge::wizard::parse_parameter_lines;
///
/// let params = parse_parameter_lines("num1:number:First number\nnum2:number").unwrap();
/// assert_eq!(params.len(), 2);
/// assert_eq!(params[0].description, "First number");
/// assert_eq!(params[1].description, "");
/// ```
pub fn parse_parameter_lines(text: &str) -> Result<Vec<ParameterDescriptor>, WizardError> {
    let mut parameters = Vec::new();
    let mut errors = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.splitn(3, ':');
        let name = parts.next().unwrap_or_default().trim();
        let Some(type_name) = parts.next() else {
            errors.push(format!(
                "Parameter line {}: expected 'name:type:description'",
                line_no + 1
            ));
            continue;
        };
        let description = parts.next().unwrap_or_default().trim();

        if name.is_empty() {
            errors.push(format!("Parameter line {}: Missing name", line_no + 1));
            continue;
        }

        parameters.push(
            ParameterDescriptor::new(name, ParameterType::from(type_name.trim().to_string()), true)
                .with_description(description),
        );
    }

    if errors.is_empty() {
        Ok(parameters)
    } else {
        Err(WizardError::Invalid { errors })
    }
}
