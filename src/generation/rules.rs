//! Business rules for the generation domain

use once_cell::sync::Lazy;
use regex::Regex;

use crate::generation::ServerKind;

static SERVER_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9-]*$").expect("server name pattern is valid"));

/// Validates the server name format
pub fn validate_server_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Server name is required".to_string());
    }

    if !SERVER_NAME_RE.is_match(name) {
        return Err(format!(
            "Server name '{name}' must start with a lowercase letter and contain only lowercase letters, digits, and hyphens"
        ));
    }

    Ok(())
}

/// Validates the server description
pub fn validate_description(description: &str) -> Result<(), String> {
    if description.trim().is_empty() {
        return Err("Description is required".to_string());
    }
    Ok(())
}

/// Validates that the descriptor counts satisfy what the kind requires
pub fn validate_kind_requirements(
    kind: ServerKind,
    tool_count: usize,
    resource_count: usize,
) -> Result<(), String> {
    match kind {
        ServerKind::Tool if tool_count == 0 => {
            Err("Tool servers require at least one tool".to_string())
        }
        ServerKind::Resource if resource_count == 0 => {
            Err("Resource servers require at least one resource".to_string())
        }
        ServerKind::Full if tool_count == 0 || resource_count == 0 => {
            Err("Full servers require at least one tool and one resource".to_string())
        }
        _ => Ok(()),
    }
}
