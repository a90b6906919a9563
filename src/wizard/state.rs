//! The wizard as an explicit state machine
//!
//! States are plain values. [`WizardState::apply`] never mutates the
//! current state; it returns the next one or a [`WizardError`] describing
//! why the event was rejected.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::generation::{
    Capabilities, PromptDescriptor, ResourceDescriptor, ServerKind, ServerSpec, ToolDescriptor,
    rules, validate, validate_config,
};
use crate::wizard::{WizardError, parse_parameter_lines};

/// Step 1 input as typed by the user, not yet validated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicInfoDraft {
    pub name: String,
    pub description: String,
    pub server_type: Option<String>,
}

/// Validated step 1 values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerHeader {
    pub name: String,
    pub description: String,
    pub kind: ServerKind,
}

impl From<ServerHeader> for BasicInfoDraft {
    fn from(header: ServerHeader) -> Self {
        Self {
            name: header.name,
            description: header.description,
            server_type: Some(header.kind.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum WizardState {
    BasicInfo {
        #[serde(default)]
        draft: BasicInfoDraft,
        #[serde(default)]
        capabilities: Capabilities,
    },
    Configuration {
        header: ServerHeader,
        #[serde(default)]
        capabilities: Capabilities,
    },
    Review {
        spec: ServerSpec,
    },
    Generate {
        spec: ServerSpec,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardEvent {
    SetBasicInfo {
        #[serde(default)]
        name: String,
        #[serde(default)]
        description: String,
        #[serde(default)]
        server_type: Option<String>,
    },
    Next,
    Back,
    AddTool {
        tool: ToolDescriptor,
        /// Extra parameters in `name:type:description` form, one per line
        #[serde(default)]
        parameter_lines: Option<String>,
    },
    RemoveTool {
        index: usize,
    },
    AddResource {
        resource: ResourceDescriptor,
    },
    RemoveResource {
        index: usize,
    },
    AddPrompt {
        prompt: PromptDescriptor,
    },
    RemovePrompt {
        index: usize,
    },
    Generate,
    Reset,
}

impl WizardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WizardEvent::SetBasicInfo { .. } => "set_basic_info",
            WizardEvent::Next => "next",
            WizardEvent::Back => "back",
            WizardEvent::AddTool { .. } => "add_tool",
            WizardEvent::RemoveTool { .. } => "remove_tool",
            WizardEvent::AddResource { .. } => "add_resource",
            WizardEvent::RemoveResource { .. } => "remove_resource",
            WizardEvent::AddPrompt { .. } => "add_prompt",
            WizardEvent::RemovePrompt { .. } => "remove_prompt",
            WizardEvent::Generate => "generate",
            WizardEvent::Reset => "reset",
        }
    }
}

impl Default for WizardState {
    fn default() -> Self {
        WizardState::BasicInfo {
            draft: BasicInfoDraft::default(),
            capabilities: Capabilities::default(),
        }
    }
}

impl WizardState {
    pub fn step_name(&self) -> &'static str {
        match self {
            WizardState::BasicInfo { .. } => "basic_info",
            WizardState::Configuration { .. } => "configuration",
            WizardState::Review { .. } => "review",
            WizardState::Generate { .. } => "generate",
        }
    }

    /// 1-based position of the step in the wizard
    pub fn step_number(&self) -> u8 {
        match self {
            WizardState::BasicInfo { .. } => 1,
            WizardState::Configuration { .. } => 2,
            WizardState::Review { .. } => 3,
            WizardState::Generate { .. } => 4,
        }
    }

    /// The spec ready for generation, once the wizard reached its last step
    pub fn spec_to_generate(&self) -> Option<&ServerSpec> {
        match self {
            WizardState::Generate { spec } => Some(spec),
            _ => None,
        }
    }

    /// Compute the state that follows `event`
    pub fn apply(&self, event: WizardEvent) -> Result<WizardState, WizardError> {
        let step = self.step_name();
        let event_name = event.name();

        let next = match (self, event) {
            (_, WizardEvent::Reset) => Ok(WizardState::default()),

            (
                WizardState::BasicInfo { capabilities, .. },
                WizardEvent::SetBasicInfo {
                    name,
                    description,
                    server_type,
                },
            ) => Ok(WizardState::BasicInfo {
                draft: BasicInfoDraft {
                    name,
                    description,
                    server_type,
                },
                capabilities: capabilities.clone(),
            }),

            (WizardState::BasicInfo { draft, capabilities }, WizardEvent::Next) => {
                let header = validate_basic_info(draft)?;
                Ok(WizardState::Configuration {
                    header,
                    capabilities: capabilities.clone(),
                })
            }

            (WizardState::Configuration { header, capabilities }, event) => {
                configuration_step(header, capabilities, event)
            }

            (WizardState::Review { spec }, WizardEvent::Back) => {
                Ok(WizardState::Configuration {
                    header: ServerHeader {
                        name: spec.name.clone(),
                        description: spec.description.clone(),
                        kind: spec.kind,
                    },
                    capabilities: spec.capabilities(),
                })
            }

            (WizardState::Review { spec }, WizardEvent::Generate) => {
                Ok(WizardState::Generate { spec: spec.clone() })
            }

            (WizardState::Generate { spec }, WizardEvent::Back) => {
                Ok(WizardState::Review { spec: spec.clone() })
            }

            _ => Err(WizardError::InvalidTransition {
                step,
                event: event_name,
            }),
        }?;

        debug!(from = step, to = next.step_name(), event = event_name, "Wizard transition");
        Ok(next)
    }
}

fn validate_basic_info(draft: &BasicInfoDraft) -> Result<ServerHeader, WizardError> {
    let mut errors = Vec::new();

    if let Err(message) = rules::validate_server_name(&draft.name) {
        errors.push(message);
    }
    if let Err(message) = rules::validate_description(&draft.description) {
        errors.push(message);
    }

    let kind = match draft.server_type.as_deref().map(str::trim) {
        None | Some("") => Some(ServerKind::Tool),
        Some(value) => match value.parse::<ServerKind>() {
            Ok(kind) => Some(kind),
            Err(_) => {
                errors.push(format!("Unknown server type: {value}"));
                None
            }
        },
    };

    match kind {
        Some(kind) if errors.is_empty() => Ok(ServerHeader {
            name: draft.name.trim().to_string(),
            description: draft.description.trim().to_string(),
            kind,
        }),
        _ => Err(WizardError::Invalid { errors }),
    }
}

fn configuration_step(
    header: &ServerHeader,
    capabilities: &Capabilities,
    event: WizardEvent,
) -> Result<WizardState, WizardError> {
    let kind = header.kind;
    let mut updated = capabilities.clone();

    match event {
        WizardEvent::Back => {
            return Ok(WizardState::BasicInfo {
                draft: header.clone().into(),
                capabilities: capabilities.clone(),
            });
        }
        WizardEvent::Next => {
            let spec = ServerSpec::new(&header.name, &header.description, kind)
                .with_capabilities(capabilities.clone().restricted_to(kind));
            let report = validate(&spec);
            if !report.is_valid() {
                return Err(WizardError::Invalid {
                    errors: report.errors,
                });
            }
            return Ok(WizardState::Review { spec });
        }
        WizardEvent::AddTool {
            mut tool,
            parameter_lines,
        } => {
            require_category(kind.uses_tools(), "Tools", kind)?;
            if let Some(lines) = parameter_lines {
                tool.parameters.extend(parse_parameter_lines(&lines)?);
            }
            updated.tools.push(tool);
        }
        WizardEvent::AddResource { resource } => {
            require_category(kind.uses_resources(), "Resources", kind)?;
            updated.resources.push(resource);
        }
        WizardEvent::AddPrompt { prompt } => {
            require_category(kind.uses_prompts(), "Prompts", kind)?;
            updated.prompts.push(prompt);
        }
        WizardEvent::RemoveTool { index } => {
            remove_at(&mut updated.tools, index, "tool")?;
        }
        WizardEvent::RemoveResource { index } => {
            remove_at(&mut updated.resources, index, "resource")?;
        }
        WizardEvent::RemovePrompt { index } => {
            remove_at(&mut updated.prompts, index, "prompt")?;
        }
        other => {
            return Err(WizardError::InvalidTransition {
                step: "configuration",
                event: other.name(),
            });
        }
    }

    let report = validate_config(&updated);
    if !report.is_valid() {
        return Err(WizardError::Invalid {
            errors: report.errors,
        });
    }

    Ok(WizardState::Configuration {
        header: header.clone(),
        capabilities: updated,
    })
}

fn require_category(used: bool, category: &str, kind: ServerKind) -> Result<(), WizardError> {
    if used {
        Ok(())
    } else {
        Err(WizardError::invalid(format!(
            "{category} are not used by {} servers",
            kind.as_str()
        )))
    }
}

fn remove_at<T>(items: &mut Vec<T>, index: usize, category: &'static str) -> Result<(), WizardError> {
    if index >= items.len() {
        return Err(WizardError::IndexOutOfRange { category, index });
    }
    items.remove(index);
    Ok(())
}
