//! Python MCP SDK runtime description

use crate::generation::ProtocolRuntime;

/// The official `mcp` Python package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonMcpRuntime {
    package: String,
    min_version: String,
    launcher: String,
}

impl PythonMcpRuntime {
    pub const DEFAULT_PACKAGE: &'static str = "mcp";
    pub const DEFAULT_MIN_VERSION: &'static str = "1.0.0";
    pub const DEFAULT_LAUNCHER: &'static str = "python";

    pub fn new(
        package: impl Into<String>,
        min_version: impl Into<String>,
        launcher: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            min_version: min_version.into(),
            launcher: launcher.into(),
        }
    }
}

impl Default for PythonMcpRuntime {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_PACKAGE,
            Self::DEFAULT_MIN_VERSION,
            Self::DEFAULT_LAUNCHER,
        )
    }
}

impl ProtocolRuntime for PythonMcpRuntime {
    fn package(&self) -> &str {
        &self.package
    }

    fn min_version(&self) -> &str {
        &self.min_version
    }

    fn server_module(&self) -> &str {
        "mcp.server"
    }

    fn stdio_module(&self) -> &str {
        "mcp.server.stdio"
    }

    fn types_module(&self) -> &str {
        "mcp.types"
    }

    fn launcher(&self) -> &str {
        &self.launcher
    }
}
