//! End-to-end generation through the public library API

use mcp_forge::application::{
    GenerateServerRequest, GenerateServerUseCase, OutputService,
};
use mcp_forge::generation::{
    CodeGenerator, GenerationError, ProtocolRuntime, ResourceDescriptor, ServerKind, ServerSpec,
    ToolDescriptor,
};
use mcp_forge::infrastructure::{
    FileSystemOutputService, PythonMcpRuntime, TemplateCodeGenerator, ZipPackager,
};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

fn calculator_spec() -> ServerSpec {
    serde_json::from_str::<GenerateServerRequest>(&fixture("calculator.json"))
        .unwrap()
        .into_spec()
        .unwrap()
}

fn library_spec() -> ServerSpec {
    serde_yaml::from_str::<GenerateServerRequest>(&fixture("library.yaml"))
        .unwrap()
        .into_spec()
        .unwrap()
}

fn generator() -> TemplateCodeGenerator {
    TemplateCodeGenerator::new(Arc::new(PythonMcpRuntime::default())).unwrap()
}

/// A runtime that targets a different protocol package
struct PinnedRuntime;

impl ProtocolRuntime for PinnedRuntime {
    fn package(&self) -> &str {
        "mcp-lite"
    }
    fn min_version(&self) -> &str {
        "0.9.1"
    }
    fn server_module(&self) -> &str {
        "mcp_lite.server"
    }
    fn stdio_module(&self) -> &str {
        "mcp_lite.server.stdio"
    }
    fn types_module(&self) -> &str {
        "mcp_lite.types"
    }
    fn launcher(&self) -> &str {
        "python3"
    }
}

#[test]
fn test_calculator_yields_three_files() {
    let artifact = generator().render(&calculator_spec()).unwrap();

    assert_eq!(
        artifact.filenames(),
        vec!["server.py", "requirements.txt", "README.md"]
    );
    let server = artifact.get("server.py").unwrap();
    assert!(server.contains("async def add(*, a: float, b: float) -> Any:"));
    assert!(server.contains("\"a\": {"));
    assert!(server.contains("\"b\": {"));
}

#[test]
fn test_tools_keep_input_order() {
    let server = generator()
        .render(&calculator_spec())
        .unwrap()
        .get("server.py")
        .unwrap()
        .to_string();

    let add = server.find("name=\"add\"").unwrap();
    let multiply = server.find("name=\"multiply\"").unwrap();
    assert!(add < multiply);

    let add_handler = server.find("async def add(").unwrap();
    let multiply_handler = server.find("async def multiply(").unwrap();
    assert!(add_handler < multiply_handler);
}

#[test]
fn test_generation_is_deterministic() {
    let spec = library_spec();
    let first = generator().render(&spec).unwrap();
    let second = generator().render(&spec).unwrap();
    assert_eq!(first, second);

    let packager = ZipPackager::new();
    assert_eq!(
        packager.package(&spec.name, &first).unwrap(),
        packager.package(&spec.name, &second).unwrap()
    );
}

#[test]
fn test_yaml_full_server() {
    let artifact = generator().render(&library_spec()).unwrap();
    let server = artifact.get("server.py").unwrap();

    assert!(server.contains(
        "async def search_books(*, query: str, limit: Optional[int] = None) -> Any:"
    ));
    assert!(server.contains("    \"books://catalogue\": (resource_catalogue, True),"));
    assert!(server.contains("    \"books://readme\": (resource_readme, False),"));
    assert!(server.contains("@server.list_prompts()"));
    assert!(server.contains("    \"summarize\": \"Summarize a book\","));

    let readme = artifact.get("README.md").unwrap();
    assert!(readme.contains("## Prompts"));
    assert!(readme.contains("- `summarize`: Summarize a book"));
}

#[test]
fn test_missing_tool_name_blocks_render() {
    let spec = calculator_spec().with_tool(ToolDescriptor::new("  ", "No name"));

    match generator().render(&spec) {
        Err(GenerationError::InvalidSpec { errors }) => {
            assert_eq!(errors, vec!["Tool 3: Missing 'name' field"]);
        }
        other => panic!("Expected InvalidSpec, got {other:?}"),
    }
}

#[test]
fn test_full_server_requires_resources() {
    let spec = ServerSpec {
        kind: ServerKind::Full,
        ..calculator_spec()
    };

    let err = generator().render(&spec).unwrap_err();
    assert_eq!(
        err.validation_errors().unwrap(),
        ["Full servers require at least one tool and one resource"]
    );
}

#[test]
fn test_full_server_without_prompts_has_no_prompt_section() {
    let spec = ServerSpec {
        kind: ServerKind::Full,
        ..calculator_spec().with_resource(ResourceDescriptor::new("calc://history", "History", ""))
    };

    let artifact = generator().render(&spec).unwrap();
    assert!(!artifact.get("server.py").unwrap().to_lowercase().contains("prompt"));
    assert!(!artifact.get("README.md").unwrap().contains("## Prompts"));
}

#[test]
fn test_runtime_is_injectable() {
    let generator = TemplateCodeGenerator::new(Arc::new(PinnedRuntime)).unwrap();
    let artifact = generator.render(&calculator_spec()).unwrap();

    assert_eq!(artifact.get("requirements.txt"), Some("mcp-lite>=0.9.1\n"));
    let server = artifact.get("server.py").unwrap();
    assert!(server.contains("from mcp_lite.server import Server"));
    assert!(server.contains("from mcp_lite.server.stdio import stdio_server"));
    assert!(artifact.get("README.md").unwrap().contains("\"command\": \"python3\""));
}

#[tokio::test]
async fn test_use_case_writes_directory() {
    let temp_dir = TempDir::new().unwrap();
    let generator: Arc<dyn CodeGenerator> = Arc::new(generator());
    let output: Arc<dyn OutputService> =
        Arc::new(FileSystemOutputService::new(temp_dir.path()));

    let request: GenerateServerRequest =
        serde_json::from_str(&fixture("calculator.json")).unwrap();
    let response = GenerateServerUseCase::new(generator, output)
        .execute(request)
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(
        response.message,
        "Server 'calculator-server' generated successfully!"
    );

    let server_dir = temp_dir.path().join("calculator-server");
    assert_eq!(response.output_path.as_deref(), Some(server_dir.as_path()));
    for file in ["server.py", "requirements.txt", "README.md"] {
        assert!(server_dir.join(file).is_file(), "{file} missing");
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(server_dir.join("server.py"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
