//! mcp-forge CLI entrypoint
//! Parses command-line arguments and dispatches to the web UI or the generator.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use mcp_forge::{
    application::{GenerateServerRequest, GenerateServerUseCase, OutputService},
    config::AppConfig,
    generation::{GeneratorBackend, ServerKind, examples::example_config, validate},
    infrastructure::{
        FileSystemOutputService, ZipFileOutputService,
        net::{PORT_SCAN_ATTEMPTS, find_available_port, is_port_available},
        select_generator,
    },
    web,
};
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};
use std::sync::Arc;

// External imports (alphabetized)
use anyhow::{Context, bail};
use clap::Parser;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mcp-forge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./mcp-forge.toml when present)
    #[arg(long, global = true, env = "MCP_FORGE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Start the web wizard
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to bind
        #[arg(long)]
        port: Option<u16>,
        /// Try the next ports when the requested one is taken
        #[arg(long)]
        auto_port: bool,
    },
    /// Generate a server from a JSON or YAML spec file
    Generate {
        /// Spec file in the web API request format
        #[arg(long)]
        spec: PathBuf,
        /// Directory that receives the generated server
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
        /// Write `{name}.zip` instead of a directory
        #[arg(long)]
        zip: bool,
        /// Generator backend: template or external
        #[arg(long)]
        backend: Option<String>,
    },
    /// Validate a spec file without generating anything
    Validate {
        #[arg(long)]
        spec: PathBuf,
    },
    /// Print the example configuration for a server type
    Example {
        /// tool, resource or full
        server_type: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with default level INFO; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve {
            host,
            port,
            auto_port,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.server.auto_port |= auto_port;
            run_serve(config).await?
        }
        Commands::Generate {
            spec,
            output_dir,
            zip,
            backend,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(backend) = backend {
                config.generator.backend = backend
                    .parse::<GeneratorBackend>()
                    .with_context(|| format!("Invalid backend '{backend}'"))?;
            }
            run_generate(&config, &spec, output_dir, zip).await?
        }
        Commands::Validate { spec } => run_validate(&spec)?,
        Commands::Example { server_type } => {
            let kind = server_type
                .parse::<ServerKind>()
                .with_context(|| format!("Unknown server type '{server_type}'"))?;
            println!("{}", serde_json::to_string_pretty(&example_config(kind))?);
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    AppConfig::load(path).context("Failed to load configuration")
}

/// Read a spec file; `.yaml`/`.yml` are parsed as YAML, anything else as JSON
fn load_request(path: &Path) -> anyhow::Result<GenerateServerRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read spec file {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    );
    let request: GenerateServerRequest = if is_yaml {
        serde_yaml::from_str(&content).context("Failed to parse YAML spec")?
    } else {
        serde_json::from_str(&content).context("Failed to parse JSON spec")?
    };
    Ok(request)
}

async fn run_serve(config: AppConfig) -> anyhow::Result<()> {
    let host = config.server.host.clone();
    let requested = config.server.port;

    let port = if is_port_available(&host, requested) {
        requested
    } else if config.server.auto_port {
        let port = find_available_port(&host, requested).with_context(|| {
            format!(
                "No available port in {requested}..{}",
                requested.saturating_add(PORT_SCAN_ATTEMPTS)
            )
        })?;
        warn!(requested, port, "Port in use, using the next available one");
        port
    } else {
        bail!(
            "Port {requested} is already in use.\n\
             Options:\n  \
             1. Stop the process using port {requested}\n  \
             2. Pass a different port with --port <PORT>\n  \
             3. Pass --auto-port to use the next available port"
        );
    };

    let addr: SocketAddr = (host.as_str(), port)
        .to_socket_addrs()
        .with_context(|| format!("Invalid host '{host}'"))?
        .next()
        .with_context(|| format!("Host '{host}' did not resolve to an address"))?;

    info!("Starting mcp-forge web UI");
    web::serve(addr, &config).await
}

async fn run_generate(
    config: &AppConfig,
    spec_path: &Path,
    output_dir: PathBuf,
    zip: bool,
) -> anyhow::Result<()> {
    let request = load_request(spec_path)?;

    let generator = select_generator(
        config.generator.backend,
        Arc::new(config.runtime()),
        config.anthropic_settings(),
    )
    .context("Failed to initialize generator")?;

    let output: Arc<dyn OutputService> = if zip {
        Arc::new(ZipFileOutputService::new(output_dir))
    } else {
        Arc::new(FileSystemOutputService::new(output_dir))
    };

    let response = GenerateServerUseCase::new(generator, output)
        .execute(request)
        .await
        .context("Failed to generate server")?;

    println!("{}", response.message);
    for file in &response.files {
        println!("  {file}");
    }
    for warning in &response.warnings {
        println!("warning: {warning}");
    }
    if let Some(path) = &response.output_path {
        println!("Output: {}", path.display());
    }
    Ok(())
}

fn run_validate(spec_path: &Path) -> anyhow::Result<()> {
    let spec = load_request(spec_path)?
        .into_spec()
        .context("Invalid spec file")?;

    let report = validate(&spec);
    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    for error in &report.errors {
        println!("error: {error}");
    }

    if !report.is_valid() {
        bail!("Validation failed with {} error(s)", report.errors.len());
    }
    println!("Spec '{}' is valid", spec.name);
    Ok(())
}
