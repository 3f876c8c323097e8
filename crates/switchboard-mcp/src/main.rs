//! Switchboard MCP server entry point.

use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::Instrument;

use switchboard_mcp::config::ServerConfig;
use switchboard_mcp::protocol::{CapabilitySet, Router};
use switchboard_mcp::session::Peer;
use switchboard_mcp::transport::StdioTransport;
use switchboard_mcp::types::MCP_VERSION;
use switchboard_mcp::{build_registries, ProtocolHandler};

#[derive(Parser)]
#[command(
    name = "switchboard-mcp",
    about = "MCP server that routes tools, prompts, resources, and roots to a single client",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Workspace root, as a path or URI. Repeatable.
    /// Falls back to SWITCHBOARD_ROOTS, then the current directory.
    #[arg(long = "root", global = true)]
    roots: Vec<String>,

    /// Server name reported during initialization.
    #[arg(long, global = true)]
    name: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server over stdio (default).
    Serve,

    /// Print server capabilities and registry contents as JSON.
    Info,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   switchboard-mcp completions bash > ~/.local/share/bash-completion/completions/switchboard-mcp
    ///   switchboard-mcp completions zsh > ~/.zfunc/_switchboard-mcp
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let config = ServerConfig::resolve(cli.name, &cli.roots)?;
            let registries = Arc::new(build_registries(&config)?);

            let (peer, outbound) = Peer::channel();
            let handler = ProtocolHandler::new(registries, peer)
                .with_server_info(&config.name, &config.version)
                .with_instructions(config.instructions.clone());
            handler.connect()?;

            let session_id = uuid::Uuid::new_v4();
            let span = tracing::info_span!("session", id = %session_id);
            async {
                tracing::info!("{} v{} serving over stdio", config.name, config.version);
                StdioTransport::new(Arc::new(handler), outbound).run().await
            }
            .instrument(span)
            .await?;
        }

        Commands::Info => {
            let config = ServerConfig::resolve(cli.name, &cli.roots)?;
            let registries = build_registries(&config)?;
            let caps = CapabilitySet::from_registries(&registries);
            let router = Router::bind(&caps);

            let info = serde_json::json!({
                "server": { "name": config.name, "version": config.version },
                "protocol_version": MCP_VERSION,
                "capabilities": caps.to_server_capabilities(),
                "methods": router.routes().iter().map(|r| r.method()).collect::<Vec<_>>(),
                "tools": registries.tools.list().into_iter().map(|t| t.name).collect::<Vec<_>>(),
                "prompts": registries.prompts.list().into_iter().map(|p| p.name).collect::<Vec<_>>(),
                "resources": registries.resources.list_resources(),
                "resource_templates": registries.resources.list_templates(),
                "roots": registries.roots.list(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "switchboard-mcp", &mut std::io::stdout());
        }
    }

    Ok(())
}
