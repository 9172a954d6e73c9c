mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mui-engine", version, about = "Validate, preview and fetch UI engine manifests")]
struct Args {
    /// Engine config file (defaults to ~/.mui-engine/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the backend base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Bearer token for the backend
    #[arg(long, global = true)]
    token: Option<String>,

    /// Tenant id sent as X-Tenant-Id
    #[arg(long, global = true)]
    tenant: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report structural issues in a manifest file
    Validate { file: PathBuf },

    /// Print the visibility-filtered snapshot of a manifest file
    Snapshot { file: PathBuf },

    /// Print the render plan for one screen of a manifest file
    Plan {
        file: PathBuf,

        /// Screen key or route
        #[arg(long)]
        screen: String,

        #[arg(long, default_value = "default")]
        framework: String,
    },

    /// Load a manifest from the backend and print its snapshot
    Fetch {
        /// Load the manifest of this user instead of the current identity
        #[arg(long)]
        user: Option<String>,

        /// Schema version the backend must support (defaults to the configured one)
        #[arg(long)]
        contract: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Validate { file } => {
            let clean = commands::validate(&file)?;
            if !clean {
                std::process::exit(1);
            }
        }
        Command::Snapshot { file } => commands::snapshot(&file)?,
        Command::Plan {
            file,
            screen,
            framework,
        } => commands::plan(&file, &screen, &framework)?,
        Command::Fetch { user, contract } => {
            let mut config = mui_engine::EngineConfig::load(args.config.as_deref())?;
            if let Some(url) = args.base_url {
                config.base_api_url = Some(url);
            }
            if let Some(token) = args.token {
                config.access_token = Some(token);
            }
            if let Some(tenant) = args.tenant {
                config.tenant_id = Some(tenant);
            }
            commands::fetch(&config, user.as_deref(), contract.as_deref()).await?
        }
    }

    Ok(())
}
