//! catfact command-line entry point.
//!
//! ```text
//! catfact [--config PATH] [--upstream-url URL] [print]
//! catfact [--config PATH] [--upstream-url URL] serve [--bind ADDR]
//! ```
//!
//! `print` fetches one fact, writes it to stdout and exits; any failure ends
//! the process with status 1. `serve` exposes `GET /catfact` until SIGINT or
//! SIGTERM. Startup errors are printed as `catfact: <message>` and also end
//! the process with status 1.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use catfact::config::validation::{validate_bind_address, validate_config};
use catfact::config::{load_config, CatFactConfig, ConfigError};
use catfact::console;
use catfact::lifecycle::{startup, Shutdown};
use catfact::observability::init_logging;

#[derive(Parser)]
#[command(name = "catfact")]
#[command(about = "Fetch a random cat fact", version, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the upstream fact endpoint
    #[arg(long, global = true)]
    upstream_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one fact to stdout and exit
    Print,
    /// Serve GET /catfact over HTTP
    Serve {
        /// Override the listener bind address
        #[arg(short, long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("catfact: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let command = cli.command.unwrap_or(Commands::Print);

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => CatFactConfig::default(),
    };
    if let Some(url) = cli.upstream_url {
        config.upstream.url = url;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    if let Commands::Serve { bind } = &command {
        if let Some(bind) = bind {
            config.listener.bind_address = bind.clone();
        }
        validate_bind_address(&config.listener.bind_address)?;
    }

    init_logging(&config.observability)?;
    let service = startup::build_service(&config)?;

    match command {
        Commands::Print => {
            let mut stdout = std::io::stdout();
            if let Err(e) = console::print_fact(service.as_ref(), &mut stdout).await {
                console::exit_with(&e);
            }
        }
        Commands::Serve { .. } => {
            tracing::info!("catfact v{} starting", env!("CARGO_PKG_VERSION"));
            let shutdown = Shutdown::new();
            startup::spawn_signal_handler(shutdown.clone());
            startup::serve(&config, service, &shutdown).await?;
            tracing::info!("Shutdown complete");
        }
    }

    Ok(())
}
