use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;

use beamlit_cli::api::ApiClient;
use beamlit_cli::commands::{apply, delete, get};
use beamlit_cli::config::Context;
use beamlit_cli::render::OutputFormat;
use beamlit_cli::resource::Registry;

/// Beamlit CLI
#[derive(Parser, Debug)]
#[command(name = "bl", version, about = "Beamlit CLI - interact with Beamlit APIs", long_about = None)]
struct Cli {
    /// Workspace to operate in
    #[arg(short = 'w', long, global = true)]
    workspace: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, global = true, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    /// Environment, e.g. development or production
    #[arg(short = 'e', long = "env", global = true)]
    environment: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, global = true, default_value = "off")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a resource by name, or list a resource kind
    Get {
        /// Resource kind or alias, e.g. models, policy, env
        resource: String,
        /// Resource name; omit to list the kind
        name: Option<String>,
    },
    /// Apply a configuration to resources by file
    Apply {
        /// Path to YAML file to apply ("-" reads stdin)
        #[arg(short = 'f', long = "filename")]
        filename: String,
        /// Process the directory used in -f recursively
        #[arg(short = 'R', long)]
        recursive: bool,
    },
    /// Delete resources by file, or one resource by kind and name
    Delete {
        /// Path to YAML file naming the resources to delete
        #[arg(short = 'f', long = "file")]
        file: Option<String>,
        /// Resource kind or alias
        resource: Option<String>,
        /// Resource name
        name: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(err) => {
            eprintln!("warning: cannot open log file {}: {err}", log_path.display());
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .init();

    tracing::info!("bl started with log level: {:?}", level);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("beamlit").join("bl.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".beamlit").join("bl.log");
    }
    PathBuf::from("bl.log")
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _log_guard = setup_logging(cli.log_level);

    if let Err(err) = run(cli).await {
        // HTTP failures are printed through the error handler where they are
        // classified; printing them here again would duplicate the message.
        let reported = err
            .downcast_ref::<beamlit_cli::error::Error>()
            .is_some_and(beamlit_cli::error::Error::already_reported);
        if !reported {
            eprintln!("{err:#}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let ctx = Context::resolve(cli.workspace, cli.environment, cli.output);
    let client = ApiClient::new(&ctx.base_url, ctx.workspace.as_deref(), ctx.api_key.as_deref())?;
    let registry = Registry::new(&client);

    match cli.command {
        Commands::Get { resource, name } => {
            get::run(&registry, &ctx, &resource, name.as_deref()).await?;
        }
        Commands::Apply { filename, recursive } => {
            let outcomes = apply::run(&registry, &filename, recursive).await?;
            if !apply::all_succeeded(&outcomes) {
                bail!("one or more resources failed to apply");
            }
        }
        Commands::Delete { file, resource, name } => match (file, resource, name) {
            (Some(path), _, _) => {
                let outcomes = delete::run_file(&registry, &path).await?;
                if !apply::all_succeeded(&outcomes) {
                    bail!("one or more resources failed to delete");
                }
            }
            (None, Some(kind), Some(name)) => {
                let outcome = delete::run_named(&registry, &kind, &name).await?;
                if outcome.failed() {
                    bail!("Resource {}:{} failed to delete", outcome.kind, outcome.name);
                }
            }
            _ => bail!("delete requires -f <file> or a resource kind and name"),
        },
    }

    Ok(())
}
