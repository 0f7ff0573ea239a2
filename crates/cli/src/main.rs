//! trprune - delete Tekton TaskRuns with keep-N retention

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli_lib::cmd;
use cli_lib::cmd::delete::DeleteArgs;
use tracing_subscriber::EnvFilter;

/// trprune - Delete TaskRuns by name, by Task/ClusterTask, or across a namespace
#[derive(Parser)]
#[command(name = "trprune")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Delete TaskRuns in a namespace
    #[command(visible_alias = "rm")]
    #[command(after_help = "Delete TaskRuns with names 'foo' and 'bar' in namespace 'quux':\n\n    trprune delete foo bar -n quux\n\nor\n\n    trprune rm foo bar -n quux")]
    Delete(DeleteArgs),
    /// Inspect the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show resolved configuration values
    Show,
    /// Print the config file path
    Path {
        /// Create the file from the example if it does not exist
        #[arg(long)]
        create: bool,
    },
    /// Print an example configuration
    Example,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing on stderr so stdout stays scriptable
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Delete(args) => cmd::delete::run(&args).await,
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Show => cmd::config::run_show().await,
            ConfigCommands::Path { create } => cmd::config::run_path(create).await,
            ConfigCommands::Example => cmd::config::run_example().await,
        },
    }
}
