use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vlog_core::{Config, Level, Result};

#[derive(Parser)]
#[command(name = "vlog")]
#[command(about = "Leveled logging from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity threshold (none, error, warning, test, info)
    #[arg(long, global = true)]
    level: Option<Level>,

    /// Append output to this file instead of the console
    #[arg(long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print informational messages
    Info { messages: Vec<String> },

    /// Print warnings
    Warn { messages: Vec<String> },

    /// Print errors
    Error { messages: Vec<String> },

    /// Print debug messages (only at level "test")
    Test { messages: Vec<String> },

    /// Show the effective verbosity level
    Level,
}

fn main() -> Result<()> {
    // Initialize diagnostics
    vlog_core::logging::init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply(vlog_core::global::logger())?;

    // Command-line flags override the config file
    if let Some(level) = cli.level {
        vlog_core::set_level(level);
    }
    if let Some(ref output) = cli.output {
        vlog_core::global::logger().set_file_sink(output)?;
    }

    match cli.command {
        Commands::Info { messages } => {
            for message in &messages {
                vlog_core::info(message);
            }
        }
        Commands::Warn { messages } => {
            for message in &messages {
                vlog_core::warn(message);
            }
        }
        Commands::Error { messages } => {
            for message in &messages {
                vlog_core::error(message);
            }
        }
        Commands::Test { messages } => {
            for message in &messages {
                vlog_core::test(message);
            }
        }
        Commands::Level => cmd_level(),
    }

    Ok(())
}

fn cmd_level() {
    let level = vlog_core::level();
    if vlog_core::is_level_set() {
        println!("{}", level);
    } else {
        println!("{} (default)", level);
    }
    tracing::debug!("Effective level: {:?}", level);
}
