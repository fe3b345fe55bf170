use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "daylog", version, about = "Daylog CLI")]
struct Cli {
    /// Config file to use instead of ~/.config/daylog/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sleep records, averages, score and streaks
    Sleep {
        #[command(subcommand)]
        action: commands::sleep::SleepAction,
    },
    /// Todo list parsing, completion rate and check-off
    Todo {
        #[command(subcommand)]
        action: commands::todo::TodoAction,
    },
    /// Progress levels
    Level {
        #[command(subcommand)]
        action: commands::level::LevelAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Sleep { action } => commands::sleep::run(action, config),
        Commands::Todo { action } => commands::todo::run(action),
        Commands::Level { action } => commands::level::run(action),
        Commands::Config { action } => commands::config::run(action, config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
