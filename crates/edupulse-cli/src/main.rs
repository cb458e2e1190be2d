//! edupulse CLI, the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "edupulse", version, about = "Student performance analytics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a roster, score it, and print the class analysis
    Analyze {
        /// CSV roster: Name,Marks,Attendance,StudyHours
        #[arg(long)]
        input: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Skip the AI insight request
        #[arg(long)]
        no_insight: bool,

        /// Model to request insights from (overrides config)
        #[arg(long)]
        model: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a roster without analyzing it
    Validate {
        /// CSV roster to check
        #[arg(long)]
        input: PathBuf,
    },

    /// List available models
    ListModels {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and sample roster
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("edupulse=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            input,
            format,
            no_insight,
            model,
            config,
        } => commands::analyze::execute(input, format, no_insight, model, config).await,
        Commands::Validate { input } => commands::validate::execute(input),
        Commands::ListModels { config } => commands::list_models::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
