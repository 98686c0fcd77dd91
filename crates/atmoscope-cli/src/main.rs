//! atmoscope: inspector front end for the Atmo language server

use std::path::PathBuf;

use atmoscope_cli::commands;
use atmoscope_cli::Stage;
use atmoscope_core::config::Config;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "atmoscope")]
#[command(author, version, about = "Inspector front end for the Atmo language server", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the configuration file
    #[arg(long, global = true, default_value = "atmoscope.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one compiler-pipeline artifact tree and print it
    Inspect {
        /// Source file to inspect (packages need no file)
        file: Option<PathBuf>,

        /// Pipeline stage to show
        #[arg(long, value_enum, default_value_t = Stage::Sem)]
        stage: Stage,
    },

    /// Evaluate an expression via the server
    Eval {
        /// Expression to evaluate; read from stdin when omitted
        expr: Option<String>,

        /// Evaluate in the context of this source file
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Line REPL backed by the notebook shell
    Repl {
        /// Notebook file to load from and save to
        #[arg(long)]
        notebook: Option<PathBuf>,

        /// Seed the session with an expression
        #[arg(long)]
        seed: Option<String>,
    },

    /// Build the package containing a file
    Build {
        /// A file inside the package to build
        file: PathBuf,
    },
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Inspect { file, stage } => {
            commands::inspect::run(config, file, stage).await?;
        }
        Commands::Eval { expr, file } => {
            commands::eval::run(config, expr, file).await?;
        }
        Commands::Repl { notebook, seed } => {
            commands::repl::run(notebook, seed)?;
        }
        Commands::Build { file } => {
            commands::build::run(config, file).await?;
        }
    }

    Ok(())
}
