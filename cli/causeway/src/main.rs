//! Causeway CLI — command-line driver for the cross-runtime proxy generator.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "causeway", version, about = "Cross-runtime proxy generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate proxy units from bridge declarations
    Generate {
        /// Input declaration files (.bridge.toml)
        declarations: Vec<String>,
        /// Output directory for generated units
        #[arg(long, default_value = "generated")]
        out: PathBuf,
        /// Drop opaque guest-ABI signature tokens from generated members
        #[arg(long)]
        skip_signatures: bool,
    },
    /// Show the classification and conversion plan for a declaration
    Inspect {
        /// Input declaration file (.bridge.toml)
        declaration: String,
        /// Only show the type with this qualified name
        #[arg(long = "type")]
        type_name: Option<String>,
        /// Output format (default: text, "json" for JSON)
        #[arg(long)]
        export: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            declarations,
            out,
            skip_signatures,
        } => {
            if declarations.is_empty() {
                anyhow::bail!("no declaration files given");
            }
            commands::generate::run(&declarations, &out, skip_signatures)
        }

        Commands::Inspect {
            declaration,
            type_name,
            export,
        } => commands::inspect::run(&declaration, type_name.as_deref(), export.as_deref()),
    }
}
