use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sql_decompose::sanitizer::sanitize_deploy_script;
use sql_decompose::{decompose_script, DecomposeOptions, EngineConfig, SanitizeConfig};

#[derive(Parser)]
#[command(name = "sql-decompose")]
#[command(author, version, about = "Splits SQL Server schema scripts into per-object files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a full schema script into per-object files
    Decompose {
        /// Path to the schema script (e.g. an unpacked model.sql)
        #[arg(short, long)]
        script: PathBuf,

        /// Root directory for the per-object tree
        #[arg(short, long)]
        output: PathBuf,

        /// Emit kind-only attachment headers (no object names)
        #[arg(long)]
        terse_attachment_headers: bool,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },
    /// Strip environment boilerplate from a generated deployment script
    Sanitize {
        /// Path to the generated deployment script
        #[arg(short, long)]
        script: PathBuf,

        /// Write the cleaned script here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also strip constraint-validation boilerplate
        #[arg(long)]
        strip_constraint_validation: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Decompose {
            script,
            output,
            terse_attachment_headers,
            verbose,
        } => {
            let options = DecomposeOptions {
                script_path: script,
                output_root: output,
                engine: EngineConfig {
                    named_attachment_headers: !terse_attachment_headers,
                },
                verbose,
            };

            decompose_script(&options)?;
        }
        Commands::Sanitize {
            script,
            output,
            strip_constraint_validation,
        } => {
            let raw = sql_decompose::engine::read_script(&script)?;
            let config = SanitizeConfig {
                strip_constraint_validation,
            };
            let cleaned = sanitize_deploy_script(&raw, &config);

            match output {
                Some(path) => std::fs::write(&path, &cleaned)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => print!("{}", cleaned),
            }
        }
    }

    Ok(())
}
