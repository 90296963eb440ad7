//! sql-decompose: splits generated SQL Server schema scripts into
//! per-object files and cleans generated deployment scripts.
//!
//! The decomposer turns one monolithic script (the `model.sql` from an
//! unpacked schema snapshot) into a `schema/object-type/name.sql` tree fit
//! for version control; the sanitizer strips environment boilerplate from
//! generated deployment scripts so they can be replayed inside a migration
//! framework.

pub mod engine;
pub mod error;
pub mod sanitizer;

use std::path::PathBuf;

use anyhow::Result;

pub use engine::{DecomposeSummary, EngineConfig};
pub use error::DecomposeError;
pub use sanitizer::SanitizeConfig;

/// Options for decomposing a script file
#[derive(Debug, Clone)]
pub struct DecomposeOptions {
    /// Path to the full schema script
    pub script_path: PathBuf,
    /// Root directory for the per-object file tree
    pub output_root: PathBuf,
    /// Engine knobs (attachment header format)
    pub engine: EngineConfig,
    /// Enable verbose output
    pub verbose: bool,
}

/// Decompose a schema script file into a per-object file tree
pub fn decompose_script(options: &DecomposeOptions) -> Result<DecomposeSummary> {
    if options.verbose {
        println!("Decomposing script: {}", options.script_path.display());
    }

    // Read before any output: a missing or unreadable script aborts the
    // run with the output root untouched.
    let script = engine::read_script(&options.script_path)?;

    let mut sink = engine::FsSink;
    let summary = engine::decompose(&script, &options.output_root, &options.engine, &mut sink)?;

    if options.verbose {
        println!(
            "Wrote {} tables, {} procedures, {} views, {} functions under {}",
            summary.tables,
            summary.procedures,
            summary.views,
            summary.functions,
            options.output_root.display()
        );
        if summary.unclassified > 0 {
            println!("{} unclassified batches routed to Misc", summary.unclassified);
        }
        if summary.orphaned_tables > 0 {
            println!(
                "{} tables referenced by attachments were never created",
                summary.orphaned_tables
            );
        }
    }

    Ok(summary)
}
