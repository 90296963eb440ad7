//! Script decomposition engine.
//!
//! One pass over the script, in batch order: split on `GO`, classify each
//! batch by the fixed-priority cascade, route it to a file. Attachments for
//! tables not yet seen wait in a deferred queue and flush when the table
//! file is created; whatever is still pending at the end drains into
//! `Misc/MissingTable_*` fallbacks.

mod classifier;
mod identifier;
mod registry;
mod router;
mod script_io;
mod sink;
mod splitter;

pub use classifier::{classify, ObjectKind};
pub use identifier::{strip_delimiters, ObjectName, DEFAULT_SCHEMA};
pub use registry::{PendingAttachments, TableRegistry};
pub use router::Router;
pub use script_io::read_script;
pub use sink::{FsSink, MemorySink, ScriptSink};
pub use splitter::{split_batches, Batch};

use std::path::Path;

use crate::error::DecomposeError;

/// Knobs for a decomposition run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Attachment headers carry the object name (`-- Trigger: trg_audit`)
    /// rather than only the kind (`-- Trigger`).
    pub named_attachment_headers: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            named_attachment_headers: true,
        }
    }
}

/// Per-kind batch counts for one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DecomposeSummary {
    pub tables: usize,
    pub procedures: usize,
    pub views: usize,
    pub functions: usize,
    /// Trigger, index, and constraint batches, whether attached directly
    /// or deferred.
    pub attachments: usize,
    /// Batches routed to `Misc/Batch_<n>.sql`.
    pub unclassified: usize,
    /// Tables referenced by attachments but never created in the script.
    pub orphaned_tables: usize,
}

/// Decomposes a full script into per-object files under `root`.
pub fn decompose(
    script: &str,
    root: &Path,
    config: &EngineConfig,
    sink: &mut dyn ScriptSink,
) -> Result<DecomposeSummary, DecomposeError> {
    let mut summary = DecomposeSummary::default();
    let mut router = Router::new(root, config);

    for batch in split_batches(script) {
        let kind = classify(&batch.sql);
        match &kind {
            ObjectKind::Table { .. } => summary.tables += 1,
            ObjectKind::Procedure { .. } => summary.procedures += 1,
            ObjectKind::View { .. } => summary.views += 1,
            ObjectKind::Function { .. } => summary.functions += 1,
            ObjectKind::Trigger { .. }
            | ObjectKind::Index { .. }
            | ObjectKind::AlterConstraint { .. } => summary.attachments += 1,
            ObjectKind::Unknown => summary.unclassified += 1,
        }
        router.route(&batch, kind, sink)?;
    }

    summary.orphaned_tables = router.finish(sink)?;
    Ok(summary)
}
