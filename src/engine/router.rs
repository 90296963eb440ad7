//! Batch routing.
//!
//! Tables, procedures, views, and functions get their own file under
//! `<root>/<schema>/<folder>/<name>.sql`. Triggers, indexes, and constraint
//! alterations attach to their table's file, deferring when the table has
//! not been created yet. Everything else lands in `Misc/`.

use std::path::{Path, PathBuf};

use crate::error::DecomposeError;

use super::classifier::ObjectKind;
use super::identifier::ObjectName;
use super::registry::{PendingAttachments, TableRegistry};
use super::sink::ScriptSink;
use super::splitter::Batch;
use super::EngineConfig;

const TABLES_FOLDER: &str = "Tables";
const PROCEDURES_FOLDER: &str = "Stored Procedures";
const VIEWS_FOLDER: &str = "Views";
const FUNCTIONS_FOLDER: &str = "Functions";
const MISC_FOLDER: &str = "Misc";

const CONSTRAINT_HEADER: &str = "-- Alter Table Constraint";

/// Routes classified batches to output files for one run.
pub struct Router<'a> {
    root: &'a Path,
    config: &'a EngineConfig,
    tables: TableRegistry,
    pending: PendingAttachments,
}

impl<'a> Router<'a> {
    pub fn new(root: &'a Path, config: &'a EngineConfig) -> Self {
        Self {
            root,
            config,
            tables: TableRegistry::new(),
            pending: PendingAttachments::new(),
        }
    }

    pub fn route(
        &mut self,
        batch: &Batch,
        kind: ObjectKind,
        sink: &mut dyn ScriptSink,
    ) -> Result<(), DecomposeError> {
        match kind {
            ObjectKind::Table { table } => self.route_table(&table, &batch.sql, sink),
            ObjectKind::Procedure { procedure } => {
                self.write_object(&procedure, PROCEDURES_FOLDER, &batch.sql, sink)
            }
            ObjectKind::View { view } => self.write_object(&view, VIEWS_FOLDER, &batch.sql, sink),
            ObjectKind::Function { function } => {
                self.write_object(&function, FUNCTIONS_FOLDER, &batch.sql, sink)
            }
            ObjectKind::Trigger { trigger, table } => {
                let header = self.attachment_header("Trigger", &trigger.name);
                self.attach(&table, &header, &batch.sql, sink)
            }
            ObjectKind::Index { index, table } => {
                let header = self.attachment_header("Index", &index);
                self.attach(&table, &header, &batch.sql, sink)
            }
            ObjectKind::AlterConstraint { table } => {
                self.attach(&table, CONSTRAINT_HEADER, &batch.sql, sink)
            }
            ObjectKind::Unknown => {
                let path = self
                    .root
                    .join(MISC_FOLDER)
                    .join(format!("Batch_{}.sql", batch.position));
                sink.write(&path, &batch.sql)
            }
        }
    }

    /// Writes the Misc fallback for attachments whose table never appeared.
    /// Call once, after the last batch; returns the orphaned table count.
    pub fn finish(self, sink: &mut dyn ScriptSink) -> Result<usize, DecomposeError> {
        let orphans = self.pending.drain();
        let count = orphans.len();
        for (table, fragments) in orphans {
            let path = self.root.join(MISC_FOLDER).join(format!(
                "MissingTable_{}_{}.sql",
                table.schema, table.name
            ));
            sink.write(&path, &fragments.join("\n\n"))?;
        }
        Ok(count)
    }

    fn route_table(
        &mut self,
        table: &ObjectName,
        sql: &str,
        sink: &mut dyn ScriptSink,
    ) -> Result<(), DecomposeError> {
        let path = self.object_path(table, TABLES_FOLDER);
        sink.write(&path, &format!("{}\n", sql))?;
        self.tables.record(table, path.clone());

        // Attachments that arrived before the table flush now, in order.
        if let Some(fragments) = self.pending.take(table) {
            for fragment in fragments {
                sink.append(&path, &format!("\n\n{}", fragment))?;
            }
        }
        Ok(())
    }

    fn write_object(
        &self,
        name: &ObjectName,
        folder: &str,
        sql: &str,
        sink: &mut dyn ScriptSink,
    ) -> Result<(), DecomposeError> {
        sink.write(&self.object_path(name, folder), sql)
    }

    fn attach(
        &mut self,
        table: &ObjectName,
        header: &str,
        sql: &str,
        sink: &mut dyn ScriptSink,
    ) -> Result<(), DecomposeError> {
        let fragment = format!("{}\n{}", header, sql);
        match self.tables.get(table) {
            Some(path) => {
                let path = path.to_path_buf();
                sink.append(&path, &format!("\nGO\n{}", fragment))
            }
            None => {
                self.pending.defer(table, fragment);
                Ok(())
            }
        }
    }

    fn attachment_header(&self, kind: &str, name: &str) -> String {
        if self.config.named_attachment_headers {
            format!("-- {}: {}", kind, name)
        } else {
            format!("-- {}", kind)
        }
    }

    fn object_path(&self, name: &ObjectName, folder: &str) -> PathBuf {
        self.root
            .join(&name.schema)
            .join(folder)
            .join(format!("{}.sql", name.name))
    }
}
