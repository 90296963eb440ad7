//! Table registry and deferred attachments.
//!
//! Together these resolve forward references: a trigger, index, or
//! constraint alteration may appear in the script before the table it
//! belongs to. Both maps are owned by a single decomposition run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::identifier::ObjectName;

/// Table files created so far, keyed case-insensitively by schema-qualified
/// name. Entries are never removed.
#[derive(Debug, Default)]
pub struct TableRegistry {
    files: HashMap<String, PathBuf>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, table: &ObjectName, path: PathBuf) {
        self.files.insert(table.key(), path);
    }

    pub fn get(&self, table: &ObjectName) -> Option<&Path> {
        self.files.get(&table.key()).map(PathBuf::as_path)
    }
}

/// Attachment fragments waiting for a table file that does not exist yet.
///
/// Fragments are kept in arrival order per table; still-pending tables
/// drain in the order they were first seen.
#[derive(Debug, Default)]
pub struct PendingAttachments {
    fragments: HashMap<String, Vec<String>>,
    /// First-seen key order; carries the original casing used for the
    /// `MissingTable_<schema>_<table>` fallback name.
    order: Vec<ObjectName>,
}

impl PendingAttachments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Queues a fragment for a table with no file yet.
    pub fn defer(&mut self, table: &ObjectName, fragment: String) {
        let key = table.key();
        if !self.fragments.contains_key(&key) {
            self.order.push(table.clone());
        }
        self.fragments.entry(key).or_default().push(fragment);
    }

    /// Removes and returns all fragments queued for `table`, if any.
    pub fn take(&mut self, table: &ObjectName) -> Option<Vec<String>> {
        self.fragments.remove(&table.key())
    }

    /// Drains every still-pending table in first-seen order.
    pub fn drain(mut self) -> Vec<(ObjectName, Vec<String>)> {
        let mut drained = Vec::new();
        for table in std::mem::take(&mut self.order) {
            if let Some(fragments) = self.fragments.remove(&table.key()) {
                drained.push((table, fragments));
            }
        }
        drained
    }
}
