//! File output abstraction.
//!
//! The router only needs two operations: overwrite and append at a path.
//! Keeping them behind a trait lets the routing algorithm run against an
//! in-memory map in tests.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::DecomposeError;

/// Create-or-overwrite / append text at a logical path.
pub trait ScriptSink {
    /// Writes `content` at `path`, replacing any previous content and
    /// creating parent directories as needed.
    fn write(&mut self, path: &Path, content: &str) -> Result<(), DecomposeError>;

    /// Appends `content` to the file at `path`.
    fn append(&mut self, path: &Path, content: &str) -> Result<(), DecomposeError>;
}

/// Sink writing straight to the filesystem.
#[derive(Debug, Default)]
pub struct FsSink;

impl FsSink {
    fn ensure_parent(path: &Path) -> Result<(), DecomposeError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DecomposeError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        Ok(())
    }
}

impl ScriptSink for FsSink {
    fn write(&mut self, path: &Path, content: &str) -> Result<(), DecomposeError> {
        Self::ensure_parent(path)?;
        std::fs::write(path, content).map_err(|e| DecomposeError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn append(&mut self, path: &Path, content: &str) -> Result<(), DecomposeError> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| DecomposeError::AppendFile {
                path: path.to_path_buf(),
                source: e,
            })?;
        file.write_all(content.as_bytes())
            .map_err(|e| DecomposeError::AppendFile {
                path: path.to_path_buf(),
                source: e,
            })
    }
}

/// In-memory sink recording path → content.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: BTreeMap<PathBuf, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &BTreeMap<PathBuf, String> {
        &self.files
    }

    pub fn content(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }
}

impl ScriptSink for MemorySink {
    fn write(&mut self, path: &Path, content: &str) -> Result<(), DecomposeError> {
        self.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn append(&mut self, path: &Path, content: &str) -> Result<(), DecomposeError> {
        self.files
            .entry(path.to_path_buf())
            .or_default()
            .push_str(content);
        Ok(())
    }
}
