//! Error types for sql-decompose

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while decomposing a script or writing its output
#[derive(Error, Debug)]
pub enum DecomposeError {
    #[error("Failed to read script file: {path}")]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Script file is neither valid UTF-8 nor Windows-1252: {path}")]
    ScriptEncoding { path: PathBuf },

    #[error("Failed to create output directory: {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file: {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to append to output file: {path}")]
    AppendFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
