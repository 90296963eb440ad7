//! Script file reading.
//!
//! Generated scripts frequently arrive as Windows-1252 or carry a UTF-8
//! BOM; both decode here before splitting.

use std::path::Path;

use encoding_rs::WINDOWS_1252;

use crate::error::DecomposeError;

/// Reads a script file as UTF-8, falling back to Windows-1252, and strips
/// a leading BOM if present.
pub fn read_script(path: &Path) -> Result<String, DecomposeError> {
    let bytes = std::fs::read(path).map_err(|e| DecomposeError::ScriptRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(err) => {
            let (decoded, _, had_errors) = WINDOWS_1252.decode(err.as_bytes());
            if had_errors {
                return Err(DecomposeError::ScriptEncoding {
                    path: path.to_path_buf(),
                });
            }
            decoded.into_owned()
        }
    };

    match text.strip_prefix('\u{FEFF}') {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(text),
    }
}
