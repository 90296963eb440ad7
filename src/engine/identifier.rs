//! Schema-qualified identifier handling.
//!
//! Generated scripts wrap identifiers in brackets or double quotes and may
//! omit the schema entirely. Everything downstream (registry keys, folder
//! names, file names) works on the stripped form.

use std::fmt;

/// Schema assumed when a statement does not qualify its object.
pub const DEFAULT_SCHEMA: &str = "dbo";

/// Strips brackets `[]` and double quotes `""` from an identifier.
pub fn strip_delimiters(ident: &str) -> String {
    ident
        .trim()
        .trim_matches(|c| c == '[' || c == ']' || c == '"')
        .to_string()
}

/// A schema-qualified object name.
///
/// Schema and name are stored stripped of delimiters; equality and map
/// keying are ASCII case-insensitive, matching SQL Server's default
/// catalog collation behavior.
#[derive(Debug, Clone)]
pub struct ObjectName {
    pub schema: String,
    pub name: String,
}

impl ObjectName {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }

    /// Builds a name from raw (possibly bracketed or quoted) tokens,
    /// defaulting the schema to `dbo` when absent.
    pub fn from_tokens(schema: Option<&str>, name: &str) -> Self {
        Self {
            schema: schema
                .map(strip_delimiters)
                .unwrap_or_else(|| DEFAULT_SCHEMA.to_string()),
            name: strip_delimiters(name),
        }
    }

    /// Case-insensitive registry key: `schema.name`, lowercased.
    pub fn key(&self) -> String {
        format!(
            "{}.{}",
            self.schema.to_ascii_lowercase(),
            self.name.to_ascii_lowercase()
        )
    }
}

impl PartialEq for ObjectName {
    fn eq(&self, other: &Self) -> bool {
        self.schema.eq_ignore_ascii_case(&other.schema)
            && self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Eq for ObjectName {}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}
