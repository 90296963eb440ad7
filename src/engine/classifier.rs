//! Fixed-priority batch classification.
//!
//! Each batch is matched against an ordered cascade of structural patterns;
//! the first hit wins. Patterns match anywhere in the batch, so a procedure
//! body that happens to contain `CREATE TABLE` text classifies as a table.
//! Priority order is the contract, not statement-level parsing.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::identifier::{strip_delimiters, ObjectName};

/// Optionally schema-qualified object token: `[schema].[name]`, `schema.name`,
/// `"schema"."name"`, or a bare `name`. The schema group only participates
/// when followed by a `.` separator, so unqualified names stay in the
/// `object` group and default to `dbo`.
const OBJECT: &str = r#"(?:[\["]?(?P<schema>[^\[\]".\s]+)[\]"]?\s*\.\s*)?[\["]?(?P<object>[^\[\]".\s(;,]+)[\]"]?"#;

/// Same shape as [`OBJECT`], for the table named in an `ON` clause.
const TARGET: &str = r#"(?:[\["]?(?P<target_schema>[^\[\]".\s]+)[\]"]?\s*\.\s*)?[\["]?(?P<target_table>[^\[\]".\s(;,]+)[\]"]?"#;

static TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)CREATE\s+TABLE\s+{OBJECT}")).unwrap());

static PROCEDURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)CREATE\s+PROCEDURE\s+{OBJECT}")).unwrap());

static VIEW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)CREATE\s+VIEW\s+{OBJECT}")).unwrap());

static FUNCTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)CREATE\s+FUNCTION\s+{OBJECT}")).unwrap());

static TRIGGER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)CREATE\s+TRIGGER\s+{OBJECT}\s+ON\s+{TARGET}"
    ))
    .unwrap()
});

static INDEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"(?i)CREATE\s+(?:UNIQUE\s+)?(?:CLUSTERED\s+|NONCLUSTERED\s+)?INDEX\s+[\["]?(?P<index>[^\[\]".\s(;,]+)[\]"]?\s+ON\s+{TARGET}"#
    ))
    .unwrap()
});

static ALTER_TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)ALTER\s+TABLE\s+{OBJECT}")).unwrap());

/// Classification of one batch, with extracted identity.
///
/// `Trigger`, `Index`, and `AlterConstraint` carry the identity of the table
/// they attach to; for triggers and indexes that is the `ON`-clause table,
/// not the object's own name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectKind {
    Table { table: ObjectName },
    Procedure { procedure: ObjectName },
    View { view: ObjectName },
    Function { function: ObjectName },
    Trigger { trigger: ObjectName, table: ObjectName },
    Index { index: String, table: ObjectName },
    AlterConstraint { table: ObjectName },
    Unknown,
}

/// Classifies a batch. Total: every batch gets exactly one kind.
pub fn classify(sql: &str) -> ObjectKind {
    if let Some(caps) = TABLE_RE.captures(sql) {
        return ObjectKind::Table {
            table: object_name(&caps),
        };
    }

    if let Some(caps) = PROCEDURE_RE.captures(sql) {
        return ObjectKind::Procedure {
            procedure: object_name(&caps),
        };
    }

    if let Some(caps) = VIEW_RE.captures(sql) {
        return ObjectKind::View {
            view: object_name(&caps),
        };
    }

    if let Some(caps) = FUNCTION_RE.captures(sql) {
        return ObjectKind::Function {
            function: object_name(&caps),
        };
    }

    if let Some(caps) = TRIGGER_RE.captures(sql) {
        return ObjectKind::Trigger {
            trigger: object_name(&caps),
            table: target_name(&caps),
        };
    }

    if let Some(caps) = INDEX_RE.captures(sql) {
        return ObjectKind::Index {
            index: strip_delimiters(&caps["index"]),
            table: target_name(&caps),
        };
    }

    // ALTER TABLE alone is not enough: only constraint additions attach.
    if let Some(caps) = ALTER_TABLE_RE.captures(sql) {
        if contains_ci(sql, "ADD CONSTRAINT") {
            return ObjectKind::AlterConstraint {
                table: object_name(&caps),
            };
        }
    }

    ObjectKind::Unknown
}

fn object_name(caps: &Captures) -> ObjectName {
    ObjectName::from_tokens(
        caps.name("schema").map(|m| m.as_str()),
        caps.name("object").map(|m| m.as_str()).unwrap_or_default(),
    )
}

fn target_name(caps: &Captures) -> ObjectName {
    ObjectName::from_tokens(
        caps.name("target_schema").map(|m| m.as_str()),
        caps.name("target_table")
            .map(|m| m.as_str())
            .unwrap_or_default(),
    )
}

/// Case-insensitive substring search without allocating an uppercase copy.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle_bytes = needle.as_bytes();
    let haystack_bytes = haystack.as_bytes();
    if needle_bytes.len() > haystack_bytes.len() {
        return false;
    }
    haystack_bytes
        .windows(needle_bytes.len())
        .any(|window| window.eq_ignore_ascii_case(needle_bytes))
}
