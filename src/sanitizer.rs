//! Deployment script cleanup.
//!
//! Generated deployment scripts open with environment boilerplate: a
//! comment banner, session `SET` statements, SQLCMD directive lines, an
//! `__IsSqlCmdEnabled` probe block, and `USE`/`PRINT` statements bound to
//! the target database. Rules strip repeatedly from the front of the
//! remaining text until real DDL is reached; matching is prefix-anchored,
//! so statements past the boilerplate survive untouched.

use std::sync::LazyLock;

use regex::Regex;

/// Which statements the sanitizer strips.
#[derive(Debug, Clone, Default)]
pub struct SanitizeConfig {
    /// Also strip constraint-validation boilerplate
    /// (`ALTER TABLE ... ADD CONSTRAINT` / `WITH CHECK CHECK CONSTRAINT`
    /// batches) emitted when the deployment is scripted with constraint
    /// validation enabled.
    pub strip_constraint_validation: bool,
}

static PREFIX_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Comment block, optionally preceded by a GO line, plus trailing
        // blank lines.
        r"^(?:GO(?:\r?\n)+)?/\*[\s\S]*?\*/(?:\r?\n)*",
        // Session SET statements, e.g. SET NOCOUNT ON;
        r"^(?:GO(?:\r?\n)+)?SET[\s\S]*?;(?:\r?\n)*",
        // GO followed by SQLCMD directive lines (:setvar, :on error exit).
        r"^GO(?:\r?\n)+(?::.*(?:\r?\n)+)+(?:\r?\n)*",
        // SQLCMD-enabled probe block through the terminating END.
        r"^:setvar\s+__IsSqlCmdEnabled[\s\S]*?GO[\s\S]*?END(?:\r?\n)*",
        // GO followed by an environment-bound USE or PRINT statement.
        r"^GO(?:\r?\n)+(?:USE|PRINT).*?;(?:\r?\n)*",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

static CONSTRAINT_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:GO(?:\r?\n)+)?ALTER\s+TABLE\s+[^;]*?(?:ADD\s+CONSTRAINT|WITH\s+CHECK\s+CHECK\s+CONSTRAINT)[^;]*;(?:\r?\n)*",
    )
    .unwrap()
});

/// Strips environment boilerplate from the front of a deployment script.
pub fn sanitize_deploy_script(script: &str, config: &SanitizeConfig) -> String {
    let mut rest = script;
    loop {
        let before = rest.len();
        for rule in PREFIX_RULES.iter() {
            if let Some(m) = rule.find(rest) {
                rest = &rest[m.end()..];
            }
        }
        if config.strip_constraint_validation {
            if let Some(m) = CONSTRAINT_RULE.find(rest) {
                rest = &rest[m.end()..];
            }
        }
        if rest.len() == before {
            break;
        }
    }
    rest.to_string()
}
