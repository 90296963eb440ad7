//! Routing tests against the in-memory sink.
//!
//! These exercise the registry + deferred-attachment mechanics without
//! touching a filesystem.

use std::path::Path;

use pretty_assertions::assert_eq;

use sql_decompose::engine::{decompose, DecomposeSummary, EngineConfig, MemorySink};

fn run(script: &str) -> (DecomposeSummary, MemorySink) {
    run_with(script, &EngineConfig::default())
}

fn run_with(script: &str, config: &EngineConfig) -> (DecomposeSummary, MemorySink) {
    let mut sink = MemorySink::new();
    let summary = decompose(script, Path::new("out"), config, &mut sink).unwrap();
    (summary, sink)
}

#[test]
fn test_table_file_gets_trailing_newline() {
    let (summary, sink) = run("CREATE TABLE [dbo].[T] (\n    [Id] INT NOT NULL\n);");
    assert_eq!(summary.tables, 1);
    assert_eq!(
        sink.content("out/dbo/Tables/T.sql"),
        Some("CREATE TABLE [dbo].[T] (\n    [Id] INT NOT NULL\n);\n")
    );
}

#[test]
fn test_procedure_view_function_folders() {
    let script = "CREATE PROCEDURE [dbo].[GetT]\nAS\nSELECT 1;\nGO\nCREATE VIEW [Sales].[V] AS SELECT 1\nGO\nCREATE FUNCTION [dbo].[F]() RETURNS INT AS BEGIN RETURN 1; END";
    let (summary, sink) = run(script);

    assert_eq!(summary.procedures, 1);
    assert_eq!(summary.views, 1);
    assert_eq!(summary.functions, 1);
    // Written raw, no trailing newline added.
    assert_eq!(
        sink.content("out/dbo/Stored Procedures/GetT.sql"),
        Some("CREATE PROCEDURE [dbo].[GetT]\nAS\nSELECT 1;")
    );
    assert!(sink.content("out/Sales/Views/V.sql").is_some());
    assert!(sink.content("out/dbo/Functions/F.sql").is_some());
}

#[test]
fn test_attachment_appends_after_table_with_separator() {
    let script = "CREATE TABLE [dbo].[T] (Id INT);\nGO\nCREATE NONCLUSTERED INDEX [IX_T] ON [dbo].[T](Id);";
    let (summary, sink) = run(script);

    assert_eq!(summary.attachments, 1);
    assert_eq!(
        sink.content("out/dbo/Tables/T.sql"),
        Some(
            "CREATE TABLE [dbo].[T] (Id INT);\n\nGO\n-- Index: IX_T\nCREATE NONCLUSTERED INDEX [IX_T] ON [dbo].[T](Id);"
        )
    );
}

#[test]
fn test_deferred_attachments_flush_in_arrival_order() {
    let script = concat!(
        "CREATE UNIQUE NONCLUSTERED INDEX [IX_T_Name]\n    ON [dbo].[T]([Name] ASC);\n",
        "GO\n",
        "CREATE TRIGGER [dbo].[trg_T]\n    ON [dbo].[T]\n    AFTER INSERT\nAS\nBEGIN\n    SELECT 1;\nEND\n",
        "GO\n",
        "CREATE TABLE [dbo].[T] (\n    [Id] INT NOT NULL\n);\n",
    );
    let (summary, sink) = run(script);

    assert_eq!(summary.tables, 1);
    assert_eq!(summary.attachments, 2);
    assert_eq!(summary.orphaned_tables, 0);
    assert_eq!(
        sink.content("out/dbo/Tables/T.sql"),
        Some(concat!(
            "CREATE TABLE [dbo].[T] (\n    [Id] INT NOT NULL\n);\n",
            "\n\n-- Index: IX_T_Name\nCREATE UNIQUE NONCLUSTERED INDEX [IX_T_Name]\n    ON [dbo].[T]([Name] ASC);",
            "\n\n-- Trigger: trg_T\nCREATE TRIGGER [dbo].[trg_T]\n    ON [dbo].[T]\n    AFTER INSERT\nAS\nBEGIN\n    SELECT 1;\nEND",
        ))
    );
}

#[test]
fn test_orphaned_attachments_land_in_missing_table_fallback() {
    let script = "CREATE INDEX [IX_Ghost] ON [dbo].[Ghost](Id);\nGO\nALTER TABLE [dbo].[Ghost] ADD CONSTRAINT [PK_Ghost] PRIMARY KEY (Id);";
    let (summary, sink) = run(script);

    assert_eq!(summary.orphaned_tables, 1);
    assert!(sink.content("out/dbo/Tables/Ghost.sql").is_none());
    assert_eq!(
        sink.content("out/Misc/MissingTable_dbo_Ghost.sql"),
        Some(concat!(
            "-- Index: IX_Ghost\nCREATE INDEX [IX_Ghost] ON [dbo].[Ghost](Id);",
            "\n\n",
            "-- Alter Table Constraint\nALTER TABLE [dbo].[Ghost] ADD CONSTRAINT [PK_Ghost] PRIMARY KEY (Id);",
        ))
    );
}

#[test]
fn test_table_lookup_ignores_case() {
    let script = "CREATE TABLE [dbo].[Widgets] (Id INT);\nGO\nCREATE INDEX [IX_W] ON [DBO].[WIDGETS](Id);";
    let (summary, sink) = run(script);

    assert_eq!(summary.orphaned_tables, 0);
    let content = sink.content("out/dbo/Tables/Widgets.sql").unwrap();
    assert!(content.contains("-- Index: IX_W"));
}

#[test]
fn test_unknown_batches_number_by_raw_position() {
    // The whitespace-only segment between the two GO lines consumes
    // position 2 without producing a file.
    let script = "SELECT 1\nGO\n\nGO\nINSERT INTO dbo.T VALUES (1)";
    let (summary, sink) = run(script);

    assert_eq!(summary.unclassified, 2);
    assert_eq!(sink.content("out/Misc/Batch_1.sql"), Some("SELECT 1"));
    assert_eq!(
        sink.content("out/Misc/Batch_3.sql"),
        Some("INSERT INTO dbo.T VALUES (1)")
    );
    assert!(sink.content("out/Misc/Batch_2.sql").is_none());
}

#[test]
fn test_terse_attachment_headers() {
    let config = EngineConfig {
        named_attachment_headers: false,
    };
    let script = "CREATE TABLE [dbo].[T] (Id INT);\nGO\nCREATE INDEX [IX_T] ON [dbo].[T](Id);\nGO\nCREATE TRIGGER trg ON [dbo].[T] AFTER INSERT AS SELECT 1";
    let (_, sink) = run_with(script, &config);

    let content = sink.content("out/dbo/Tables/T.sql").unwrap();
    assert!(content.contains("\nGO\n-- Index\nCREATE INDEX"));
    assert!(content.contains("\nGO\n-- Trigger\nCREATE TRIGGER"));
    assert!(!content.contains("-- Index:"));
    assert!(!content.contains("-- Trigger:"));
}

#[test]
fn test_every_batch_lands_somewhere() {
    let script = concat!(
        "CREATE TABLE [dbo].[A] (Id INT);\n",
        "GO\nCREATE TABLE [Sales].[B] (Id INT);\n",
        "GO\nCREATE PROCEDURE [dbo].[P] AS SELECT 1;\n",
        "GO\nCREATE VIEW [dbo].[V] AS SELECT 1\n",
        "GO\nCREATE FUNCTION [dbo].[F]() RETURNS INT AS BEGIN RETURN 1; END\n",
        "GO\nCREATE INDEX [IX_A] ON [dbo].[A](Id);\n",
        "GO\nCREATE INDEX [IX_Ghost] ON [dbo].[Ghost](Id);\n",
        "GO\nINSERT INTO dbo.A VALUES (1);\n",
    );
    let (summary, sink) = run(script);

    assert_eq!(
        summary,
        sql_decompose::DecomposeSummary {
            tables: 2,
            procedures: 1,
            views: 1,
            functions: 1,
            attachments: 2,
            unclassified: 1,
            orphaned_tables: 1,
        }
    );
    // 2 tables + 1 proc + 1 view + 1 function + 1 misc + 1 missing-table
    // fallback; the IX_A attachment lives inside A.sql.
    assert_eq!(sink.files().len(), 7);
}
