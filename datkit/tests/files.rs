use std::fs;
use datkit::{infer_file_row_width, json, DatManager, ErrorKind, Field, Result, Validity};
use test_log::test;

const SCHEMA: &str = r#"{
  "tables": [
    { "name": "BaseItemTypes", "validFor": 2, "columns": [
        { "name": "Id", "type": "i32", "array": false } ] },
    { "name": "BaseItemTypes", "validFor": 1, "columns": [
        { "name": "Id", "type": "string", "array": false, "description": "metadata path" },
        { "name": "Name", "type": "string", "array": false },
        { "name": null, "type": "foreignrow", "array": true },
        { "name": "DropLevel", "type": "i32", "array": false },
        { "name": null, "type": "bool", "array": false } ] }
  ],
  "enumerations": []
}"#;

const ROWS: &str = r#"[
  { "Id": "Metadata/A", "Name": "Sword", "Unknown0": [1, 2], "DropLevel": 1, "Unknown1": 0 },
  { "Id": "Metadata/B", "Name": "", "Unknown0": [], "DropLevel": null, "Unknown1": 1 },
  { "Id": "Metadata/C", "Name": "Sword", "Unknown0": [3], "DropLevel": 60, "Unknown1": null }
]"#;

fn manager(dir: &tempfile::TempDir) -> Result<DatManager> {
    let schema = dir.path().join("schema.min.json");
    fs::write(&schema, SCHEMA)?;
    DatManager::open(&schema)
}

#[test]
fn test_write_then_parse_by_file_name() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mgr = manager(&dir)?;
    let table = mgr.registry().resolve("baseitemtypes", Validity::First)?;
    let records = json::from_str(ROWS, table)?;

    let out = dir.path().join("BaseItemTypes.datc64");
    let written = mgr.write_file(&records, &out, Validity::First, None)?;
    assert_eq!(fs::read(&out)?, written);
    assert_eq!(mgr.parse_file(&out, Validity::First)?, records);
    Ok(())
}

#[test]
fn test_rewrite_under_explicit_table_name() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mgr = manager(&dir)?;
    let src = dir.path().join("baseitemtypes.datc64");
    let table = mgr.registry().resolve("BaseItemTypes", Validity::First)?;
    mgr.write_file(&json::from_str(ROWS, table)?, &src, Validity::First, None)?;

    // Edit the names and write under a name that says nothing about the table.
    let mut records = mgr.parse_file(&src, Validity::First)?;
    for rec in records.iter_mut() {
        if let Some(Field::Text(name)) = rec.get_mut("Name") {
            if !name.is_empty() {
                name.insert(0, '*');
            }
        }
    }
    let out = dir.path().join("edited.bin");
    let before = fs::read(&src)?.len();
    let after = mgr
        .write_file(&records, &out, Validity::First, Some("BASEITEMTYPES"))?
        .len();
    // "Sword" appears twice but is stored once: one more code unit in total.
    assert_eq!(after, before + 2);
    Ok(())
}

#[test]
fn test_wrong_revision_is_a_marker_mismatch() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mgr = manager(&dir)?;
    let out = dir.path().join("BaseItemTypes.datc64");
    let table = mgr.registry().resolve("baseitemtypes", Validity::First)?;
    mgr.write_file(&json::from_str(ROWS, table)?, &out, Validity::First, None)?;

    // The revision 2 table is 4 bytes wide; the file's rows are 37.
    let e = mgr.parse_file(&out, Validity::Second).unwrap_err();
    assert_eq!(
        e.kind(),
        &ErrorKind::HeapMarkerMismatch {
            row_width: 4,
            inferred: Some(37)
        }
    );
    assert_eq!(infer_file_row_width(&out)?, Some(37));
    Ok(())
}

#[test]
fn test_unknown_table_and_missing_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mgr = manager(&dir)?;
    let e = mgr
        .write_file(&[], dir.path().join("Mods.datc64"), Validity::Any, None)
        .unwrap_err();
    assert!(matches!(e.kind(), ErrorKind::SchemaNotFound { .. }));
    assert!(!dir.path().join("Mods.datc64").exists());
    let e = mgr
        .parse_file(dir.path().join("BaseItemTypes.datc64"), Validity::Any)
        .unwrap_err();
    assert!(matches!(e.kind(), ErrorKind::Io(_)));
    Ok(())
}
