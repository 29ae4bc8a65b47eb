//! Loading, generating and persisting codes.

use qrsheet::codes::{generate_unique_codes, load_codes, persist_codes, CodeFormat, CODE_COLUMN};
use qrsheet::{Code, Error};
use regex::Regex;
use std::collections::HashSet;

#[test]
fn test_generated_codes_are_distinct_and_well_formed() {
    let format = CodeFormat::default();
    let codes = generate_unique_codes(1000, || format.next_token()).unwrap();
    let pattern = Regex::new(r"^[0-9A-F]{8}-QR$").unwrap();

    assert_eq!(codes.len(), 1000);
    assert_eq!(codes.iter().collect::<HashSet<_>>().len(), 1000);
    for code in &codes {
        assert!(pattern.is_match(code.as_str()), "malformed code {}", code);
    }
}

#[test]
fn test_persist_then_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("codes.csv");

    let codes = CodeFormat::default().generate(50).unwrap();
    persist_codes(&codes, &path).unwrap();
    let loaded = load_codes(&path, CODE_COLUMN).unwrap();
    assert_eq!(loaded, codes);
}

#[test]
fn test_persist_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("codes.csv");
    std::fs::write(&path, "code\nOLD1\nOLD2\nOLD3\n").unwrap();

    let codes = vec![Code::new("NEW").unwrap()];
    persist_codes(&codes, &path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "code\nNEW\n");
}

#[test]
fn test_load_keeps_duplicates_and_drops_nulls() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("codes.csv");
    std::fs::write(&path, "name,code\na,X1\nb,NaN\nc, X2 \nd,X1\ne,\n").unwrap();

    let loaded: Vec<String> =
        load_codes(&path, "code").unwrap().into_iter().map(Code::into_string).collect();
    assert_eq!(loaded, vec!["X1", "X2", "X1"]);
}

#[test]
fn test_load_numeric_looking_codes_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("codes.csv");
    std::fs::write(&path, "code\n007\n1e3\n").unwrap();

    let loaded: Vec<String> =
        load_codes(&path, "code").unwrap().into_iter().map(Code::into_string).collect();
    assert_eq!(loaded, vec!["007", "1e3"]);
}

#[test]
fn test_load_missing_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("codes.csv");
    std::fs::write(&path, "id,label\n1,a\n").unwrap();

    match load_codes(&path, CODE_COLUMN) {
        Err(Error::Schema { column, available }) => {
            assert_eq!(column, "code");
            assert_eq!(available, vec!["id", "label"]);
        },
        other => panic!("expected schema error, got {:?}", other),
    }
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_codes(dir.path().join("absent.csv"), CODE_COLUMN);
    assert!(matches!(result, Err(Error::Io(_))));
}
