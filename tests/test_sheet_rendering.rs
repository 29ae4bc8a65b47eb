//! End-to-end sheet rendering.

use qrsheet::api::{render_from_table, render_generated};
use qrsheet::codes::{load_codes, CODE_COLUMN};
use qrsheet::layout::Paginator;
use qrsheet::{paginate_and_render, Code, Error, SheetConfig};
use std::path::Path;

fn codes(n: usize) -> Vec<Code> {
    (0..n).map(|i| Code::new(format!("ITEM-{:04}", i)).unwrap()).collect()
}

fn uncompressed() -> SheetConfig {
    SheetConfig::default().with_compress(false)
}

fn pdf_text(path: &Path) -> String {
    String::from_utf8_lossy(&std::fs::read(path).unwrap()).into_owned()
}

#[test]
fn test_one_past_capacity_spills_to_second_page() {
    let config = uncompressed();
    let capacity = config.columns * config.rows;
    let document = Paginator::new(&config).unwrap().render(&codes(capacity + 1)).unwrap();

    assert_eq!(document.page_count(), 2);
    let second = &document.pages()[1];
    assert_eq!(second.index, 1);
    assert_eq!(second.placements.len(), 1);
    assert_eq!((second.placements[0].row, second.placements[0].column), (0, 0));
    assert_eq!(second.placements[0].code.as_str(), "ITEM-0008");

    let first_origin = &document.pages()[0].placements[0];
    assert_eq!((second.placements[0].x, second.placements[0].y), (first_origin.x, first_origin.y));
}

#[test]
fn test_every_code_is_drawn_with_caption() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("sheet.pdf");
    let input = codes(11);

    let document = paginate_and_render(&input, &uncompressed(), &output).unwrap();
    let content = pdf_text(&output);

    assert_eq!(document.placements().count(), 11);
    assert_eq!(content.matches("/Subtype /Image").count(), 11);
    assert_eq!(content.matches("/Type /Page ").count(), 2);
    for code in &input {
        assert!(content.contains(&format!("({}) Tj", code)));
    }
    assert!(content.contains("/BaseFont /Helvetica"));
}

#[test]
fn test_latin1_caption_from_table_is_winansi() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("codes.csv");
    let output = dir.path().join("sheet.pdf");
    std::fs::write(&input, "code\nCafé-1\n").unwrap();

    render_from_table(&input, CODE_COLUMN, &output, &uncompressed()).unwrap();
    let bytes = std::fs::read(&output).unwrap();

    let shown = b"(Caf\xE9-1) Tj";
    assert!(bytes.windows(shown.len()).any(|w| w == shown));
    let utf8 = "(Café".as_bytes();
    assert!(!bytes.windows(utf8.len()).any(|w| w == utf8));
}

#[test]
fn test_zero_codes_give_valid_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("empty.pdf");

    let document = paginate_and_render(&[], &uncompressed(), &output).unwrap();
    assert_eq!(document.page_count(), 0);

    let content = pdf_text(&output);
    assert!(content.starts_with("%PDF-1.7"));
    assert!(content.contains("/Count 0"));
    assert!(content.contains("startxref"));
    assert!(content.ends_with("%%EOF"));
}

#[test]
fn test_unencodable_code_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("sheet.pdf");
    let mut input = codes(2);
    input.push(Code::new("Z".repeat(5000)).unwrap());

    let result = paginate_and_render(&input, &SheetConfig::default(), &output);
    assert!(matches!(result, Err(Error::Encoding { .. })));
    assert!(!output.exists());
}

#[test]
fn test_missing_column_produces_no_document() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("codes.csv");
    let output = dir.path().join("sheet.pdf");
    std::fs::write(&input, "sku,qty\nA,1\n").unwrap();

    let result = render_from_table(&input, CODE_COLUMN, &output, &SheetConfig::default());
    assert!(matches!(result, Err(Error::Schema { .. })));
    assert!(!output.exists());
}

#[test]
fn test_custom_column() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("codes.csv");
    let output = dir.path().join("sheet.pdf");
    std::fs::write(&input, "sku,qty\nA-1,1\nB-2,5\n").unwrap();

    let document = render_from_table(&input, "sku", &output, &uncompressed()).unwrap();
    assert_eq!(document.placements().count(), 2);
    assert!(pdf_text(&output).contains("(B-2) Tj"));
}

#[test]
fn test_generated_sheet_matches_exported_table() {
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("codes.csv");
    let output = dir.path().join("sheet.pdf");

    let sheet = render_generated(10, &export, &output, &uncompressed()).unwrap();
    let exported = load_codes(&export, CODE_COLUMN).unwrap();
    let drawn: Vec<Code> = sheet.document.placements().map(|p| p.code.clone()).collect();

    assert_eq!(exported, sheet.codes);
    assert_eq!(drawn, sheet.codes);
    assert_eq!(sheet.document.page_count(), 2);

    let content = pdf_text(&output);
    for code in &sheet.codes {
        assert!(content.contains(&format!("({}) Tj", code)));
    }
}

#[test]
fn test_custom_grid_and_page() {
    let config = uncompressed()
        .with_page_size(qrsheet::PageSize::Letter)
        .with_grid(3, 5)
        .with_symbol_size(72.0)
        .with_margin(36.0);
    let document = Paginator::new(&config).unwrap().render(&codes(31)).unwrap();

    assert_eq!(document.page_count(), 3);
    assert_eq!(document.pages()[2].placements.len(), 1);
    let content = String::from_utf8_lossy(document.bytes());
    assert!(content.contains("/MediaBox [0 0 612 792]"));
}
