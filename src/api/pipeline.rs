//! End-to-end pipelines from a code source to a saved sheet.

use crate::codes::{load_codes, persist_codes, Code};
use crate::config::SheetConfig;
use crate::error::Result;
use crate::layout::{Paginator, SheetDocument};
use std::path::Path;

/// Result of [`render_generated`]: the fresh codes and the sheet that shows them.
#[derive(Debug, Clone)]
pub struct GeneratedSheet {
    /// Codes in the order they were generated, persisted and drawn
    pub codes: Vec<Code>,
    /// The rendered sheet
    pub document: SheetDocument,
}

/// Load codes from column `column` of the CSV at `input` and render them to `output`.
///
/// A missing column fails before anything is rendered or written.
pub fn render_from_table(
    input: impl AsRef<Path>,
    column: &str,
    output: impl AsRef<Path>,
    config: &SheetConfig,
) -> Result<SheetDocument> {
    let paginator = Paginator::new(config)?;
    let codes = load_codes(input, column)?;
    let document = paginator.render(&codes)?;
    document.save(output)?;
    Ok(document)
}

/// Generate `count` unique codes, write them to `export` and render them to `output`.
///
/// Codes are generated once; the exported table and the sheet hold exactly
/// the same sequence. The sheet is rendered before anything is written, so a
/// code that cannot be encoded leaves neither file behind.
pub fn render_generated(
    count: usize,
    export: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &SheetConfig,
) -> Result<GeneratedSheet> {
    let paginator = Paginator::new(config)?;
    let codes = config.code_format().generate(count)?;
    let document = paginator.render(&codes)?;
    persist_codes(&codes, export)?;
    document.save(output)?;
    Ok(GeneratedSheet { codes, document })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::{write_codes, CODE_COLUMN};
    use crate::error::Error;

    #[test]
    fn test_render_from_table() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("codes.csv");
        let output = dir.path().join("sheet.pdf");
        std::fs::write(&input, "code,note\nA1,x\n,y\nB2,z\n").unwrap();

        let document =
            render_from_table(&input, CODE_COLUMN, &output, &SheetConfig::default()).unwrap();
        let drawn: Vec<&str> = document.placements().map(|p| p.code.as_str()).collect();
        assert_eq!(drawn, vec!["A1", "B2"]);
        assert!(output.exists());
    }

    #[test]
    fn test_invalid_layout_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let export = dir.path().join("codes.csv");
        let output = dir.path().join("sheet.pdf");
        let config = SheetConfig::default().with_symbol_size(-5.0);

        let result = render_generated(4, &export, &output, &config);
        assert!(matches!(result, Err(Error::InvalidLayout(_))));
        assert!(!export.exists());
        assert!(!output.exists());
    }

    #[test]
    fn test_unencodable_generated_codes_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let export = dir.path().join("codes.csv");
        let output = dir.path().join("sheet.pdf");
        let config = SheetConfig::default().with_code_suffix("X".repeat(5000));

        let result = render_generated(2, &export, &output, &config);
        assert!(matches!(result, Err(Error::Encoding { .. })));
        assert!(!export.exists());
        assert!(!output.exists());
    }

    #[test]
    fn test_generated_codes_match_export() {
        let dir = tempfile::tempdir().unwrap();
        let export = dir.path().join("codes.csv");
        let output = dir.path().join("sheet.pdf");

        let sheet = render_generated(5, &export, &output, &SheetConfig::default()).unwrap();
        let mut expected = Vec::new();
        write_codes(&mut expected, &sheet.codes).unwrap();
        assert_eq!(std::fs::read(&export).unwrap(), expected);
        assert_eq!(sheet.document.placements().count(), 5);
    }
}
