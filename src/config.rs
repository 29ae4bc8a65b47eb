//! Run configuration for sheet generation.
//!
//! A [`SheetConfig`] is built once, then passed by reference to everything
//! that needs it. Lengths are in PDF points (1/72 inch); use [`mm`] to
//! convert from millimetres.

use crate::codes::{CodeFormat, DEFAULT_SUFFIX};
use crate::error::Result;
use crate::layout::LayoutParams;
use crate::writer::{PdfWriterConfig, QrCodeOptions, StandardFont};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Points per millimetre.
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimetres to points.
pub fn mm(value: f32) -> f32 {
    value * POINTS_PER_MM
}

/// Page geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PageSize {
    /// A4 (210mm x 297mm)
    A4,
    /// US Letter (8.5" x 11")
    Letter,
    /// Custom dimensions in points
    Custom(f32, f32),
}

impl PageSize {
    /// Get dimensions in points (width, height).
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (mm(210.0), mm(297.0)),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Custom(w, h) => (*w, *h),
        }
    }
}

/// Sheet generation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Page geometry
    pub page_size: PageSize,
    /// Side length of each symbol, in points
    pub symbol_size: f32,
    /// Inset from every page edge, in points
    pub margin: f32,
    /// Symbols per row
    pub columns: usize,
    /// Rows per page
    pub rows: usize,
    /// Number of codes to synthesize on the generation path
    pub count: usize,
    /// Suffix tag of generated codes
    pub code_suffix: String,
    /// Caption font
    pub caption_font: StandardFont,
    /// Caption font size, in points
    pub caption_font_size: f32,
    /// Distance from the symbol's bottom edge to the caption baseline, in points
    pub caption_offset: f32,
    /// Pixels per QR module in the embedded bitmap
    pub module_pixels: u32,
    /// QR quiet zone, in modules
    pub quiet_zone: u32,
    /// Compress page content streams
    pub compress: bool,
    /// Document title written to the PDF info dictionary
    pub title: Option<String>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetConfig {
    /// Create the default configuration: A4, 2 x 4 grid of 50mm symbols,
    /// 10mm margins, Helvetica 10pt captions 10pt below each symbol.
    pub fn new() -> Self {
        Self {
            page_size: PageSize::A4,
            symbol_size: mm(50.0),
            margin: mm(10.0),
            columns: 2,
            rows: 4,
            count: 100,
            code_suffix: DEFAULT_SUFFIX.to_string(),
            caption_font: StandardFont::Helvetica,
            caption_font_size: 10.0,
            caption_offset: 10.0,
            module_pixels: 10,
            quiet_zone: 4,
            compress: true,
            title: None,
        }
    }

    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Set the page geometry.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the symbol side length in points.
    pub fn with_symbol_size(mut self, size: f32) -> Self {
        self.symbol_size = size;
        self
    }

    /// Set the page margin in points.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the grid arity.
    pub fn with_grid(mut self, columns: usize, rows: usize) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }

    /// Set how many codes the generation path synthesizes.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Set the suffix tag of generated codes.
    pub fn with_code_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.code_suffix = suffix.into();
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Grid geometry for the paginator.
    pub fn layout_params(&self) -> LayoutParams {
        let (page_width, page_height) = self.page_size.dimensions();
        LayoutParams {
            page_width,
            page_height,
            margin: self.margin,
            symbol_size: self.symbol_size,
            columns: self.columns,
            rows: self.rows,
        }
    }

    /// Format of generated codes.
    pub fn code_format(&self) -> CodeFormat {
        CodeFormat::new(self.code_suffix.clone())
    }

    /// QR bitmap rendering options.
    pub fn qr_options(&self) -> QrCodeOptions {
        QrCodeOptions::new()
            .module_pixels(self.module_pixels)
            .quiet_zone(self.quiet_zone)
    }

    /// PDF writer settings.
    pub fn writer_config(&self) -> PdfWriterConfig {
        let config = PdfWriterConfig::default().with_compress(self.compress);
        match &self.title {
            Some(title) => config.with_title(title.clone()),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_conversion() {
        assert!((mm(25.4) - 72.0).abs() < 1e-4);
        assert!((mm(10.0) - 28.346_457).abs() < 1e-4);
    }

    #[test]
    fn test_a4_dimensions() {
        let (w, h) = PageSize::A4.dimensions();
        assert!((w - 595.2756).abs() < 1e-3);
        assert!((h - 841.8898).abs() < 1e-3);
        assert_eq!(PageSize::Custom(100.0, 200.0).dimensions(), (100.0, 200.0));
    }

    #[test]
    fn test_defaults() {
        let config = SheetConfig::default();
        let params = config.layout_params();
        assert_eq!((params.columns, params.rows), (2, 4));
        assert!((params.symbol_size - mm(50.0)).abs() < 1e-4);
        assert!((params.margin - mm(10.0)).abs() < 1e-4);
        assert_eq!(config.caption_font, StandardFont::Helvetica);
        assert_eq!(config.code_format().suffix(), "-QR");
    }

    #[test]
    fn test_builder() {
        let config = SheetConfig::new()
            .with_grid(3, 5)
            .with_margin(20.0)
            .with_symbol_size(100.0)
            .with_page_size(PageSize::Letter)
            .with_count(12)
            .with_code_suffix("-X");

        let params = config.layout_params();
        assert_eq!((params.page_width, params.page_height), (612.0, 792.0));
        assert_eq!((params.columns, params.rows), (3, 5));
        assert_eq!(params.margin, 20.0);
        assert_eq!(config.count, 12);
        assert_eq!(config.code_format().suffix(), "-X");
    }

    #[test]
    fn test_from_json_partial() {
        let config = SheetConfig::from_json(r#"{"columns": 3, "rows": 6, "count": 42}"#).unwrap();
        assert_eq!(config.columns, 3);
        assert_eq!(config.rows, 6);
        assert_eq!(config.count, 42);
        assert_eq!(config.page_size, PageSize::A4);
        assert_eq!(config.caption_font_size, 10.0);
    }

    #[test]
    fn test_from_json_custom_page() {
        let config =
            SheetConfig::from_json(r#"{"page_size": {"Custom": [300.0, 400.0]}, "caption_font": "Courier"}"#)
                .unwrap();
        assert_eq!(config.page_size, PageSize::Custom(300.0, 400.0));
        assert_eq!(config.caption_font, StandardFont::Courier);
    }

    #[test]
    fn test_from_json_invalid() {
        let result = SheetConfig::from_json(r#"{"columns": "two"}"#);
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }
}
