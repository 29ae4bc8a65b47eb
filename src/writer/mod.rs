//! PDF writing module for generating symbol sheets.
//!
//! ## Architecture
//!
//! ```text
//! code text
//!     ↓
//! [QrEncoder] (payload → in-memory bitmap → ImageData)
//!     ↓
//! [PageBuilder] (draw image / draw caption)
//!     ↓
//! [ContentStreamBuilder] (operators → content stream bytes)
//!     ↓
//! [PdfWriter] (assembles pages, resources, xref, trailer)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use qrsheet::writer::{ImagePlacement, PdfWriter, QrEncoder, StandardFont, SymbolEncoder};
//!
//! let mut writer = PdfWriter::new();
//! let mut page = writer.add_page(595.0, 842.0);
//! page.draw_image(QrEncoder::default().encode("1A2B3C4D-QR")?, &ImagePlacement::new(72.0, 600.0, 144.0, 144.0));
//! page.add_text("1A2B3C4D-QR", 100.0, 590.0, StandardFont::Helvetica, 10.0);
//! page.finish();
//! let bytes = writer.finish()?;
//! ```

pub mod barcode;
mod content_stream;
mod font_metrics;
mod image_handler;
mod object_serializer;
mod pdf_writer;

pub use barcode::{QrCodeOptions, QrEncoder, SymbolEncoder};
pub use content_stream::{ContentStreamBuilder, ContentStreamOp};
pub use font_metrics::{encode_win_ansi, StandardFont, REPLACEMENT_BYTE};
pub use image_handler::{ColorSpace, ImageData, ImagePlacement};
pub use object_serializer::ObjectSerializer;
pub use pdf_writer::{PageBuilder, PdfWriter, PdfWriterConfig};
