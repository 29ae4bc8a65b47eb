//! # qrsheet
//!
//! Printable sheets of QR code labels.
//!
//! A run takes a list of short identifiers, either read from a column of a
//! CSV file or freshly generated, and lays them out on a grid of A4 pages:
//! one QR symbol per cell, with the identifier printed beneath it. The result
//! is a single multi-page PDF.
//!
//! ## Core Features
//!
//! - **Identifier sources**: CSV ingestion with null/NaN cleanup, or batches
//!   of unique random tokens (`1A2B3C4D-QR`) exported back to CSV
//! - **Grid pagination**: row-major placement, automatic page breaks,
//!   configurable page size, margins, symbol size and grid arity
//! - **Self-contained PDF writer**: Flate-compressed image XObjects built in
//!   memory, Base-14 captions centered with AFM metrics
//!
//! ## Architecture
//!
//! ```text
//! codes (CSV / generator)  →  layout::Paginator  →  writer::PdfWriter  →  PDF
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use qrsheet::{api, SheetConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SheetConfig::default().with_grid(3, 6);
//! let document = api::render_from_table("codes.csv", "code", "qr_codes.pdf", &config)?;
//! println!("{} pages", document.page_count());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Run configuration
pub mod config;

// Identifier source
pub mod codes;

// Grid pagination
pub mod layout;

// PDF writing
pub mod object;
pub mod writer;

// High-level API
pub mod api;

// Re-exports
pub use codes::Code;
pub use config::{mm, PageSize, SheetConfig};
pub use error::{Error, Result};
pub use layout::{paginate_and_render, SheetDocument};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
