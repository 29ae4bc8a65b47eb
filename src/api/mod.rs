//! High-level API for producing symbol sheets.
//!
//! Two pipelines cover the common cases:
//! - [`render_from_table`]: codes come from a column of an existing CSV file;
//! - [`render_generated`]: fresh random codes are generated, exported to CSV
//!   and rendered.
//!
//! ## Quick Start
//!
//! ```ignore
//! use qrsheet::api::{render_from_table, render_generated};
//! use qrsheet::SheetConfig;
//!
//! let config = SheetConfig::default();
//!
//! // Print the codes listed in codes.csv
//! render_from_table("codes.csv", "code", "qr_codes.pdf", &config)?;
//!
//! // Mint 100 new codes, keep a record of them, print them
//! let sheet = render_generated(100, "codes.csv", "qr_codes.pdf", &config)?;
//! assert_eq!(sheet.codes.len(), 100);
//! ```
//!
//! For finer control (custom encoders, rendering without saving) use
//! [`crate::layout::Paginator`] directly.

mod pipeline;

pub use pipeline::{render_from_table, render_generated, GeneratedSheet};
