//! Identifier source: the codes that end up on the sheet.
//!
//! Codes come from one of two places:
//!
//! - a CSV table with a designated column ([`load_codes`]), where every cell
//!   goes through [`normalize_cell`] before it becomes a [`Code`];
//! - a batch of fresh random tokens ([`generate_unique_codes`]), which can be
//!   written back out with [`persist_codes`] so the printed set is auditable.
//!
//! Uniqueness is guaranteed only on the generation path. Ingested tables are
//! taken as they are, duplicates included.

mod generate;
mod table;

pub use generate::{
    generate_unique_codes, CodeFormat, DEFAULT_SUFFIX, TOKEN_HEX_DIGITS, TOKEN_SPACE,
};
pub use table::{load_codes, persist_codes, read_codes, write_codes, CODE_COLUMN};

use std::fmt;

/// One payload to encode into a symbol.
///
/// Always non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code(String);

impl Code {
    /// Create a code, rejecting empty text.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    /// The code text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the code, returning its text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Cell values a dataframe reader treats as missing.
const NULL_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a raw cell counts as null.
pub fn is_null_cell(raw: &str) -> bool {
    raw.is_empty() || NULL_MARKERS.contains(&raw)
}

/// Normalize one raw table cell into a code.
///
/// The stages run in order and any of them may drop the cell:
/// 1. a missing cell (short row) is null;
/// 2. empty cells and null markers are dropped;
/// 3. surrounding whitespace is trimmed, the rest is kept verbatim;
/// 4. the result must be non-empty.
pub fn normalize_cell(raw: Option<&str>) -> Option<Code> {
    let raw = raw?;
    if is_null_cell(raw) {
        return None;
    }
    let text = raw.trim();
    if is_null_cell(text) {
        return None;
    }
    Code::new(text)
}
