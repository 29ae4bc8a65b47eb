//! Random code generation.

use super::Code;
use crate::error::{Error, Result};
use indexmap::IndexSet;

/// Number of hex digits in the random part of a generated code.
pub const TOKEN_HEX_DIGITS: usize = 8;

/// Number of distinct random parts a token can have (16^8).
pub const TOKEN_SPACE: u64 = 1 << (4 * TOKEN_HEX_DIGITS);

/// Largest number of slots reserved up front for the dedup set.
const MAX_PRESIZE: usize = 1 << 16;

/// Suffix appended to generated codes unless configured otherwise.
pub const DEFAULT_SUFFIX: &str = "-QR";

/// Fixed format of generated codes: 8 uppercase hex digits plus a suffix tag.
///
/// The random part has 2^32 possible values, so collisions are rare for any
/// batch that fits on paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeFormat {
    suffix: String,
}

impl CodeFormat {
    /// Create a format with the given suffix tag.
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// The suffix tag.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Draw a fresh random token in this format.
    pub fn next_token(&self) -> String {
        let random = uuid::Uuid::new_v4().simple().to_string().to_ascii_uppercase();
        format!("{}{}", &random[..TOKEN_HEX_DIGITS], self.suffix)
    }

    /// Whether `text` is a well-formed token of this format.
    pub fn matches(&self, text: &str) -> bool {
        match text.strip_suffix(self.suffix.as_str()) {
            Some(random) => {
                random.len() == TOKEN_HEX_DIGITS
                    && random.bytes().all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
            },
            None => false,
        }
    }

    /// Generate `count` distinct codes in this format.
    pub fn generate(&self, count: usize) -> Result<Vec<Code>> {
        generate_unique_codes(count, || self.next_token())
    }
}

impl Default for CodeFormat {
    fn default() -> Self {
        Self::new(DEFAULT_SUFFIX)
    }
}

/// Maximum number of draws for a batch of `count` codes.
fn attempt_budget(count: usize) -> usize {
    count.saturating_mul(16).saturating_add(1024)
}

/// Produce exactly `count` distinct codes by drawing tokens from `format_fn`.
///
/// Codes are returned in the order they were first drawn. Empty tokens and
/// repeats are discarded. Gives up with [`Error::TokenSpaceExhausted`] once
/// the draw budget is spent, so a degenerate generator cannot spin forever.
/// Counts above [`TOKEN_SPACE`] are rejected before any token is drawn.
pub fn generate_unique_codes<F>(count: usize, mut format_fn: F) -> Result<Vec<Code>>
where
    F: FnMut() -> String,
{
    if count as u64 > TOKEN_SPACE {
        return Err(Error::TokenSpaceExhausted {
            requested: count,
            produced: 0,
            attempts: 0,
        });
    }

    let budget = attempt_budget(count);
    let mut seen: IndexSet<Code> = IndexSet::with_capacity(count.min(MAX_PRESIZE));
    let mut attempts = 0usize;

    while seen.len() < count {
        if attempts == budget {
            return Err(Error::TokenSpaceExhausted {
                requested: count,
                produced: seen.len(),
                attempts,
            });
        }
        attempts += 1;

        if let Some(code) = Code::new(format_fn()) {
            seen.insert(code);
        }
    }

    let collisions = attempts - count;
    if collisions > 0 {
        log::debug!("Discarded {} duplicate or empty tokens", collisions);
    }
    log::info!("Generated {} unique codes", count);
    Ok(seen.into_iter().collect())
}
