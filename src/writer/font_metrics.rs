//! Standard Type1 font metrics for caption placement.
//!
//! Captions are drawn with one of the non-embedded Base-14 fonts declared
//! with `/WinAnsiEncoding`, so text is transcoded to WinAnsi (cp1252) bytes
//! before it is shown or measured. Advance widths come from the published AFM
//! tables rather than from font files and are in 1/1000 of the font size.

use serde::{Deserialize, Serialize};

/// Base-14 fonts usable for captions.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum StandardFont {
    /// Helvetica (sans-serif)
    #[default]
    Helvetica,
    /// Courier (monospace)
    Courier,
}

/// Byte substituted for characters WinAnsi cannot represent.
pub const REPLACEMENT_BYTE: u8 = b'?';

/// Characters at WinAnsi codes 0x80..=0x9F; `'\0'` marks unassigned codes.
const WIN_ANSI_HIGH: [char; 32] = [
    '\u{20AC}', '\0', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\0', '\u{017D}', '\0',
    '\0', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\0', '\u{017E}', '\u{0178}',
];

/// Helvetica advance widths for WinAnsi 0x20..=0x7E.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Helvetica advance widths for WinAnsi 0x80..=0xFF.
const HELVETICA_HIGH_WIDTHS: [u16; 128] = [
    556, 350, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 350, 611, 350, // 0x80
    350, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 350, 500, 667, // 0x90
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 0xA0
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 0xB0
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 0xC0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 0xD0
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // 0xE0
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // 0xF0
];

/// Width used for codes outside the tables.
const DEFAULT_WIDTH: f32 = 556.0;

/// Transcode `text` to WinAnsi bytes, replacing unmappable characters with
/// [`REPLACEMENT_BYTE`].
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            ' '..='~' | '\u{A0}'..='\u{FF}' => ch as u8,
            _ => WIN_ANSI_HIGH
                .iter()
                .position(|&mapped| mapped != '\0' && mapped == ch)
                .map_or(REPLACEMENT_BYTE, |i| 0x80 + i as u8),
        })
        .collect()
}

impl StandardFont {
    /// PostScript name used as `/BaseFont`.
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::Courier => "Courier",
        }
    }

    /// Resource name used in page `/Font` dictionaries and `Tf` operators.
    pub fn resource_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
            StandardFont::Courier => "F2",
        }
    }

    /// Width of the glyph at WinAnsi code `code`, in font units.
    pub fn glyph_width(&self, code: u8) -> f32 {
        match self {
            StandardFont::Courier => 600.0,
            StandardFont::Helvetica => match code {
                0x20..=0x7E => HELVETICA_WIDTHS[(code - 0x20) as usize] as f32,
                0x80..=0xFF => HELVETICA_HIGH_WIDTHS[(code - 0x80) as usize] as f32,
                _ => DEFAULT_WIDTH,
            },
        }
    }

    /// Width of WinAnsi-encoded `bytes` in points at `font_size`.
    pub fn encoded_width(&self, bytes: &[u8], font_size: f32) -> f32 {
        let units: f32 = bytes.iter().map(|&b| self.glyph_width(b)).sum();
        units * font_size / 1000.0
    }

    /// Width of `text` in points at `font_size`, as it will be shown.
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        self.encoded_width(&encode_win_ansi(text), font_size)
    }
}
