//! PDF content stream builder.
//!
//! Builds the page content streams that paint symbols and captions
//! (PDF specification ISO 32000-1:2008 Sections 8-9).

use super::font_metrics::{encode_win_ansi, StandardFont};
use super::image_handler::ImagePlacement;
use crate::error::Result;
use std::io::Write;

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Set transformation matrix (cm)
    Transform(f32, f32, f32, f32, f32, f32),
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font resource and size (Tf)
    SetFont(String, f32),
    /// Set text matrix (Tm)
    SetTextMatrix(f32, f32, f32, f32, f32, f32),
    /// Show text (Tj) - literal string of WinAnsi bytes
    ShowText(Vec<u8>),
    /// Set fill color gray (g)
    SetFillColorGray(f32),
    /// Paint XObject (Do)
    PaintXObject(String),
}

/// Builder for PDF content streams.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    operations: Vec<ContentStreamOp>,
    /// Current font resource and size inside the open text object
    current_font: Option<(String, f32)>,
    in_text_object: bool,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation to the stream.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Operations recorded so far.
    pub fn operations(&self) -> &[ContentStreamOp] {
        &self.operations
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text_object {
            self.op(ContentStreamOp::BeginText);
            self.in_text_object = true;
            self.current_font = None;
        }
        self
    }

    /// End a text object.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.op(ContentStreamOp::EndText);
            self.in_text_object = false;
        }
        self
    }

    /// Set font for text operations.
    pub fn set_font(&mut self, font: StandardFont, size: f32) -> &mut Self {
        let name = font.resource_name();
        let unchanged = matches!(&self.current_font, Some((current, s)) if current == name && *s == size);
        if !unchanged {
            self.op(ContentStreamOp::SetFont(name.to_string(), size));
            self.current_font = Some((name.to_string(), size));
        }
        self
    }

    /// Add text with its baseline starting at `(x, y)`, transcoded to WinAnsi.
    pub fn text(&mut self, text: &str, x: f32, y: f32) -> &mut Self {
        self.encoded_text(&encode_win_ansi(text), x, y)
    }

    /// Add already WinAnsi-encoded text with its baseline starting at `(x, y)`.
    pub fn encoded_text(&mut self, bytes: &[u8], x: f32, y: f32) -> &mut Self {
        self.begin_text();
        self.op(ContentStreamOp::SetTextMatrix(1.0, 0.0, 0.0, 1.0, x, y));
        self.op(ContentStreamOp::ShowText(bytes.to_vec()))
    }

    /// Set the fill color as a gray level (0 = black, 1 = white).
    pub fn fill_gray(&mut self, level: f32) -> &mut Self {
        self.op(ContentStreamOp::SetFillColorGray(level))
    }

    /// Draw an image XObject scaled into `placement`.
    pub fn draw_image(&mut self, resource_id: &str, placement: &ImagePlacement) -> &mut Self {
        self.end_text();

        let (a, b, c, d, e, f) = placement.transform_matrix();
        self.op(ContentStreamOp::SaveState);
        self.op(ContentStreamOp::Transform(a, b, c, d, e, f));
        self.op(ContentStreamOp::PaintXObject(resource_id.to_string()));
        self.op(ContentStreamOp::RestoreState)
    }

    /// Build the content stream to bytes, closing any open text object.
    pub fn build(&mut self) -> Result<Vec<u8>> {
        self.end_text();

        let mut buf = Vec::new();
        for op in &self.operations {
            write_op(&mut buf, op)?;
            writeln!(buf)?;
        }
        Ok(buf)
    }
}

fn write_op<W: Write>(w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
    match op {
        ContentStreamOp::SaveState => write!(w, "q"),
        ContentStreamOp::RestoreState => write!(w, "Q"),
        ContentStreamOp::Transform(a, b, c, d, e, f) => {
            write!(w, "{} {} {} {} {} {} cm", a, b, c, d, e, f)
        },
        ContentStreamOp::BeginText => write!(w, "BT"),
        ContentStreamOp::EndText => write!(w, "ET"),
        ContentStreamOp::SetFont(name, size) => write!(w, "/{} {} Tf", name, size),
        ContentStreamOp::SetTextMatrix(a, b, c, d, e, f) => {
            write!(w, "{} {} {} {} {} {} Tm", a, b, c, d, e, f)
        },
        ContentStreamOp::ShowText(text) => {
            write!(w, "(")?;
            write_escaped_string(w, text)?;
            write!(w, ") Tj")
        },
        ContentStreamOp::SetFillColorGray(g) => write!(w, "{} g", g),
        ContentStreamOp::PaintXObject(name) => write!(w, "/{} Do", name),
    }
}

/// Write a string body, escaping delimiters and control characters.
fn write_escaped_string<W: Write>(w: &mut W, bytes: &[u8]) -> std::io::Result<()> {
    for &byte in bytes {
        match byte {
            b'(' => write!(w, "\\(")?,
            b')' => write!(w, "\\)")?,
            b'\\' => write!(w, "\\\\")?,
            b'\n' => write!(w, "\\n")?,
            b'\r' => write!(w, "\\r")?,
            b'\t' => write!(w, "\\t")?,
            _ => w.write_all(&[byte])?,
        }
    }
    Ok(())
}
