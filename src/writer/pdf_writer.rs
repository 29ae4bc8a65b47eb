//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure:
//! header, body, xref table, and trailer.

use super::content_stream::ContentStreamBuilder;
use super::font_metrics::{encode_win_ansi, StandardFont};
use super::image_handler::{compress, ImageData, ImagePlacement};
use super::object_serializer::ObjectSerializer;
use crate::error::Result;
use crate::object::{Object, ObjectRef};
use std::collections::{BTreeSet, HashMap};
use std::io::Write;
use std::path::Path;

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.7")
    pub version: String,
    /// Document title
    pub title: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Whether to compress content streams
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            creator: Some(format!("{} {}", crate::NAME, crate::VERSION)),
            compress: true,
        }
    }
}

impl PdfWriterConfig {
    /// Set document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// Internal page data.
struct PageData {
    width: f32,
    height: f32,
    content: ContentStreamBuilder,
    /// Image XObjects drawn on this page (resource id, image)
    images: Vec<(String, ImageData)>,
    fonts: BTreeSet<StandardFont>,
}

/// Handle for drawing on one page of a [`PdfWriter`].
pub struct PageBuilder<'a> {
    writer: &'a mut PdfWriter,
    page_index: usize,
}

impl<'a> PageBuilder<'a> {
    /// Zero-based index of this page in the document.
    pub fn index(&self) -> usize {
        self.page_index
    }

    /// Embed `image` and draw it into `placement`.
    ///
    /// Returns the XObject resource id assigned to the image.
    pub fn draw_image(&mut self, image: ImageData, placement: &ImagePlacement) -> String {
        self.writer.next_image_id += 1;
        let resource_id = format!("Im{}", self.writer.next_image_id);

        let page = &mut self.writer.pages[self.page_index];
        page.content.draw_image(&resource_id, placement);
        page.images.push((resource_id.clone(), image));
        resource_id
    }

    /// Draw black text with its baseline starting at `(x, y)`.
    ///
    /// The text is transcoded to WinAnsi; unmappable characters become `?`.
    pub fn add_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font: StandardFont,
        font_size: f32,
    ) -> &mut Self {
        self.add_encoded_text(&encode_win_ansi(text), x, y, font, font_size)
    }

    /// Draw black WinAnsi-encoded text with its baseline starting at `(x, y)`.
    pub fn add_encoded_text(
        &mut self,
        bytes: &[u8],
        x: f32,
        y: f32,
        font: StandardFont,
        font_size: f32,
    ) -> &mut Self {
        let page = &mut self.writer.pages[self.page_index];
        page.fonts.insert(font);
        page.content
            .begin_text()
            .fill_gray(0.0)
            .set_font(font, font_size)
            .encoded_text(bytes, x, y);
        self
    }

    /// Close any open text object and return to the writer.
    pub fn finish(self) -> &'a mut PdfWriter {
        self.writer.pages[self.page_index].content.end_text();
        self.writer
    }
}

/// PDF document writer.
///
/// Pages are accumulated in memory and serialized in one pass by
/// [`PdfWriter::finish`].
pub struct PdfWriter {
    config: PdfWriterConfig,
    pages: Vec<PageData>,
    next_image_id: u32,
}

/// Sequential object number allocation for [`PdfWriter::finish`].
struct ObjectIds {
    next: u32,
}

impl ObjectIds {
    fn alloc(&mut self) -> ObjectRef {
        let obj_ref = ObjectRef::new(self.next, 0);
        self.next += 1;
        obj_ref
    }
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            next_image_id: 0,
        }
    }

    /// Append a page with the given dimensions in points.
    pub fn add_page(&mut self, width: f32, height: f32) -> PageBuilder<'_> {
        let page_index = self.pages.len();
        self.pages.push(PageData {
            width,
            height,
            content: ContentStreamBuilder::new(),
            images: Vec::new(),
            fonts: BTreeSet::new(),
        });
        PageBuilder {
            writer: self,
            page_index,
        }
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serialize the complete PDF document.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let serializer = ObjectSerializer::compact();
        let mut ids = ObjectIds { next: 1 };
        let mut output = Vec::new();
        let mut offsets: Vec<(u32, usize)> = Vec::new();

        writeln!(output, "%PDF-{}", self.config.version)?;
        // Binary marker (recommended for binary content)
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        let catalog_ref = ids.alloc();
        let pages_ref = ids.alloc();
        let info_ref = ids.alloc();

        let used_fonts: BTreeSet<StandardFont> =
            self.pages.iter().flat_map(|p| p.fonts.iter().copied()).collect();
        let font_refs: HashMap<StandardFont, ObjectRef> =
            used_fonts.iter().map(|font| (*font, ids.alloc())).collect();

        let mut body: Vec<(ObjectRef, Object)> = Vec::new();
        let mut kids = Vec::with_capacity(self.pages.len());

        for page in &mut self.pages {
            let page_ref = ids.alloc();
            let content_ref = ids.alloc();
            kids.push(Object::Reference(page_ref));

            let mut xobjects = HashMap::new();
            for (resource_id, image) in &page.images {
                let image_ref = ids.alloc();
                xobjects.insert(resource_id.clone(), Object::Reference(image_ref));
                body.push((image_ref, image.to_xobject()));
            }

            let fonts: HashMap<String, Object> = page
                .fonts
                .iter()
                .map(|font| {
                    (font.resource_name().to_string(), Object::Reference(font_refs[font]))
                })
                .collect();

            let mut resources = HashMap::new();
            if !fonts.is_empty() {
                resources.insert("Font".to_string(), Object::Dictionary(fonts));
            }
            if !xobjects.is_empty() {
                resources.insert("XObject".to_string(), Object::Dictionary(xobjects));
            }

            body.push((
                page_ref,
                ObjectSerializer::dict(vec![
                    ("Type", ObjectSerializer::name("Page")),
                    ("Parent", ObjectSerializer::reference(pages_ref)),
                    (
                        "MediaBox",
                        ObjectSerializer::rect(0.0, 0.0, page.width as f64, page.height as f64),
                    ),
                    ("Contents", ObjectSerializer::reference(content_ref)),
                    ("Resources", Object::Dictionary(resources)),
                ]),
            ));

            let raw = page.content.build()?;
            let mut content_dict = HashMap::new();
            let data = if self.config.compress {
                content_dict.insert("Filter".to_string(), ObjectSerializer::name("FlateDecode"));
                compress(&raw)?
            } else {
                raw
            };
            body.push((
                content_ref,
                Object::Stream {
                    dict: content_dict,
                    data: bytes::Bytes::from(data),
                },
            ));
        }

        let catalog = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Catalog")),
            ("Pages", ObjectSerializer::reference(pages_ref)),
        ]);
        let pages = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Pages")),
            ("Kids", Object::Array(kids)),
            ("Count", ObjectSerializer::integer(self.pages.len() as i64)),
        ]);

        let mut info_entries = Vec::new();
        if let Some(title) = &self.config.title {
            info_entries.push(("Title", ObjectSerializer::string(title)));
        }
        if let Some(creator) = &self.config.creator {
            info_entries.push(("Creator", ObjectSerializer::string(creator)));
        }
        let info = ObjectSerializer::dict(info_entries);

        let mut fonts: Vec<(ObjectRef, Object)> = font_refs
            .iter()
            .map(|(font, obj_ref)| {
                let dict = ObjectSerializer::dict(vec![
                    ("Type", ObjectSerializer::name("Font")),
                    ("Subtype", ObjectSerializer::name("Type1")),
                    ("BaseFont", ObjectSerializer::name(font.base_font())),
                    ("Encoding", ObjectSerializer::name("WinAnsiEncoding")),
                ]);
                (*obj_ref, dict)
            })
            .collect();
        fonts.sort_by_key(|(obj_ref, _)| obj_ref.id);

        let header = [(catalog_ref, catalog), (pages_ref, pages), (info_ref, info)];
        for (obj_ref, obj) in header.iter().chain(fonts.iter()).chain(body.iter()) {
            offsets.push((obj_ref.id, output.len()));
            serializer.write_indirect(&mut output, *obj_ref, obj)?;
        }

        // Cross-reference table
        let xref_start = output.len();
        offsets.sort_by_key(|(id, _)| *id);
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", ids.next)?;
        writeln!(output, "0000000000 65535 f ")?;
        for (_, offset) in &offsets {
            writeln!(output, "{:010} 00000 n ", offset)?;
        }

        let trailer = ObjectSerializer::dict(vec![
            ("Size", ObjectSerializer::integer(ids.next as i64)),
            ("Root", ObjectSerializer::reference(catalog_ref)),
            ("Info", ObjectSerializer::reference(info_ref)),
        ]);
        writeln!(output, "trailer")?;
        serializer.write_object(&mut output, &trailer)?;
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        write!(output, "%%EOF")?;

        log::debug!(
            "Serialized PDF: {} pages, {} objects, {} bytes",
            self.pages.len(),
            ids.next - 1,
            output.len()
        );
        Ok(output)
    }

    /// Serialize the document and write it to `path`.
    ///
    /// Nothing is written unless serialization succeeds.
    pub fn save(self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.finish()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}
