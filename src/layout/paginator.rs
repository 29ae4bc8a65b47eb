//! Paginated rendering of codes into a PDF sheet.

use super::grid::{GridLayout, Placement};
use crate::codes::Code;
use crate::config::SheetConfig;
use crate::error::Result;
use crate::writer::{encode_win_ansi, PdfWriter, QrEncoder, SymbolEncoder};
use std::path::Path;

/// Progress of one rendering run.
///
/// `Start → (Accumulating → PageFull)* → Finalized`. There is no separate
/// new-page state: placing a symbol from `Start`, or from `PageFull { page }`,
/// opens a page and moves to `Accumulating { page: page + 1, .. }` (or straight
/// to `PageFull` when a page holds one symbol). [`PaginatorState::place`]
/// reports that transition through its flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginatorState {
    /// No page opened yet
    Start,
    /// Page `page` holds `filled` symbols and has room for more
    Accumulating {
        /// Zero-based page number
        page: usize,
        /// Symbols placed on the page
        filled: usize,
    },
    /// Page `page` is at capacity
    PageFull {
        /// Zero-based page number
        page: usize,
    },
    /// The document has been closed with `pages` pages
    Finalized {
        /// Total pages in the document
        pages: usize,
    },
}

impl PaginatorState {
    /// State after placing one more symbol on a grid of `capacity` cells.
    ///
    /// The flag is true when that symbol opens a new page. Has no effect once
    /// finalized.
    pub fn place(self, capacity: usize) -> (Self, bool) {
        let (page, filled, opens_page) = match self {
            PaginatorState::Start => (0, 1, true),
            PaginatorState::Accumulating { page, filled } => (page, filled + 1, false),
            PaginatorState::PageFull { page } => (page + 1, 1, true),
            PaginatorState::Finalized { .. } => return (self, false),
        };
        let next = if filled >= capacity {
            PaginatorState::PageFull { page }
        } else {
            PaginatorState::Accumulating { page, filled }
        };
        (next, opens_page)
    }

    /// Close the run.
    pub fn finalize(self) -> Self {
        let pages = match self {
            PaginatorState::Start => 0,
            PaginatorState::Accumulating { page, .. } | PaginatorState::PageFull { page } => {
                page + 1
            },
            PaginatorState::Finalized { pages } => pages,
        };
        PaginatorState::Finalized { pages }
    }
}

/// Placements drawn on one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSummary {
    /// Zero-based page number
    pub index: usize,
    /// Symbols on the page in drawing order
    pub placements: Vec<Placement>,
}

/// A finished sheet: the serialized PDF plus what went where.
#[derive(Debug, Clone)]
pub struct SheetDocument {
    bytes: Vec<u8>,
    pages: Vec<PageSummary>,
}

impl SheetDocument {
    /// Serialized PDF.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the document, returning the serialized PDF.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Per-page placement summary.
    pub fn pages(&self) -> &[PageSummary] {
        &self.pages
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All placements in input order.
    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.pages.iter().flat_map(|page| page.placements.iter())
    }

    /// Write the PDF to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, &self.bytes)?;
        log::info!("Saved {} pages to {}", self.page_count(), path.display());
        Ok(())
    }
}

/// Lays codes out on a grid and draws each one as a captioned symbol.
pub struct Paginator<E = QrEncoder> {
    config: SheetConfig,
    layout: GridLayout,
    encoder: E,
}

impl Paginator<QrEncoder> {
    /// Create a paginator that draws QR symbols.
    pub fn new(config: &SheetConfig) -> Result<Self> {
        Self::with_encoder(config, QrEncoder::new(config.qr_options()))
    }
}

impl<E: SymbolEncoder> Paginator<E> {
    /// Create a paginator with a custom symbol encoder.
    pub fn with_encoder(config: &SheetConfig, encoder: E) -> Result<Self> {
        let layout = GridLayout::new(config.layout_params())?;
        Ok(Self {
            config: config.clone(),
            layout,
            encoder,
        })
    }

    /// The grid in use.
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Render `codes` into an in-memory document.
    ///
    /// The first code that cannot be encoded aborts the whole run.
    pub fn render(&self, codes: &[Code]) -> Result<SheetDocument> {
        if let Some(overlap) = self.layout.overlap() {
            log::warn!("Symbols will overlap: {}", overlap);
        }

        let params = self.layout.params();
        let capacity = self.layout.capacity();
        let font = self.config.caption_font;
        let font_size = self.config.caption_font_size;

        let mut writer = PdfWriter::with_config(self.config.writer_config());
        let mut pages: Vec<PageSummary> = Vec::with_capacity(self.layout.page_count(codes.len()));
        let mut state = PaginatorState::Start;

        for (page_index, chunk) in codes.chunks(capacity).enumerate() {
            let mut page = writer.add_page(params.page_width, params.page_height);
            let mut placements = Vec::with_capacity(chunk.len());

            for (offset, code) in chunk.iter().enumerate() {
                let image = self.encoder.encode(code.as_str())?;
                let placement = self.layout.placement(page_index * capacity + offset, code);

                let (next, opens_page) = state.place(capacity);
                log::debug!("{:?} -> {:?} (new page: {})", state, next, opens_page);
                state = next;

                page.draw_image(image, &self.layout.symbol_rect(&placement));

                let caption = encode_win_ansi(code.as_str());
                let caption_x = placement.x
                    + (params.symbol_size - font.encoded_width(&caption, font_size)) / 2.0;
                let caption_y = placement.y - params.symbol_size - self.config.caption_offset;
                page.add_encoded_text(&caption, caption_x, caption_y, font, font_size);

                placements.push(placement);
            }

            page.finish();
            pages.push(PageSummary {
                index: page_index,
                placements,
            });
        }

        let finalized = state.finalize();
        log::debug!("{:?} -> {:?}", state, finalized);

        let bytes = writer.finish()?;
        log::info!("Rendered {} codes on {} pages", codes.len(), pages.len());
        Ok(SheetDocument { bytes, pages })
    }
}

/// Render `codes` with `config` and write the PDF to `output_path`.
///
/// The file is written only after the whole document has been serialized.
pub fn paginate_and_render(
    codes: &[Code],
    config: &SheetConfig,
    output_path: impl AsRef<Path>,
) -> Result<SheetDocument> {
    let document = Paginator::new(config)?.render(codes)?;
    document.save(output_path)?;
    Ok(document)
}
