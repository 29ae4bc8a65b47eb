//! Grid geometry: where each symbol of a sheet goes.
//!
//! Coordinates are PDF user space in points, origin at the bottom-left corner
//! of the page. Row 0 is the topmost row.

use crate::codes::Code;
use crate::error::{Error, Result};
use crate::writer::ImagePlacement;

/// Fixed geometry of one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Page width in points
    pub page_width: f32,
    /// Page height in points
    pub page_height: f32,
    /// Inset from every page edge
    pub margin: f32,
    /// Side length of each square symbol
    pub symbol_size: f32,
    /// Symbols per row
    pub columns: usize,
    /// Rows per page
    pub rows: usize,
}

impl LayoutParams {
    /// Symbols per page.
    pub fn capacity(&self) -> usize {
        self.columns * self.rows
    }

    /// Reject non-positive or non-finite values.
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("page width", self.page_width),
            ("page height", self.page_height),
            ("margin", self.margin),
            ("symbol size", self.symbol_size),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidLayout(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if self.columns == 0 || self.rows == 0 {
            return Err(Error::InvalidLayout(format!(
                "grid must have at least one column and one row, got {}x{}",
                self.columns, self.rows
            )));
        }
        if self.page_width <= 2.0 * self.margin || self.page_height <= 2.0 * self.margin {
            return Err(Error::InvalidLayout(format!(
                "margin {} leaves no printable area on a {}x{} page",
                self.margin, self.page_width, self.page_height
            )));
        }
        Ok(())
    }
}

/// Where one code lands on the sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Flat index of the code in the input sequence
    pub index: usize,
    /// The code drawn here
    pub code: Code,
    /// Zero-based page number
    pub page: usize,
    /// Row within the page, 0 at the top
    pub row: usize,
    /// Column within the row, 0 at the left
    pub column: usize,
    /// Left edge of the symbol
    pub x: f32,
    /// Top edge of the symbol
    pub y: f32,
}

/// Validated grid with its derived cell size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    params: LayoutParams,
    cell_width: f32,
    cell_height: f32,
}

impl GridLayout {
    /// Validate `params` and derive the cell size.
    pub fn new(params: LayoutParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            cell_width: (params.page_width - 2.0 * params.margin) / params.columns as f32,
            cell_height: (params.page_height - 2.0 * params.margin) / params.rows as f32,
        })
    }

    /// The parameters this grid was built from.
    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Symbols per page.
    pub fn capacity(&self) -> usize {
        self.params.capacity()
    }

    /// Width of one cell.
    pub fn cell_width(&self) -> f32 {
        self.cell_width
    }

    /// Height of one cell.
    pub fn cell_height(&self) -> f32 {
        self.cell_height
    }

    /// Pages needed for `count` codes.
    pub fn page_count(&self, count: usize) -> usize {
        count.div_ceil(self.capacity())
    }

    /// `(page, row, column)` of the code at flat index `index`.
    pub fn slot(&self, index: usize) -> (usize, usize, usize) {
        let capacity = self.capacity();
        let within = index % capacity;
        (index / capacity, within / self.params.columns, within % self.params.columns)
    }

    /// Left and top edge of the symbol centered in cell `(row, column)`.
    pub fn cell_origin(&self, row: usize, column: usize) -> (f32, f32) {
        let p = &self.params;
        let x = p.margin + column as f32 * self.cell_width + (self.cell_width - p.symbol_size) / 2.0;
        let y = p.page_height
            - p.margin
            - row as f32 * self.cell_height
            - (self.cell_height - p.symbol_size) / 2.0;
        (x, y)
    }

    /// Placement of `code` at flat index `index`.
    pub fn placement(&self, index: usize, code: &Code) -> Placement {
        let (page, row, column) = self.slot(index);
        let (x, y) = self.cell_origin(row, column);
        Placement {
            index,
            code: code.clone(),
            page,
            row,
            column,
            x,
            y,
        }
    }

    /// Image rectangle for `placement`, lower-left corner at `(x, y - size)`.
    pub fn symbol_rect(&self, placement: &Placement) -> ImagePlacement {
        let size = self.params.symbol_size;
        ImagePlacement::new(placement.x, placement.y - size, size, size)
    }

    /// Describe how the grid overflows the printable area, if it does.
    ///
    /// Overflow is tolerated: symbols overlap each other or run off the page.
    pub fn overlap(&self) -> Option<String> {
        let p = &self.params;
        let mut problems = Vec::new();
        if p.symbol_size > self.cell_width {
            problems.push(format!(
                "{} columns of {}pt exceed the printable width {}pt",
                p.columns,
                p.symbol_size,
                p.page_width - 2.0 * p.margin
            ));
        }
        if p.symbol_size > self.cell_height {
            problems.push(format!(
                "{} rows of {}pt exceed the printable height {}pt",
                p.rows,
                p.symbol_size,
                p.page_height - 2.0 * p.margin
            ));
        }
        if problems.is_empty() {
            None
        } else {
            Some(problems.join("; "))
        }
    }
}
