//! Grid paginator.
//!
//! Maps a flat sequence of codes onto pages of `columns x rows` cells in
//! row-major order and draws a captioned symbol in each cell. Code `i` lands
//! on page `i / capacity`, row `(i % capacity) / columns`, column
//! `(i % capacity) % columns`.

mod grid;
mod paginator;

pub use grid::{GridLayout, LayoutParams, Placement};
pub use paginator::{paginate_and_render, PageSummary, Paginator, PaginatorState, SheetDocument};
