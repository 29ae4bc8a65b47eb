//! Grid layout and pagination properties.

use proptest::prelude::*;
use qrsheet::config::mm;
use qrsheet::layout::{GridLayout, LayoutParams};
use qrsheet::{Code, SheetConfig};

fn default_grid() -> GridLayout {
    GridLayout::new(SheetConfig::default().layout_params()).unwrap()
}

fn grid(columns: usize, rows: usize) -> GridLayout {
    GridLayout::new(LayoutParams {
        columns,
        rows,
        ..SheetConfig::default().layout_params()
    })
    .unwrap()
}

proptest! {
    #[test]
    fn page_count_is_ceiling(n in 0usize..5000, columns in 1usize..8, rows in 1usize..8) {
        let grid = grid(columns, rows);
        let capacity = columns * rows;
        let pages = grid.page_count(n);
        prop_assert!(pages * capacity >= n);
        if n == 0 {
            prop_assert_eq!(pages, 0);
        } else {
            prop_assert!((pages - 1) * capacity < n);
        }
    }

    #[test]
    fn slot_is_row_major(i in 0usize..10_000, columns in 1usize..8, rows in 1usize..8) {
        let grid = grid(columns, rows);
        let capacity = columns * rows;
        let (page, row, column) = grid.slot(i);
        prop_assert_eq!(page, i / capacity);
        prop_assert_eq!(row, (i % capacity) / columns);
        prop_assert_eq!(column, (i % capacity) % columns);
        prop_assert!(row < rows && column < columns);
        prop_assert_eq!(page * capacity + row * columns + column, i);
    }

    #[test]
    fn placement_is_deterministic(i in 0usize..1000) {
        let code = Code::new("REPEAT").unwrap();
        let grid = default_grid();
        prop_assert_eq!(grid.placement(i, &code), grid.placement(i, &code));
    }
}

#[test]
fn test_a4_column_spacing_equals_cell_width() {
    let grid = default_grid();
    for row in 0..4 {
        let (x0, y0) = grid.cell_origin(row, 0);
        let (x1, y1) = grid.cell_origin(row, 1);
        assert!((x1 - x0 - grid.cell_width()).abs() < 1e-3);
        assert_eq!(y0, y1);
    }
}

#[test]
fn test_symbols_lie_strictly_inside_cells() {
    let grid = default_grid();
    let params = *grid.params();
    let size = params.symbol_size;
    assert!((size - mm(50.0)).abs() < 1e-4);

    for row in 0..params.rows {
        for column in 0..params.columns {
            let (x, y) = grid.cell_origin(row, column);
            let cell_left = params.margin + column as f32 * grid.cell_width();
            let cell_top = params.page_height - params.margin - row as f32 * grid.cell_height();

            assert!(x > cell_left);
            assert!(x + size < cell_left + grid.cell_width());
            assert!(y < cell_top);
            assert!(y - size > cell_top - grid.cell_height());
        }
    }
}

#[test]
fn test_rows_descend_from_top() {
    let grid = default_grid();
    let (_, top) = grid.cell_origin(0, 0);
    let (_, below) = grid.cell_origin(1, 0);
    assert!(top > below);
    assert!((top - below - grid.cell_height()).abs() < 1e-3);
}
