//! Column widths, row heights and pixel geometry of a grid.
//!
//! Cells are content-box sized with `cellPadding` and `borderWidth` on every
//! side; neighbouring cells overlap by one border, so column pitch is the outer
//! width minus one border.

use serde::Serialize;

use crate::options::{CellWidth, GridOptions};

/// Measurements supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Width available to the grid when `cellWidth` is `auto`.
    pub container_width: f64,
    /// Height of one line of cell text.
    pub line_height: f64,
    pub scrollbar_width: f64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            container_width: 800.0,
            // 1.2em at a 16px font size
            line_height: 19.2,
            scrollbar_width: 17.0,
        }
    }
}

/// What the layout needs to know about the grid's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentShape {
    pub columns: usize,
    pub rows: usize,
    /// Most text lines in any body cell.
    pub cell_lines: usize,
    /// Most text lines in any header.
    pub header_lines: usize,
    pub has_header: bool,
}

/// Result of `auto_size`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLayout {
    /// Width the columns were fitted into.
    pub grid_width: f64,
    /// Set when a fixed `cellWidth` dictates the container width.
    pub fixed_width: Option<f64>,
    /// Content width of every cell.
    pub column_width: f64,
    /// Width of the cell-data element inside a cell.
    pub data_width: f64,
    /// Height of the cell-data element, raised to honor `cellHeight`.
    pub data_height: f64,
    pub header_data_height: f64,
    /// Outer height of the header row; zero without a header row.
    pub header_height: f64,
    /// Outer height of one body row.
    pub row_height: f64,
    pub body_margin_top: f64,
    /// The body needs a vertical scrollbar.
    pub body_scrolls: bool,
    pub border_width: f64,
    pub inset: f64,
    pub columns: usize,
}

impl GridLayout {
    pub fn compute(options: &GridOptions, metrics: &Metrics, shape: &ContentShape) -> Self {
        let bw = options.border_width;
        let pad = options.cell_padding;
        let inset = bw + pad;
        let n = shape.columns as f64;

        let data_height = shape.cell_lines.max(1) as f64 * metrics.line_height;
        let calculated = data_height + 2.0 * inset;
        let extra = match options.cell_height {
            Some(h) if h > calculated => h - calculated,
            _ => 0.0,
        };
        let data_height = data_height + extra;
        let row_height = data_height + 2.0 * inset;

        let header_data_height = shape.header_lines.max(1) as f64 * metrics.line_height;
        let header_height = if shape.has_header {
            header_data_height + 2.0 * inset
        } else {
            0.0
        };

        let fixed_width = match options.cell_width {
            CellWidth::Fixed(cw) => Some(n * cw + (n + 1.0) * bw + 2.0 * n * pad),
            CellWidth::Auto => None,
        };
        let mut grid_width = fixed_width
            .or(options.width)
            .unwrap_or(metrics.container_width);

        let content_height = if shape.rows == 0 {
            header_height
        } else {
            header_height + shape.rows as f64 * (row_height - bw) + bw
        };
        let body_scrolls = options.height.is_some_and(|h| content_height > h);
        if body_scrolls {
            grid_width -= metrics.scrollbar_width;
        }

        let column_width = match options.cell_width {
            CellWidth::Fixed(cw) => cw,
            CellWidth::Auto if shape.columns > 0 => ((grid_width - bw) / n - bw - 2.0 * pad).max(0.0),
            CellWidth::Auto => 0.0,
        };

        Self {
            grid_width,
            fixed_width,
            column_width,
            data_width: (column_width - 2.0 * inset).max(0.0),
            data_height,
            header_data_height,
            header_height,
            row_height,
            body_margin_top: header_height,
            body_scrolls,
            border_width: bw,
            inset,
            columns: shape.columns,
        }
    }

    /// Outer width of one column.
    pub fn outer_width(&self) -> f64 {
        self.column_width + 2.0 * self.inset
    }

    /// Left edge of the `position`-th visible column (1-based).
    pub fn column_left(&self, position: usize) -> f64 {
        position.saturating_sub(1) as f64 * (self.outer_width() - self.border_width)
    }

    /// Visible column after which a column dropped at grid-relative `x` is
    /// inserted; 0 means before the first.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn drop_target(&self, x: f64) -> usize {
        let width = self.outer_width();
        if width <= 0.0 {
            return 0;
        }
        let slot = ((width / 2.0 + x) / width).floor();
        if slot <= 0.0 {
            0
        } else if slot >= self.columns as f64 {
            self.columns
        } else {
            slot as usize
        }
    }

    /// X of the insertion indicator drawn after visible column `after`.
    pub fn indicator_x(&self, after: usize) -> f64 {
        if after == 0 {
            return 0.0;
        }
        self.column_left(after) + self.outer_width() - 3.0 * self.border_width
    }

    /// Scroll offsets `(top, left)` that bring a 1-based cell into view.
    pub fn scroll_offset(&self, row: usize, position: usize) -> (f64, f64) {
        let top = row.saturating_sub(1) as f64 * self.row_height - 2.0 * self.border_width;
        let left = position.saturating_sub(1) as f64 * self.outer_width() - 2.0 * self.border_width;
        (top.max(0.0), left.max(0.0))
    }
}
