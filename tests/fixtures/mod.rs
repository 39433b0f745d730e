//! Test fixtures for building table sources and grids in memory.
//!
//! # Example
//!
//! ```rust,ignore
//! use fixtures::TableBuilder;
//!
//! let grid = TableBuilder::new()
//!     .id("stock")
//!     .headers(&["Item", "Qty"])
//!     .row(&["apple", "3"])
//!     .grid();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridbook::source::StructuredSource;
use gridbook::{CellValue, Grid, GridOptions, TableSource, Workbook};

// ============================================================================
// Table Builder
// ============================================================================

/// Builds the same table as markup or as structured data.
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    id: Option<String>,
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
    thead: bool,
}

impl TableBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table `id`, which becomes the grid title.
    #[must_use]
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    #[must_use]
    pub fn headers(mut self, headers: &[&str]) -> Self {
        self.headers = headers.iter().map(|h| (*h).to_string()).collect();
        self
    }

    /// Add a row; an empty string is an empty cell.
    #[must_use]
    pub fn row(mut self, cells: &[&str]) -> Self {
        self.rows.push(
            cells
                .iter()
                .map(|c| (!c.is_empty()).then(|| (*c).to_string()))
                .collect(),
        );
        self
    }

    /// Wrap the header row in `<thead>` and the rows in `<tbody>`.
    #[must_use]
    pub fn with_thead(mut self) -> Self {
        self.thead = true;
        self
    }

    /// The table as an HTML `<table>`.
    #[must_use]
    pub fn markup(&self) -> String {
        let mut html = match &self.id {
            Some(id) => format!("<table id=\"{id}\">"),
            None => "<table>".to_string(),
        };
        if !self.headers.is_empty() {
            if self.thead {
                html.push_str("<thead>");
            }
            html.push_str("<tr>");
            for h in &self.headers {
                html.push_str(&format!("<th>{h}</th>"));
            }
            html.push_str("</tr>");
            if self.thead {
                html.push_str("</thead>");
            }
        }
        if self.thead {
            html.push_str("<tbody>");
        }
        for row in &self.rows {
            html.push_str("<tr>");
            for cell in row {
                match cell {
                    Some(text) => html.push_str(&format!("<td>{text}</td>")),
                    None => html.push_str("<td></td>"),
                }
            }
            html.push_str("</tr>");
        }
        if self.thead {
            html.push_str("</tbody>");
        }
        html.push_str("</table>");
        html
    }

    /// The table as structured data; cells are text.
    #[must_use]
    pub fn structured(&self) -> StructuredSource {
        StructuredSource {
            title: self.id.clone(),
            headers: self.headers.clone(),
            rows: self
                .rows
                .iter()
                .map(|r| {
                    r.iter()
                        .map(|c| c.as_deref().map_or(CellValue::Empty, CellValue::text))
                        .collect()
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn source(&self) -> TableSource {
        TableSource::Markup(self.markup())
    }

    /// A grid over the markup form, with default options.
    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid_with(&GridOptions::default())
    }

    #[must_use]
    pub fn grid_with(&self, options: &GridOptions) -> Grid {
        let mut grid = Grid::from_source(&self.source(), options).expect("fixture should parse");
        grid.drain_events();
        grid
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Row contents as display strings.
pub fn row_strings(grid: &Grid) -> Vec<Vec<String>> {
    grid.rows()
        .iter()
        .map(|r| r.iter().map(ToString::to_string).collect())
        .collect()
}

/// The two-column table used by the sort scenarios.
#[must_use]
pub fn ab_table() -> TableBuilder {
    TableBuilder::new()
        .headers(&["A", "B"])
        .row(&["1", "2"])
        .row(&["3", "4"])
}

/// A workbook over `tables`, with the tab strip on and the given toolbar.
pub fn workbook(tables: &[TableBuilder], toolbar: &[&str]) -> Workbook {
    Workbook::new(GridOptions {
        data: tables.iter().map(TableBuilder::source).collect(),
        tabset: true,
        toolbar: toolbar.iter().map(|t| (*t).to_string()).collect(),
        ..GridOptions::default()
    })
    .expect("fixture workbook should build")
}
