use serde::{Deserialize, Serialize};

use super::CellValue;
use crate::error::{GridbookError, Result};

/// Headers plus rows of one table.
///
/// Every row has exactly `headers.len()` cells. A table parsed without a
/// header row gets blank header labels and `has_header_row == false`, so the
/// view can omit the header strip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    #[serde(default = "default_true")]
    pub has_header_row: bool,
}

fn default_true() -> bool {
    true
}

impl TableData {
    /// Build a table, rejecting ragged rows.
    ///
    /// When `headers` is empty but rows exist, blank headers are synthesized
    /// from the first row's width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let has_header_row = !headers.is_empty();
        let headers = if has_header_row {
            headers
        } else {
            let width = rows.first().map_or(0, Vec::len);
            vec![String::new(); width]
        };
        let table = Self {
            title: None,
            headers,
            rows,
            has_header_row,
        };
        table.validate()?;
        Ok(table)
    }

    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Check that every row is as wide as the header list.
    pub fn validate(&self) -> Result<()> {
        let width = self.headers.len();
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridbookError::parse(format!(
                    "row {} has {} cells, expected {width}",
                    i + 1,
                    row.len()
                )));
            }
        }
        Ok(())
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell at a 1-based `(row, column)`.
    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows
            .get(row.checked_sub(1)?)
            .and_then(|r| r.get(column.checked_sub(1)?))
    }

    /// Header followed by every value of a 1-based column.
    pub fn column_values(&self, column: usize) -> Option<Vec<CellValue>> {
        let idx = column.checked_sub(1)?;
        let header = self.headers.get(idx)?;
        let mut values = Vec::with_capacity(self.rows.len() + 1);
        values.push(CellValue::text(header.as_str()));
        for row in &self.rows {
            values.push(row.get(idx).cloned().unwrap_or_default());
        }
        Some(values)
    }
}
