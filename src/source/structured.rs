use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{CellValue, TableData};

/// `{ "title": …, "headers": [...], "rows": [[...], ...] }`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StructuredSource {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
}

impl StructuredSource {
    pub fn to_table(&self) -> Result<TableData> {
        Ok(TableData::new(self.headers.clone(), self.rows.clone())?.with_title(self.title.clone()))
    }
}

impl From<TableData> for StructuredSource {
    fn from(table: TableData) -> Self {
        let headers = if table.has_header_row {
            table.headers
        } else {
            Vec::new()
        };
        Self {
            title: table.title,
            headers,
            rows: table.rows,
        }
    }
}
