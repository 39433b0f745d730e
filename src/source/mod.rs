//! Table sources accepted by `Grid::render`.
//!
//! A source is either markup (an HTML `<table>`) or a structured
//! `{title, headers, rows}` object. The caller picks the variant; nothing
//! here sniffs the input shape at runtime.

mod markup;
mod structured;

pub use markup::{parse_markup, parse_markup_tables};
pub use structured::StructuredSource;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::TableData;

/// Input for a grid.
///
/// In options JSON the variant is named explicitly:
/// `{"markup": "<table>…</table>"}` or `{"structured": {"headers": […], "rows": […]}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TableSource {
    /// HTML markup containing at least one `<table>`.
    Markup(String),
    /// Plain structured data.
    Structured(StructuredSource),
}

impl TableSource {
    /// Parse the source into validated table data.
    pub fn parse(&self) -> Result<TableData> {
        match self {
            Self::Markup(html) => parse_markup(html),
            Self::Structured(source) => source.to_table(),
        }
    }

    /// Read a structured source from JSON text.
    pub fn structured_from_json(json: &str) -> Result<Self> {
        Ok(Self::Structured(serde_json::from_str(json)?))
    }
}

impl From<StructuredSource> for TableSource {
    fn from(source: StructuredSource) -> Self {
        Self::Structured(source)
    }
}

impl From<TableData> for TableSource {
    fn from(table: TableData) -> Self {
        Self::Structured(StructuredSource::from(table))
    }
}
