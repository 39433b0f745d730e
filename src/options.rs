//! Construction options for grids and workbooks.
//!
//! Options arrive as camelCase JSON (natively) or a plain JS object (through
//! `serde-wasm-bindgen`). Every field is optional.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::error::{GridbookError, Result};
use crate::loader::LoaderKind;
use crate::source::TableSource;
use crate::theme::Theme;
use crate::workbook::ToolbarAction;

/// Column width policy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CellWidth {
    /// Split the available width evenly between visible columns.
    #[default]
    Auto,
    /// Fixed content width in pixels; the grid is sized to fit.
    Fixed(f64),
}

impl Serialize for CellWidth {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Auto => serializer.serialize_str("auto"),
            Self::Fixed(w) => serializer.serialize_f64(*w),
        }
    }
}

impl<'de> Deserialize<'de> for CellWidth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct CellWidthVisitor;

        impl Visitor<'_> for CellWidthVisitor {
            type Value = CellWidth;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"auto\" or a width in pixels")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<CellWidth, E> {
                if v.eq_ignore_ascii_case("auto") {
                    return Ok(CellWidth::Auto);
                }
                v.trim_end_matches("px")
                    .trim()
                    .parse::<f64>()
                    .map(CellWidth::Fixed)
                    .map_err(|_| E::custom(format!("invalid cellWidth \"{v}\"")))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<CellWidth, E> {
                Ok(CellWidth::Fixed(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<CellWidth, E> {
                Ok(CellWidth::Fixed(v as f64))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<CellWidth, E> {
                Ok(CellWidth::Fixed(v as f64))
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<CellWidth, E> {
                Ok(CellWidth::Auto)
            }

            fn visit_none<E: de::Error>(self) -> std::result::Result<CellWidth, E> {
                Ok(CellWidth::Auto)
            }
        }

        deserializer.deserialize_any(CellWidthVisitor)
    }
}

/// Recognized options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridOptions {
    /// Table sources; each becomes one tab.
    pub data: Vec<TableSource>,
    /// Id of the element the workbook is attached to.
    pub container: Option<String>,
    /// Attach and draw immediately after construction.
    pub render: bool,
    /// Theme name; `None` selects the default theme.
    pub theme: Option<String>,
    /// Loader animation name.
    pub loader: String,
    /// Show the tab strip.
    pub tabset: bool,
    /// Ordered toolbar action ids.
    pub toolbar: Vec<String>,
    /// Enable header drag-to-reorder.
    #[serde(rename = "DnD", alias = "dnd")]
    pub dnd: bool,
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub border_width: f64,
    pub cell_height: Option<f64>,
    pub cell_width: CellWidth,
    pub cell_padding: f64,
    /// Alternate row background colors.
    pub alt_row_color: bool,
}

pub const DEFAULT_BORDER_WIDTH: f64 = 1.0;
pub const DEFAULT_CELL_PADDING: f64 = 6.0;

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            container: None,
            render: true,
            theme: None,
            loader: LoaderKind::default().as_str().to_string(),
            tabset: false,
            toolbar: ToolbarAction::DEFAULT_ORDER
                .iter()
                .map(|a| a.id().to_string())
                .collect(),
            dnd: true,
            height: None,
            width: None,
            border_width: DEFAULT_BORDER_WIDTH,
            cell_height: None,
            cell_width: CellWidth::Auto,
            cell_padding: DEFAULT_CELL_PADDING,
            alt_row_color: true,
        }
    }
}

impl GridOptions {
    /// Parse options from JSON text and validate them.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut options: Self = serde_json::from_str(json)?;
        options.validate();
        Ok(options)
    }

    /// Replace invalid values with defaults.
    ///
    /// Returns the problems that were corrected, each as a `Config` error;
    /// every one is also logged as a warning.
    pub fn validate(&mut self) -> Vec<GridbookError> {
        let mut problems = Vec::new();

        if let Some(name) = self.theme.as_deref() {
            if let Err(e) = Theme::named(name) {
                problems.push(e);
                self.theme = None;
            }
        }
        if let Err(e) = self.loader.parse::<LoaderKind>() {
            problems.push(e);
            self.loader = LoaderKind::default().as_str().to_string();
        }
        if let CellWidth::Fixed(w) = self.cell_width {
            if !w.is_finite() || w <= 0.0 {
                problems.push(GridbookError::Config(format!("invalid cellWidth {w}")));
                self.cell_width = CellWidth::Auto;
            }
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            problems.push(GridbookError::Config(format!(
                "invalid borderWidth {}",
                self.border_width
            )));
            self.border_width = DEFAULT_BORDER_WIDTH;
        }
        if !self.cell_padding.is_finite() || self.cell_padding < 0.0 {
            problems.push(GridbookError::Config(format!(
                "invalid cellPadding {}",
                self.cell_padding
            )));
            self.cell_padding = DEFAULT_CELL_PADDING;
        }
        for dim in [&mut self.height, &mut self.width, &mut self.cell_height] {
            if dim.is_some_and(|v| !v.is_finite() || v <= 0.0) {
                problems.push(GridbookError::Config(format!(
                    "ignoring non-positive dimension {}",
                    dim.unwrap_or_default()
                )));
                *dim = None;
            }
        }

        for problem in &problems {
            warn!("{problem}; using default");
        }
        problems
    }

    /// The loader animation, defaulting when the name is unknown.
    pub fn loader_kind(&self) -> LoaderKind {
        self.loader.parse().unwrap_or_default()
    }

    /// The theme, defaulting when the name is unknown.
    pub fn resolve_theme(&self) -> Theme {
        self.theme
            .as_deref()
            .and_then(|name| Theme::named(name).ok())
            .unwrap_or_default()
    }

    /// Sum of border and padding on one side of a cell.
    pub fn cell_inset(&self) -> f64 {
        self.border_width + self.cell_padding
    }
}
