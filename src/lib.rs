//! gridbook - editable datagrid and tabbed workbook for the web
//!
//! Builds an interactive table view from an HTML `<table>` or structured
//! `{title, headers, rows}` data, compiled to WebAssembly:
//! - Sorting, column drag-and-drop, row/column insertion and removal
//! - One undo snapshot per mutation on a bounded multi-level undo stack
//! - Expandable detail panels, loading overlay, corner markers
//! - Tabbed workbook with a toolbar and popover menus
//!
//! The model ([`Grid`], [`Workbook`]) is platform independent and renders to a
//! [`ViewNode`] tree. On `wasm32` the `dom` module materializes that tree into
//! a container element and wires up the browser events.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridbookView, initLogging } from 'gridbook';
//! await init();
//! initLogging('info');
//! const view = new GridbookView({
//!   container: 'sheet',
//!   render: true,
//!   tabset: true,
//!   data: [{ markup: document.getElementById('source').outerHTML }],
//! });
//! view.sort(1);
//! ```

pub mod classes;
pub mod error;
pub mod grid;
pub mod loader;
pub mod options;
pub mod source;
pub mod theme;
pub mod types;
pub mod view;
pub mod workbook;

// Browser shell
#[cfg(target_arch = "wasm32")]
pub mod dom;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use dom::{init_logging, GridbookView};
pub use error::{GridbookError, Result};
pub use grid::{Grid, GridEvent};
pub use options::GridOptions;
pub use source::TableSource;
pub use theme::Theme;
pub use types::*;
pub use view::ViewNode;
pub use workbook::Workbook;

/// Parse an HTML table and return a JSON string of `{title, headers, rows, hasHeaderRow}`.
///
/// # Errors
/// Returns an error if the markup holds no `<table>` or its rows are ragged.
#[wasm_bindgen(js_name = "parseTable")]
pub fn parse_table(html: &str) -> std::result::Result<String, JsValue> {
    let table = source::parse_markup(html).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&table)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Parse an HTML table and return it as a `JsValue`.
///
/// # Errors
/// Returns an error if the markup holds no `<table>` or its rows are ragged.
#[wasm_bindgen(js_name = "parseTableToJs")]
pub fn parse_table_to_js(html: &str) -> std::result::Result<JsValue, JsValue> {
    let table = source::parse_markup(html).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&table)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
