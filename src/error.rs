//! Structured error types for gridbook.
//!
//! Malformed sources and out-of-range edits are reported instead of silently
//! producing an empty grid.

/// All errors that can occur while parsing sources or editing a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridbookError {
    /// XML parsing error from quick-xml.
    #[error("XML parsing: {0}")]
    Xml(#[from] quick_xml::Error),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The source does not describe a table.
    #[error("Parse error: {0}")]
    Parse(String),

    /// An edit referenced rows, columns or tabs that do not exist.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Unknown theme/loader names or malformed options.
    #[error("Configuration: {0}")]
    Config(String),

    /// DOM construction failure (wasm32 shell only).
    #[error("DOM: {0}")]
    Dom(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridbookError>;

impl GridbookError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    pub(crate) fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridbookError> for wasm_bindgen::JsValue {
    fn from(e: GridbookError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for GridbookError {
    fn from(v: wasm_bindgen::JsValue) -> Self {
        Self::Dom(v.as_string().unwrap_or_else(|| format!("{v:?}")))
    }
}
