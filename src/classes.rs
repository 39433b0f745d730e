//! Class names, data attributes and fixed dimensions of the rendered widget.
//!
//! Each structural role has exactly one class; styling and event delegation
//! both key off these names.

pub const WORKSHEET: &str = "gridbook-worksheet";
pub const GRID: &str = "gridbook-grid";
pub const GRID_HEAD: &str = "gridbook-grid-head";
pub const GRID_BODY: &str = "gridbook-grid-body";
pub const ROW: &str = "gridbook-row";
pub const HEADER: &str = "gridbook-header";
pub const CELL: &str = "gridbook-cell";
pub const CELL_DATA: &str = "gridbook-cell-data";
pub const SORT: &str = "gridbook-sort";
pub const ROW_SELECT: &str = "gridbook-row-select";
pub const TABSET: &str = "gridbook-tabset";
pub const TAB: &str = "gridbook-tab";
pub const TOOLBAR: &str = "gridbook-toolbar";
pub const TOOLBAR_CONTROLS: &str = "gridbook-toolbar-controls";
pub const TOOLBAR_BUTTON: &str = "gridbook-toolbar-button";
pub const DROPDOWN: &str = "gridbook-dropdown";
pub const OVERLAY: &str = "gridbook-overlay";
pub const SLICE: &str = "gridbook-slice";
pub const DRAG_INDICATOR: &str = "gridbook-drag-indicator";
pub const DRAG_BOX: &str = "gridbook-drag-box";
pub const CONTEXTUAL: &str = "gridbook-contextual";

pub const ATTR_ROW: &str = "data-row";
pub const ATTR_COL: &str = "data-col";
pub const ATTR_TAB: &str = "data-tab-index";
pub const ATTR_ACTION: &str = "data-action";
pub const ATTR_POPOVER_ITEM: &str = "data-popover-item";
/// `from,to` pixel heights for a sliding panel transition.
pub const ATTR_ANIMATE_HEIGHT: &str = "data-animate-height";

/// Value of `data-row` on the header row.
pub const HEADER_ROW: &str = "header";

pub const ARROW_UP: &str = "\u{25B2}";
pub const ARROW_DOWN: &str = "\u{25BC}";
pub const ARROW_DOWN_UP: &str = "\u{25BC}\u{25B2}";

pub const ICON_FONT_FAMILY: &str = "icomoon";

pub const TOOLBAR_HEIGHT: f64 = 35.0;
pub const TAB_WIDTH: f64 = 150.0;

/// Duration of "fast" slide and scroll transitions.
pub const TRANSITION_MS: f64 = 200.0;
