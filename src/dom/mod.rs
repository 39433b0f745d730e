//! Browser shell around a [`Workbook`].
//!
//! The container's markup is rebuilt from the workbook view after every
//! change. Pointer, click and focus listeners are attached once to the
//! container and resolve their targets through the rendered `data-*`
//! attributes. A single timeout drives `Workbook::tick` whenever something
//! is scheduled.

mod events;
mod logging;
mod render;

pub use logging::init_logging;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Element, FocusEvent, MouseEvent};

use crate::error::GridbookError;
use crate::grid::{Corner, DetailSpec, Grid};
use crate::loader::LoaderKind;
use crate::options::GridOptions;
use crate::source::TableSource;
use crate::types::CellValue;
use crate::workbook::{TabRef, Workbook};

pub(crate) fn now_ms() -> f64 {
    if let Some(window) = web_sys::window() {
        if let Some(perf) = window.performance() {
            return perf.now();
        }
    }
    js_sys::Date::now()
}

/// State shared with event and timer closures.
pub(crate) struct SharedState {
    pub(crate) workbook: Workbook,
    pub(crate) root: Element,
    pub(crate) hovered_tab: Option<usize>,
    pub(crate) tick_timer: Option<i32>,
    pub(crate) tick_closure: Option<Closure<dyn FnMut()>>,
}

/// The workbook widget exported to JavaScript.
#[wasm_bindgen]
pub struct GridbookView {
    state: Rc<RefCell<SharedState>>,
    #[allow(dead_code)]
    closures: Vec<Closure<dyn FnMut(MouseEvent)>>,
    #[allow(dead_code)]
    focus_closure: Closure<dyn FnMut(FocusEvent)>,
}

fn js_err(e: GridbookError) -> JsValue {
    JsValue::from(e)
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| js_err(GridbookError::Config(e.to_string())))
}

impl GridbookView {
    /// Run `op` on the active grid, then redraw.
    fn with_active<R>(
        &self,
        op: impl FnOnce(&mut Grid, f64) -> crate::error::Result<R>,
    ) -> Result<R, JsValue> {
        let result = {
            let mut s = self.state.borrow_mut();
            let grid = s
                .workbook
                .active_grid_mut()
                .ok_or_else(|| GridbookError::invalid("workbook has no active grid"))
                .map_err(js_err)?;
            op(grid, now_ms()).map_err(js_err)?
        };
        Self::refresh_dom(&self.state);
        Ok(result)
    }
}

#[wasm_bindgen]
impl GridbookView {
    /// Build a workbook from `options` and attach it to the element whose id
    /// is `options.container`.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<GridbookView, JsValue> {
        console_error_panic_hook::set_once();

        let options: GridOptions = if options.is_undefined() || options.is_null() {
            GridOptions::default()
        } else {
            from_js(options)?
        };
        let container = options
            .container
            .clone()
            .ok_or_else(|| js_err(GridbookError::Config("missing container id".into())))?;
        let root = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&container))
            .ok_or_else(|| js_err(GridbookError::Dom(format!("no element with id \"{container}\""))))?;
        let render_now = options.render;
        let workbook = Workbook::new(options).map_err(js_err)?;

        let state = Rc::new(RefCell::new(SharedState {
            workbook,
            root: root.clone(),
            hovered_tab: None,
            tick_timer: None,
            tick_closure: None,
        }));
        let (closures, focus_closure) = Self::attach_listeners(&state, &root);
        let view = GridbookView {
            state,
            closures,
            focus_closure,
        };
        if render_now {
            view.auto_size();
        }
        Ok(view)
    }

    /// Redraw the active grid.
    pub fn refresh(&self) {
        Self::refresh_dom(&self.state);
    }

    /// Measure the container and recompute the active grid's layout.
    #[wasm_bindgen(js_name = "autoSize")]
    pub fn auto_size(&self) {
        // The first pass renders so the grid body exists to measure.
        Self::materialize(&self.state);
        let metrics = render::measure(&self.state.borrow().root);
        if let Some(grid) = self.state.borrow_mut().workbook.active_grid_mut() {
            grid.auto_size(metrics);
        }
        Self::refresh_dom(&self.state);
    }

    /// Replace the active grid's data with `{markup}` or `{structured}`.
    pub fn render(&self, source: JsValue) -> Result<(), JsValue> {
        let source: TableSource = from_js(source)?;
        self.with_active(|grid, _| grid.render(&source))
    }

    /// Add a tab for `source`; returns its 1-based index.
    #[wasm_bindgen(js_name = "addTab")]
    pub fn add_tab(&self, title: Option<String>, source: JsValue) -> Result<usize, JsValue> {
        let source: TableSource = from_js(source)?;
        let index = self
            .state
            .borrow_mut()
            .workbook
            .add_tab(title.as_deref(), &source)
            .map_err(js_err)?;
        Self::refresh_dom(&self.state);
        Ok(index)
    }

    /// Select a tab by 1-based index, then call `callback` if given.
    #[wasm_bindgen(js_name = "selectTab")]
    pub fn select_tab(&self, index: usize, callback: Option<js_sys::Function>) -> Result<(), JsValue> {
        self.state
            .borrow_mut()
            .workbook
            .select_tab(TabRef::Index(index), None)
            .map_err(js_err)?;
        Self::refresh_dom(&self.state);
        if let Some(callback) = callback {
            callback.call0(&JsValue::NULL)?;
        }
        Ok(())
    }

    /// Run a toolbar action by id.
    pub fn dispatch(&self, action: &str) -> Result<bool, JsValue> {
        let ran = self
            .state
            .borrow_mut()
            .workbook
            .dispatch(action, now_ms())
            .map_err(js_err)?;
        Self::refresh_dom(&self.state);
        Ok(ran)
    }

    /// The active grid's table as `{title, headers, rows, hasHeaderRow}`.
    pub fn data(&self) -> Result<JsValue, JsValue> {
        let s = self.state.borrow();
        let grid = s
            .workbook
            .active_grid()
            .ok_or_else(|| js_err(GridbookError::invalid("workbook has no active grid")))?;
        serde_wasm_bindgen::to_value(grid.table())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    #[wasm_bindgen(js_name = "insertRow")]
    pub fn insert_row(&self, after: Option<usize>, values: JsValue) -> Result<(), JsValue> {
        let values: Option<Vec<CellValue>> = from_js(values)?;
        self.with_active(|grid, _| grid.insert_row(after, values))
    }

    #[wasm_bindgen(js_name = "removeRow")]
    pub fn remove_row(&self, index: Option<usize>) -> Result<(), JsValue> {
        self.with_active(|grid, _| grid.remove_row(index))
    }

    #[wasm_bindgen(js_name = "insertColumn")]
    pub fn insert_column(&self, after: Option<usize>, values: JsValue) -> Result<(), JsValue> {
        let values: Option<Vec<CellValue>> = from_js(values)?;
        self.with_active(|grid, _| grid.insert_column(after, values))
    }

    #[wasm_bindgen(js_name = "removeColumn")]
    pub fn remove_column(&self, index: Option<usize>) -> Result<(), JsValue> {
        self.with_active(|grid, _| grid.remove_column(index))
    }

    /// Sort by a 1-based column; returns the new direction.
    pub fn sort(&self, column: usize) -> Result<String, JsValue> {
        self.with_active(|grid, _| grid.sort(column).map(|d| d.to_string()))
    }

    #[wasm_bindgen(js_name = "recordData")]
    pub fn record_data(&self) -> Result<(), JsValue> {
        self.with_active(|grid, _| {
            grid.record_data();
            Ok(())
        })
    }

    pub fn undo(&self) -> Result<bool, JsValue> {
        self.with_active(|grid, _| Ok(grid.undo()))
    }

    #[wasm_bindgen(js_name = "setColumnVisible")]
    pub fn set_column_visible(&self, column: usize, visible: bool) -> Result<(), JsValue> {
        self.with_active(|grid, _| grid.set_column_visible(column, visible))
    }

    /// Show the loading overlay for `seconds`.
    pub fn wait(&self, seconds: f64, loader: Option<String>) -> Result<bool, JsValue> {
        let loader = loader
            .map(|name| name.parse::<LoaderKind>())
            .transpose()
            .map_err(js_err)?;
        self.with_active(|grid, now| Ok(grid.wait(seconds, loader, now)))
    }

    /// Open detail panels; `spec` is `{rows, before, html, height}`.
    #[wasm_bindgen(js_name = "expandRow")]
    pub fn expand_row(&self, spec: JsValue) -> Result<(), JsValue> {
        let spec: DetailSpec = if spec.is_undefined() {
            DetailSpec::default()
        } else {
            from_js(spec)?
        };
        self.with_active(|grid, now| grid.expand_row(spec, now))
    }

    #[wasm_bindgen(js_name = "collapseRow")]
    pub fn collapse_row(&self, rows: Option<Vec<usize>>) -> Result<(), JsValue> {
        self.with_active(|grid, now| {
            grid.collapse_row(rows.as_deref(), now);
            Ok(())
        })
    }

    #[wasm_bindgen(js_name = "scrollTo")]
    pub fn scroll_to(&self, row: Option<usize>, column: Option<usize>) -> Result<(), JsValue> {
        self.with_active(|grid, now| {
            grid.scroll_to(row, column, now);
            Ok(())
        })
    }

    /// Flag a cell corner; `corner` is `top-left`, `top-right`,
    /// `bottom-left` or `bottom-right`.
    #[wasm_bindgen(js_name = "setContextual")]
    pub fn set_contextual(
        &self,
        row: usize,
        column: usize,
        color: Option<String>,
        corner: Option<String>,
    ) -> Result<(), JsValue> {
        let corner = corner
            .map(|c| c.parse::<Corner>())
            .transpose()
            .map_err(js_err)?
            .unwrap_or_default();
        self.with_active(|grid, _| grid.set_contextual(row, column, color.as_deref(), corner))
    }

    #[wasm_bindgen(js_name = "clearContextual")]
    pub fn clear_contextual(&self) -> Result<(), JsValue> {
        self.with_active(|grid, _| {
            grid.clear_contextual();
            Ok(())
        })
    }
}
