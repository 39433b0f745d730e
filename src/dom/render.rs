//! Materializing the view tree and running timers.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, CustomEventInit, Element, HtmlElement};

use super::{now_ms, GridbookView, SharedState};
use crate::classes::{ATTR_ANIMATE_HEIGHT, GRID, GRID_BODY};
use crate::grid::{Metrics, StylePatch};
use crate::theme::StyleBag;

/// Fallback used when the scrollbar width cannot be measured.
const DEFAULT_SCROLLBAR_WIDTH: f64 = 17.0;
const LINE_HEIGHT_FACTOR: f64 = 1.2;

pub(crate) fn apply_style(element: &Element, style: &StyleBag) {
    let Some(el) = element.dyn_ref::<HtmlElement>() else {
        return;
    };
    let css = el.style();
    for (property, value) in style.iter() {
        let _ = css.set_property(property, value);
    }
}

pub(crate) fn apply_patches(root: &Element, patches: &[StylePatch]) {
    for patch in patches {
        if let Ok(Some(element)) = root.query_selector(&patch.element.selector()) {
            apply_style(&element, &patch.style);
        }
    }
}

/// Read the grid body's scroll offsets, if it is in the document.
fn body_scroll(root: &Element) -> Option<(f64, f64)> {
    let body = root.query_selector(&format!(".{GRID_BODY}")).ok()??;
    Some((f64::from(body.scroll_top()), f64::from(body.scroll_left())))
}

#[allow(clippy::cast_possible_truncation)]
fn set_body_scroll(root: &Element, (top, left): (f64, f64)) {
    if let Ok(Some(body)) = root.query_selector(&format!(".{GRID_BODY}")) {
        body.set_scroll_top(top.round() as i32);
        body.set_scroll_left(left.round() as i32);
    }
}

/// Host measurements for `auto_size`.
pub(crate) fn measure(root: &Element) -> Metrics {
    let mut metrics = Metrics {
        container_width: f64::from(root.client_width()),
        ..Metrics::default()
    };
    if let Some(window) = web_sys::window() {
        let font_size = window
            .get_computed_style(root)
            .ok()
            .flatten()
            .and_then(|css| css.get_property_value("font-size").ok())
            .and_then(|v| v.trim_end_matches("px").parse::<f64>().ok());
        if let Some(size) = font_size {
            metrics.line_height = size * LINE_HEIGHT_FACTOR;
        }
    }
    if let Ok(Some(body)) = root.query_selector(&format!(".{GRID_BODY}")) {
        if let Some(el) = body.dyn_ref::<HtmlElement>() {
            let gutter = f64::from(el.offset_width() - el.client_width());
            metrics.scrollbar_width = if gutter > 0.0 {
                gutter
            } else {
                DEFAULT_SCROLLBAR_WIDTH
            };
        }
    }
    metrics
}

impl GridbookView {
    /// Rebuild the container's markup from the workbook view.
    pub(crate) fn materialize(state: &Rc<RefCell<SharedState>>) {
        let root = state.borrow().root.clone();
        // Keep the user's scroll offsets unless an animation owns them.
        if let Some((top, left)) = body_scroll(&root) {
            if let Some(grid) = state.borrow_mut().workbook.active_grid_mut() {
                grid.set_scroll_position(top, left);
            }
        }
        let (html, scroll) = {
            let s = state.borrow();
            let scroll = s.workbook.active_grid().map(|g| g.scroll_position());
            (s.workbook.view().to_html(), scroll)
        }; // borrow dropped before touching the DOM
        root.set_inner_html(&html);
        if let Some(scroll) = scroll {
            set_body_scroll(&root, scroll);
        }
        Self::start_height_transitions(&root);
    }

    /// Panels render at height 0 while opening; growing them after layout
    /// lets the CSS transition run.
    fn start_height_transitions(root: &Element) {
        let Ok(nodes) = root.query_selector_all(&format!("[{ATTR_ANIMATE_HEIGHT}]")) else {
            return;
        };
        for i in 0..nodes.length() {
            let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
                continue;
            };
            let Some(height) = el.get_attribute(ATTR_ANIMATE_HEIGHT) else {
                continue;
            };
            // Reading offsetHeight forces the zero height to be laid out first.
            let _ = el.offset_height();
            let _ = el.style().set_property("height", &format!("{height}px"));
        }
    }

    /// Dispatch queued grid events as `CustomEvent`s on the grid root.
    pub(crate) fn dispatch_events(state: &Rc<RefCell<SharedState>>) {
        let (root, events) = {
            let mut s = state.borrow_mut();
            (s.root.clone(), s.workbook.drain_events())
        };
        if events.is_empty() {
            return;
        }
        let target = root
            .query_selector(&format!(".{GRID}"))
            .ok()
            .flatten()
            .unwrap_or_else(|| root.clone());
        for (tab, event) in events {
            let init = CustomEventInit::new();
            init.set_bubbles(true);
            if let Ok(detail) = serde_wasm_bindgen::to_value(&event) {
                let _ = js_sys::Reflect::set(&detail, &JsValue::from_str("tab"), &JsValue::from(tab));
                init.set_detail(&detail);
            }
            if let Ok(custom) = CustomEvent::new_with_event_init_dict(event.dom_name(), &init) {
                let _ = target.dispatch_event(&custom);
            }
        }
    }

    /// Redraw, notify listeners and re-arm the tick timer.
    pub(crate) fn refresh_dom(state: &Rc<RefCell<SharedState>>) {
        Self::materialize(state);
        Self::dispatch_events(state);
        Self::schedule_tick(state);
    }

    /// Arm a single timeout for the workbook's next deadline.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn schedule_tick(state: &Rc<RefCell<SharedState>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut s = state.borrow_mut();
        if let Some(timer_id) = s.tick_timer.take() {
            window.clear_timeout_with_handle(timer_id);
        }
        let now = now_ms();
        let Some(deadline) = s.workbook.next_deadline(now) else {
            return;
        };
        if s.tick_closure.is_none() {
            let weak_state = Rc::downgrade(state);
            let closure = Closure::wrap(Box::new(move || {
                if let Some(state) = weak_state.upgrade() {
                    GridbookView::handle_tick(&state);
                }
            }) as Box<dyn FnMut()>);
            s.tick_closure = Some(closure);
        }
        let Some(callback) = s.tick_closure.as_ref() else {
            return;
        };
        let delay = (deadline - now).max(0.0).ceil() as i32;
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay,
        ) {
            Ok(id) => s.tick_timer = Some(id),
            Err(_) => s.tick_timer = None,
        }
    }

    fn handle_tick(state: &Rc<RefCell<SharedState>>) {
        let changed = {
            let mut s = state.borrow_mut();
            s.tick_timer = None;
            s.workbook.tick(now_ms())
        };
        if changed {
            Self::refresh_dom(state);
        } else {
            Self::schedule_tick(state);
        }
    }
}
