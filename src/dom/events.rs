//! Delegated pointer, click and focus handlers for `GridbookView`.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;
use wasm_bindgen::prelude::*;
use web_sys::{Element, FocusEvent, HtmlInputElement, MouseEvent};

use super::render::{apply_patches, apply_style};
use super::{now_ms, GridbookView, SharedState};
use crate::classes::{
    ATTR_ACTION, ATTR_COL, ATTR_POPOVER_ITEM, ATTR_ROW, ATTR_TAB, CELL, CELL_DATA, GRID, HEADER,
    ROW_SELECT, SORT, TAB, TABSET, TOOLBAR_BUTTON,
};
use crate::grid::{DragOutcome, HoverTarget};
use crate::types::CellValue;
use crate::workbook::{PopoverItem, TabRef};

fn event_element(event: &web_sys::Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn closest(element: &Element, class: &str) -> Option<Element> {
    element.closest(&format!(".{class}")).ok().flatten()
}

fn usize_attr(element: &Element, name: &str) -> Option<usize> {
    element.get_attribute(name)?.parse().ok()
}

/// Pointer position relative to the rendered grid.
fn grid_point(root: &Element, event: &MouseEvent) -> Option<(f64, f64)> {
    let grid = root.query_selector(&format!(".{GRID}")).ok()??;
    let rect = grid.get_bounding_client_rect();
    Some((
        f64::from(event.client_x()) - rect.left(),
        f64::from(event.client_y()) - rect.top(),
    ))
}

fn hover_target(element: &Element) -> Option<HoverTarget> {
    if let Some(handle) = closest(element, ROW_SELECT) {
        return Some(HoverTarget::RowSelect {
            row: usize_attr(&handle, ATTR_ROW)?,
        });
    }
    if let Some(header) = closest(element, HEADER) {
        return Some(HoverTarget::Header {
            column: usize_attr(&header, ATTR_COL)?,
        });
    }
    let cell = closest(element, CELL)?;
    Some(HoverTarget::Cell {
        row: usize_attr(&cell, ATTR_ROW)?,
        column: usize_attr(&cell, ATTR_COL)?,
    })
}

/// What a click landed on.
enum ClickTarget {
    Sort(usize),
    Action(String),
    PopoverItem(PopoverItem),
    Tab(usize),
    Tabset,
}

fn click_target(element: &Element) -> Option<ClickTarget> {
    if let Some(sort) = closest(element, SORT) {
        let header = closest(&sort, HEADER)?;
        return Some(ClickTarget::Sort(usize_attr(&header, ATTR_COL)?));
    }
    if let Some(button) = closest(element, TOOLBAR_BUTTON) {
        return Some(ClickTarget::Action(button.get_attribute(ATTR_ACTION)?));
    }
    if let Ok(Some(item)) = element.closest(&format!("[{ATTR_POPOVER_ITEM}]")) {
        let value = item.get_attribute(ATTR_POPOVER_ITEM)?;
        let checked = item
            .dyn_ref::<HtmlInputElement>()
            .is_some_and(HtmlInputElement::checked);
        return PopoverItem::parse(&value, checked)
            .map(ClickTarget::PopoverItem)
            .ok();
    }
    if let Some(tab) = closest(element, TAB) {
        return Some(ClickTarget::Tab(usize_attr(&tab, ATTR_TAB)?));
    }
    if element.class_list().contains(TABSET) {
        return Some(ClickTarget::Tabset);
    }
    None
}

impl GridbookView {
    pub(crate) fn attach_listeners(
        state: &Rc<RefCell<SharedState>>,
        root: &Element,
    ) -> (
        Vec<Closure<dyn FnMut(MouseEvent)>>,
        Closure<dyn FnMut(FocusEvent)>,
    ) {
        let mut closures: Vec<Closure<dyn FnMut(MouseEvent)>> = Vec::new();

        // Mouse down (header drag)
        {
            let state = Rc::clone(state);
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                Self::internal_mouse_down(&state, &event);
            }) as Box<dyn FnMut(MouseEvent)>);
            root.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Mouse move (drag feedback + hover)
        {
            let state = Rc::clone(state);
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                Self::internal_mouse_move(&state, &event);
            }) as Box<dyn FnMut(MouseEvent)>);
            root.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Mouse up (drop)
        {
            let state = Rc::clone(state);
            let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
                Self::internal_mouse_up(&state);
            }) as Box<dyn FnMut(MouseEvent)>);
            root.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Mouse leave (clear hover)
        {
            let state = Rc::clone(state);
            let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
                Self::internal_mouse_leave(&state);
            }) as Box<dyn FnMut(MouseEvent)>);
            root.add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Click (sort, toolbar, popover, tabs)
        {
            let state = Rc::clone(state);
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                Self::internal_click(&state, &event);
            }) as Box<dyn FnMut(MouseEvent)>);
            root.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Focus out of an edited cell commits the edit.
        let focus_closure = {
            let state = Rc::clone(state);
            let closure = Closure::wrap(Box::new(move |event: FocusEvent| {
                Self::internal_focus_out(&state, &event);
            }) as Box<dyn FnMut(FocusEvent)>);
            root.add_event_listener_with_callback("focusout", closure.as_ref().unchecked_ref())
                .ok();
            closure
        };

        (closures, focus_closure)
    }

    fn internal_mouse_down(state: &Rc<RefCell<SharedState>>, event: &MouseEvent) {
        let Some(element) = event_element(event) else {
            return;
        };
        if closest(&element, SORT).is_some() {
            return;
        }
        let Some(column) = closest(&element, HEADER).and_then(|h| usize_attr(&h, ATTR_COL)) else {
            return;
        };
        let root = state.borrow().root.clone();
        let Some((x, y)) = grid_point(&root, event) else {
            return;
        };
        if let Some(grid) = state.borrow_mut().workbook.active_grid_mut() {
            grid.header_pointer_down(column, x, y);
        }
        event.prevent_default();
    }

    fn internal_mouse_move(state: &Rc<RefCell<SharedState>>, event: &MouseEvent) {
        let root = state.borrow().root.clone();
        let point = grid_point(&root, event);
        let element = event_element(event);

        let (redraw, patches) = {
            let mut s = state.borrow_mut();
            let Some(grid) = s.workbook.active_grid_mut() else {
                return;
            };
            let redraw = point.is_some_and(|(x, y)| grid.pointer_move(x, y));
            let patches = if grid.drag_state().is_dragging() {
                Vec::new()
            } else {
                grid.hover(element.as_ref().and_then(hover_target))
            };
            (redraw, patches)
        };
        if redraw {
            Self::materialize(state);
        } else {
            apply_patches(&root, &patches);
        }

        let tab = element
            .as_ref()
            .and_then(|e| closest(e, TAB))
            .and_then(|t| usize_attr(&t, ATTR_TAB));
        Self::hover_tab(state, &root, tab);
    }

    fn hover_tab(state: &Rc<RefCell<SharedState>>, root: &Element, tab: Option<usize>) {
        let styles = {
            let mut s = state.borrow_mut();
            if s.hovered_tab == tab {
                return;
            }
            let previous = std::mem::replace(&mut s.hovered_tab, tab);
            [(previous, false), (tab, true)]
                .into_iter()
                .filter_map(|(index, hovered)| {
                    index.map(|i| (i, s.workbook.tab_style(i, hovered)))
                })
                .collect::<Vec<_>>()
        };
        for (index, style) in styles {
            if let Ok(Some(element)) =
                root.query_selector(&format!(".{TAB}[{ATTR_TAB}=\"{index}\"]"))
            {
                apply_style(&element, &style);
            }
        }
    }

    fn internal_mouse_up(state: &Rc<RefCell<SharedState>>) {
        let outcome = {
            let mut s = state.borrow_mut();
            let Some(grid) = s.workbook.active_grid_mut() else {
                return;
            };
            grid.pointer_up()
        };
        match outcome {
            Ok(DragOutcome::Drop { .. }) => Self::refresh_dom(state),
            Ok(DragOutcome::Nothing | DragOutcome::Click { .. }) => {}
            Err(err) => warn!("column drop failed: {err}"),
        }
    }

    fn internal_mouse_leave(state: &Rc<RefCell<SharedState>>) {
        let root = state.borrow().root.clone();
        let patches = {
            let mut s = state.borrow_mut();
            let Some(grid) = s.workbook.active_grid_mut() else {
                return;
            };
            grid.hover(None)
        };
        apply_patches(&root, &patches);
        Self::hover_tab(state, &root, None);
    }

    fn internal_click(state: &Rc<RefCell<SharedState>>, event: &MouseEvent) {
        let Some(target) = event_element(event).as_ref().and_then(click_target) else {
            return;
        };
        let now = now_ms();
        let result = {
            let mut s = state.borrow_mut();
            let wb = &mut s.workbook;
            match target {
                ClickTarget::Sort(column) => match wb.active_grid_mut() {
                    Some(grid) => grid.sort(column).map(|_| ()),
                    None => Ok(()),
                },
                ClickTarget::Action(id) => {
                    event.prevent_default();
                    wb.dispatch(&id, now).map(|_| ())
                }
                ClickTarget::PopoverItem(item) => {
                    // Links carry href="#"; checkboxes must keep their toggle.
                    if !matches!(item, PopoverItem::Column { .. }) {
                        event.prevent_default();
                    }
                    wb.select_popover_item(item)
                }
                ClickTarget::Tab(index) => wb.select_tab(TabRef::Index(index), None),
                ClickTarget::Tabset => {
                    wb.toggle_collapsed();
                    Ok(())
                }
            }
        };
        if let Err(err) = result {
            warn!("click ignored: {err}");
        }
        Self::refresh_dom(state);
    }

    fn internal_focus_out(state: &Rc<RefCell<SharedState>>, event: &FocusEvent) {
        let Some(data) = event_element(event).filter(|e| e.class_list().contains(CELL_DATA))
        else {
            return;
        };
        let Some(cell) = closest(&data, CELL) else {
            return;
        };
        let (Some(row), Some(column)) = (usize_attr(&cell, ATTR_ROW), usize_attr(&cell, ATTR_COL))
        else {
            return;
        };
        let text = data.text_content().unwrap_or_default();
        let edited = {
            let mut s = state.borrow_mut();
            let Some(grid) = s.workbook.active_grid_mut() else {
                return;
            };
            let value = match (grid.cell(row, column), text.trim().parse::<f64>()) {
                (Some(CellValue::Number(_)), Ok(n)) => CellValue::Number(n),
                (Some(CellValue::Empty), _) if text.is_empty() => CellValue::Empty,
                _ => CellValue::Text(text),
            };
            grid.edit_cell(row, column, value)
        };
        match edited {
            Ok(()) => Self::dispatch_events(state),
            Err(err) => warn!("cell edit rejected: {err}"),
        }
    }
}
