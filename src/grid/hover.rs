//! Pointer hover highlighting.
//!
//! The grid keeps one hover target. Moving it yields style patches that undo
//! the old highlight and apply the new one, so the host can restyle a few
//! elements in place instead of redrawing the grid.

use serde::{Deserialize, Serialize};

use super::Grid;
use crate::classes::{ATTR_COL, ATTR_ROW, CELL, HEADER, ROW_SELECT, SORT};
use crate::theme::{ElementClass, StyleBag, VisualState};

/// What the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum HoverTarget {
    Cell { row: usize, column: usize },
    Header { column: usize },
    RowSelect { row: usize },
}

/// An element of the rendered grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ElementRef {
    Header { column: usize },
    Sort { column: usize },
    Cell { row: usize, column: usize },
    RowSelect { row: usize },
}

impl ElementRef {
    /// CSS selector of the element inside the grid root.
    pub fn selector(&self) -> String {
        match *self {
            Self::Header { column } => format!(".{HEADER}[{ATTR_COL}=\"{column}\"]"),
            Self::Sort { column } => format!(".{HEADER}[{ATTR_COL}=\"{column}\"] .{SORT}"),
            Self::Cell { row, column } => {
                format!(".{CELL}[{ATTR_ROW}=\"{row}\"][{ATTR_COL}=\"{column}\"]")
            }
            Self::RowSelect { row } => format!(".{ROW_SELECT}[{ATTR_ROW}=\"{row}\"]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StylePatch {
    pub element: ElementRef,
    pub style: StyleBag,
}

const SORT_HIDDEN: &str = "-64px";

impl Grid {
    /// Move the hover highlight. Returns the patches to apply, in order.
    ///
    /// Hover is ignored while a header drag is in progress.
    pub fn hover(&mut self, target: Option<HoverTarget>) -> Vec<StylePatch> {
        if target == self.hover || self.drag.is_dragging() {
            return Vec::new();
        }
        let mut patches: Vec<StylePatch> = self
            .hover
            .map(|old| self.touched(old))
            .unwrap_or_default()
            .into_iter()
            .map(|element| self.patch(element, false))
            .collect();
        if let Some(new) = target {
            patches.extend(
                self.touched(new)
                    .into_iter()
                    .map(|element| self.patch(element, true)),
            );
        }
        self.hover = target;
        patches
    }

    fn touched(&self, target: HoverTarget) -> Vec<ElementRef> {
        match target {
            HoverTarget::Cell { row, column } => {
                let mut elements = vec![ElementRef::Cell { row, column }, ElementRef::Header { column }];
                if self.visible_position(column) == Some(1) {
                    elements.push(ElementRef::RowSelect { row });
                }
                elements
            }
            HoverTarget::Header { column } => {
                let mut elements = vec![ElementRef::Header { column }, ElementRef::Sort { column }];
                elements.extend((1..=self.row_count()).map(|row| ElementRef::Cell { row, column }));
                elements
            }
            HoverTarget::RowSelect { row } => {
                let mut elements = vec![ElementRef::RowSelect { row }];
                elements.extend(
                    self.visible_columns()
                        .into_iter()
                        .map(|column| ElementRef::Cell { row, column }),
                );
                elements
            }
        }
    }

    fn patch(&self, element: ElementRef, entering: bool) -> StylePatch {
        let state = if entering {
            VisualState::Active
        } else {
            VisualState::Normal
        };
        let style = match element {
            ElementRef::Header { .. } => self.theme.style(state, ElementClass::Header).clone(),
            ElementRef::Cell { row, .. } => {
                let style = self.theme.style(state, ElementClass::Cell).clone();
                if entering {
                    style
                } else {
                    style.with(
                        "background-color",
                        self.theme.row_background(row, self.options.alt_row_color),
                    )
                }
            }
            ElementRef::Sort { .. } => {
                StyleBag::new().with("right", if entering { "0" } else { SORT_HIDDEN })
            }
            ElementRef::RowSelect { .. } => {
                StyleBag::new().with("display", if entering { "block" } else { "none" })
            }
        };
        StylePatch { element, style }
    }
}
