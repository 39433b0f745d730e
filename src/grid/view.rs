//! Builds the view tree of a grid.

use super::detail::{Panel, PanelPhase};
use super::drag::DragState;
use super::Grid;
use crate::classes::{
    ATTR_ANIMATE_HEIGHT, ATTR_COL, ATTR_ROW, CELL, CELL_DATA, CONTEXTUAL, DRAG_BOX,
    DRAG_INDICATOR, GRID, GRID_BODY, GRID_HEAD, HEADER, HEADER_ROW, OVERLAY, ROW, ROW_SELECT,
    SLICE, SORT, TRANSITION_MS,
};
use crate::theme::{ElementClass, VisualState};
use crate::view::ViewNode;

fn px(v: f64) -> String {
    format!("{v}px")
}

impl Grid {
    pub fn view(&self) -> ViewNode {
        let layout = &self.layout;
        let mut root = ViewNode::div()
            .class(GRID)
            .style("background-color", &self.theme.background)
            .style("overflow", "hidden")
            .style("position", "relative")
            .style("width", px(layout.fixed_width.unwrap_or(layout.grid_width)));
        if let Some(title) = self.title() {
            root.set_attr("title", title);
        }
        if self.table.has_header_row {
            root = root.child(self.head_view());
        }
        root = root.child(self.body_view());
        if let DragState::Dragging {
            column, target, x, y, ..
        } = self.drag
        {
            root = root.children(self.drag_view(column, target, x, y));
        }
        if self.overlay.is_visible() {
            root = root.child(self.overlay_view());
        }
        root
    }

    fn cell_frame(&self, element: ElementClass, state: VisualState, height: f64) -> ViewNode {
        let layout = &self.layout;
        ViewNode::div()
            .styles(self.theme.style(state, element))
            .style("border-style", "solid")
            .style("border-width", px(layout.border_width))
            .style("box-sizing", "content-box")
            .style("display", "inline-block")
            .style("height", px(height))
            .style("margin-left", px(-layout.border_width))
            .style("overflow", "hidden")
            .style("padding", px(self.options.cell_padding))
            .style("position", "relative")
            .style("vertical-align", "top")
            .style("width", px(layout.column_width))
    }

    fn head_view(&self) -> ViewNode {
        let highlighted = match self.drag {
            DragState::Dragging { target, .. } => Some(target),
            _ => None,
        };
        let headers = self
            .visible_columns()
            .into_iter()
            .enumerate()
            .map(|(i, column)| {
                let position = i + 1;
                let active = highlighted.is_some_and(|t| position == t || position == t + 1);
                let state = if active {
                    VisualState::Active
                } else {
                    VisualState::Normal
                };
                let label = self
                    .table
                    .headers
                    .get(column - 1)
                    .map(String::as_str)
                    .unwrap_or_default();
                self.cell_frame(ElementClass::Header, state, self.layout.header_data_height)
                    .class(HEADER)
                    .attr(ATTR_COL, column)
                    .attr("title", label)
                    .style("cursor", if self.options.dnd { "move" } else { "default" })
                    .child(ViewNode::new("span").text(label))
                    .child(
                        ViewNode::div()
                            .class(SORT)
                            .attr("title", "sort")
                            .style("cursor", "pointer")
                            .style("position", "absolute")
                            .style("right", "-64px")
                            .style("top", "0")
                            .style("transition", format!("right {TRANSITION_MS}ms"))
                            .text(self.sort.indicator(column)),
                    )
            });
        ViewNode::div()
            .class(GRID_HEAD)
            .style("left", "0")
            .style("position", "absolute")
            .style("top", "0")
            .style("z-index", 4)
            .child(
                ViewNode::div()
                    .class(ROW)
                    .attr(ATTR_ROW, HEADER_ROW)
                    .style("white-space", "nowrap")
                    .children(headers),
            )
    }

    fn body_view(&self) -> ViewNode {
        let layout = &self.layout;
        let mut body = ViewNode::div()
            .class(GRID_BODY)
            .style("margin-top", px(layout.body_margin_top))
            .style("position", "relative");
        if let Some(height) = self.options.height {
            body = body
                .style("height", px((height - layout.header_height).max(0.0)))
                .style("overflow-y", if layout.body_scrolls { "auto" } else { "hidden" });
        }
        let visible = self.visible_columns();
        for (i, cells) in self.table.rows.iter().enumerate() {
            let row = i + 1;
            let panels = self.details.panels().iter().filter(|p| p.row == row);
            body = body.children(panels.clone().filter(|p| p.before).map(|p| self.slice_view(p)));
            let row_cells = visible.iter().enumerate().map(|(pos, &column)| {
                let value = cells.get(column - 1).map(ToString::to_string).unwrap_or_default();
                let mut cell = self
                    .cell_frame(ElementClass::Cell, VisualState::Normal, layout.data_height)
                    .class(CELL)
                    .attr(ATTR_ROW, row)
                    .attr(ATTR_COL, column)
                    .style(
                        "background-color",
                        self.theme.row_background(row, self.options.alt_row_color),
                    );
                if pos == 0 {
                    cell = cell.child(
                        ViewNode::div()
                            .class(ROW_SELECT)
                            .attr(ATTR_ROW, row)
                            .style("background-color", &self.theme.palette.primary)
                            .style("cursor", "pointer")
                            .style("display", "none")
                            .style("height", "100%")
                            .style("left", "0")
                            .style("position", "absolute")
                            .style("top", "0")
                            .style("width", "10px"),
                    );
                }
                cell = cell.child(
                    ViewNode::div()
                        .class(CELL_DATA)
                        .attr("contenteditable", "true")
                        .attr("tabindex", "-1")
                        .style("height", px(layout.data_height))
                        .style("outline", "none")
                        .text(value),
                );
                cell.children(
                    self.contextual
                        .iter()
                        .filter(|m| m.row == row && m.column == column)
                        .map(|m| ViewNode::div().class(CONTEXTUAL).styles(&m.style())),
                )
            });
            body = body.child(
                ViewNode::div()
                    .class(ROW)
                    .attr(ATTR_ROW, row)
                    .style("height", px(layout.row_height - layout.border_width))
                    .style("white-space", "nowrap")
                    .children(row_cells),
            );
            body = body.children(panels.filter(|p| !p.before).map(|p| self.slice_view(p)));
        }
        body
    }

    fn slice_view(&self, panel: &Panel) -> ViewNode {
        let target = panel.height.unwrap_or(self.layout.row_height);
        let height = match panel.phase {
            PanelPhase::Open => target,
            PanelPhase::Opening { .. } | PanelPhase::Closing { .. } => 0.0,
        };
        let mut slice = ViewNode::div()
            .class(SLICE)
            .attr(ATTR_ROW, panel.row)
            .style("background-color", self.theme.slice_background())
            .style("height", px(height))
            .style("overflow", "hidden")
            .style("transition", format!("height {TRANSITION_MS}ms"))
            .html(panel.html.as_str());
        if let PanelPhase::Opening { .. } = panel.phase {
            slice.set_attr(ATTR_ANIMATE_HEIGHT, target);
        }
        slice
    }

    fn drag_view(&self, column: usize, target: usize, x: f64, y: f64) -> [ViewNode; 2] {
        let layout = &self.layout;
        let bw = layout.border_width;
        let indicator = ViewNode::div()
            .class(DRAG_INDICATOR)
            .style("border-left", format!("{}px dotted {}", 3.0 * bw, self.theme.palette.primary))
            .style("height", "100%")
            .style("left", px(layout.indicator_x(target)))
            .style("position", "absolute")
            .style("top", "0")
            .style("z-index", 5);
        let label = self
            .table
            .headers
            .get(column - 1)
            .map(String::as_str)
            .unwrap_or_default();
        let drag_box = ViewNode::div()
            .class(DRAG_BOX)
            .style("background-color", "rgba(0,0,0,0.2)")
            .style("font-weight", "bold")
            .style("height", px(layout.header_height))
            .style("left", px(x - 10.0))
            .style("pointer-events", "none")
            .style("position", "absolute")
            .style("top", px(y - 10.0))
            .style("width", px(layout.outer_width()))
            .style("z-index", 6)
            .text(label);
        [indicator, drag_box]
    }

    fn overlay_view(&self) -> ViewNode {
        ViewNode::div()
            .class(OVERLAY)
            .style("background-color", "white")
            .style("height", "100%")
            .style("left", "0")
            .style("opacity", "0.85")
            .style("position", "absolute")
            .style("top", "0")
            .style("width", "100%")
            .style("z-index", 8)
            .child(
                ViewNode::div()
                    .style("height", "100px")
                    .style("left", "50%")
                    .style("margin", "-50px 0 0 -50px")
                    .style("position", "absolute")
                    .style("top", "50%")
                    .style("width", "100px")
                    .html(self.overlay.loader().svg()),
            )
    }
}
