//! View tree of a workbook: tab strip, toolbar, popover and active grid.

use super::{PopoverContent, PopoverItem, ToolbarAction, Workbook};
use crate::classes::{
    ATTR_ACTION, ATTR_POPOVER_ITEM, ATTR_TAB, DROPDOWN, TAB, TABSET, TOOLBAR, TOOLBAR_BUTTON,
    TOOLBAR_CONTROLS, WORKSHEET,
};
use crate::grid::Grid;
use crate::theme::StyleBag;
use crate::view::ViewNode;

impl Workbook {
    pub fn view(&self) -> ViewNode {
        let mut root = ViewNode::div()
            .class(WORKSHEET)
            .style("position", "relative");
        if let Some(width) = self.options.width {
            root = root.style("width", format!("{width}px"));
        }
        if self.options.tabset {
            root = root.child(self.tabset_view());
        }
        if !self.toolbar.is_empty() {
            root = root.child(self.toolbar_view());
        }
        if let Some(grid) = self.active_grid() {
            let mut grid_view = grid.view();
            if self.collapsed {
                grid_view.style.set("display", "none");
            }
            root = root.child(grid_view);
        }
        root
    }

    /// Style of tab `index` (1-based), honoring selection and hover.
    pub fn tab_style(&self, index: usize, hovered: bool) -> StyleBag {
        if index == self.active_index() {
            self.theme.tab_selected()
        } else if hovered {
            self.theme.tab_hover()
        } else {
            self.theme.tab()
        }
    }

    fn tabset_view(&self) -> ViewNode {
        let tabs = self.tabs.iter().enumerate().map(|(i, tab)| {
            let index = i + 1;
            ViewNode::div()
                .class(TAB)
                .attr(ATTR_TAB, index)
                .attr("title", &tab.title)
                .styles(&self.tab_style(index, false))
                .child(
                    ViewNode::new("span")
                        .styles(&self.theme.tab_label())
                        .text(tab.title.as_str()),
                )
        });
        ViewNode::div()
            .class(TABSET)
            .styles(&self.theme.tabset())
            .children(tabs)
    }

    fn toolbar_view(&self) -> ViewNode {
        let open = self.popover.open();
        let buttons = self.toolbar.iter().map(|&action| {
            let button = ViewNode::new("a")
                .class(TOOLBAR_BUTTON)
                .attr(ATTR_ACTION, action.id())
                .attr("title", action.title())
                .styles(&self.theme.toolbar_button())
                .text(action.glyph().to_string());
            let mut anchor = ViewNode::new("span")
                .style("position", "relative")
                .child(button);
            if let Some((at, &content)) = open {
                if at == action {
                    if let Some(grid) = self.active_grid() {
                        anchor = anchor.child(self.popover_view(content, grid));
                    }
                }
            }
            anchor
        });
        ViewNode::div()
            .class(TOOLBAR)
            .styles(&self.theme.toolbar(self.options.border_width))
            .child(ViewNode::div().class(TOOLBAR_CONTROLS).children(buttons))
    }

    fn popover_link(&self, item: PopoverItem, label: &str) -> ViewNode {
        ViewNode::new("a")
            .attr(ATTR_POPOVER_ITEM, item.attr())
            .attr("href", "#")
            .styles(&self.theme.popover_link())
            .style("display", "block")
            .style("padding", "4px 0")
            .text(label)
    }

    fn popover_view(&self, content: PopoverContent, grid: &Grid) -> ViewNode {
        let dropdown = ViewNode::div()
            .class(DROPDOWN)
            .styles(&self.theme.popover())
            .style("right", "0")
            .style("text-align", "left")
            .style("white-space", "nowrap")
            .style("z-index", 10);
        match content {
            PopoverContent::AddMenu => dropdown
                .child(self.popover_link(PopoverItem::AddRow, "Row"))
                .child(self.popover_link(PopoverItem::AddColumn, "Column")),
            PopoverContent::ColumnChecklist => {
                let boxes = grid.headers().iter().enumerate().map(|(i, header)| {
                    let column = i + 1;
                    let visible = grid.is_column_visible(column);
                    let mut checkbox = ViewNode::new("input")
                        .attr("type", "checkbox")
                        .attr(ATTR_POPOVER_ITEM, PopoverItem::Column { column, visible }.attr());
                    if visible {
                        checkbox.set_attr("checked", "checked");
                    }
                    let label = if header.is_empty() {
                        format!("Column {column}")
                    } else {
                        header.clone()
                    };
                    ViewNode::new("label")
                        .style("display", "block")
                        .style("padding", "2px 0")
                        .child(checkbox)
                        .child(ViewNode::new("span").text(label))
                });
                dropdown
                    .child(self.popover_link(PopoverItem::ShowAll, "select all"))
                    .children(boxes)
            }
        }
    }
}

/// Button of `action` in a rendered workbook view.
pub fn find_button(view: &ViewNode, action: ToolbarAction) -> Option<&ViewNode> {
    view.find_all(TOOLBAR_BUTTON)
        .into_iter()
        .find(|b| b.attr_value(ATTR_ACTION) == Some(action.id()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::classes::{GRID, HEADER};
    use crate::options::GridOptions;
    use crate::source::TableSource;
    use crate::workbook::TabRef;

    fn workbook() -> Workbook {
        let table = |name: &str| {
            TableSource::Markup(format!(
                "<table id=\"{name}\"><tr><th>Key</th><th>Value</th></tr><tr><td>a</td><td>1</td></tr></table>"
            ))
        };
        Workbook::new(GridOptions {
            data: vec![table("one"), table("two")],
            tabset: true,
            toolbar: vec!["undo".into(), "show".into()],
            ..GridOptions::default()
        })
        .unwrap()
    }

    #[test]
    fn tab_strip_marks_selection() {
        let mut wb = workbook();
        wb.select_tab(TabRef::Index(2), None).unwrap();
        let view = wb.view();
        let tabs = view.find_all(TAB);
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[1].style.get("font-weight"), Some("bold"));
        assert_eq!(tabs[0].style.get("font-weight"), Some("normal"));
        assert_eq!(view.count(GRID), 1);
    }

    #[test]
    fn toolbar_lists_configured_buttons() {
        let view = workbook().view();
        assert_eq!(view.count(TOOLBAR_BUTTON), 2);
        let show = find_button(&view, ToolbarAction::Show).unwrap();
        assert_eq!(show.attr_value("title"), Some("Hide/Show Columns"));
        assert_eq!(show.text.as_deref(), Some("\u{e61a}"));
    }

    #[test]
    fn checklist_reflects_visibility() {
        let mut wb = workbook();
        wb.dispatch("show", 0.0).unwrap();
        wb.select_popover_item(PopoverItem::Column {
            column: 1,
            visible: false,
        })
        .unwrap();
        let view = wb.view();
        let dropdown = view.find(DROPDOWN).unwrap();
        let boxes = dropdown.find_tags("input");
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].attr_value("checked"), None);
        assert_eq!(boxes[1].attr_value("checked"), Some("checked"));
        assert_eq!(view.count(HEADER), 1);
    }

    #[test]
    fn collapsed_workbook_hides_grid() {
        let mut wb = workbook();
        wb.toggle_collapsed();
        let view = wb.view();
        assert_eq!(view.find(GRID).unwrap().style.get("display"), Some("none"));
    }
}
