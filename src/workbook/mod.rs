//! Tabbed container of grids with a shared toolbar.

mod popover;
mod toolbar;
mod view;

pub use popover::{Popover, PopoverState, REOPEN_MS};
pub use toolbar::{parse_toolbar, ToolbarAction};
pub use view::find_button;

use tracing::{debug, info};

use crate::error::{GridbookError, Result};
use crate::grid::{DetailSpec, Grid, GridEvent};
use crate::options::GridOptions;
use crate::source::TableSource;
use crate::theme::Theme;

/// Text of the info panel opened by the menu action.
const MENU_PANEL_HTML: &str = "<p>This functionality has several potential applications.</p>";
/// Menu panel height when the grid has no fixed height.
const MENU_PANEL_HEIGHT: f64 = 100.0;
/// Vertical space the menu panel leaves free in a fixed-height grid.
const MENU_PANEL_GAP: f64 = 14.0;
/// Seconds the save action shows the overlay.
const SAVE_WAIT_SECONDS: f64 = 2.0;
/// Row after which the add menu inserts a new row.
const ADD_ROW_AFTER: usize = 2;

/// A tab reference: 1-based position or display title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabRef {
    Index(usize),
    Title(String),
}

impl From<usize> for TabRef {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for TabRef {
    fn from(title: &str) -> Self {
        Self::Title(title.to_string())
    }
}

/// Body of the shared popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopoverContent {
    /// "Row" / "Column" insertion links.
    AddMenu,
    /// A checkbox per column plus "select all".
    ColumnChecklist,
}

/// An entry picked inside the popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopoverItem {
    AddRow,
    AddColumn,
    ShowAll,
    Column { column: usize, visible: bool },
}

impl PopoverItem {
    /// Decode a `data-popover-item` value; `checked` is the checkbox state for
    /// column entries.
    pub fn parse(value: &str, checked: bool) -> Result<Self> {
        match value {
            "add-row" => Ok(Self::AddRow),
            "add-column" => Ok(Self::AddColumn),
            "show-all" => Ok(Self::ShowAll),
            other => other
                .strip_prefix("column-")
                .and_then(|c| c.parse().ok())
                .map(|column| Self::Column {
                    column,
                    visible: checked,
                })
                .ok_or_else(|| GridbookError::invalid(format!("unknown popover item \"{other}\""))),
        }
    }

    pub fn attr(&self) -> String {
        match self {
            Self::AddRow => "add-row".to_string(),
            Self::AddColumn => "add-column".to_string(),
            Self::ShowAll => "show-all".to_string(),
            Self::Column { column, .. } => format!("column-{column}"),
        }
    }
}

pub struct Tab {
    pub title: String,
    pub grid: Grid,
}

pub struct Workbook {
    options: GridOptions,
    theme: Theme,
    tabs: Vec<Tab>,
    active: usize,
    toolbar: Vec<ToolbarAction>,
    popover: Popover<ToolbarAction, PopoverContent>,
    collapsed: bool,
}

impl Workbook {
    /// Build a workbook with one tab per source in `options.data`.
    ///
    /// Invalid option values are replaced by defaults and logged. Without any
    /// data the workbook holds one empty grid.
    pub fn new(options: GridOptions) -> Result<Self> {
        let mut options = options;
        options.validate();
        let sources = std::mem::take(&mut options.data);
        let mut workbook = Self {
            theme: options.resolve_theme(),
            toolbar: parse_toolbar(&options.toolbar),
            options,
            tabs: Vec::new(),
            active: 0,
            popover: Popover::default(),
            collapsed: false,
        };
        for source in &sources {
            workbook.add_tab(None, source)?;
        }
        if workbook.tabs.is_empty() {
            let grid = Grid::new(&workbook.options);
            workbook.tabs.push(Tab {
                title: "Sheet 1".to_string(),
                grid,
            });
        }
        Ok(workbook)
    }

    /// Add a grid for `source` as a new last tab. Returns its 1-based index.
    pub fn add_tab(&mut self, title: Option<&str>, source: &TableSource) -> Result<usize> {
        let grid = Grid::from_source(source, &self.options)?;
        let index = self.tabs.len() + 1;
        let title = title
            .map(str::to_string)
            .or_else(|| grid.title().map(str::to_string))
            .unwrap_or_else(|| format!("Sheet {index}"));
        debug!(index, %title, "tab added");
        self.tabs.push(Tab { title, grid });
        Ok(index)
    }

    fn resolve(&self, tab: &TabRef) -> Result<usize> {
        match tab {
            TabRef::Index(i) if (1..=self.tabs.len()).contains(i) => Ok(i - 1),
            TabRef::Index(i) => Err(GridbookError::invalid(format!(
                "tab {i} out of range 1..={}",
                self.tabs.len()
            ))),
            TabRef::Title(title) => self
                .tabs
                .iter()
                .position(|t| &t.title == title)
                .ok_or_else(|| GridbookError::invalid(format!("no tab titled \"{title}\""))),
        }
    }

    /// Make a tab active, refresh its grid, then run `callback` on it.
    pub fn select_tab(
        &mut self,
        tab: impl Into<TabRef>,
        callback: Option<&mut dyn FnMut(&mut Grid)>,
    ) -> Result<()> {
        let idx = self.resolve(&tab.into())?;
        self.active = idx;
        self.popover.close();
        let grid = &mut self
            .tabs
            .get_mut(idx)
            .ok_or_else(|| GridbookError::invalid("tab disappeared"))?
            .grid;
        grid.refresh();
        if let Some(callback) = callback {
            callback(grid);
        }
        debug!(tab = idx + 1, "tab selected");
        Ok(())
    }

    // ----------------------------------------------------------------------
    // Accessors
    // ----------------------------------------------------------------------

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// 1-based index of the active tab.
    pub fn active_index(&self) -> usize {
        self.active + 1
    }

    pub fn grid(&self, tab: impl Into<TabRef>) -> Result<&Grid> {
        let idx = self.resolve(&tab.into())?;
        self.tabs
            .get(idx)
            .map(|t| &t.grid)
            .ok_or_else(|| GridbookError::invalid("tab disappeared"))
    }

    pub fn grid_mut(&mut self, tab: impl Into<TabRef>) -> Result<&mut Grid> {
        let idx = self.resolve(&tab.into())?;
        self.tabs
            .get_mut(idx)
            .map(|t| &mut t.grid)
            .ok_or_else(|| GridbookError::invalid("tab disappeared"))
    }

    /// The grid of the active tab.
    pub fn active_grid(&self) -> Option<&Grid> {
        self.tabs.get(self.active).map(|t| &t.grid)
    }

    pub fn active_grid_mut(&mut self) -> Option<&mut Grid> {
        self.tabs.get_mut(self.active).map(|t| &mut t.grid)
    }

    fn active_or_err(&mut self) -> Result<&mut Grid> {
        self.active_grid_mut()
            .ok_or_else(|| GridbookError::invalid("workbook has no active grid"))
    }

    pub fn toolbar(&self) -> &[ToolbarAction] {
        &self.toolbar
    }

    pub fn popover(&self) -> &Popover<ToolbarAction, PopoverContent> {
        &self.popover
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Show or hide the active grid below the tab strip.
    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
        self.popover.close();
    }

    // ----------------------------------------------------------------------
    // Toolbar
    // ----------------------------------------------------------------------

    /// Run the toolbar action named `id`. Unknown ids are logged and skipped;
    /// returns whether an action ran.
    pub fn dispatch(&mut self, id: &str, now_ms: f64) -> Result<bool> {
        match id.parse::<ToolbarAction>() {
            Ok(action) => {
                self.run(action, now_ms)?;
                Ok(true)
            }
            Err(err) => {
                debug!("ignoring toolbar click: {err}");
                Ok(false)
            }
        }
    }

    pub fn run(&mut self, action: ToolbarAction, now_ms: f64) -> Result<()> {
        if action.is_placeholder() {
            info!(action = action.id(), "{} is not available", action.title());
            return Ok(());
        }
        match action {
            ToolbarAction::Undo => {
                self.active_or_err()?.undo();
            }
            ToolbarAction::Add => {
                self.popover
                    .toggle(ToolbarAction::Add, PopoverContent::AddMenu, now_ms);
            }
            ToolbarAction::Show => {
                self.popover
                    .toggle(ToolbarAction::Show, PopoverContent::ColumnChecklist, now_ms);
            }
            ToolbarAction::Save => {
                self.active_or_err()?.wait(SAVE_WAIT_SECONDS, None, now_ms);
            }
            ToolbarAction::Refresh => {
                let grid = self.active_or_err()?;
                let metrics = *grid.metrics();
                grid.auto_size(metrics);
                grid.refresh();
            }
            ToolbarAction::Menu => self.open_menu_panel(now_ms)?,
            ToolbarAction::Settings => self.toggle_all_details(now_ms)?,
            _ => {}
        }
        Ok(())
    }

    fn open_menu_panel(&mut self, now_ms: f64) -> Result<()> {
        let height = self.options.height;
        let grid = self.active_or_err()?;
        if grid.row_count() == 0 {
            debug!("menu panel skipped on an empty grid");
            return Ok(());
        }
        grid.scroll_to(Some(1), None, now_ms);
        let height = match height {
            Some(h) => (h - grid.layout().header_height - MENU_PANEL_GAP).max(0.0),
            None => MENU_PANEL_HEIGHT,
        };
        grid.expand_row(
            DetailSpec {
                rows: vec![1],
                before: true,
                html: MENU_PANEL_HTML.to_string(),
                height: Some(height),
            },
            now_ms,
        )
    }

    fn toggle_all_details(&mut self, now_ms: f64) -> Result<()> {
        let grid = self.active_or_err()?;
        if grid.details().is_empty() {
            let rows: Vec<usize> = (1..=grid.row_count()).collect();
            if rows.is_empty() {
                return Ok(());
            }
            grid.expand_row(
                DetailSpec {
                    rows,
                    ..DetailSpec::default()
                },
                now_ms,
            )
        } else {
            grid.collapse_row(None, now_ms);
            Ok(())
        }
    }

    /// Apply an entry picked in the open popover.
    pub fn select_popover_item(&mut self, item: PopoverItem) -> Result<()> {
        let grid = self.active_or_err()?;
        match item {
            PopoverItem::AddRow => {
                let after = ADD_ROW_AFTER.min(grid.row_count());
                grid.insert_row(Some(after), None)?;
                grid.refresh();
                self.popover.close();
            }
            PopoverItem::AddColumn => {
                grid.insert_column(None, None)?;
                let metrics = *grid.metrics();
                grid.auto_size(metrics);
                grid.refresh();
                self.popover.close();
            }
            PopoverItem::ShowAll => grid.show_all_columns(),
            PopoverItem::Column { column, visible } => grid.set_column_visible(column, visible)?,
        }
        Ok(())
    }

    // ----------------------------------------------------------------------
    // Time and events
    // ----------------------------------------------------------------------

    /// Advance timed transitions of the popover and every grid.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let mut changed = self.popover.tick(now_ms);
        for tab in &mut self.tabs {
            changed |= tab.grid.tick(now_ms);
        }
        changed
    }

    pub fn next_deadline(&self, now_ms: f64) -> Option<f64> {
        self.tabs
            .iter()
            .filter_map(|t| t.grid.next_deadline(now_ms))
            .chain(self.popover.deadline())
            .reduce(f64::min)
    }

    /// Queued grid events paired with their 1-based tab index.
    pub fn drain_events(&mut self) -> Vec<(usize, GridEvent)> {
        self.tabs
            .iter_mut()
            .enumerate()
            .flat_map(|(i, tab)| {
                tab.grid
                    .drain_events()
                    .into_iter()
                    .map(move |event| (i + 1, event))
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::source::StructuredSource;
    use crate::types::CellValue;

    fn source(title: &str, rows: usize) -> TableSource {
        TableSource::from(StructuredSource {
            title: Some(title.to_string()),
            headers: vec!["A".into(), "B".into()],
            rows: (0..rows)
                .map(|i| vec![CellValue::Number(i as f64), CellValue::text("x")])
                .collect(),
        })
    }

    fn workbook() -> Workbook {
        Workbook::new(GridOptions {
            data: vec![source("first", 3), source("second", 1)],
            tabset: true,
            ..GridOptions::default()
        })
        .unwrap()
    }

    #[test]
    fn tabs_take_table_titles() {
        let wb = workbook();
        assert_eq!(wb.tab_count(), 2);
        assert_eq!(wb.tabs()[1].title, "second");
        assert_eq!(wb.active_index(), 1);
    }

    #[test]
    fn select_by_title_runs_callback() {
        let mut wb = workbook();
        let mut rows = 0;
        wb.select_tab("second", Some(&mut |g: &mut Grid| rows = g.row_count()))
            .unwrap();
        assert_eq!(rows, 1);
        assert_eq!(wb.active_index(), 2);
        assert!(wb.select_tab(TabRef::Index(3), None).is_err());
    }

    #[test]
    fn add_row_lands_after_second_row() {
        let mut wb = workbook();
        wb.dispatch("add", 0.0).unwrap();
        assert!(wb.popover().open().is_some());
        wb.select_popover_item(PopoverItem::AddRow).unwrap();
        let grid = wb.active_grid().unwrap();
        assert_eq!(grid.row_count(), 4);
        assert_eq!(grid.rows()[2], vec![CellValue::Empty, CellValue::Empty]);
        assert!(wb.popover().open().is_none());
    }

    #[test]
    fn unknown_action_is_skipped() {
        let mut wb = workbook();
        assert!(!wb.dispatch("print", 0.0).unwrap());
        assert!(wb.dispatch("lab", 0.0).unwrap());
    }

    #[test]
    fn popover_item_attrs_parse_back() {
        let item = PopoverItem::Column {
            column: 3,
            visible: false,
        };
        assert_eq!(PopoverItem::parse(&item.attr(), false).unwrap(), item);
        assert!(PopoverItem::parse("column-x", true).is_err());
    }

    #[test]
    fn settings_toggles_every_row() {
        let mut wb = workbook();
        wb.dispatch("settings", 0.0).unwrap();
        assert_eq!(wb.active_grid().unwrap().details().panels().len(), 3);
        wb.dispatch("settings", 10.0).unwrap();
        wb.tick(1000.0);
        assert!(wb.active_grid().unwrap().details().is_empty());
    }
}
