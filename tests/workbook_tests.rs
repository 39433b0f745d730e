//! Workbook tabs, toolbar dispatch and popover tests.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod fixtures;

use fixtures::{ab_table, workbook, TableBuilder};
use gridbook::classes::{DROPDOWN, GRID, SLICE, TAB, TOOLBAR_BUTTON};
use gridbook::workbook::{
    find_button, PopoverContent, PopoverItem, TabRef, ToolbarAction, REOPEN_MS,
};
use gridbook::{GridEvent, GridOptions, Workbook};

fn two_tabs(toolbar: &[&str]) -> Workbook {
    workbook(
        &[
            ab_table().id("first"),
            TableBuilder::new()
                .id("second")
                .headers(&["X"])
                .row(&["a"])
                .row(&["b"])
                .row(&["c"]),
        ],
        toolbar,
    )
}

// ============================================================================
// Tabs
// ============================================================================

#[test]
fn one_tab_per_source_titled_by_id() {
    let wb = two_tabs(&[]);
    assert_eq!(wb.tab_count(), 2);
    let titles: Vec<_> = wb.tabs().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second"]);
    assert_eq!(wb.active_index(), 1);
}

#[test]
fn selecting_tab_swaps_the_attached_grid() {
    let mut wb = two_tabs(&[]);
    wb.select_tab(TabRef::Index(2), None).unwrap();
    let view = wb.view();
    let grids = view.find_all(GRID);
    assert_eq!(grids.len(), 1);
    assert_eq!(grids[0].attr_value("title"), Some("second"));
    assert_eq!(view.count(TAB), 2);
}

#[test]
fn select_tab_by_title_runs_callback() {
    let mut wb = two_tabs(&[]);
    let mut seen = 0;
    let mut callback = |grid: &mut gridbook::Grid| seen = grid.row_count();
    wb.select_tab("second", Some(&mut callback)).unwrap();
    assert_eq!(seen, 3);
    assert!(wb.select_tab(TabRef::Index(3), None).is_err());
    assert!(wb.select_tab("missing", None).is_err());
    assert_eq!(wb.active_index(), 2);
}

#[test]
fn added_tab_without_title_is_numbered() {
    let mut wb = two_tabs(&[]);
    let index = wb
        .add_tab(None, &TableBuilder::new().headers(&["Q"]).source())
        .unwrap();
    assert_eq!(index, 3);
    assert_eq!(wb.tabs()[2].title, "Sheet 3");
    let named = wb
        .add_tab(Some("Extra"), &ab_table().id("ignored").source())
        .unwrap();
    assert_eq!(wb.tabs()[named - 1].title, "Extra");
}

#[test]
fn empty_workbook_has_one_sheet() {
    let wb = Workbook::new(GridOptions::default()).unwrap();
    assert_eq!(wb.tab_count(), 1);
    assert_eq!(wb.tabs()[0].title, "Sheet 1");
    assert_eq!(wb.active_grid().unwrap().row_count(), 0);
}

#[test]
fn events_carry_their_tab() {
    let mut wb = two_tabs(&[]);
    wb.drain_events();
    wb.grid_mut(TabRef::Index(2)).unwrap().sort(1).unwrap();
    let events = wb.drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, 2);
    assert!(matches!(events[0].1, GridEvent::Sort { column: 1, .. }));
}

// ============================================================================
// Toolbar
// ============================================================================

#[test]
fn default_toolbar_order() {
    let wb = Workbook::new(GridOptions::default()).unwrap();
    assert_eq!(wb.toolbar(), ToolbarAction::DEFAULT_ORDER.as_slice());
    assert_eq!(wb.view().count(TOOLBAR_BUTTON), 15);
}

#[test]
fn unknown_toolbar_ids_are_skipped() {
    let wb = two_tabs(&["undo", "frobnicate", "save"]);
    assert_eq!(wb.toolbar(), &[ToolbarAction::Undo, ToolbarAction::Save]);
    let view = wb.view();
    assert!(find_button(&view, ToolbarAction::Save).is_some());
    assert!(find_button(&view, ToolbarAction::Menu).is_none());
}

#[test]
fn dispatch_reports_unknown_ids() {
    let mut wb = two_tabs(&["undo"]);
    assert!(!wb.dispatch("frobnicate", 0.0).unwrap());
    assert!(wb.dispatch("lab", 0.0).unwrap());
}

#[test]
fn undo_button_reverts_active_grid() {
    let mut wb = two_tabs(&["undo"]);
    wb.active_grid_mut().unwrap().remove_row(None).unwrap();
    wb.dispatch("undo", 0.0).unwrap();
    assert_eq!(wb.active_grid().unwrap().row_count(), 2);
}

#[test]
fn save_shows_overlay_for_two_seconds() {
    let mut wb = two_tabs(&["save"]);
    wb.dispatch("save", 500.0).unwrap();
    assert!(wb.active_grid().unwrap().overlay().is_visible());
    assert_eq!(wb.next_deadline(500.0), Some(2_500.0));
    assert!(wb.tick(2_500.0));
    assert!(!wb.active_grid().unwrap().overlay().is_visible());
}

#[test]
fn menu_opens_panel_before_first_row() {
    let mut wb = two_tabs(&["menu"]);
    wb.dispatch("menu", 0.0).unwrap();
    let grid = wb.active_grid().unwrap();
    let panels = grid.details().panels();
    assert_eq!(panels.len(), 1);
    assert_eq!(panels[0].row, 1);
    assert!(panels[0].before);
    assert_eq!(panels[0].height, Some(100.0));
    assert_eq!(wb.view().count(SLICE), 1);
}

#[test]
fn settings_toggles_panels_on_every_row() {
    let mut wb = two_tabs(&["settings"]);
    wb.select_tab(TabRef::Index(2), None).unwrap();
    wb.dispatch("settings", 0.0).unwrap();
    assert_eq!(wb.active_grid().unwrap().details().panels().len(), 3);
    wb.dispatch("settings", 10.0).unwrap();
    let deadline = wb.next_deadline(10.0).unwrap();
    wb.tick(deadline);
    assert!(wb.active_grid().unwrap().details().is_empty());
}

// ============================================================================
// Popover
// ============================================================================

#[test]
fn add_menu_toggles_and_inserts_row() {
    let mut wb = two_tabs(&["add", "show"]);
    wb.dispatch("add", 0.0).unwrap();
    assert_eq!(
        wb.popover().open(),
        Some((ToolbarAction::Add, &PopoverContent::AddMenu))
    );
    assert_eq!(wb.view().count(DROPDOWN), 1);

    wb.select_popover_item(PopoverItem::AddRow).unwrap();
    assert_eq!(wb.active_grid().unwrap().row_count(), 3);
    assert!(wb.popover().open().is_none());
    assert_eq!(wb.view().count(DROPDOWN), 0);
}

#[test]
fn switching_popover_anchor_reopens_after_delay() {
    let mut wb = two_tabs(&["add", "show"]);
    wb.dispatch("add", 0.0).unwrap();
    wb.dispatch("show", 100.0).unwrap();
    assert!(wb.popover().open().is_none());
    assert_eq!(wb.next_deadline(100.0), Some(100.0 + REOPEN_MS));
    wb.tick(100.0 + REOPEN_MS);
    assert_eq!(
        wb.popover().open(),
        Some((ToolbarAction::Show, &PopoverContent::ColumnChecklist))
    );
}

#[test]
fn clicking_the_same_button_closes_popover() {
    let mut wb = two_tabs(&["add"]);
    wb.dispatch("add", 0.0).unwrap();
    wb.dispatch("add", 5.0).unwrap();
    assert!(wb.popover().open().is_none());
}

#[test]
fn column_checklist_stays_open() {
    let mut wb = two_tabs(&["show"]);
    wb.dispatch("show", 0.0).unwrap();
    wb.select_popover_item(PopoverItem::Column {
        column: 2,
        visible: false,
    })
    .unwrap();
    assert_eq!(wb.active_grid().unwrap().visible_columns(), vec![1]);
    wb.select_popover_item(PopoverItem::ShowAll).unwrap();
    assert_eq!(wb.active_grid().unwrap().visible_columns(), vec![1, 2]);
    assert!(wb.popover().open().is_some());
}

#[test]
fn add_column_from_popover() {
    let mut wb = two_tabs(&["add"]);
    wb.dispatch("add", 0.0).unwrap();
    wb.select_popover_item(PopoverItem::AddColumn).unwrap();
    assert_eq!(wb.active_grid().unwrap().headers(), &["A", "B", ""]);
}

#[test]
fn selecting_a_tab_closes_popover() {
    let mut wb = two_tabs(&["add"]);
    wb.dispatch("add", 0.0).unwrap();
    wb.select_tab(TabRef::Index(2), None).unwrap();
    assert!(wb.popover().open().is_none());
}
