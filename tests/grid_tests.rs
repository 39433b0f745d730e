//! Grid mutation, sort and undo tests.
//!
//! Exercises the public `Grid` API end to end over markup sources built with
//! the `TableBuilder` fixture.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod fixtures;

use fixtures::{ab_table, row_strings, TableBuilder};
use gridbook::grid::{SortDirection, SortState};
use gridbook::source::StructuredSource;
use gridbook::{CellValue, Grid, GridEvent, GridOptions, GridbookError, TableSource};

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn every_row_matches_header_count() {
    let grid = TableBuilder::new()
        .headers(&["A", "B", "C"])
        .row(&["1", "", "3"])
        .row(&["4", "5", ""])
        .grid();
    assert_eq!(grid.column_count(), 3);
    for row in grid.rows() {
        assert_eq!(row.len(), grid.headers().len());
    }
    assert_eq!(grid.cell(1, 2), Some(&CellValue::Empty));
    assert_eq!(grid.cell(2, 3), Some(&CellValue::Empty));
}

#[test]
fn render_emits_ready_and_clears_history() {
    let mut grid = ab_table().grid();
    grid.sort(1).unwrap();
    assert_eq!(grid.history_len(), 1);
    grid.drain_events();

    grid.render(&TableBuilder::new().headers(&["X"]).row(&["y"]).source())
        .unwrap();
    assert_eq!(grid.headers(), &["X"]);
    assert_eq!(grid.history_len(), 0);
    assert_eq!(grid.sort_state(), SortState::default());
    assert_eq!(grid.drain_events(), vec![GridEvent::Ready]);
}

#[test]
fn ragged_source_is_a_parse_error() {
    let mut grid = ab_table().grid();
    let ragged = gridbook::TableSource::Markup(
        "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td></tr></table>".into(),
    );
    assert!(matches!(grid.render(&ragged), Err(GridbookError::Parse(_))));
    assert_eq!(row_strings(&grid), vec![vec!["1", "2"], vec!["3", "4"]]);
}

// ============================================================================
// Insert / remove
// ============================================================================

#[test]
fn insert_then_remove_row_restores_data() {
    let mut grid = ab_table().grid();
    let before = grid.rows().to_vec();
    grid.insert_row(Some(1), Some(vec!["x".into(), "y".into()]))
        .unwrap();
    assert_eq!(row_strings(&grid)[1], vec!["x", "y"]);
    grid.remove_row(Some(2)).unwrap();
    assert_eq!(grid.rows(), before.as_slice());
}

#[test]
fn insert_then_remove_column_restores_data() {
    let mut grid = ab_table().grid();
    let before = grid.table().clone();
    grid.insert_column(Some(0), None).unwrap();
    assert_eq!(grid.headers(), &["", "A", "B"]);
    assert_eq!(grid.cell(1, 1), Some(&CellValue::Empty));
    grid.remove_column(Some(1)).unwrap();
    assert_eq!(grid.table(), &before);
}

#[test]
fn insert_column_places_header_and_values() {
    let mut grid = ab_table().grid();
    grid.insert_column(Some(1), Some(vec!["C".into(), "x".into(), "y".into()]))
        .unwrap();
    assert_eq!(grid.headers(), &["A", "C", "B"]);
    assert_eq!(row_strings(&grid), vec![vec!["1", "x", "2"], vec!["3", "y", "4"]]);
}

#[test]
fn remove_defaults_to_last() {
    let mut grid = ab_table().grid();
    grid.remove_row(None).unwrap();
    grid.remove_column(None).unwrap();
    assert_eq!(grid.headers(), &["A"]);
    assert_eq!(row_strings(&grid), vec![vec!["1"]]);
}

#[test]
fn out_of_range_indices_are_rejected() {
    let mut grid = ab_table().grid();
    assert!(matches!(
        grid.remove_row(Some(3)),
        Err(GridbookError::InvalidOperation(_))
    ));
    assert!(matches!(
        grid.remove_column(Some(0)),
        Err(GridbookError::InvalidOperation(_))
    ));
    assert!(matches!(
        grid.insert_column(Some(3), None),
        Err(GridbookError::InvalidOperation(_))
    ));
    assert!(matches!(
        grid.insert_column(None, Some(vec!["H".into(), "1".into(), "2".into(), "3".into()])),
        Err(GridbookError::InvalidOperation(_))
    ));
    assert!(matches!(grid.sort(5), Err(GridbookError::InvalidOperation(_))));
    assert_eq!(grid.history_len(), 0);
}

#[test]
fn structural_changes_emit_change() {
    let mut grid = ab_table().grid();
    grid.insert_row(None, None).unwrap();
    grid.remove_column(Some(2)).unwrap();
    assert_eq!(grid.drain_events(), vec![GridEvent::Change, GridEvent::Change]);
}

// ============================================================================
// Sort
// ============================================================================

#[test]
fn sort_toggles_direction() {
    let mut grid = ab_table().grid();
    assert_eq!(grid.sort(1).unwrap(), SortDirection::Ascending);
    assert_eq!(row_strings(&grid), vec![vec!["1", "2"], vec!["3", "4"]]);
    assert_eq!(grid.sort(1).unwrap(), SortDirection::Descending);
    assert_eq!(row_strings(&grid), vec![vec!["3", "4"], vec!["1", "2"]]);
}

#[test]
fn sorting_another_column_restarts_ascending() {
    let mut grid = TableBuilder::new()
        .headers(&["Name", "Qty"])
        .row(&["b", "1"])
        .row(&["a", "3"])
        .row(&["c", "2"])
        .grid();
    grid.sort(1).unwrap();
    grid.sort(1).unwrap();
    assert_eq!(grid.sort(2).unwrap(), SortDirection::Ascending);
    let qty: Vec<String> = row_strings(&grid).into_iter().map(|r| r[1].clone()).collect();
    assert_eq!(qty, vec!["1", "2", "3"]);
}

#[test]
fn second_sort_reverses_distinct_keys() {
    let mut grid = TableBuilder::new()
        .headers(&["K"])
        .row(&["delta"])
        .row(&["alpha"])
        .row(&["charlie"])
        .row(&["bravo"])
        .grid();
    grid.sort(1).unwrap();
    let mut ascending = row_strings(&grid);
    grid.sort(1).unwrap();
    ascending.reverse();
    assert_eq!(row_strings(&grid), ascending);
}

#[test]
fn empty_cells_sort_last() {
    let mut grid = TableBuilder::new()
        .headers(&["K"])
        .row(&[""])
        .row(&["b"])
        .row(&["a"])
        .grid();
    grid.sort(1).unwrap();
    assert_eq!(grid.cell(3, 1), Some(&CellValue::Empty));
}

/// A shuffled column of numbers, numeric text, words and blanks.
fn mixed_column(len: u64) -> Grid {
    let mut seed = 0x2545_f491_u64;
    let rows = (0..len)
        .map(|_| {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let n = (seed >> 33) % 1000;
            let cell = match n % 5 {
                0 => CellValue::Number(n as f64 / 4.0),
                1 => CellValue::text(n.to_string()),
                2 => CellValue::text(format!("{n}a")),
                3 => CellValue::text(if n % 2 == 0 { "NaN" } else { "inf" }),
                _ => CellValue::Empty,
            };
            vec![cell]
        })
        .collect();
    let source = TableSource::Structured(StructuredSource {
        title: None,
        headers: vec!["K".into()],
        rows,
    });
    Grid::from_source(&source, &GridOptions::default()).unwrap()
}

fn rank(cell: &CellValue) -> u8 {
    match cell {
        CellValue::Number(_) => 0,
        CellValue::Text(s) if s.parse::<f64>().is_ok_and(f64::is_finite) => 0,
        CellValue::Text(_) => 1,
        CellValue::Empty => 2,
    }
}

#[test]
fn mixed_column_sorts_numbers_then_text_then_empty() {
    for len in [50, 333, 700] {
        let mut grid = mixed_column(len);
        grid.sort(1).unwrap();
        let column: Vec<&CellValue> = grid.rows().iter().map(|r| &r[0]).collect();
        assert_eq!(column.len() as u64, len);
        assert!(column.windows(2).all(|w| rank(w[0]) <= rank(w[1])));
        assert!(column
            .windows(2)
            .all(|w| w[0].sort_cmp(w[1]) != std::cmp::Ordering::Greater));

        grid.sort(1).unwrap();
        let column: Vec<&CellValue> = grid.rows().iter().map(|r| &r[0]).collect();
        assert!(column.windows(2).all(|w| rank(w[0]) >= rank(w[1])));
    }
}

#[test]
fn numeric_text_sorts_by_value() {
    let mut grid = TableBuilder::new()
        .headers(&["K"])
        .row(&["10"])
        .row(&["9"])
        .row(&["10a"])
        .grid();
    grid.sort(1).unwrap();
    let keys: Vec<String> = row_strings(&grid).into_iter().map(|r| r[0].clone()).collect();
    assert_eq!(keys, vec!["9", "10", "10a"]);
}

#[test]
fn sort_emits_event_with_direction() {
    let mut grid = ab_table().grid();
    grid.sort(2).unwrap();
    assert_eq!(
        grid.drain_events(),
        vec![GridEvent::Sort {
            column: 2,
            direction: SortDirection::Ascending
        }]
    );
}

// ============================================================================
// Undo
// ============================================================================

#[test]
fn record_then_undo_is_noop() {
    let mut grid = ab_table().grid();
    let before = grid.table().clone();
    grid.record_data();
    assert!(grid.undo());
    assert_eq!(grid.table(), &before);
}

#[test]
fn undo_reverts_one_mutation_at_a_time() {
    let mut grid = ab_table().grid();
    grid.insert_row(None, Some(vec!["5".into(), "6".into()]))
        .unwrap();
    grid.sort(1).unwrap();
    grid.sort(1).unwrap();
    assert_eq!(grid.history_len(), 3);

    assert!(grid.undo());
    assert_eq!(row_strings(&grid)[0], vec!["1", "2"]);
    assert!(grid.undo());
    assert!(grid.undo());
    assert_eq!(grid.row_count(), 2);
    assert!(!grid.undo());
}

#[test]
fn undo_restores_removed_column_visible() {
    let mut grid = ab_table().grid();
    grid.set_column_visible(1, false).unwrap();
    grid.remove_column(Some(2)).unwrap();
    assert!(grid.undo());
    assert_eq!(grid.visible_columns(), vec![1, 2]);
}

#[test]
fn edit_cell_is_undoable() {
    let mut grid = ab_table().grid();
    grid.edit_cell(2, 2, CellValue::Number(40.0)).unwrap();
    assert_eq!(grid.cell(2, 2), Some(&CellValue::Number(40.0)));
    assert_eq!(
        grid.drain_events(),
        vec![GridEvent::Edit { row: 2, column: 2 }]
    );
    assert!(grid.undo());
    assert_eq!(grid.cell(2, 2), Some(&CellValue::text("4")));
}

// ============================================================================
// Overlay
// ============================================================================

#[test]
fn wait_hides_overlay_at_deadline() {
    let mut grid = ab_table().grid();
    assert!(grid.wait(2.0, None, 1_000.0));
    assert!(grid.overlay().is_visible());
    assert!(!grid.wait(5.0, None, 1_500.0));
    assert_eq!(grid.next_deadline(1_500.0), Some(3_000.0));

    assert!(!grid.tick(2_999.0));
    assert!(grid.overlay().is_visible());
    assert!(grid.tick(3_000.0));
    assert!(!grid.overlay().is_visible());
    assert_eq!(grid.next_deadline(3_000.0), None);
}

// ============================================================================
// Markers
// ============================================================================

#[test]
fn markers_are_dropped_with_their_column() {
    let mut grid = ab_table().grid();
    grid.set_contextual(1, 2, None, Default::default()).unwrap();
    grid.set_contextual(2, 1, Some("blue"), Default::default())
        .unwrap();
    grid.remove_column(Some(2)).unwrap();
    assert_eq!(grid.contextual().len(), 1);
    assert_eq!(grid.contextual()[0].color, "blue");
    assert!(grid.set_contextual(3, 1, None, Default::default()).is_err());
}
