//! One editable table: data, sort state, undo history and view state.
//!
//! Rows and columns are 1-based throughout the public API. Every public
//! mutation records a snapshot first, so a single `undo` reverts it, and
//! queues a [`GridEvent`] for the host.

mod contextual;
mod detail;
mod drag;
mod events;
mod history;
mod hover;
mod layout;
mod overlay;
mod scroll;
mod sort;
mod view;

pub use contextual::{Contextual, Corner};
pub use detail::{DetailPanels, DetailSpec, Panel, PanelPhase};
pub use drag::{removal_index, DragOutcome, DragState, DRAG_THRESHOLD};
pub use events::GridEvent;
pub use history::{History, Snapshot};
pub use hover::{ElementRef, HoverTarget, StylePatch};
pub use layout::{ContentShape, GridLayout, Metrics};
pub use overlay::Overlay;
pub use scroll::{ScrollState, FRAME_MS};
pub use sort::{sort_rows, SortDirection, SortState};

use tracing::debug;

use crate::error::{GridbookError, Result};
use crate::loader::LoaderKind;
use crate::options::GridOptions;
use crate::source::TableSource;
use crate::theme::Theme;
use crate::types::{CellValue, TableData};

pub struct Grid {
    table: TableData,
    hidden: Vec<bool>,
    sort: SortState,
    history: History,
    drag: DragState,
    options: GridOptions,
    theme: Theme,
    metrics: Metrics,
    layout: GridLayout,
    overlay: Overlay,
    details: DetailPanels,
    scroll: ScrollState,
    contextual: Vec<Contextual>,
    hover: Option<HoverTarget>,
    events: Vec<GridEvent>,
}

impl Grid {
    /// An empty grid configured by `options` (its `data` is ignored).
    pub fn new(options: &GridOptions) -> Self {
        let options = GridOptions {
            data: Vec::new(),
            ..options.clone()
        };
        let theme = options.resolve_theme();
        let mut grid = Self {
            table: TableData::default(),
            hidden: Vec::new(),
            sort: SortState::default(),
            history: History::new(),
            drag: DragState::default(),
            options,
            theme,
            metrics: Metrics::default(),
            layout: GridLayout::default(),
            overlay: Overlay::default(),
            details: DetailPanels::default(),
            scroll: ScrollState::default(),
            contextual: Vec::new(),
            hover: None,
            events: Vec::new(),
        };
        grid.relayout();
        grid
    }

    pub fn from_source(source: &TableSource, options: &GridOptions) -> Result<Self> {
        let mut grid = Self::new(options);
        grid.render(source)?;
        Ok(grid)
    }

    /// Replace the grid's data with a parsed source.
    ///
    /// On error the previous data is kept.
    pub fn render(&mut self, source: &TableSource) -> Result<()> {
        let table = source.parse()?;
        self.load(table);
        Ok(())
    }

    /// Replace the grid's data with an already validated table.
    pub fn load(&mut self, table: TableData) {
        debug!(
            rows = table.row_count(),
            columns = table.column_count(),
            "grid loaded"
        );
        self.hidden = vec![false; table.column_count()];
        self.table = table;
        self.sort.reset();
        self.history.clear();
        self.drag.cancel();
        self.details.clear();
        self.contextual.clear();
        self.hover = None;
        self.relayout();
        self.events.push(GridEvent::Ready);
    }

    // ----------------------------------------------------------------------
    // Accessors
    // ----------------------------------------------------------------------

    pub fn table(&self) -> &TableData {
        &self.table
    }

    pub fn headers(&self) -> &[String] {
        &self.table.headers
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.table.rows
    }

    pub fn title(&self) -> Option<&str> {
        self.table.title.as_deref()
    }

    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    pub fn column_count(&self) -> usize {
        self.table.column_count()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.table.cell(row, column)
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn details(&self) -> &DetailPanels {
        &self.details
    }

    pub fn contextual(&self) -> &[Contextual] {
        &self.contextual
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn hover_target(&self) -> Option<HoverTarget> {
        self.hover
    }

    /// Take every queued notification, oldest first.
    pub fn drain_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }

    // ----------------------------------------------------------------------
    // Validation helpers
    // ----------------------------------------------------------------------

    fn check_row(&self, row: usize) -> Result<usize> {
        if row == 0 || row > self.row_count() {
            return Err(GridbookError::invalid(format!(
                "row {row} out of range 1..={}",
                self.row_count()
            )));
        }
        Ok(row - 1)
    }

    fn check_column(&self, column: usize) -> Result<usize> {
        if column == 0 || column > self.column_count() {
            return Err(GridbookError::invalid(format!(
                "column {column} out of range 1..={}",
                self.column_count()
            )));
        }
        Ok(column - 1)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            headers: self.table.headers.clone(),
            rows: self.table.rows.clone(),
        }
    }

    // ----------------------------------------------------------------------
    // Row and column mutation
    // ----------------------------------------------------------------------

    /// Insert a row after `after` (`Some(0)` = top, `None` = bottom).
    ///
    /// Missing values are padded with [`CellValue::Empty`].
    pub fn insert_row(&mut self, after: Option<usize>, values: Option<Vec<CellValue>>) -> Result<()> {
        let after = after.unwrap_or(self.row_count());
        if after > self.row_count() {
            return Err(GridbookError::invalid(format!(
                "cannot insert after row {after}; grid has {} rows",
                self.row_count()
            )));
        }
        let width = self.column_count();
        let mut values = values.unwrap_or_default();
        if values.len() > width {
            return Err(GridbookError::invalid(format!(
                "{} values for {width} columns",
                values.len()
            )));
        }
        values.resize(width, CellValue::Empty);

        self.record_data();
        self.table.rows.insert(after, values);
        self.shift_markers(Axis::Row, after, Shift::Insert);
        self.after_structure_change();
        Ok(())
    }

    /// Remove row `index` (`None` = last row).
    pub fn remove_row(&mut self, index: Option<usize>) -> Result<()> {
        if self.row_count() == 0 {
            return Err(GridbookError::invalid("grid has no rows to remove"));
        }
        let idx = self.check_row(index.unwrap_or(self.row_count()))?;
        self.record_data();
        self.table.rows.remove(idx);
        self.shift_markers(Axis::Row, idx, Shift::Remove);
        self.after_structure_change();
        Ok(())
    }

    /// Insert a column after `after` (`Some(0)` = first, `None` = last).
    ///
    /// `values[0]` is the header and `values[1..]` one value per row.
    pub fn insert_column(
        &mut self,
        after: Option<usize>,
        values: Option<Vec<CellValue>>,
    ) -> Result<()> {
        let after = after.unwrap_or(self.column_count());
        let values = values.unwrap_or_default();
        self.validate_column_insert(after, &values)?;
        self.record_data();
        self.raw_insert_column(after, values);
        self.after_structure_change();
        Ok(())
    }

    /// Remove column `index` (`None` = last column).
    pub fn remove_column(&mut self, index: Option<usize>) -> Result<()> {
        if self.column_count() == 0 {
            return Err(GridbookError::invalid("grid has no columns to remove"));
        }
        let column = index.unwrap_or(self.column_count());
        self.check_column(column)?;
        self.record_data();
        self.raw_remove_column(column);
        self.after_structure_change();
        Ok(())
    }

    fn validate_column_insert(&self, after: usize, values: &[CellValue]) -> Result<()> {
        if after > self.column_count() {
            return Err(GridbookError::invalid(format!(
                "cannot insert after column {after}; grid has {} columns",
                self.column_count()
            )));
        }
        if values.len() > self.row_count() + 1 {
            return Err(GridbookError::invalid(format!(
                "{} values for a header and {} rows",
                values.len(),
                self.row_count()
            )));
        }
        Ok(())
    }

    fn raw_insert_column(&mut self, after: usize, values: Vec<CellValue>) {
        let mut values = values.into_iter();
        let header = values.next().map(|v| v.to_string()).unwrap_or_default();
        self.table.headers.insert(after, header);
        for row in &mut self.table.rows {
            row.insert(after, values.next().unwrap_or_default());
        }
        self.hidden.insert(after.min(self.hidden.len()), false);
        if let Some(sorted) = self.sort.column {
            if sorted > after {
                self.sort.column = Some(sorted + 1);
            }
        }
        self.shift_markers(Axis::Column, after, Shift::Insert);
    }

    fn raw_remove_column(&mut self, column: usize) {
        let idx = column - 1;
        if idx < self.table.headers.len() {
            self.table.headers.remove(idx);
        }
        for row in &mut self.table.rows {
            if idx < row.len() {
                row.remove(idx);
            }
        }
        if idx < self.hidden.len() {
            self.hidden.remove(idx);
        }
        match self.sort.column {
            Some(sorted) if sorted == column => self.sort.reset(),
            Some(sorted) if sorted > column => self.sort.column = Some(sorted - 1),
            _ => {}
        }
        self.shift_markers(Axis::Column, idx, Shift::Remove);
    }

    fn after_structure_change(&mut self) {
        self.details.clear();
        self.hover = None;
        self.relayout();
        self.events.push(GridEvent::Change);
    }

    fn shift_markers(&mut self, axis: Axis, at: usize, shift: Shift) {
        match shift {
            // `at` is the 0-based insertion index; markers past it move down.
            Shift::Insert => {
                for marker in &mut self.contextual {
                    let p = axis.of(marker);
                    if *p > at {
                        *p += 1;
                    }
                }
            }
            // `at` is the 0-based removed index.
            Shift::Remove => {
                self.contextual.retain_mut(|m| {
                    let p = axis.of(m);
                    if *p == at + 1 {
                        return false;
                    }
                    if *p > at + 1 {
                        *p -= 1;
                    }
                    true
                });
            }
        }
    }

    /// Replace one cell's value.
    pub fn edit_cell(&mut self, row: usize, column: usize, value: CellValue) -> Result<()> {
        let r = self.check_row(row)?;
        let c = self.check_column(column)?;
        let unchanged = self
            .table
            .rows
            .get(r)
            .and_then(|cells| cells.get(c))
            .is_some_and(|current| *current == value);
        if unchanged {
            return Ok(());
        }
        self.record_data();
        if let Some(cell) = self.table.rows.get_mut(r).and_then(|cells| cells.get_mut(c)) {
            *cell = value;
        }
        self.relayout();
        self.events.push(GridEvent::Edit { row, column });
        Ok(())
    }

    // ----------------------------------------------------------------------
    // Sort and history
    // ----------------------------------------------------------------------

    /// Sort rows by `column`; a repeat call on the same column flips direction.
    pub fn sort(&mut self, column: usize) -> Result<SortDirection> {
        let idx = self.check_column(column)?;
        self.record_data();
        let direction = self.sort.toggle(column);
        sort_rows(&mut self.table.rows, idx, direction);
        self.details.clear();
        debug!(column, %direction, "sorted");
        self.events.push(GridEvent::Sort { column, direction });
        Ok(direction)
    }

    /// Push a snapshot of the current headers and rows.
    pub fn record_data(&mut self) {
        let snapshot = self.snapshot();
        self.history.push(snapshot);
    }

    /// Restore the most recent snapshot. Returns false when there is none.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            debug!("undo with empty history");
            return false;
        };
        let width_changed = snapshot.headers.len() != self.table.headers.len();
        self.table.headers = snapshot.headers;
        self.table.rows = snapshot.rows;
        if width_changed {
            self.hidden = vec![false; self.table.headers.len()];
            self.contextual.clear();
        }
        self.sort.reset();
        self.details.clear();
        self.hover = None;
        self.relayout();
        self.events.push(GridEvent::Change);
        true
    }

    // ----------------------------------------------------------------------
    // Column visibility
    // ----------------------------------------------------------------------

    pub fn set_column_visible(&mut self, column: usize, visible: bool) -> Result<()> {
        let idx = self.check_column(column)?;
        if let Some(hidden) = self.hidden.get_mut(idx) {
            *hidden = !visible;
        }
        self.hover = None;
        self.relayout();
        Ok(())
    }

    pub fn show_all_columns(&mut self) {
        self.hidden.iter_mut().for_each(|h| *h = false);
        self.relayout();
    }

    pub fn is_column_visible(&self, column: usize) -> bool {
        column
            .checked_sub(1)
            .and_then(|idx| self.hidden.get(idx))
            .is_some_and(|hidden| !hidden)
    }

    /// 1-based indices of the visible columns, in order.
    pub fn visible_columns(&self) -> Vec<usize> {
        (1..=self.column_count())
            .filter(|&c| self.is_column_visible(c))
            .collect()
    }

    /// Position of `column` among the visible columns (1-based).
    pub fn visible_position(&self, column: usize) -> Option<usize> {
        self.visible_columns()
            .iter()
            .position(|&c| c == column)
            .map(|p| p + 1)
    }

    // ----------------------------------------------------------------------
    // Layout
    // ----------------------------------------------------------------------

    /// Recompute widths and heights against fresh host measurements.
    pub fn auto_size(&mut self, metrics: Metrics) {
        self.metrics = metrics;
        self.relayout();
    }

    /// Recompute layout with the last measurements and reset transient
    /// hover state.
    pub fn refresh(&mut self) {
        self.hover = None;
        self.relayout();
    }

    fn content_shape(&self) -> ContentShape {
        let visible = self.visible_columns();
        let cell_lines = self
            .table
            .rows
            .iter()
            .flat_map(|row| visible.iter().filter_map(move |&c| row.get(c - 1)))
            .map(|v| v.to_string().lines().count().max(1))
            .max()
            .unwrap_or(1);
        let header_lines = visible
            .iter()
            .filter_map(|&c| self.table.headers.get(c - 1))
            .map(|h| h.lines().count().max(1))
            .max()
            .unwrap_or(1);
        ContentShape {
            columns: visible.len(),
            rows: self.row_count(),
            cell_lines,
            header_lines,
            has_header: self.table.has_header_row,
        }
    }

    fn relayout(&mut self) {
        let shape = self.content_shape();
        self.layout = GridLayout::compute(&self.options, &self.metrics, &shape);
    }

    // ----------------------------------------------------------------------
    // Detail panels, scrolling, overlay
    // ----------------------------------------------------------------------

    /// Open detail panels next to the rows in `spec`.
    pub fn expand_row(&mut self, spec: DetailSpec, now_ms: f64) -> Result<()> {
        for &row in &spec.rows {
            self.check_row(row)?;
        }
        self.details.expand(spec, now_ms);
        Ok(())
    }

    /// Slide closed the panels of `rows`, or every panel for `None`.
    pub fn collapse_row(&mut self, rows: Option<&[usize]>, now_ms: f64) {
        self.details.collapse(rows, now_ms);
    }

    /// Animate the viewport to bring a cell into view. Defaults to row 1,
    /// column 1.
    pub fn scroll_to(&mut self, row: Option<usize>, column: Option<usize>, now_ms: f64) {
        let row = row.unwrap_or(1).clamp(1, self.row_count().max(1));
        let position = column
            .and_then(|c| self.visible_position(c))
            .unwrap_or(1);
        let (top, left) = self.layout.scroll_offset(row, position);
        self.scroll.animate_to(top, left, now_ms);
    }

    /// Host-reported scroll offsets of the grid element.
    pub fn set_scroll_position(&mut self, top: f64, left: f64) {
        self.scroll.set_position(top, left);
    }

    pub fn scroll_position(&self) -> (f64, f64) {
        self.scroll.position()
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_animating()
    }

    /// Show the loading overlay for `seconds`; ignored while it is showing.
    pub fn wait(&mut self, seconds: f64, loader: Option<LoaderKind>, now_ms: f64) -> bool {
        let loader = loader.unwrap_or_else(|| self.options.loader_kind());
        self.overlay.wait(seconds, loader, now_ms)
    }

    /// Advance every timed transition. Returns true if anything changed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let overlay = self.overlay.tick(now_ms);
        let details = self.details.tick(now_ms);
        let scroll = self.scroll.tick(now_ms);
        overlay || details || scroll
    }

    /// Earliest time at which `tick` has work to do.
    pub fn next_deadline(&self, now_ms: f64) -> Option<f64> {
        [
            self.overlay.deadline(),
            self.details.deadline(),
            self.scroll.deadline(now_ms),
        ]
        .into_iter()
        .flatten()
        .reduce(f64::min)
    }

    // ----------------------------------------------------------------------
    // Header drag
    // ----------------------------------------------------------------------

    /// Pointer pressed on a header, at grid-relative coordinates.
    pub fn header_pointer_down(&mut self, column: usize, x: f64, y: f64) {
        if !self.options.dnd || self.check_column(column).is_err() {
            return;
        }
        self.drag.press(column, x, y);
    }

    /// Pointer moved over the grid. Returns true when drag feedback changed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.drag.motion(x, y, &self.layout)
    }

    /// Pointer released; commits a drop.
    pub fn pointer_up(&mut self) -> Result<DragOutcome> {
        let outcome = self.drag.release();
        if let DragOutcome::Drop { column, target } = outcome {
            let after = match target {
                0 => 0,
                p => self
                    .visible_columns()
                    .get(p - 1)
                    .copied()
                    .unwrap_or(self.column_count()),
            };
            self.move_column(column, after)?;
        }
        Ok(outcome)
    }

    /// Move `column` so it follows column `after` (0 = front).
    ///
    /// Records one snapshot and emits `Reorder`. Dropping a column next to
    /// itself changes nothing.
    pub fn move_column(&mut self, column: usize, after: usize) -> Result<()> {
        self.check_column(column)?;
        if after > self.column_count() {
            return Err(GridbookError::invalid(format!(
                "cannot move after column {after}; grid has {} columns",
                self.column_count()
            )));
        }
        let to = if column <= after { after } else { after + 1 };
        if to == column {
            return Ok(());
        }
        let values = self
            .table
            .column_values(column)
            .ok_or_else(|| GridbookError::invalid(format!("column {column} has no data")))?;
        let was_hidden = !self.is_column_visible(column);
        let (carried, kept): (Vec<Contextual>, Vec<Contextual>) = std::mem::take(&mut self.contextual)
            .into_iter()
            .partition(|m| m.column == column);
        self.contextual = kept;

        self.record_data();
        self.raw_insert_column(after, values);
        if let Some(h) = self.hidden.get_mut(after) {
            *h = was_hidden;
        }
        let removed = removal_index(column, after);
        let carried_sort = (self.sort.column == Some(removed)).then_some(self.sort.direction);
        self.raw_remove_column(removed);
        if let Some(direction) = carried_sort {
            self.sort = SortState {
                column: Some(to),
                direction,
            };
        }
        self.contextual.extend(carried.into_iter().map(|m| Contextual { column: to, ..m }));
        self.details.clear();
        self.hover = None;
        self.relayout();
        self.events.push(GridEvent::Reorder { from: column, to });
        Ok(())
    }

    // ----------------------------------------------------------------------
    // Contextual markers
    // ----------------------------------------------------------------------

    /// Flag a cell corner with a small colored triangle (red by default).
    pub fn set_contextual(
        &mut self,
        row: usize,
        column: usize,
        color: Option<&str>,
        corner: Corner,
    ) -> Result<()> {
        self.check_row(row)?;
        self.check_column(column)?;
        self.contextual
            .retain(|m| !(m.row == row && m.column == column && m.corner == corner));
        self.contextual.push(Contextual {
            row,
            column,
            color: color.unwrap_or("red").to_string(),
            corner,
        });
        Ok(())
    }

    pub fn clear_contextual(&mut self) {
        self.contextual.clear();
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Row,
    Column,
}

impl Axis {
    fn of(self, marker: &mut Contextual) -> &mut usize {
        match self {
            Self::Row => &mut marker.row,
            Self::Column => &mut marker.column,
        }
    }
}

#[derive(Clone, Copy)]
enum Shift {
    Insert,
    Remove,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::source::StructuredSource;

    fn grid(headers: &[&str], rows: &[&[&str]]) -> Grid {
        let source = StructuredSource {
            title: None,
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|v| CellValue::text(*v)).collect())
                .collect(),
        };
        Grid::from_source(&TableSource::from(source), &GridOptions::default()).unwrap()
    }

    #[test]
    fn render_error_keeps_previous_data() {
        let mut g = grid(&["A"], &[&["1"]]);
        let err = g.render(&TableSource::Markup("<p>no table</p>".into()));
        assert!(err.is_err());
        assert_eq!(g.headers(), &["A"]);
    }

    #[test]
    fn insert_row_defaults_and_bounds() {
        let mut g = grid(&["A", "B"], &[&["1", "2"]]);
        g.insert_row(Some(0), Some(vec![CellValue::text("x")])).unwrap();
        assert_eq!(g.rows()[0], vec![CellValue::text("x"), CellValue::Empty]);
        assert!(g.insert_row(Some(5), None).is_err());
        assert!(g
            .insert_row(None, Some(vec!["a".into(), "b".into(), "c".into()]))
            .is_err());
        assert_eq!(g.history_len(), 1);
    }

    #[test]
    fn remove_from_empty_grid_is_invalid() {
        let mut g = grid(&["A"], &[]);
        assert!(matches!(
            g.remove_row(None),
            Err(GridbookError::InvalidOperation(_))
        ));
    }

    #[test]
    fn move_column_records_once() {
        let mut g = grid(&["A", "B", "C"], &[&["1", "2", "3"]]);
        g.move_column(1, 3).unwrap();
        assert_eq!(g.headers(), &["B", "C", "A"]);
        assert_eq!(g.history_len(), 1);
        assert!(g.drain_events().contains(&GridEvent::Reorder { from: 1, to: 3 }));
        assert!(g.undo());
        assert_eq!(g.headers(), &["A", "B", "C"]);
    }

    #[test]
    fn move_column_next_to_itself_is_noop() {
        let mut g = grid(&["A", "B", "C"], &[&["1", "2", "3"]]);
        g.move_column(2, 1).unwrap();
        g.move_column(2, 2).unwrap();
        assert_eq!(g.headers(), &["A", "B", "C"]);
        assert_eq!(g.history_len(), 0);
    }

    #[test]
    fn edit_cell_emits_edit() {
        let mut g = grid(&["A"], &[&["1"]]);
        g.drain_events();
        g.edit_cell(1, 1, CellValue::text("9")).unwrap();
        assert_eq!(g.drain_events(), vec![GridEvent::Edit { row: 1, column: 1 }]);
        g.edit_cell(1, 1, CellValue::text("9")).unwrap();
        assert_eq!(g.history_len(), 1);
    }

    #[test]
    fn markers_follow_row_inserts() {
        let mut g = grid(&["A"], &[&["1"], &["2"]]);
        g.set_contextual(2, 1, None, Corner::TopLeft).unwrap();
        g.insert_row(Some(0), None).unwrap();
        assert_eq!(g.contextual()[0].row, 3);
        g.remove_row(Some(3)).unwrap();
        assert!(g.contextual().is_empty());
    }

    #[test]
    fn hidden_columns_leave_layout() {
        let mut g = grid(&["A", "B"], &[&["1", "2"]]);
        g.set_column_visible(1, false).unwrap();
        assert_eq!(g.visible_columns(), vec![2]);
        assert_eq!(g.layout().columns, 1);
        assert_eq!(g.visible_position(2), Some(1));
    }
}
