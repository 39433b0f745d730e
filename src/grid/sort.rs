//! Column sort state and the stable row sort.

use std::fmt;

use serde::Serialize;

use crate::classes::{ARROW_DOWN, ARROW_DOWN_UP, ARROW_UP};
use crate::types::CellValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending | Self::None => Self::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        })
    }
}

/// Which column is sorted, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SortState {
    pub column: Option<usize>,
    pub direction: SortDirection,
}

impl SortState {
    /// Advance the state for a click on `column`: a repeat click flips the
    /// direction, any other column starts ascending.
    pub fn toggle(&mut self, column: usize) -> SortDirection {
        self.direction = if self.column == Some(column) {
            self.direction.flipped()
        } else {
            SortDirection::Ascending
        };
        self.column = Some(column);
        self.direction
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Header glyph for `column`.
    pub fn indicator(&self, column: usize) -> &'static str {
        match (self.column == Some(column), self.direction) {
            (true, SortDirection::Ascending) => ARROW_UP,
            (true, SortDirection::Descending) => ARROW_DOWN,
            _ => ARROW_DOWN_UP,
        }
    }
}

/// Stable sort of `rows` by the 0-based column `idx`.
///
/// Descending uses the reversed comparator, so rows with equal keys keep
/// their relative order either way.
pub fn sort_rows(rows: &mut [Vec<CellValue>], idx: usize, direction: SortDirection) {
    match direction {
        SortDirection::None => {}
        SortDirection::Ascending => rows.sort_by(|a, b| key(a, idx).sort_cmp(key(b, idx))),
        SortDirection::Descending => rows.sort_by(|a, b| key(b, idx).sort_cmp(key(a, idx))),
    }
}

static EMPTY: CellValue = CellValue::Empty;

fn key(row: &[CellValue], idx: usize) -> &CellValue {
    row.get(idx).unwrap_or(&EMPTY)
}
