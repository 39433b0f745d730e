use serde::Serialize;

use super::sort::SortDirection;

/// Notifications queued by a grid and drained by its host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GridEvent {
    /// New data finished rendering.
    Ready,
    /// Rows or columns were inserted or removed.
    Change,
    /// A cell value was edited.
    Edit { row: usize, column: usize },
    /// A dragged column was dropped; `to` is the column it now occupies.
    Reorder { from: usize, to: usize },
    Sort {
        column: usize,
        direction: SortDirection,
    },
}

impl GridEvent {
    /// DOM `CustomEvent` type dispatched on the grid root.
    pub fn dom_name(&self) -> &'static str {
        match self {
            Self::Ready => "gridReady",
            Self::Change => "gridChange",
            Self::Edit { .. } => "gridEdit",
            Self::Reorder { .. } => "gridReorder",
            Self::Sort { .. } => "gridSort",
        }
    }
}
