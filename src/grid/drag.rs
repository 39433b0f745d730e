//! Header drag-to-reorder state machine.
//!
//! `Idle -> Pressed -> Dragging -> (release) -> Idle`. A press only becomes a
//! drag once the pointer has moved more than [`DRAG_THRESHOLD`] pixels on either
//! axis; releasing before that is a click.

use super::layout::GridLayout;

/// Pointer travel, in pixels, that turns a press into a drag.
pub const DRAG_THRESHOLD: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Pressed {
        column: usize,
        start_x: f64,
        start_y: f64,
    },
    Dragging {
        column: usize,
        start_x: f64,
        start_y: f64,
        /// Visible position after which the column would be dropped.
        target: usize,
        x: f64,
        y: f64,
    },
}

/// What a pointer release resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Nothing,
    Click { column: usize },
    Drop { column: usize, target: usize },
}

impl DragState {
    /// Pointer pressed on the header of `column` at grid-relative `(x, y)`.
    pub fn press(&mut self, column: usize, x: f64, y: f64) {
        *self = Self::Pressed {
            column,
            start_x: x,
            start_y: y,
        };
    }

    /// Pointer moved. Returns true when the drag feedback needs redrawing.
    pub fn motion(&mut self, x: f64, y: f64, layout: &GridLayout) -> bool {
        match *self {
            Self::Idle => false,
            Self::Pressed {
                column,
                start_x,
                start_y,
            }
            | Self::Dragging {
                column,
                start_x,
                start_y,
                ..
            } => {
                let dragging = matches!(self, Self::Dragging { .. });
                if !dragging
                    && (start_x - x).abs() <= DRAG_THRESHOLD
                    && (start_y - y).abs() <= DRAG_THRESHOLD
                {
                    return false;
                }
                *self = Self::Dragging {
                    column,
                    start_x,
                    start_y,
                    target: layout.drop_target(x),
                    x,
                    y,
                };
                true
            }
        }
    }

    /// Pointer released anywhere.
    pub fn release(&mut self) -> DragOutcome {
        let outcome = match *self {
            Self::Idle => DragOutcome::Nothing,
            Self::Pressed { column, .. } => DragOutcome::Click { column },
            Self::Dragging { column, target, .. } => DragOutcome::Drop { column, target },
        };
        *self = Self::Idle;
        outcome
    }

    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// Column to remove after the dragged copy was inserted after `target`.
///
/// Inserting at or before the original position shifts it right by one.
pub fn removal_index(from: usize, target: usize) -> usize {
    if from <= target {
        from
    } else {
        from + 1
    }
}
