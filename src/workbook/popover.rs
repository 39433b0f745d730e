//! A dropdown anchored to a toolbar button.
//!
//! At most one popover is open. Toggling a different anchor while one is
//! open closes it and reopens at the new anchor after [`REOPEN_MS`].

/// Delay between closing one popover and opening the next.
pub const REOPEN_MS: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub enum PopoverState<A, C> {
    Closed,
    Open { anchor: A, content: C },
    Reopening { anchor: A, content: C, at: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Popover<A, C> {
    state: PopoverState<A, C>,
}

impl<A, C> Default for Popover<A, C> {
    fn default() -> Self {
        Self {
            state: PopoverState::Closed,
        }
    }
}

impl<A: Copy + PartialEq, C: Clone> Popover<A, C> {
    /// React to a click on the anchor button.
    pub fn toggle(&mut self, anchor: A, content: C, now_ms: f64) {
        let next = match &self.state {
            PopoverState::Closed => PopoverState::Open { anchor, content },
            PopoverState::Open { anchor: open, .. }
            | PopoverState::Reopening { anchor: open, .. }
                if *open == anchor =>
            {
                PopoverState::Closed
            }
            PopoverState::Open { .. } | PopoverState::Reopening { .. } => PopoverState::Reopening {
                anchor,
                content,
                at: now_ms + REOPEN_MS,
            },
        };
        self.state = next;
    }

    pub fn close(&mut self) {
        self.state = PopoverState::Closed;
    }

    /// Finish a pending reopen. Returns true on change.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let next = match &self.state {
            PopoverState::Reopening {
                anchor,
                content,
                at,
            } if now_ms >= *at => PopoverState::Open {
                anchor: *anchor,
                content: content.clone(),
            },
            _ => return false,
        };
        self.state = next;
        true
    }

    pub fn deadline(&self) -> Option<f64> {
        match self.state {
            PopoverState::Reopening { at, .. } => Some(at),
            _ => None,
        }
    }

    /// Anchor and content of the popover currently showing.
    pub fn open(&self) -> Option<(A, &C)> {
        match &self.state {
            PopoverState::Open { anchor, content } => Some((*anchor, content)),
            _ => None,
        }
    }

    pub fn state(&self) -> &PopoverState<A, C> {
        &self.state
    }
}
