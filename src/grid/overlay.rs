//! Full-grid loading overlay.

use tracing::debug;

use crate::loader::LoaderKind;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Overlay {
    visible: bool,
    hide_at: Option<f64>,
    loader: LoaderKind,
}

impl Overlay {
    /// Show the overlay with `loader` for `seconds`.
    ///
    /// Returns false, changing nothing, while the overlay is already showing.
    pub fn wait(&mut self, seconds: f64, loader: LoaderKind, now_ms: f64) -> bool {
        if self.visible {
            debug!("overlay already showing; wait ignored");
            return false;
        }
        self.visible = true;
        self.loader = loader;
        self.hide_at = Some(now_ms + seconds.max(0.0) * 1000.0);
        true
    }

    /// Hide the overlay once its deadline has passed. Returns true on change.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        match self.hide_at {
            Some(at) if now_ms >= at => {
                self.hide();
                true
            }
            _ => false,
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.hide_at = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn deadline(&self) -> Option<f64> {
        self.hide_at
    }

    pub fn loader(&self) -> LoaderKind {
        self.loader
    }
}
