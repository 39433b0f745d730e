//! Expandable detail panels inserted next to body rows.
//!
//! Panels behave like an accordion: expanding while any panel is showing
//! first slides every panel closed, then opens the requested ones. Expanding
//! the rows that are already expanded toggles them closed.

use serde::Deserialize;

use crate::classes::TRANSITION_MS;

/// Request to open detail panels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetailSpec {
    /// 1-based rows to attach panels to.
    pub rows: Vec<usize>,
    /// Insert above the row instead of below.
    pub before: bool,
    /// Trusted panel markup.
    pub html: String,
    /// Panel height; the body row height when unset.
    pub height: Option<f64>,
}

impl Default for DetailSpec {
    fn default() -> Self {
        Self {
            rows: vec![1],
            before: false,
            html: String::new(),
            height: None,
        }
    }
}

impl DetailSpec {
    pub fn row(row: usize) -> Self {
        Self {
            rows: vec![row],
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelPhase {
    Opening { until: f64 },
    Open,
    Closing { until: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub row: usize,
    pub before: bool,
    pub html: String,
    pub height: Option<f64>,
    pub phase: PanelPhase,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetailPanels {
    panels: Vec<Panel>,
    /// Rows whose panels were last opened.
    expanded: Vec<usize>,
    /// Expansion to perform once the closing panels are gone.
    pending: Option<DetailSpec>,
}

impl DetailPanels {
    pub fn expand(&mut self, spec: DetailSpec, now_ms: f64) {
        if !self.panels.is_empty() {
            self.close_where(now_ms, |_| true);
            self.pending = Some(spec);
            return;
        }
        if !spec.rows.is_empty() && spec.rows == self.expanded {
            self.expanded.clear();
            return;
        }
        let until = now_ms + TRANSITION_MS;
        self.panels = spec
            .rows
            .iter()
            .map(|&row| Panel {
                row,
                before: spec.before,
                html: spec.html.clone(),
                height: spec.height,
                phase: PanelPhase::Opening { until },
            })
            .collect();
        self.expanded = spec.rows;
    }

    /// Slide closed the panels of `rows`, or all panels for `None`.
    pub fn collapse(&mut self, rows: Option<&[usize]>, now_ms: f64) {
        match rows {
            Some(rows) => {
                self.close_where(now_ms, |p| rows.contains(&p.row));
                self.expanded.retain(|r| !rows.contains(r));
            }
            None => {
                self.close_where(now_ms, |_| true);
                self.expanded.clear();
            }
        }
        self.pending = None;
    }

    fn close_where(&mut self, now_ms: f64, pred: impl Fn(&Panel) -> bool) {
        let until = now_ms + TRANSITION_MS;
        for panel in self.panels.iter_mut().filter(|p| pred(p)) {
            if !matches!(panel.phase, PanelPhase::Closing { .. }) {
                panel.phase = PanelPhase::Closing { until };
            }
        }
    }

    /// Finish transitions due by `now_ms`. Returns true on change.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let before = self.panels.clone();
        for panel in &mut self.panels {
            if let PanelPhase::Opening { until } = panel.phase {
                if now_ms >= until {
                    panel.phase = PanelPhase::Open;
                }
            }
        }
        self.panels
            .retain(|p| !matches!(p.phase, PanelPhase::Closing { until } if now_ms >= until));
        let mut changed = before != self.panels;
        if self.panels.is_empty() {
            if let Some(spec) = self.pending.take() {
                self.expand(spec, now_ms);
                changed = true;
            }
        }
        changed
    }

    pub fn deadline(&self) -> Option<f64> {
        self.panels
            .iter()
            .filter_map(|p| match p.phase {
                PanelPhase::Opening { until } | PanelPhase::Closing { until } => Some(until),
                PanelPhase::Open => None,
            })
            .reduce(f64::min)
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn expanded_rows(&self) -> &[usize] {
        &self.expanded
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Drop every panel immediately.
    pub fn clear(&mut self) {
        self.panels.clear();
        self.expanded.clear();
        self.pending = None;
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn opens_then_settles() {
        let mut details = DetailPanels::default();
        details.expand(DetailSpec::row(2), 0.0);
        assert!(matches!(details.panels()[0].phase, PanelPhase::Opening { .. }));
        assert!(details.tick(TRANSITION_MS));
        assert_eq!(details.panels()[0].phase, PanelPhase::Open);
        assert_eq!(details.expanded_rows(), &[2]);
    }

    #[test]
    fn accordion_closes_before_opening_another() {
        let mut details = DetailPanels::default();
        details.expand(DetailSpec::row(1), 0.0);
        details.tick(500.0);
        details.expand(DetailSpec::row(3), 1000.0);
        assert!(matches!(details.panels()[0].phase, PanelPhase::Closing { .. }));
        assert_eq!(details.panels()[0].row, 1);
        details.tick(1200.0);
        assert_eq!(details.panels().len(), 1);
        assert_eq!(details.panels()[0].row, 3);
    }

    #[test]
    fn expanding_same_row_toggles_closed() {
        let mut details = DetailPanels::default();
        details.expand(DetailSpec::row(1), 0.0);
        details.tick(500.0);
        details.expand(DetailSpec::row(1), 1000.0);
        details.tick(1200.0);
        assert!(details.is_empty());
        assert!(details.expanded_rows().is_empty());
        details.expand(DetailSpec::row(1), 2000.0);
        assert_eq!(details.panels().len(), 1);
    }

    #[test]
    fn collapse_selected_rows() {
        let mut details = DetailPanels::default();
        details.expand(
            DetailSpec {
                rows: vec![1, 2],
                ..DetailSpec::default()
            },
            0.0,
        );
        details.collapse(Some(&[2][..]), 10.0);
        details.tick(1000.0);
        assert_eq!(details.panels().len(), 1);
        assert_eq!(details.expanded_rows(), &[1]);
    }
}
