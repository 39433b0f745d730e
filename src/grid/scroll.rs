//! Animated scrolling of the grid viewport.
//!
//! `scroll_to` animates the vertical offset first, then the horizontal one,
//! each over one transition period with swing easing.

use crate::classes::TRANSITION_MS;

/// Interval at which the host should tick while an animation runs.
pub const FRAME_MS: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Vertical { start: f64 },
    Horizontal { start: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Animation {
    from: (f64, f64),
    to: (f64, f64),
    phase: Phase,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    top: f64,
    left: f64,
    animation: Option<Animation>,
}

fn swing(p: f64) -> f64 {
    0.5 - (p * std::f64::consts::PI).cos() / 2.0
}

fn lerp(from: f64, to: f64, p: f64) -> f64 {
    from + (to - from) * swing(p.clamp(0.0, 1.0))
}

impl ScrollState {
    /// Host reported the current scroll offsets.
    pub fn set_position(&mut self, top: f64, left: f64) {
        if self.animation.is_none() {
            self.top = top;
            self.left = left;
        }
    }

    pub fn animate_to(&mut self, top: f64, left: f64, now_ms: f64) {
        self.animation = Some(Animation {
            from: (self.top, self.left),
            to: (top, left),
            phase: Phase::Vertical { start: now_ms },
        });
    }

    /// Advance the animation. Returns true if the position moved.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let Some(mut anim) = self.animation else {
            return false;
        };
        let before = (self.top, self.left);
        match anim.phase {
            Phase::Vertical { start } => {
                let p = (now_ms - start) / TRANSITION_MS;
                self.top = lerp(anim.from.0, anim.to.0, p);
                if p >= 1.0 {
                    self.top = anim.to.0;
                    anim.phase = Phase::Horizontal {
                        start: start + TRANSITION_MS,
                    };
                }
                self.animation = Some(anim);
            }
            Phase::Horizontal { start } => {
                let p = (now_ms - start) / TRANSITION_MS;
                self.left = lerp(anim.from.1, anim.to.1, p);
                if p >= 1.0 {
                    self.left = anim.to.1;
                    self.animation = None;
                } else {
                    self.animation = Some(anim);
                }
            }
        }
        before != (self.top, self.left) || self.animation.is_none()
    }

    pub fn position(&self) -> (f64, f64) {
        (self.top, self.left)
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Next time the host should call `tick`.
    pub fn deadline(&self, now_ms: f64) -> Option<f64> {
        self.animation.map(|_| now_ms + FRAME_MS)
    }
}
