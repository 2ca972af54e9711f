//! Scene-wide open/close animation.
//!
//! Objects slide in from a radial offset when the preview opens and slide back out when it
//! closes. The animation is one timeline position `tau` in `[0, total]` that increases while
//! opening and decreases while closing, so reversing mid-flight continues from the current
//! pose. Object `i` starts moving once `tau` passes `i * stagger`.

use crate::animation::ease::Ease;
use crate::foundation::core::{Point, Vec2};
use crate::geometry::bounds::{offset_along, radial_direction};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConvergenceState {
    /// Every object fully displaced.
    Closed,
    Opening { start: f64, from_tau: f64 },
    /// Every object at rest.
    Open,
    Closing { start: f64, from_tau: f64 },
}

#[derive(Clone, Debug)]
pub struct Convergence {
    state: ConvergenceState,
    run_id: u64,
    duration: f64,
    stagger: f64,
    ease: Ease,
}

impl Convergence {
    pub fn new(duration: f64, stagger: f64, ease: Ease) -> Self {
        Self {
            state: ConvergenceState::Closed,
            run_id: 0,
            duration: duration.max(1e-6),
            stagger: stagger.max(0.0),
            ease,
        }
    }

    pub fn state(&self) -> ConvergenceState {
        self.state
    }

    /// Incremented on every open or close transition.
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn is_animating(&self) -> bool {
        matches!(
            self.state,
            ConvergenceState::Opening { .. } | ConvergenceState::Closing { .. }
        )
    }

    /// Length of the whole timeline for `count` objects.
    pub fn total_duration(&self, count: usize) -> f64 {
        self.duration + count.saturating_sub(1) as f64 * self.stagger
    }

    /// Timeline position at `now`, clamped to `[0, total]`.
    pub fn tau(&self, now: f64, count: usize) -> f64 {
        let total = self.total_duration(count);
        let elapsed = |start: f64| {
            let e = now - start;
            if e.is_finite() { e.max(0.0) } else { 0.0 }
        };
        match self.state {
            ConvergenceState::Closed => 0.0,
            ConvergenceState::Open => total,
            ConvergenceState::Opening { start, from_tau } => {
                (from_tau + elapsed(start)).clamp(0.0, total)
            }
            ConvergenceState::Closing { start, from_tau } => {
                (from_tau.min(total) - elapsed(start)).clamp(0.0, total)
            }
        }
    }

    /// Start opening. A close in flight is cancelled and reversed from its current position.
    ///
    /// Returns `false` when already open or opening.
    pub fn open(&mut self, now: f64, count: usize) -> bool {
        let from_tau = match self.state {
            ConvergenceState::Open | ConvergenceState::Opening { .. } => return false,
            ConvergenceState::Closed => 0.0,
            ConvergenceState::Closing { .. } => self.tau(now, count),
        };
        self.state = ConvergenceState::Opening {
            start: now,
            from_tau,
        };
        self.run_id += 1;
        tracing::debug!(run_id = self.run_id, from_tau, "convergence opening");
        true
    }

    /// Start closing. An open in flight is reversed from its current position.
    ///
    /// Returns `false` when already closed or closing.
    pub fn close(&mut self, now: f64, count: usize) -> bool {
        let from_tau = match self.state {
            ConvergenceState::Closed | ConvergenceState::Closing { .. } => return false,
            ConvergenceState::Open => self.total_duration(count),
            ConvergenceState::Opening { .. } => self.tau(now, count),
        };
        self.state = ConvergenceState::Closing {
            start: now,
            from_tau,
        };
        self.run_id += 1;
        tracing::debug!(run_id = self.run_id, from_tau, "convergence closing");
        true
    }

    /// Jump to the settled open pose without animating.
    pub fn snap_open(&mut self) {
        self.state = ConvergenceState::Open;
    }

    /// Jump to the settled closed pose without animating.
    pub fn snap_closed(&mut self) {
        self.state = ConvergenceState::Closed;
    }

    /// Settle finished runs. Returns `true` while still animating.
    pub fn update(&mut self, now: f64, count: usize) -> bool {
        let tau = self.tau(now, count);
        match self.state {
            ConvergenceState::Opening { .. } if tau >= self.total_duration(count) => {
                self.state = ConvergenceState::Open;
            }
            ConvergenceState::Closing { .. } if tau <= 0.0 => {
                self.state = ConvergenceState::Closed;
            }
            _ => {}
        }
        self.is_animating()
    }

    /// Fraction of the radial offset applied to object `index`: `1` fully out, `0` at rest.
    pub fn displacement(&self, index: usize, now: f64, count: usize) -> f64 {
        match self.state {
            ConvergenceState::Open => 0.0,
            ConvergenceState::Closed => 1.0,
            _ => {
                let local = (self.tau(now, count) - index as f64 * self.stagger) / self.duration;
                1.0 - self.ease.apply(local.clamp(0.0, 1.0))
            }
        }
    }
}

/// Where an object's footprint center sits when displaced by `amount` of `distance`.
///
/// The offset points from `scene_center` through `center`; an object exactly on the center uses
/// `fallback`.
pub fn displaced_center(
    center: Point,
    scene_center: Point,
    fallback: Vec2,
    distance: f64,
    amount: f64,
) -> Point {
    if amount == 0.0 {
        return center;
    }
    let dir = radial_direction(scene_center, center, fallback);
    offset_along(center, dir, distance * amount)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/convergence.rs"]
mod tests;
