//! Camera distance that frames every corner of the scene.

use crate::camera::orbit::{MIN_PROJECTION_DEPTH, create_camera, depth_for_point, project_perspective};
use crate::geometry::vec3::Vec3;

const MAX_DOUBLINGS: usize = 48;
const BISECTION_STEPS: usize = 32;

/// Fixed view parameters of one fit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitQuery {
    pub target: Vec3,
    pub yaw: f64,
    pub pitch: f64,
    pub fov_deg: f64,
    /// Viewport width over height.
    pub aspect: f64,
    /// Fraction of each normalized half-extent kept free.
    pub padding: f64,
}

impl FitQuery {
    /// Whether every corner projects inside the padded view from `distance`.
    pub fn fits(&self, corners: &[Vec3], distance: f64) -> bool {
        let cam = create_camera(self.target, distance, self.yaw, self.pitch, self.fov_deg);
        let keep = (1.0 - self.padding).max(0.05);
        let max_x = self.aspect.max(1e-6) * keep;
        corners.iter().all(|&p| {
            if depth_for_point(p, &cam) <= MIN_PROJECTION_DEPTH {
                return false;
            }
            let q = project_perspective(p, &cam);
            q.x.abs() <= max_x && q.y.abs() <= keep
        })
    }
}

/// Smallest orbit distance from which all `corners` fit, searched by doubling from `start` and
/// then bisecting the last bracket.
///
/// An empty corner list returns `start`.
pub fn fit_distance(corners: &[Vec3], query: &FitQuery, start: f64) -> f64 {
    let start = if start.is_finite() && start > 0.0 {
        start
    } else {
        1.0
    };
    if corners.is_empty() {
        return start;
    }

    let (mut lo, mut hi) = if query.fits(corners, start) {
        let mut hi = start;
        let mut lo = start * 0.5;
        let mut n = 0;
        while n < MAX_DOUBLINGS && query.fits(corners, lo) {
            hi = lo;
            lo *= 0.5;
            n += 1;
        }
        (lo, hi)
    } else {
        let mut lo = start;
        let mut hi = start * 2.0;
        let mut n = 0;
        while !query.fits(corners, hi) {
            n += 1;
            if n >= MAX_DOUBLINGS || !hi.is_finite() {
                return lo.max(start);
            }
            lo = hi;
            hi *= 2.0;
        }
        (lo, hi)
    };

    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        if query.fits(corners, mid) {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    hi
}

/// Eases the camera distance toward its fitted value with a cap on how fast it may change.
#[derive(Clone, Debug, Default)]
pub struct DistanceSmoother {
    current: Option<f64>,
}

impl DistanceSmoother {
    pub fn current(&self) -> Option<f64> {
        self.current
    }

    pub fn snap(&mut self, distance: f64) {
        self.current = Some(distance);
    }

    pub fn reset(&mut self) {
        self.current = None;
    }

    /// Move toward `target` by exponential smoothing at `rate` (1/s), never changing by more than
    /// `max_rate * current` per second. The first call snaps. Returns `true` while still moving.
    pub fn step(&mut self, target: f64, dt: f64, rate: f64, max_rate: f64) -> bool {
        if !target.is_finite() || target <= 0.0 {
            return false;
        }
        let Some(current) = self.current.filter(|c| c.is_finite() && *c > 0.0) else {
            self.current = Some(target);
            return false;
        };
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let wanted = (target - current) * (1.0 - (-rate * dt).exp());
        let limit = current * max_rate * dt;
        let mut next = current + wanted.clamp(-limit, limit);
        if (target - next).abs() <= target * 1e-4 {
            next = target;
        }
        self.current = Some(next);
        next != target
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/fit.rs"]
mod tests;
