//! Per-object stack height transitions.
//!
//! Entries are keyed by object id and pruned every step: an id missing from the latest target
//! list is dropped in that same step.

use std::collections::HashMap;

/// Differences below this snap straight to the target.
pub const SETTLE_EPSILON: f64 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZTrack {
    pub current: f64,
    pub target: f64,
    seen: u64,
}

impl ZTrack {
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }
}

#[derive(Clone, Debug)]
pub struct ZSmoother {
    tracks: HashMap<String, ZTrack>,
    speed: f64,
    generation: u64,
}

impl ZSmoother {
    /// `speed` is the exponential decay rate in 1/s.
    pub fn new(speed: f64) -> Self {
        Self {
            tracks: HashMap::new(),
            speed,
            generation: 0,
        }
    }

    /// Advance every track by `dt` seconds toward its new target.
    ///
    /// A first sighting starts at its target. Returns `true` while any track is still moving.
    pub fn step<'a>(&mut self, targets: impl IntoIterator<Item = (&'a str, f64)>, dt: f64) -> bool {
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let k = 1.0 - (-self.speed * dt).exp();

        let mut moving = false;
        for (id, target) in targets {
            let track = self.tracks.entry(id.to_owned()).or_insert(ZTrack {
                current: target,
                target,
                seen: generation,
            });
            track.target = target;
            track.seen = generation;
            if !track.current.is_finite() {
                track.current = target;
            }
            track.current += (target - track.current) * k;
            if (target - track.current).abs() < SETTLE_EPSILON {
                track.current = target;
            }
            moving |= !track.is_settled();
        }

        self.tracks.retain(|_, t| t.seen == generation);
        moving
    }

    pub fn current(&self, id: &str) -> Option<f64> {
        self.tracks.get(id).map(|t| t.current)
    }

    pub fn track(&self, id: &str) -> Option<&ZTrack> {
        self.tracks.get(id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/zsmooth.rs"]
mod tests;
