use crate::animation::ease::Ease;

/// Overlay opacity, faded independently of the convergence timeline.
#[derive(Clone, Debug)]
pub struct OverlayFade {
    from: f64,
    target: f64,
    start: f64,
    duration: f64,
    ease: Ease,
}

impl OverlayFade {
    pub fn new(duration: f64, ease: Ease) -> Self {
        Self {
            from: 0.0,
            target: 0.0,
            start: 0.0,
            duration: duration.max(1e-6),
            ease,
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Fade from the current value toward `target` (clamped to `[0, 1]`), starting at `now`.
    pub fn fade_to(&mut self, target: f64, now: f64) {
        let target = target.clamp(0.0, 1.0);
        if target == self.target {
            return;
        }
        self.from = self.value(now);
        self.target = target;
        self.start = now;
    }

    pub fn snap(&mut self, value: f64) {
        let value = value.clamp(0.0, 1.0);
        self.from = value;
        self.target = value;
    }

    pub fn value(&self, now: f64) -> f64 {
        if self.from == self.target {
            return self.target;
        }
        let t = (now - self.start) / self.duration;
        let t = if t.is_finite() { t } else { 1.0 };
        self.from + (self.target - self.from) * self.ease.apply(t)
    }

    /// Returns `true` while the value is still changing.
    pub fn update(&mut self, now: f64) -> bool {
        if self.from != self.target && now - self.start >= self.duration {
            self.from = self.target;
        }
        self.from != self.target
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/fade.rs"]
mod tests;
