//! Camera yaw/pitch driven by auto-rotation and pointer drags.

use std::collections::BTreeMap;

use crate::foundation::config::PreviewConfig;
use crate::foundation::core::{Point, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Mouse,
    Pen,
    Touch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
    None,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// One pointer sample in CSS pixels; `time` is in seconds on the frame clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub id: u64,
    pub kind: PointerKind,
    pub button: PointerButton,
    pub position: Point,
    pub time: f64,
    pub modifiers: Modifiers,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerOutcome {
    Ignored,
    DragStarted,
    /// The view angles changed.
    Rotated,
    DragEnded,
    DoubleTap,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Drag {
    pointer: Option<u64>,
    last: Point,
}

#[derive(Clone, Debug)]
pub struct OrbitControl {
    yaw: f64,
    pitch_offset: f64,
    base_pitch: f64,
    min_pitch: f64,
    max_pitch: f64,
    auto_rotate: bool,
    auto_rotate_speed: f64,
    sensitivity: f64,
    double_tap_s: f64,
    double_tap_slop: f64,
    touches: BTreeMap<u64, Point>,
    drag: Option<Drag>,
    last_tap: Option<(f64, Point)>,
}

impl OrbitControl {
    pub fn new(cfg: &PreviewConfig) -> Self {
        Self {
            yaw: 0.0,
            pitch_offset: 0.0,
            base_pitch: cfg.base_pitch,
            min_pitch: cfg.min_pitch,
            max_pitch: cfg.max_pitch,
            auto_rotate: cfg.auto_rotate,
            auto_rotate_speed: cfg.auto_rotate_speed,
            sensitivity: cfg.drag_sensitivity,
            double_tap_s: cfg.double_tap_ms / 1000.0,
            double_tap_slop: cfg.double_tap_slop_px,
            touches: BTreeMap::new(),
            drag: None,
            last_tap: None,
        }
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    /// Effective pitch, always inside the configured range.
    pub fn pitch(&self) -> f64 {
        (self.base_pitch + self.pitch_offset).clamp(self.min_pitch, self.max_pitch)
    }

    pub fn set_angles(&mut self, yaw: f64, pitch: f64) {
        if yaw.is_finite() {
            self.yaw = yaw;
        }
        if pitch.is_finite() {
            self.pitch_offset = pitch.clamp(self.min_pitch, self.max_pitch) - self.base_pitch;
        }
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether [`OrbitControl::advance`] will keep changing the view.
    pub fn is_rotating(&self) -> bool {
        self.auto_rotate && self.auto_rotate_speed > 0.0 && self.drag.is_none()
    }

    /// Apply auto-rotation for `dt` seconds. A drag in progress holds the view still.
    pub fn advance(&mut self, dt: f64) -> bool {
        if !self.is_rotating() || !dt.is_finite() || dt <= 0.0 {
            return false;
        }
        self.yaw = (self.yaw + self.auto_rotate_speed * dt).rem_euclid(std::f64::consts::TAU);
        true
    }

    /// Back to the initial angles with no pointer state.
    pub fn reset(&mut self) {
        self.yaw = 0.0;
        self.pitch_offset = 0.0;
        self.touches.clear();
        self.drag = None;
        self.last_tap = None;
    }

    pub fn pointer_down(&mut self, ev: &PointerEvent) -> PointerOutcome {
        match ev.kind {
            PointerKind::Touch => {
                self.touches.insert(ev.id, ev.position);
                match self.touches.len() {
                    1 => {
                        if self.register_tap(ev) {
                            PointerOutcome::DoubleTap
                        } else {
                            PointerOutcome::Ignored
                        }
                    }
                    2 => {
                        self.last_tap = None;
                        self.drag = self.touch_centroid().map(|last| Drag {
                            pointer: None,
                            last,
                        });
                        PointerOutcome::DragStarted
                    }
                    _ => {
                        self.rebase_touch_drag();
                        PointerOutcome::Ignored
                    }
                }
            }
            PointerKind::Mouse | PointerKind::Pen => match ev.button {
                PointerButton::Primary | PointerButton::Middle => {
                    self.drag = Some(Drag {
                        pointer: Some(ev.id),
                        last: ev.position,
                    });
                    if ev.button == PointerButton::Primary && self.register_tap(ev) {
                        PointerOutcome::DoubleTap
                    } else {
                        PointerOutcome::DragStarted
                    }
                }
                PointerButton::Secondary | PointerButton::None => PointerOutcome::Ignored,
            },
        }
    }

    pub fn pointer_move(&mut self, ev: &PointerEvent) -> PointerOutcome {
        let Some(drag) = self.drag else {
            if ev.kind == PointerKind::Touch && self.touches.contains_key(&ev.id) {
                self.touches.insert(ev.id, ev.position);
            }
            return PointerOutcome::Ignored;
        };

        let current = match (ev.kind, drag.pointer) {
            (PointerKind::Touch, None) => {
                if !self.touches.contains_key(&ev.id) {
                    return PointerOutcome::Ignored;
                }
                self.touches.insert(ev.id, ev.position);
                match self.touch_centroid() {
                    Some(c) => c,
                    None => return PointerOutcome::Ignored,
                }
            }
            (PointerKind::Mouse | PointerKind::Pen, Some(id)) if id == ev.id => ev.position,
            _ => return PointerOutcome::Ignored,
        };

        let delta = current - drag.last;
        self.drag = Some(Drag {
            last: current,
            ..drag
        });
        if self.rotate_by(delta, ev.modifiers) {
            PointerOutcome::Rotated
        } else {
            PointerOutcome::Ignored
        }
    }

    pub fn pointer_up(&mut self, ev: &PointerEvent) -> PointerOutcome {
        match ev.kind {
            PointerKind::Touch => {
                if self.touches.remove(&ev.id).is_none() {
                    return PointerOutcome::Ignored;
                }
                if self.drag.is_some() && self.touches.len() < 2 {
                    self.drag = None;
                    return PointerOutcome::DragEnded;
                }
                self.rebase_touch_drag();
                PointerOutcome::Ignored
            }
            PointerKind::Mouse | PointerKind::Pen => match self.drag {
                Some(Drag {
                    pointer: Some(id), ..
                }) if id == ev.id => {
                    self.drag = None;
                    PointerOutcome::DragEnded
                }
                _ => PointerOutcome::Ignored,
            },
        }
    }

    fn rotate_by(&mut self, delta: Vec2, modifiers: Modifiers) -> bool {
        if !delta.x.is_finite() || !delta.y.is_finite() || (delta.x == 0.0 && delta.y == 0.0) {
            return false;
        }
        let s = if modifiers.shift {
            self.sensitivity * 0.5
        } else {
            self.sensitivity
        };
        self.yaw = (self.yaw - delta.x * s).rem_euclid(std::f64::consts::TAU);
        let pitch = (self.base_pitch + self.pitch_offset + delta.y * s)
            .clamp(self.min_pitch, self.max_pitch);
        self.pitch_offset = pitch - self.base_pitch;
        true
    }

    /// The finger set changed mid-drag; the next delta must start from the new centroid.
    fn rebase_touch_drag(&mut self) {
        let centroid = self.touch_centroid();
        if let (Some(drag), Some(last)) = (self.drag.as_mut(), centroid) {
            if drag.pointer.is_none() {
                drag.last = last;
            }
        }
    }

    fn touch_centroid(&self) -> Option<Point> {
        if self.touches.is_empty() {
            return None;
        }
        let n = self.touches.len() as f64;
        let sum = self
            .touches
            .values()
            .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
        Some((sum / n).to_point())
    }

    /// Record a tap; `true` when it completes a double tap.
    fn register_tap(&mut self, ev: &PointerEvent) -> bool {
        if let Some((t, p)) = self.last_tap {
            let dt = ev.time - t;
            if (0.0..=self.double_tap_s).contains(&dt)
                && p.distance(ev.position) <= self.double_tap_slop
            {
                self.last_tap = None;
                return true;
            }
        }
        self.last_tap = Some((ev.time, ev.position));
        false
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/orbit.rs"]
mod tests;
