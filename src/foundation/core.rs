use crate::foundation::error::{PreviewError, PreviewResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> PreviewResult<Self> {
        if den == 0 {
            return Err(PreviewError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(PreviewError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }
}

/// Host drawing area: CSS size plus device-pixel-ratio.
///
/// Projected points are normalized so the vertical half-extent is `1.0`; the horizontal
/// half-extent is the aspect ratio. [`Viewport::to_screen`] maps them to physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            dpr: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64, dpr: f64) -> Self {
        Self { width, height, dpr }
    }

    fn safe_dpr(self) -> f64 {
        if self.dpr.is_finite() && self.dpr > 0.0 {
            self.dpr
        } else {
            1.0
        }
    }

    pub fn pixel_width(self) -> u32 {
        (self.width.max(0.0) * self.safe_dpr()).round().max(1.0) as u32
    }

    pub fn pixel_height(self) -> u32 {
        (self.height.max(0.0) * self.safe_dpr()).round().max(1.0) as u32
    }

    /// Physical pixels per CSS pixel.
    pub fn scale(self) -> f64 {
        self.safe_dpr()
    }

    pub fn aspect(self) -> f64 {
        if self.height > 1e-6 && self.width > 1e-6 {
            self.width / self.height
        } else {
            1.0
        }
    }

    pub fn to_screen(self, ndc: Point) -> Point {
        let pw = f64::from(self.pixel_width());
        let ph = f64::from(self.pixel_height());
        let half_h = ph * 0.5;
        Point::new(pw * 0.5 + ndc.x * half_h, half_h + ndc.y * half_h)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
