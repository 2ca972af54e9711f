use std::path::Path;

use anyhow::Context;

use crate::animation::ease::Ease;
use crate::foundation::error::{PreviewError, PreviewResult};
use crate::geometry::vec3::Vec3;

/// Tunable constants of the preview renderer.
///
/// Every field has a default; a JSON document may override any subset of them.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Vertical field of view in degrees.
    pub fov_deg: f64,
    /// World units per canvas millimeter.
    pub mm_to_world: f64,
    /// Minimum visible box height in millimeters.
    pub min_thickness_mm: f64,
    /// Lower bound for the framing orbit distance (world units).
    pub baseline_distance: f64,
    /// Added to twice the scene span when deriving the orbit distance.
    pub distance_margin: f64,

    /// Direction *towards* the light; normalized on use.
    pub light_dir: Vec3,
    pub top_shade: f64,
    pub bottom_shade: f64,
    pub face_alpha: f64,
    pub outline_rgba: [u8; 4],
    /// Outline width in CSS pixels.
    pub outline_width: f64,
    pub background_rgba: [u8; 4],

    /// Exponential decay rate of stack height transitions (1/s).
    pub z_smoothing_speed: f64,
    pub convergence_duration_s: f64,
    pub convergence_stagger_s: f64,
    pub convergence_offset_mm: f64,
    /// Direction used when an object sits exactly on the scene center.
    pub convergence_fallback_dir: [f64; 2],
    pub convergence_ease: Ease,
    pub fade_duration_s: f64,
    pub fade_ease: Ease,

    /// Auto-rotate angular speed (rad/s).
    pub auto_rotate_speed: f64,
    pub auto_rotate: bool,
    pub base_pitch: f64,
    pub min_pitch: f64,
    pub max_pitch: f64,
    /// Radians of yaw/pitch per CSS pixel of drag.
    pub drag_sensitivity: f64,
    pub double_tap_ms: f64,
    pub double_tap_slop_px: f64,

    /// Fraction of the normalized viewport kept free around the fitted scene.
    pub fit_padding: f64,
    /// Exponential rate used to ease the camera distance toward its fitted value (1/s).
    pub distance_smoothing: f64,
    /// Largest distance change per second, as a fraction of the current distance.
    pub max_distance_rate: f64,
    /// The fitted distance never goes below this fraction of the layout's baseline distance.
    pub min_fit_fraction: f64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            fov_deg: 45.0,
            mm_to_world: 0.01,
            min_thickness_mm: 2.0,
            baseline_distance: 6.0,
            distance_margin: 1.5,

            light_dir: Vec3::new(-0.35, -0.55, 0.75),
            top_shade: 1.12,
            bottom_shade: 0.6,
            face_alpha: 0.97,
            outline_rgba: [20, 20, 24, 89],
            outline_width: 1.0,
            background_rgba: [0, 0, 0, 0],

            z_smoothing_speed: 10.0,
            convergence_duration_s: 0.55,
            convergence_stagger_s: 0.04,
            convergence_offset_mm: 180.0,
            convergence_fallback_dir: [0.0, -1.0],
            convergence_ease: Ease::OutCubic,
            fade_duration_s: 0.22,
            fade_ease: Ease::Linear,

            auto_rotate_speed: 0.35,
            auto_rotate: true,
            base_pitch: 0.55,
            min_pitch: 0.05,
            max_pitch: 1.45,
            drag_sensitivity: 0.008,
            double_tap_ms: 300.0,
            double_tap_slop_px: 10.0,

            fit_padding: 0.08,
            distance_smoothing: 2.5,
            max_distance_rate: 0.4,
            min_fit_fraction: 0.5,
        }
    }
}

impl PreviewConfig {
    pub fn from_json(text: &str) -> PreviewResult<Self> {
        let cfg: Self =
            serde_json::from_str(text).map_err(|e| PreviewError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> PreviewResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json(&text)
    }

    pub fn fov_rad(&self) -> f64 {
        self.fov_deg.to_radians()
    }

    pub fn validate(&self) -> PreviewResult<()> {
        fn positive(name: &str, v: f64) -> PreviewResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(PreviewError::validation(format!(
                    "{name} must be finite and > 0"
                )))
            }
        }
        fn non_negative(name: &str, v: f64) -> PreviewResult<()> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(PreviewError::validation(format!(
                    "{name} must be finite and >= 0"
                )))
            }
        }

        if !(self.fov_deg.is_finite() && self.fov_deg > 1.0 && self.fov_deg < 179.0) {
            return Err(PreviewError::validation("fov_deg must be in (1, 179)"));
        }
        positive("mm_to_world", self.mm_to_world)?;
        non_negative("min_thickness_mm", self.min_thickness_mm)?;
        positive("baseline_distance", self.baseline_distance)?;
        non_negative("distance_margin", self.distance_margin)?;
        if !self.light_dir.is_finite() || self.light_dir.length() < 1e-9 {
            return Err(PreviewError::validation("light_dir must be a non-zero vector"));
        }
        non_negative("top_shade", self.top_shade)?;
        non_negative("bottom_shade", self.bottom_shade)?;
        if !(0.0..=1.0).contains(&self.face_alpha) {
            return Err(PreviewError::validation("face_alpha must be in [0, 1]"));
        }
        non_negative("outline_width", self.outline_width)?;
        positive("z_smoothing_speed", self.z_smoothing_speed)?;
        positive("convergence_duration_s", self.convergence_duration_s)?;
        non_negative("convergence_stagger_s", self.convergence_stagger_s)?;
        non_negative("convergence_offset_mm", self.convergence_offset_mm)?;
        positive("fade_duration_s", self.fade_duration_s)?;
        non_negative("auto_rotate_speed", self.auto_rotate_speed)?;
        if !(self.min_pitch.is_finite()
            && self.max_pitch.is_finite()
            && self.min_pitch < self.max_pitch
            && self.min_pitch > -std::f64::consts::FRAC_PI_2
            && self.max_pitch < std::f64::consts::FRAC_PI_2)
        {
            return Err(PreviewError::validation(
                "pitch range must satisfy -pi/2 < min_pitch < max_pitch < pi/2",
            ));
        }
        if !self.base_pitch.is_finite() {
            return Err(PreviewError::validation("base_pitch must be finite"));
        }
        positive("drag_sensitivity", self.drag_sensitivity)?;
        non_negative("double_tap_ms", self.double_tap_ms)?;
        non_negative("double_tap_slop_px", self.double_tap_slop_px)?;
        if !(self.fit_padding.is_finite() && (0.0..0.9).contains(&self.fit_padding)) {
            return Err(PreviewError::validation("fit_padding must be in [0, 0.9)"));
        }
        positive("distance_smoothing", self.distance_smoothing)?;
        positive("max_distance_rate", self.max_distance_rate)?;
        if !(self.min_fit_fraction.is_finite() && (0.0..=1.0).contains(&self.min_fit_fraction)) {
            return Err(PreviewError::validation("min_fit_fraction must be in [0, 1]"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
