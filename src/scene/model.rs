use std::path::Path;

use anyhow::Context;

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{PreviewError, PreviewResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Kind of canvas object. Only boards and devices take part in the preview.
pub enum ObjectSubtype {
    /// Pedalboard frame; board footprints anchor the scene.
    Board,
    /// Pedal or other device placed on (or beside) a board.
    Device,
    /// Anything else on the canvas (cables, labels, ...).
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Canvas position in millimeters.
pub struct CanvasPosition {
    /// Horizontal offset of the unrotated top-left corner.
    pub x: f64,
    /// Vertical offset of the unrotated top-left corner (canvas Y grows downward).
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One object of the flat canvas arrangement.
pub struct CanvasObject {
    /// Stable object identifier.
    pub id: String,
    /// Object kind.
    #[serde(default)]
    pub subtype: ObjectSubtype,
    /// Top-left corner of the unrotated object in millimeters.
    #[serde(default)]
    pub position: CanvasPosition,
    /// Extent along canvas X before rotation (mm).
    #[serde(default)]
    pub width: f64,
    /// Extent along canvas Y before rotation (mm).
    #[serde(default)]
    pub depth: f64,
    /// Vertical extent (mm).
    #[serde(default)]
    pub height: f64,
    /// Rotation in degrees; snapped to the nearest quarter turn.
    #[serde(default)]
    pub rotation: f64,
    /// CSS fill color.
    #[serde(default)]
    pub color: Option<String>,
    /// Image reference used to texture the top face.
    #[serde(default)]
    pub image: Option<String>,
    /// Catalog template the object was created from.
    #[serde(default)]
    pub template_id: Option<String>,
}

impl CanvasObject {
    /// Rotation as a number of clockwise quarter turns in `0..4`.
    pub fn quarter_turns(&self) -> u8 {
        if !self.rotation.is_finite() {
            return 0;
        }
        ((self.rotation / 90.0).round() as i64).rem_euclid(4) as u8
    }

    /// Center of the object on the canvas (mm). Rotation happens about this point.
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.width * 0.5,
            self.position.y + self.depth * 0.5,
        )
    }

    /// Axis-aligned footprint accounting for rotation.
    pub fn footprint(&self) -> Rect {
        let (w, d) = if self.quarter_turns() % 2 == 1 {
            (self.depth, self.width)
        } else {
            (self.width, self.depth)
        };
        let c = self.center();
        Rect::new(
            c.x - w * 0.5,
            c.y - d * 0.5,
            c.x + w * 0.5,
            c.y + d * 0.5,
        )
    }

    /// Whether the object takes part in the preview at all.
    pub fn is_previewable(&self) -> bool {
        matches!(self.subtype, ObjectSubtype::Board | ObjectSubtype::Device)
            && self.width.is_finite()
            && self.depth.is_finite()
            && self.width > 0.0
            && self.depth > 0.0
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
/// Ordered canvas arrangement handed to the preview.
pub struct SceneInput {
    /// Objects in canvas order. Order matters for stacking.
    pub objects: Vec<CanvasObject>,
}

impl<'de> serde::Deserialize<'de> for SceneInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Bare(Vec<CanvasObject>),
            Wrapped { objects: Vec<CanvasObject> },
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Bare(objects) | Repr::Wrapped { objects } => Self { objects },
        })
    }
}

impl SceneInput {
    /// Parse either a bare JSON array of objects or `{ "objects": [...] }`.
    pub fn from_json(text: &str) -> PreviewResult<Self> {
        serde_json::from_str(text).map_err(|e| PreviewError::scene(e.to_string()))
    }

    pub fn from_path(path: &Path) -> PreviewResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene '{}'", path.display()))?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
