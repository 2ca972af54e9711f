//! Pedalview renders a tilted 3D preview of a flat pedalboard arrangement on the CPU.
//!
//! Rectangular canvas objects are stacked by footprint overlap into boxes, projected through an
//! orbiting perspective camera, and painted back to front into a `vello_cpu` pixmap. The
//! [`PreviewController`] owns all animation state (auto-rotation, drag, stack height smoothing,
//! the open/close convergence, overlay fade, and camera distance fitting) and is driven one frame
//! at a time by a [`PreviewHost`].
//!
//! - Describe the arrangement with [`CanvasObject`]s (or load a [`SceneInput`])
//! - Create a [`PreviewController`] and a [`FrameSurface`]
//! - Call [`PreviewController::render_frame`] whenever the host is asked to render
#![forbid(unsafe_code)]

pub mod animation;
pub mod assets;
pub mod camera;
pub mod color;
pub mod controller;
pub mod faces;
pub mod foundation;
pub mod geometry;
pub mod interaction;
pub mod render;
pub mod scene;

pub use crate::foundation::config::PreviewConfig;
pub use crate::foundation::core::{Affine, BezPath, Fps, FrameIndex, Point, Rect, Vec2, Viewport};
pub use crate::foundation::error::{PreviewError, PreviewResult};

pub use crate::animation::convergence::ConvergenceState;
pub use crate::animation::ease::Ease;
pub use crate::assets::store::{
    FsImageLoader, ImageEvent, ImageLoader, ImageStore, MemoryImageLoader,
};
pub use crate::camera::orbit::{Camera, create_camera, project_perspective};
pub use crate::color::css::Rgb;
pub use crate::controller::host::{HeadlessHost, PreviewHost};
pub use crate::controller::preview::{FrameStats, PreviewController};
pub use crate::faces::build::{Face, FaceKind, build_faces, sort_faces};
pub use crate::geometry::vec3::Vec3;
pub use crate::interaction::orbit::{
    Modifiers, PointerButton, PointerEvent, PointerKind, PointerOutcome,
};
pub use crate::render::surface::{FrameRGBA, FrameSurface};
pub use crate::scene::layout::{SceneBox, SceneLayout, build_scene_layout};
pub use crate::scene::model::{CanvasObject, CanvasPosition, ObjectSubtype, SceneInput};
