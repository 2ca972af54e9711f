//! Frame-driven preview controller.
//!
//! Owns every piece of mutable preview state (view angles, per-object Z, convergence run,
//! overlay fade, camera distance) and turns it into one painted frame per
//! [`PreviewController::render_frame`] call. The host drives it: it forwards input, calls
//! `render_frame` whenever [`PreviewHost::request_render`] fired, and calls
//! [`PreviewController::poll_images`] between frames.

use crate::animation::convergence::{Convergence, ConvergenceState, displaced_center};
use crate::animation::fade::OverlayFade;
use crate::animation::zsmooth::ZSmoother;
use crate::assets::store::{ImageEvent, ImageLoader, ImageStore};
use crate::camera::orbit::create_camera;
use crate::controller::host::PreviewHost;
use crate::faces::build::{build_faces, sort_faces};
use crate::foundation::config::PreviewConfig;
use crate::foundation::core::{Point, Rect, Vec2, Viewport};
use crate::foundation::error::PreviewResult;
use crate::geometry::bounds::bounds_of_point_sets;
use crate::geometry::vec3::Vec3;
use crate::interaction::fit::{DistanceSmoother, FitQuery, fit_distance};
use crate::interaction::orbit::{OrbitControl, PointerEvent, PointerOutcome};
use crate::render::painter::{PaintStyle, paint_faces};
use crate::render::surface::FrameSurface;
use crate::scene::layout::{SceneBox, SceneLayout, build_scene_layout};
use crate::scene::model::CanvasObject;

/// Longest time step applied in one frame, in seconds.
pub const MAX_FRAME_DT: f64 = 0.1;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
/// Summary of one rendered frame.
pub struct FrameStats {
    pub boxes: usize,
    /// Faces that survived culling.
    pub faces: usize,
    pub textured_faces: usize,
    /// Whether another frame was requested.
    pub animating: bool,
    /// Pixel bounds of everything painted.
    pub drawn_bounds: Option<Rect>,
}

pub struct PreviewController<H: PreviewHost> {
    cfg: PreviewConfig,
    host: H,
    loader: Box<dyn ImageLoader>,
    images: ImageStore,
    objects: Vec<CanvasObject>,
    layout: SceneLayout,
    viewport: Viewport,
    orbit: OrbitControl,
    z: ZSmoother,
    convergence: Convergence,
    fade: OverlayFade,
    distance: DistanceSmoother,
    last_frame: Option<f64>,
    frame_pending: bool,
}

impl<H: PreviewHost> PreviewController<H> {
    pub fn new(cfg: PreviewConfig, host: H, loader: Box<dyn ImageLoader>) -> PreviewResult<Self> {
        cfg.validate()?;
        Ok(Self {
            orbit: OrbitControl::new(&cfg),
            z: ZSmoother::new(cfg.z_smoothing_speed),
            convergence: Convergence::new(
                cfg.convergence_duration_s,
                cfg.convergence_stagger_s,
                cfg.convergence_ease,
            ),
            fade: OverlayFade::new(cfg.fade_duration_s, cfg.fade_ease),
            layout: SceneLayout::empty(&cfg),
            cfg,
            host,
            loader,
            images: ImageStore::new(),
            objects: Vec::new(),
            viewport: Viewport::default(),
            distance: DistanceSmoother::default(),
            last_frame: None,
            frame_pending: false,
        })
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.cfg
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn objects(&self) -> &[CanvasObject] {
        &self.objects
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub fn orbit(&self) -> &OrbitControl {
        &self.orbit
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn convergence_state(&self) -> ConvergenceState {
        self.convergence.state()
    }

    pub fn run_id(&self) -> u64 {
        self.convergence.run_id()
    }

    /// Current smoothed resting height of an object, in world units.
    pub fn smoothed_base_z(&self, id: &str) -> Option<f64> {
        self.z.current(id)
    }

    pub fn camera_distance(&self) -> Option<f64> {
        self.distance.current()
    }

    pub fn is_open(&self) -> bool {
        matches!(
            self.convergence.state(),
            ConvergenceState::Open | ConvergenceState::Opening { .. }
        )
    }

    /// Replace the arrangement. The layout is rebuilt from scratch and new image references are
    /// queued for loading.
    pub fn set_objects(&mut self, objects: Vec<CanvasObject>) {
        self.layout = build_scene_layout(&objects, &self.cfg);
        self.objects = objects;
        for b in &self.layout.boxes {
            if let Some(key) = b.image.as_deref() {
                self.images.request(key);
            }
        }
        self.request_render();
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.request_render();
        }
    }

    /// Show the preview. Reopening during a close resumes from the current pose; opening from
    /// fully closed starts from fresh animation state.
    pub fn open(&mut self, now: f64) {
        if self.convergence.state() == ConvergenceState::Closed {
            self.reset_view();
        }
        if self.convergence.open(now, self.layout.boxes.len()) {
            self.fade.fade_to(1.0, now);
            self.request_render();
        }
    }

    pub fn close(&mut self, now: f64) {
        if self.convergence.close(now, self.layout.boxes.len()) {
            self.fade.fade_to(0.0, now);
            self.request_render();
        }
    }

    /// Jump to the fully open, settled pose.
    pub fn open_immediately(&mut self) {
        if self.convergence.state() == ConvergenceState::Closed {
            self.reset_view();
        }
        self.convergence.snap_open();
        self.fade.snap(1.0);
        self.request_render();
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.orbit.set_auto_rotate(enabled);
        self.request_render();
    }

    pub fn set_view_angles(&mut self, yaw: f64, pitch: f64) {
        self.orbit.set_angles(yaw, pitch);
        self.request_render();
    }

    pub fn pointer_down(&mut self, ev: &PointerEvent) -> PointerOutcome {
        let outcome = self.orbit.pointer_down(ev);
        self.handle_pointer(outcome)
    }

    pub fn pointer_move(&mut self, ev: &PointerEvent) -> PointerOutcome {
        let outcome = self.orbit.pointer_move(ev);
        self.handle_pointer(outcome)
    }

    pub fn pointer_up(&mut self, ev: &PointerEvent) -> PointerOutcome {
        let outcome = self.orbit.pointer_up(ev);
        self.handle_pointer(outcome)
    }

    fn handle_pointer(&mut self, outcome: PointerOutcome) -> PointerOutcome {
        match outcome {
            PointerOutcome::Ignored => {}
            PointerOutcome::DoubleTap => {
                self.host.toggle_fullscreen();
                self.request_render();
            }
            PointerOutcome::DragStarted | PointerOutcome::Rotated | PointerOutcome::DragEnded => {
                self.request_render();
            }
        }
        outcome
    }

    /// Complete queued image loads and notify the host of each settled key.
    pub fn poll_images(&mut self) -> Vec<ImageEvent> {
        if !self.images.has_pending() {
            return Vec::new();
        }
        let events = self.images.pump(self.loader.as_mut());
        for ev in &events {
            self.host.image_settled(ev.key(), ev.is_loaded());
        }
        if events.iter().any(ImageEvent::is_loaded) {
            self.request_render();
        }
        events
    }

    /// Advance all animation state to `now` (seconds) and paint one frame into `surface`.
    #[tracing::instrument(skip(self, surface))]
    pub fn render_frame(&mut self, now: f64, surface: &mut FrameSurface) -> FrameStats {
        self.frame_pending = false;
        let dt = match self.last_frame {
            Some(prev) if now.is_finite() && prev.is_finite() => {
                (now - prev).clamp(0.0, MAX_FRAME_DT)
            }
            _ => 0.0,
        };
        self.last_frame = Some(now);

        if let Err(err) = surface.resize(self.viewport) {
            tracing::warn!(error = %err, "surface does not fit the viewport, skipping frame");
            return FrameStats::default();
        }

        let count = self.layout.boxes.len();
        let z_moving = self.z.step(
            self.layout.boxes.iter().map(|b| (b.id.as_str(), b.base_z())),
            dt,
        );
        let converging = self.convergence.update(now, count);
        let fading = self.fade.update(now);
        let opacity = self.fade.value(now);
        let visible = opacity > 0.0 || self.convergence.state() != ConvergenceState::Closed;
        let rotating = visible && self.orbit.advance(dt);

        if self.layout.is_empty() || !visible {
            surface.clear(self.cfg.background_rgba);
            let animating = z_moving || converging || fading;
            if animating {
                self.request_render();
            }
            return FrameStats {
                animating,
                ..FrameStats::default()
            };
        }

        let boxes = self.frame_boxes(now);
        let (yaw, pitch) = (self.orbit.yaw(), self.orbit.pitch());

        let mut corners: Vec<Vec3> = boxes.iter().flat_map(SceneBox::corners).collect();
        if self.convergence.is_animating() {
            corners.extend(
                self.displaced_boxes(&boxes, |_| 1.0)
                    .iter()
                    .flat_map(SceneBox::corners),
            );
        }
        let query = FitQuery {
            target: self.layout.camera_target,
            yaw,
            pitch,
            fov_deg: self.cfg.fov_deg,
            aspect: self.viewport.aspect(),
            padding: self.cfg.fit_padding,
        };
        let start = self.distance.current().unwrap_or(self.layout.orbit_distance);
        let fitted = fit_distance(&corners, &query, start)
            .max(self.layout.orbit_distance * self.cfg.min_fit_fraction);
        let zooming = self.distance.step(
            fitted,
            dt,
            self.cfg.distance_smoothing,
            self.cfg.max_distance_rate,
        );
        let distance = self.distance.current().unwrap_or(fitted);

        let camera = create_camera(
            self.layout.camera_target,
            distance,
            yaw,
            pitch,
            self.cfg.fov_deg,
        );
        let mut faces = build_faces(&boxes, &camera, self.viewport, &self.cfg, &self.images);
        sort_faces(&mut faces);

        let style = PaintStyle::from_config(&self.cfg, self.viewport);
        let images = &self.images;
        let mut textured_faces = 0;
        surface.draw(self.cfg.background_rgba, |ctx| {
            textured_faces = paint_faces(ctx, &faces, images, &style, opacity);
        });

        let animating = z_moving || converging || fading || rotating || zooming;
        if animating {
            self.request_render();
        }

        let stats = FrameStats {
            boxes: boxes.len(),
            faces: faces.len(),
            textured_faces,
            animating,
            drawn_bounds: bounds_of_point_sets(faces.iter().map(|f| &f.points[..])),
        };
        tracing::trace!(
            faces = stats.faces,
            textured = stats.textured_faces,
            animating,
            distance,
            "frame painted"
        );
        stats
    }

    /// Layout boxes with this frame's smoothed Z and convergence offsets applied.
    fn frame_boxes(&self, now: f64) -> Vec<SceneBox> {
        let count = self.layout.boxes.len();
        let smoothed: Vec<SceneBox> = self
            .layout
            .boxes
            .iter()
            .map(|b| {
                let mut b = b.clone();
                if let Some(base) = self.z.current(&b.id) {
                    b.center.z = base + b.half.z;
                }
                b
            })
            .collect();
        self.displaced_boxes(&smoothed, |i| self.convergence.displacement(i, now, count))
    }

    fn displaced_boxes(&self, boxes: &[SceneBox], amount: impl Fn(usize) -> f64) -> Vec<SceneBox> {
        let [fx, fy] = self.cfg.convergence_fallback_dir;
        let fallback = Vec2::new(fx, fy);
        let distance = self.cfg.convergence_offset_mm * self.cfg.mm_to_world;
        boxes
            .iter()
            .enumerate()
            .map(|(i, b)| {
                let mut b = b.clone();
                let p = displaced_center(
                    b.footprint_center(),
                    Point::ZERO,
                    fallback,
                    distance,
                    amount(i),
                );
                b.center.x = p.x;
                b.center.y = p.y;
                b
            })
            .collect()
    }

    fn reset_view(&mut self) {
        self.orbit.reset();
        self.z.clear();
        self.distance.reset();
        self.last_frame = None;
    }

    fn request_render(&mut self) {
        if !self.frame_pending {
            self.frame_pending = true;
            self.host.request_render();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/preview.rs"]
mod tests;
