//! Image references used to texture top faces.
//!
//! Loads are requested when the arrangement changes and completed later by [`ImageStore::pump`],
//! which the host calls between frames. Each key settles exactly once; failures are remembered
//! and never retried.

use std::{
    collections::{HashMap, VecDeque},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    assets::decode::{PreparedImage, decode_image, rasterize_svg},
    faces::build::TextureLookup,
    foundation::error::{PreviewError, PreviewResult},
};

/// Longest side used when rasterizing SVG image references.
pub const SVG_RASTER_MAX_DIM: u32 = 1024;

/// Source of encoded image data, keyed by the object's image reference.
pub trait ImageLoader {
    fn load(&mut self, key: &str) -> PreviewResult<PreparedImage>;
}

/// Loads image references as files relative to a root directory.
#[derive(Clone, Debug)]
pub struct FsImageLoader {
    root: PathBuf,
}

impl FsImageLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageLoader for FsImageLoader {
    fn load(&mut self, key: &str) -> PreviewResult<PreparedImage> {
        let rel = normalize_rel_path(key)?;
        let path = self.root.join(&rel);
        let bytes =
            std::fs::read(&path).with_context(|| format!("read image '{}'", path.display()))?;
        decode_by_extension(&rel, &bytes)
    }
}

/// Serves images from bytes the host already holds.
#[derive(Clone, Debug, Default)]
pub struct MemoryImageLoader {
    bytes: HashMap<String, Arc<Vec<u8>>>,
}

impl MemoryImageLoader {
    pub fn insert(&mut self, key: impl Into<String>, bytes: Vec<u8>) {
        self.bytes.insert(key.into(), Arc::new(bytes));
    }
}

impl ImageLoader for MemoryImageLoader {
    fn load(&mut self, key: &str) -> PreviewResult<PreparedImage> {
        let bytes = self
            .bytes
            .get(key)
            .ok_or_else(|| PreviewError::asset(format!("no image registered for '{key}'")))?;
        decode_by_extension(key, bytes)
    }
}

fn decode_by_extension(key: &str, bytes: &[u8]) -> PreviewResult<PreparedImage> {
    let is_svg = Path::new(key)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        rasterize_svg(bytes, SVG_RASTER_MAX_DIM)
    } else {
        decode_image(bytes)
    }
}

/// Normalize and validate relative image paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> PreviewResult<String> {
    let s = source.trim().replace('\\', "/");
    if s.starts_with('/') {
        return Err(PreviewError::validation("image paths must be relative"));
    }
    if s.is_empty() {
        return Err(PreviewError::validation("image path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(PreviewError::validation("image paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(PreviewError::validation("image path must contain a file name"));
    }
    Ok(out.join("/"))
}

/// Decoded image ready to be used as a `vello_cpu` paint.
#[derive(Clone, Debug)]
pub struct TextureImage {
    pub paint: vello_cpu::Image,
    pub width: f64,
    pub height: f64,
}

impl TextureImage {
    pub fn from_prepared(img: &PreparedImage) -> PreviewResult<Self> {
        let pixmap = premul_bytes_to_pixmap(img.rgba8_premul.as_slice(), img.width, img.height)?;
        Ok(Self {
            paint: vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            },
            width: f64::from(img.width),
            height: f64::from(img.height),
        })
    }
}

fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> PreviewResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PreviewError::asset("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PreviewError::asset("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(PreviewError::asset("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[derive(Clone, Debug)]
pub enum ImageState {
    Pending,
    Ready(TextureImage),
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Outcome of one settled load.
pub enum ImageEvent {
    Loaded(String),
    Failed(String),
}

impl ImageEvent {
    pub fn key(&self) -> &str {
        match self {
            Self::Loaded(k) | Self::Failed(k) => k,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

#[derive(Debug, Default)]
pub struct ImageStore {
    entries: HashMap<String, ImageState>,
    queue: VecDeque<String>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `key` for loading. Returns `false` if the key is already known in any state.
    pub fn request(&mut self, key: &str) -> bool {
        if self.entries.contains_key(key) {
            return false;
        }
        self.entries.insert(key.to_owned(), ImageState::Pending);
        self.queue.push_back(key.to_owned());
        true
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn state(&self, key: &str) -> Option<&ImageState> {
        self.entries.get(key)
    }

    pub fn texture(&self, key: &str) -> Option<&TextureImage> {
        match self.entries.get(key) {
            Some(ImageState::Ready(t)) => Some(t),
            _ => None,
        }
    }

    /// Register an image the host decoded itself. Replaces any previous state.
    pub fn insert_ready(&mut self, key: &str, img: &PreparedImage) -> PreviewResult<()> {
        let tex = TextureImage::from_prepared(img)?;
        self.queue.retain(|k| k != key);
        self.entries.insert(key.to_owned(), ImageState::Ready(tex));
        Ok(())
    }

    /// Complete every queued load and report each settled key once.
    #[tracing::instrument(skip_all, fields(queued = self.queue.len()))]
    pub fn pump(&mut self, loader: &mut dyn ImageLoader) -> Vec<ImageEvent> {
        let mut events = Vec::with_capacity(self.queue.len());
        while let Some(key) = self.queue.pop_front() {
            let loaded = loader
                .load(&key)
                .and_then(|img| TextureImage::from_prepared(&img));
            match loaded {
                Ok(tex) => {
                    tracing::debug!(key = %key, w = tex.width, h = tex.height, "image loaded");
                    self.entries.insert(key.clone(), ImageState::Ready(tex));
                    events.push(ImageEvent::Loaded(key));
                }
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "image failed, using flat top face");
                    self.entries.insert(key.clone(), ImageState::Failed);
                    events.push(ImageEvent::Failed(key));
                }
            }
        }
        events
    }

    /// Forget every entry, including failures.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.queue.clear();
    }
}

impl TextureLookup for ImageStore {
    fn has_texture(&self, key: &str) -> bool {
        self.texture(key).is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
