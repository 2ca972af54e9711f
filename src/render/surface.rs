use crate::foundation::core::{Affine, Point, Viewport};
use crate::foundation::error::{PreviewError, PreviewResult};

#[derive(Clone, Debug)]
/// CPU-readable RGBA8 frame.
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major RGBA8.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Convert to straight alpha, e.g. before encoding to PNG.
    pub fn into_straight_alpha(mut self) -> Self {
        if self.premultiplied {
            for px in self.data.chunks_exact_mut(4) {
                let a = u16::from(px[3]);
                if a == 0 || a == 255 {
                    continue;
                }
                for c in &mut px[..3] {
                    *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
                }
            }
            self.premultiplied = false;
        }
        self
    }
}

/// Raster target of one preview frame.
///
/// Sized from a [`Viewport`] in physical pixels (CSS size times DPR). Each
/// [`FrameSurface::draw`] replaces the previous contents.
pub struct FrameSurface {
    viewport: Viewport,
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl FrameSurface {
    pub fn new(viewport: Viewport) -> PreviewResult<Self> {
        let (width, height) = pixel_size(viewport)?;
        Ok(Self {
            viewport,
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    /// Match a new viewport. The pixmap is reallocated only when the pixel size changes.
    pub fn resize(&mut self, viewport: Viewport) -> PreviewResult<()> {
        let (width, height) = pixel_size(viewport)?;
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixmap = vello_cpu::Pixmap::new(width, height);
        }
        self.viewport = viewport;
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Fill every pixel with a straight-alpha color.
    pub fn clear(&mut self, rgba: [u8; 4]) {
        let [r, g, b, a] = rgba;
        let premul = premul_rgba8(r, g, b, a);
        for px in self.pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&premul);
        }
    }

    /// Render one frame: `background` first, then whatever `f` records.
    pub fn draw(&mut self, background: [u8; 4], f: impl FnOnce(&mut vello_cpu::RenderContext)) {
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        if background[3] > 0 {
            let [r, g, b, a] = background;
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
        f(&mut ctx);
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
    }

    /// Premultiplied RGBA8 at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let data = self.pixmap.data_as_u8_slice();
        Some([data[i], data[i + 1], data[i + 2], data[i + 3]])
    }

    pub fn readback(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.width(),
            height: self.height(),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

fn pixel_size(viewport: Viewport) -> PreviewResult<(u16, u16)> {
    let width: u16 = viewport
        .pixel_width()
        .try_into()
        .map_err(|_| PreviewError::render("surface width exceeds u16"))?;
    let height: u16 = viewport
        .pixel_height()
        .try_into()
        .map_err(|_| PreviewError::render("surface height exceeds u16"))?;
    Ok((width, height))
}

fn premul_rgba8(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    let af = (a as u16) + 1;
    let premul = |c: u8| -> u8 { (((c as u16) * af) >> 8) as u8 };
    [premul(r), premul(g), premul(b), a]
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

/// Closed polygon through `points`, in `vello_cpu`'s path type.
pub(crate) fn polygon_to_cpu(points: &[Point]) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    let mut it = points.iter();
    if let Some(first) = it.next() {
        out.move_to(point_to_cpu(*first));
        for p in it {
            out.line_to(point_to_cpu(*p));
        }
        out.close_path();
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
