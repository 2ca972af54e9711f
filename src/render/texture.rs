use crate::foundation::core::{Affine, Point};

/// Source triangles with a smaller doubled area are treated as degenerate.
pub const DEGENERATE_AREA: f64 = 1e-9;

/// Solve the affine map taking each `src[i]` to `dst[i]`.
///
/// Collinear (zero-area) source triangles yield [`Affine::IDENTITY`].
pub fn triangle_transform(src: [Point; 3], dst: [Point; 3]) -> Affine {
    let [s0, s1, s2] = src;
    let [d0, d1, d2] = dst;

    let det = s0.x * (s1.y - s2.y) + s1.x * (s2.y - s0.y) + s2.x * (s0.y - s1.y);
    if !det.is_finite() || det.abs() < DEGENERATE_AREA {
        return Affine::IDENTITY;
    }
    let inv = 1.0 / det;

    let solve = |v0: f64, v1: f64, v2: f64| -> (f64, f64, f64) {
        let lin_x = v0 * (s1.y - s2.y) + v1 * (s2.y - s0.y) + v2 * (s0.y - s1.y);
        let lin_y = v0 * (s2.x - s1.x) + v1 * (s0.x - s2.x) + v2 * (s1.x - s0.x);
        let off = v0 * (s1.x * s2.y - s2.x * s1.y)
            + v1 * (s2.x * s0.y - s0.x * s2.y)
            + v2 * (s0.x * s1.y - s1.x * s0.y);
        (lin_x * inv, lin_y * inv, off * inv)
    };

    let (a, c, e) = solve(d0.x, d1.x, d2.x);
    let (b, d, f) = solve(d0.y, d1.y, d2.y);
    let out = Affine::new([a, b, c, d, e, f]);
    if out.as_coeffs().iter().all(|v| v.is_finite()) {
        out
    } else {
        Affine::IDENTITY
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/texture.rs"]
mod tests;
