use crate::foundation::core::{Point, Rect, Vec2};

/// Axis-aligned bounds of a point list, `None` when empty.
pub fn bounds_of_points(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
    points.into_iter().fold(None, |acc, p| {
        Some(match acc {
            None => Rect::from_points(p, p),
            Some(r) => r.union_pt(p),
        })
    })
}

/// Union of rects, `None` when empty.
pub fn bounds_of_rects(rects: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    rects
        .into_iter()
        .fold(None, |acc: Option<Rect>, r| Some(acc.map_or(r, |a| a.union(r))))
}

pub fn bounds_of_point_sets<'a>(sets: impl IntoIterator<Item = &'a [Point]>) -> Option<Rect> {
    bounds_of_points(sets.into_iter().flat_map(|s| s.iter().copied()))
}

/// Interior overlap test. Rects that only share an edge or a corner do not overlap.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    const EPS: f64 = 1e-9;
    a.x0 < b.x1 - EPS && b.x0 < a.x1 - EPS && a.y0 < b.y1 - EPS && b.y0 < a.y1 - EPS
}

/// Unit direction from `center` through `through`, or the normalized `fallback` when the two
/// points coincide.
pub fn radial_direction(center: Point, through: Point, fallback: Vec2) -> Vec2 {
    let d = through - center;
    let len = d.hypot();
    if len.is_finite() && len > 1e-9 {
        return d / len;
    }
    let fl = fallback.hypot();
    if fl > 1e-9 {
        fallback / fl
    } else {
        Vec2::new(1.0, 0.0)
    }
}

pub fn offset_along(p: Point, dir: Vec2, distance: f64) -> Point {
    p + dir * distance
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/bounds.rs"]
mod tests;
