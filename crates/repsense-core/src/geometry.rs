//! Angle geometry over 2D landmarks

use crate::Point2D;

/// Angle at vertex `b` between the rays `b→a` and `b→c`, in degrees.
///
/// Computed from the difference of the two `atan2` bearings and reflected
/// into `[0, 180]`. Symmetric in `a` and `c`. NaN coordinates yield NaN.
pub fn angle(a: Point2D, b: Point2D, c: Point2D) -> f32 {
    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let degrees = radians.to_degrees().abs();
    let folded = if degrees > 180.0 { 360.0 - degrees } else { degrees };
    // f32 rounding can leave the fold a hair outside the range
    folded.clamp(0.0, 180.0)
}

/// Point at `length` from `vertex` such that `angle(reference, vertex, p)`
/// equals `degrees`.
pub fn point_at_angle(vertex: Point2D, reference: Point2D, degrees: f32, length: f32) -> Point2D {
    let (mut dx, mut dy) = (reference.x - vertex.x, reference.y - vertex.y);
    let norm = (dx * dx + dy * dy).sqrt();
    if norm > f32::EPSILON {
        dx /= norm;
        dy /= norm;
    } else {
        dx = 1.0;
        dy = 0.0;
    }

    let (sin, cos) = degrees.to_radians().sin_cos();
    Point2D {
        x: vertex.x + (dx * cos - dy * sin) * length,
        y: vertex.y + (dx * sin + dy * cos) * length,
    }
}
