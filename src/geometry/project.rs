// Clamped parametric projection of a point onto a segment.

use crate::geometry::tolerance::MIN_PROJ_LEN;
use crate::model::Point;

/// Distance from `p` to its clamped projection on `ab`, plus the clamped
/// parameter t in [0,1]. Grounded on the standard point/segment distance.
pub fn project_onto_segment(p: Point, a: Point, b: Point) -> (f32, f32) {
    let vx = b.x - a.x;
    let vy = b.y - a.y;
    let wx = p.x - a.x;
    let wy = p.y - a.y;
    let vv = vx * vx + vy * vy;
    let mut t = if vv > 0.0 { (wx * vx + wy * vy) / vv } else { 0.0 };
    if t < 0.0 {
        t = 0.0;
    } else if t > 1.0 {
        t = 1.0;
    }
    let projx = a.x + t * vx;
    let projy = a.y + t * vy;
    let dx = p.x - projx;
    let dy = p.y - projy;
    ((dx * dx + dy * dy).sqrt(), t)
}

/// True iff `p` lies within `tol` of segment `ab`. Near-zero-length segments
/// and non-finite input are always false.
pub fn point_on_segment(p: Point, a: Point, b: Point, tol: f32) -> bool {
    if !p.is_finite() || !a.is_finite() || !b.is_finite() || !tol.is_finite() {
        return false;
    }
    if a.dist(b) < MIN_PROJ_LEN {
        return false;
    }
    let (d, _) = project_onto_segment(p, a, b);
    d < tol
}
