// Segment-segment intersection via the two-line parametric solve, promoted
// to f64 internally. Near-parallel pairs and out-of-range parameters yield
// None; malformed input never panics.

use crate::geometry::tolerance::{EPS_DENOM, EPS_PARAM};
use crate::model::Point;

pub fn segment_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    if !p1.is_finite() || !p2.is_finite() || !p3.is_finite() || !p4.is_finite() {
        return None;
    }

    let ax = p1.x as f64;
    let ay = p1.y as f64;
    let rx = p2.x as f64 - ax;
    let ry = p2.y as f64 - ay;
    let cx = p3.x as f64;
    let cy = p3.y as f64;
    let sx = p4.x as f64 - cx;
    let sy = p4.y as f64 - cy;

    let denom = rx * sy - ry * sx;
    if denom.abs() < EPS_DENOM as f64 {
        // Near-parallel or collinear; collinear touches are picked up later
        // as endpoint candidates, not here.
        return None;
    }

    let qpx = cx - ax;
    let qpy = cy - ay;
    let t = (qpx * sy - qpy * sx) / denom;
    let u = (qpx * ry - qpy * rx) / denom;

    let lo = -(EPS_PARAM as f64);
    let hi = 1.0 + EPS_PARAM as f64;
    if t < lo || t > hi || u < lo || u > hi {
        return None;
    }

    Some(Point {
        x: (ax + t * rx) as f32,
        y: (ay + t * ry) as f32,
    })
}
