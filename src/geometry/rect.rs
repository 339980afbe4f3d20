// Rotated-rectangle outline for placed equipment shapes.

use crate::model::{Point, Shape};

/// One edge of a shape's rotated outline. `index` is stable: 0 top, 1 right,
/// 2 bottom, 3 left in the shape's local frame before rotation.
#[derive(Clone, Copy, Debug)]
pub struct Side {
    pub a: Point,
    pub b: Point,
    pub index: u8,
}

fn rotate_about(p: Point, center: Point, sin: f32, cos: f32) -> Point {
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Point {
        x: center.x + dx * cos - dy * sin,
        y: center.y + dx * sin + dy * cos,
    }
}

pub fn rotated_rectangle_sides(shape: &Shape) -> [Side; 4] {
    let c = shape.center;
    let hw = shape.width * 0.5;
    let hh = shape.height * 0.5;
    let rad = shape.rotation_deg.to_radians();
    let (sin, cos) = rad.sin_cos();

    let tl = rotate_about(Point::new(c.x - hw, c.y - hh), c, sin, cos);
    let tr = rotate_about(Point::new(c.x + hw, c.y - hh), c, sin, cos);
    let br = rotate_about(Point::new(c.x + hw, c.y + hh), c, sin, cos);
    let bl = rotate_about(Point::new(c.x - hw, c.y + hh), c, sin, cos);

    [
        Side { a: tl, b: tr, index: 0 },
        Side { a: tr, b: br, index: 1 },
        Side { a: br, b: bl, index: 2 },
        Side { a: bl, b: tl, index: 3 },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn shape(cx: f32, cy: f32, w: f32, h: f32, rot: f32) -> Shape {
        Shape {
            center: Point::new(cx, cy),
            width: w,
            height: h,
            rotation_deg: rot,
            air_value: None,
            kind: "fan".into(),
            label: String::new(),
        }
    }

    #[test]
    fn unrotated_sides_are_axis_aligned() {
        let s = shape(10.0, 20.0, 4.0, 2.0, 0.0);
        let sides = rotated_rectangle_sides(&s);
        assert_relative_eq!(sides[0].a.x, 8.0, epsilon = 1e-5);
        assert_relative_eq!(sides[0].a.y, 19.0, epsilon = 1e-5);
        assert_relative_eq!(sides[0].b.x, 12.0, epsilon = 1e-5);
        assert_relative_eq!(sides[2].b.y, 21.0, epsilon = 1e-5);
        for (i, side) in sides.iter().enumerate() {
            assert_eq!(side.index as usize, i);
        }
    }

    #[test]
    fn rotation_preserves_side_lengths() {
        let s = shape(0.0, 0.0, 6.0, 4.0, 37.0);
        let sides = rotated_rectangle_sides(&s);
        assert_relative_eq!(sides[0].a.dist(sides[0].b), 6.0, epsilon = 1e-4);
        assert_relative_eq!(sides[1].a.dist(sides[1].b), 4.0, epsilon = 1e-4);
        // Outline closes on itself
        assert_relative_eq!(sides[3].b.x, sides[0].a.x, epsilon = 1e-4);
        assert_relative_eq!(sides[3].b.y, sides[0].a.y, epsilon = 1e-4);
    }

    #[test]
    fn ninety_degrees_swaps_extents() {
        let s = shape(0.0, 0.0, 8.0, 2.0, 90.0);
        let sides = rotated_rectangle_sides(&s);
        let xs: Vec<f32> = sides.iter().map(|s| s.a.x).collect();
        let max_x = xs.iter().cloned().fold(f32::MIN, f32::max);
        assert_relative_eq!(max_x, 1.0, epsilon = 1e-4);
    }
}
