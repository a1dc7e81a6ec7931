use crate::board::Point;
use serde::{Deserialize, Serialize};

/// Horizontal stretch: x contributes `x + SKEW_X * x`
pub const SKEW_X: f32 = 4.5;
/// Vertical stretch: y contributes `y + STRETCH_Y * y`
pub const STRETCH_Y: f32 = 5.0;
/// Vertical shear from x, which gives the grid its oblique look
pub const SKEW_Y: f32 = 2.0;

/// Scale and offset of one view of the board. Every view shares the same
/// axonometric formula; only these two parameters differ.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub scale: f32,
    pub offset: Point,
}

impl Projection {
    pub const fn new(scale: f32, offset: Point) -> Self {
        Self { scale, offset }
    }

    #[inline]
    pub fn project(&self, p: Point) -> Point {
        project(p.x, p.y, self.scale, self.offset)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(1.0, Point::default())
    }
}

/// Map grid coordinates to screen coordinates.
///
/// Pure arithmetic: results may land anywhere, clipping is left to the
/// rasterizer.
#[inline]
pub fn project(x: f32, y: f32, scale: f32, offset: Point) -> Point {
    Point::new(
        scale * (x + SKEW_X * x) + offset.x,
        scale * (y + STRETCH_Y * y + SKEW_Y * x) + offset.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_maps_to_offset() {
        let offset = Point::new(160.0, 180.0);
        assert_eq!(project(0.0, 0.0, 1.0, offset), offset);
        assert_eq!(project(0.0, 0.0, 7.0, offset), offset);
    }

    #[test]
    fn test_known_values() {
        // x: 2 + 9 = 11, y: 1 + 5 + 4 = 10
        assert_eq!(project(2.0, 1.0, 1.0, Point::default()), Point::new(11.0, 10.0));
        assert_eq!(project(2.0, 1.0, 2.0, Point::new(1.0, 1.0)), Point::new(23.0, 21.0));
    }

    #[test]
    fn test_offset_translation_equivariance() {
        let base = Point::new(10.0, 20.0);
        for &(dx, dy) in &[(0.0, 0.0), (1.0, -3.0), (400.0, 0.5), (-12.25, 8.0)] {
            let shifted = base.offset(dx, dy);
            for &(x, y) in &[(0.0, 0.0), (1.0, 2.0), (-4.0, 6.5), (40.0, 30.0)] {
                let a = project(x, y, 2.0, base);
                let b = project(x, y, 2.0, shifted);
                assert_eq!(b, a.offset(dx, dy));
            }
        }
    }

    #[test]
    fn test_affine_in_position() {
        let o = Point::default();
        let p1 = project(1.0, 2.0, 1.0, o);
        let p2 = project(3.0, 4.0, 1.0, o);
        let sum = project(4.0, 6.0, 1.0, o);
        assert_eq!(sum, Point::new(p1.x + p2.x, p1.y + p2.y));
    }

    #[test]
    fn test_linear_in_scale() {
        let o = Point::default();
        let unit = project(3.0, 5.0, 1.0, o);
        let tripled = project(3.0, 5.0, 3.0, o);
        assert_eq!(tripled, Point::new(unit.x * 3.0, unit.y * 3.0));
    }

    #[test]
    fn test_method_matches_free_function() {
        let view = Projection::new(1.8, Point::new(10.0, 80.0));
        assert_eq!(
            view.project(Point::new(4.0, 2.0)),
            project(4.0, 2.0, 1.8, Point::new(10.0, 80.0))
        );
    }
}
