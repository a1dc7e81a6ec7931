use super::Projection;
use crate::board::{Color, Plate, Point, Shape};
use std::f32::consts::TAU;

/// Samples taken around a projected circle
pub const CIRCLE_RESOLUTION: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Polygon,
    Circle,
}

/// A plate flattened to screen-space points for one frame of one view
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenShape {
    pub kind: ShapeKind,
    pub color: Color,
    /// Polygon outline without a repeated closing point
    pub points: Vec<Point>,
}

impl ScreenShape {
    /// Points in the tuple form the rasterizer takes
    pub fn vertices(&self) -> Vec<(f32, f32)> {
        self.points.iter().map(Point::as_tuple).collect()
    }
}

/// Resolve one plate into screen space under `projection`.
pub fn resolve(plate: &Plate, projection: &Projection) -> ScreenShape {
    match &plate.shape {
        Shape::Polygon { vertices } => ScreenShape {
            kind: ShapeKind::Polygon,
            color: plate.color,
            points: vertices
                .iter()
                .map(|v| projection.project(plate.location.offset(v.x, v.y)))
                .collect(),
        },
        Shape::Circle { radius } => ScreenShape {
            kind: ShapeKind::Circle,
            color: plate.color,
            points: skewed_circle(plate.location, *radius, projection, CIRCLE_RESOLUTION),
        },
    }
}

/// Resolve a whole board snapshot, keeping draw order
pub fn resolve_all(plates: &[Plate], projection: &Projection) -> Vec<ScreenShape> {
    plates.iter().map(|p| resolve(p, projection)).collect()
}

/// Approximate a projected circle.
///
/// The projection does not keep circles circular, so instead of projecting
/// the center we project the four corners of the bounding square and sweep a
/// unit circle through the bilinear patch they span.
fn skewed_circle(
    center: Point,
    radius: f32,
    projection: &Projection,
    samples: usize,
) -> Vec<Point> {
    let a = projection.project(center.offset(-radius, -radius));
    let b = projection.project(center.offset(radius, -radius));
    let c = projection.project(center.offset(-radius, radius));
    let d = projection.project(center.offset(radius, radius));

    let bilinear = |u: f32, v: f32| {
        let wa = (1.0 - u) * (1.0 - v);
        let wb = u * (1.0 - v);
        let wc = (1.0 - u) * v;
        let wd = u * v;
        Point::new(
            wa * a.x + wb * b.x + wc * c.x + wd * d.x,
            wa * a.y + wb * b.y + wc * c.y + wd * d.y,
        )
    };

    (0..samples)
        .map(|i| {
            let angle = TAU * i as f32 / samples as f32;
            bilinear(0.5 + 0.5 * angle.cos(), 0.5 + 0.5 * angle.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    fn midpoint(a: Point, b: Point) -> Point {
        Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }

    #[test]
    fn test_polygon_keeps_count_and_order() {
        let plate = Plate::new(
            Shape::polygon([(0.0, 0.0), (8.0, 8.0), (16.0, 0.0), (8.0, -8.0)]),
            Point::new(10.0, 10.0),
            Color::RED,
        );
        let view = Projection::new(1.0, Point::new(160.0, 180.0));
        let shape = resolve(&plate, &view);

        assert_eq!(shape.kind, ShapeKind::Polygon);
        assert_eq!(shape.color, Color::RED);
        assert_eq!(shape.points.len(), 4);
        let expected = [(10.0, 10.0), (18.0, 18.0), (26.0, 10.0), (18.0, 2.0)];
        for (p, (x, y)) in shape.points.iter().zip(expected) {
            assert_eq!(*p, view.project(Point::new(x, y)));
        }
    }

    #[test]
    fn test_circle_sample_count() {
        for radius in [0.0, 0.5, 3.0, 10.0] {
            let plate = Plate::new(Shape::circle(radius), Point::new(5.0, 5.0), Color::BLUE);
            let shape = resolve(&plate, &Projection::default());
            assert_eq!(shape.kind, ShapeKind::Circle);
            assert_eq!(shape.points.len(), CIRCLE_RESOLUTION);
        }
    }

    #[test]
    fn test_zero_radius_collapses_to_projected_center() {
        let view = Projection::new(2.0, Point::new(3.0, 4.0));
        let plate = Plate::new(Shape::circle(0.0), Point::new(7.0, 2.0), Color::GREEN);
        let center = view.project(plate.location);
        let shape = resolve(&plate, &view);
        assert!(shape.points.iter().all(|p| close(*p, center)));
    }

    #[test]
    fn test_circle_touches_bounding_patch_edges() {
        let r = 4.0;
        let view = Projection::default();
        let center = Point::new(0.0, 0.0);
        let plate = Plate::new(Shape::circle(r), center, Color::GRAY);
        let points = resolve(&plate, &view).points;

        let a = view.project(Point::new(-r, -r));
        let b = view.project(Point::new(r, -r));
        let c = view.project(Point::new(-r, r));
        let d = view.project(Point::new(r, r));

        // theta = 0, pi/2, pi, 3pi/2 land on the midpoints of the patch edges
        let quarter = CIRCLE_RESOLUTION / 4;
        assert!(close(points[0], midpoint(b, d)));
        assert!(close(points[quarter], midpoint(c, d)));
        assert!(close(points[2 * quarter], midpoint(a, c)));
        assert!(close(points[3 * quarter], midpoint(a, b)));
    }

    #[test]
    fn test_resolve_all_keeps_draw_order() {
        let plates = vec![
            Plate::new(Shape::circle(1.0), Point::new(1.0, 1.0), Color::RED),
            Plate::new(
                Shape::polygon([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]),
                Point::new(2.0, 2.0),
                Color::BLUE,
            ),
        ];
        let shapes = resolve_all(&plates, &Projection::default());
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].color, Color::RED);
        assert_eq!(shapes[1].kind, ShapeKind::Polygon);
    }
}
