use super::{board_to_screen, Color, Point};
use serde::{Deserialize, Serialize};

/// Side of the square drag handle drawn at a plate's location, in pixels
pub const HANDLE_SIZE: f32 = 10.0;

/// Geometry of a plate, in cells relative to the plate location.
///
/// Serialized with an explicit `type` tag; an unknown tag fails to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    /// Closed implicitly; needs at least three vertices
    Polygon { vertices: Vec<Point> },
    /// Centered on the plate location
    Circle { radius: f32 },
}

impl Shape {
    pub fn polygon(vertices: impl IntoIterator<Item = (f32, f32)>) -> Self {
        Self::Polygon {
            vertices: vertices.into_iter().map(|(x, y)| Point::new(x, y)).collect(),
        }
    }

    pub fn circle(radius: f32) -> Self {
        Self::Circle { radius }
    }

    /// Check the invariants serde cannot express
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Polygon { vertices } => {
                if vertices.len() < 3 {
                    return Err(format!(
                        "polygon needs at least 3 vertices, got {}",
                        vertices.len()
                    ));
                }
                if vertices.iter().any(|v| !v.x.is_finite() || !v.y.is_finite()) {
                    return Err("polygon vertex is not finite".to_string());
                }
                Ok(())
            },
            Self::Circle { radius } => {
                if !radius.is_finite() || *radius < 0.0 {
                    return Err(format!("circle radius must be finite and >= 0, got {radius}"));
                }
                Ok(())
            },
        }
    }
}

/// Identity of a plate on a board, stable across reordering and recoloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PlateId(pub(crate) u32);

/// A colored shape placed on the grid
#[derive(Debug, Clone, PartialEq)]
pub struct Plate {
    pub(crate) id: PlateId,
    pub shape: Shape,
    pub location: Point,
    pub color: Color,
}

impl Plate {
    /// Create a detached plate; the board assigns its id on insertion
    pub fn new(shape: Shape, location: Point, color: Color) -> Self {
        Self {
            id: PlateId::default(),
            shape,
            location,
            color,
        }
    }

    pub fn id(&self) -> PlateId {
        self.id
    }

    /// Handle rectangle in flat-view screen space as (x, y, w, h)
    pub fn handle_rect(&self) -> (f32, f32, f32, f32) {
        let anchor = board_to_screen(self.location);
        let half = HANDLE_SIZE / 2.0;
        (anchor.x - half, anchor.y - half, HANDLE_SIZE, HANDLE_SIZE)
    }

    /// Half-open containment test against the handle, like a UI rect
    pub fn handle_contains(&self, x: f32, y: f32) -> bool {
        let (hx, hy, w, h) = self.handle_rect();
        x >= hx && x < hx + w && y >= hy && y < hy + h
    }

    /// Polygon vertices in flat-view screen space
    pub fn flat_vertices(&self) -> Vec<(f32, f32)> {
        match &self.shape {
            Shape::Polygon { vertices } => vertices
                .iter()
                .map(|v| board_to_screen(self.location.offset(v.x, v.y)).as_tuple())
                .collect(),
            Shape::Circle { .. } => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_tags_parse() {
        let poly: Shape =
            serde_json::from_str(r#"{"type":"polygon","vertices":[[0,0],[1,0],[0,1]]}"#).unwrap();
        assert_eq!(poly, Shape::polygon([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]));

        let circle: Shape = serde_json::from_str(r#"{"type":"circle","radius":3}"#).unwrap();
        assert_eq!(circle, Shape::circle(3.0));
    }

    #[test]
    fn test_unknown_shape_tag_is_rejected() {
        let result = serde_json::from_str::<Shape>(r#"{"type":"star","points":5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate() {
        assert!(Shape::polygon([(0.0, 0.0), (1.0, 1.0)]).validate().is_err());
        assert!(Shape::circle(-1.0).validate().is_err());
        assert!(Shape::circle(f32::NAN).validate().is_err());
        assert!(Shape::circle(0.0).validate().is_ok());
        assert!(Shape::polygon([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]).validate().is_ok());
    }

    #[test]
    fn test_handle_contains() {
        let plate = Plate::new(Shape::circle(2.0), Point::new(2.0, 3.0), Color::GRAY);
        // anchor is (130, 120)
        assert!(plate.handle_contains(130.0, 120.0));
        assert!(plate.handle_contains(125.0, 115.0));
        assert!(!plate.handle_contains(135.0, 120.0));
        assert!(!plate.handle_contains(124.9, 120.0));
    }

    #[test]
    fn test_flat_vertices_are_translated_and_scaled() {
        let plate = Plate::new(
            Shape::polygon([(0.0, 0.0), (2.0, 0.0), (0.0, 2.0)]),
            Point::new(1.0, 1.0),
            Color::RED,
        );
        assert_eq!(
            plate.flat_vertices(),
            vec![(115.0, 90.0), (145.0, 90.0), (115.0, 120.0)]
        );
    }
}
