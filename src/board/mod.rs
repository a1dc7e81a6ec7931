mod model;
mod plate;

pub use model::Board;
pub use plate::{Plate, PlateId, Shape};

use serde::{Deserialize, Serialize};

/// Side of one board cell in flat-view pixels
pub const CELL_SIZE: f32 = 15.0;
/// Screen position of grid cell (0, 0) in the flat view
pub const BOARD_ORIGIN: Point = Point::new(100.0, 75.0);
/// Board extent in cells
pub const BOARD_COLS: u32 = 40;
pub const BOARD_ROWS: u32 = 30;

/// A point in 2D space, either on the logical grid or on screen.
/// Serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn as_tuple(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for [f32; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// RGBA color. Serialized as `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const RED: Color = Color::rgba(255, 0, 0, 255);
    pub const GREEN: Color = Color::rgba(0, 255, 0, 255);
    pub const BLUE: Color = Color::rgba(0, 0, 255, 255);
    /// Default plate color before the player paints it
    pub const GRAY: Color = Color::rgba(128, 128, 128, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const GRID: Color = Color::rgba(200, 200, 200, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl From<Color> for [u8; 4] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// Map a logical grid position to flat-view screen coordinates
pub fn board_to_screen(p: Point) -> Point {
    Point::new(
        p.x * CELL_SIZE + BOARD_ORIGIN.x,
        p.y * CELL_SIZE + BOARD_ORIGIN.y,
    )
}

/// Map a flat-view screen position back to (fractional) grid coordinates
pub fn screen_to_board(x: f32, y: f32) -> Point {
    Point::new(
        (x - BOARD_ORIGIN.x) / CELL_SIZE,
        (y - BOARD_ORIGIN.y) / CELL_SIZE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_screen_roundtrip() {
        let p = Point::new(3.0, 7.0);
        let s = board_to_screen(p);
        assert_eq!(s, Point::new(145.0, 180.0));
        assert_eq!(screen_to_board(s.x, s.y), p);
    }

    #[test]
    fn test_point_and_color_serialize_as_arrays() {
        let json = serde_json::to_string(&Point::new(1.5, -2.0)).unwrap();
        assert_eq!(json, "[1.5,-2.0]");
        let color: Color = serde_json::from_str("[1, 2, 3, 4]").unwrap();
        assert_eq!(color, Color::rgba(1, 2, 3, 4));
    }
}
