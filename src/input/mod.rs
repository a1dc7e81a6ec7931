mod play;

pub use play::{Interaction, ViewMode};

use crate::board::Color;

/// A clickable swatch on the flat view that arms a paint color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorButton {
    pub color: Color,
    pub x: i32,
    pub y: i32,
    pub size: u32,
}

impl ColorButton {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.size as i32 && y >= self.y && y < self.y + self.size as i32
    }
}

pub const PALETTE: [ColorButton; 3] = [
    ColorButton {
        color: Color::RED,
        x: 720,
        y: 150,
        size: 50,
    },
    ColorButton {
        color: Color::GREEN,
        x: 720,
        y: 250,
        size: 50,
    },
    ColorButton {
        color: Color::BLUE,
        x: 720,
        y: 350,
        size: 50,
    },
];
