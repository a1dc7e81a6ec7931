use super::{Plate, PlateId};

/// Owns every plate of the current level. List order is draw order: the last
/// plate is drawn on top and wins hit-tests.
#[derive(Debug, Clone, Default)]
pub struct Board {
    plates: Vec<Plate>,
    next_id: u32,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plate on top of the stack and return its new id
    pub fn add_plate(&mut self, mut plate: Plate) -> PlateId {
        let id = PlateId(self.next_id);
        self.next_id += 1;
        plate.id = id;
        self.plates.push(plate);
        id
    }

    /// Remove every plate (level change)
    pub fn clear(&mut self) {
        self.plates.clear();
    }

    /// Plates in draw order, bottom first
    pub fn plates(&self) -> &[Plate] {
        &self.plates
    }

    pub fn len(&self) -> usize {
        self.plates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plates.is_empty()
    }

    pub fn plate(&self, id: PlateId) -> Option<&Plate> {
        self.plates.iter().find(|p| p.id == id)
    }

    pub fn plate_mut(&mut self, id: PlateId) -> Option<&mut Plate> {
        self.plates.iter_mut().find(|p| p.id == id)
    }

    /// Top-most plate whose handle contains the flat-view point
    pub fn topmost_at(&self, x: f32, y: f32) -> Option<&Plate> {
        self.plates.iter().rev().find(|p| p.handle_contains(x, y))
    }

    /// Move a plate to the top of the draw order. Returns false if it is not on this board.
    pub fn bring_to_top(&mut self, id: PlateId) -> bool {
        let Some(index) = self.plates.iter().position(|p| p.id == id) else {
            return false;
        };
        let plate = self.plates.remove(index);
        self.plates.push(plate);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Point, Shape};

    fn plate_at(x: f32, y: f32) -> Plate {
        Plate::new(Shape::circle(1.0), Point::new(x, y), Color::GRAY)
    }

    #[test]
    fn test_add_assigns_distinct_ids() {
        let mut board = Board::new();
        let a = board.add_plate(plate_at(0.0, 0.0));
        let b = board.add_plate(plate_at(0.0, 0.0));
        assert_ne!(a, b);
        assert_eq!(board.len(), 2);
        assert_eq!(board.plate(b).map(Plate::id), Some(b));
    }

    #[test]
    fn test_topmost_prefers_last_plate() {
        let mut board = Board::new();
        let bottom = board.add_plate(plate_at(2.0, 2.0));
        let top = board.add_plate(plate_at(2.0, 2.0));
        // handle anchor of (2, 2) is (130, 105)
        assert_eq!(board.topmost_at(130.0, 105.0).map(Plate::id), Some(top));

        assert!(board.bring_to_top(bottom));
        assert_eq!(board.topmost_at(130.0, 105.0).map(Plate::id), Some(bottom));
        assert_eq!(board.plates()[0].id(), top);
    }

    #[test]
    fn test_topmost_ignores_shape_body() {
        let mut board = Board::new();
        board.add_plate(plate_at(2.0, 2.0));
        // inside the circle but outside the handle
        assert!(board.topmost_at(140.0, 105.0).is_none());
    }

    #[test]
    fn test_identity_survives_mutation() {
        let mut board = Board::new();
        let a = board.add_plate(plate_at(1.0, 1.0));
        board.add_plate(plate_at(1.0, 1.0));
        if let Some(p) = board.plate_mut(a) {
            p.color = Color::RED;
        }
        assert!(board.bring_to_top(a));
        assert_eq!(board.plates()[1].color, Color::RED);
        assert_eq!(board.plates()[1].id(), a);
    }

    #[test]
    fn test_bring_to_top_unknown_plate() {
        let mut board = Board::new();
        board.add_plate(plate_at(0.0, 0.0));
        board.clear();
        assert!(board.is_empty());
        assert!(!board.bring_to_top(PlateId(0)));
    }
}
