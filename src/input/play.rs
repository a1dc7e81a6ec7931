use super::PALETTE;
use crate::board::{screen_to_board, Board, Color, PlateId, Point};
use crate::display::{InputEvent, Key, MouseButtonKind};
use crate::level::Level;

/// Which view is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Orthogonal board with handles and the color palette
    Flat,
    /// Composited isometric and light views
    Isometric,
}

/// State machine for the player's mouse interaction
#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    /// A palette color was clicked; the next plate clicked gets painted
    ColorArmed { color: Color },
    /// Moving a plate by its handle
    Dragging { plate: PlateId },
}

/// Turns input events into board edits between frames
#[derive(Debug)]
pub struct Interaction {
    state: State,
    view: ViewMode,
    quit: bool,
    solved_reported: bool,
}

impl Interaction {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            view: ViewMode::Flat,
            quit: false,
            solved_reported: false,
        }
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Color waiting to be applied, if any
    pub fn armed_color(&self) -> Option<Color> {
        match self.state {
            State::ColorArmed { color } => Some(color),
            _ => None,
        }
    }

    /// Plate currently being dragged, if any
    pub fn dragging(&self) -> Option<PlateId> {
        match self.state {
            State::Dragging { plate } => Some(plate),
            _ => None,
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent, board: &mut Board) {
        match event {
            InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => self.quit = true,
            InputEvent::KeyDown(Key::Space) => self.toggle_view(board),
            InputEvent::MouseDown { x, y, button } if self.view == ViewMode::Flat => match button {
                MouseButtonKind::Left => self.on_left_click(*x, *y, board),
                MouseButtonKind::Right => self.on_right_click(),
                MouseButtonKind::Middle => {},
            },
            InputEvent::MouseMove { x, y } => {
                if let State::Dragging { plate } = self.state {
                    if let Some(p) = board.plate_mut(plate) {
                        p.location = screen_to_board(*x as f32, *y as f32);
                    }
                }
            },
            InputEvent::MouseUp {
                x,
                y,
                button: MouseButtonKind::Left,
            } => {
                if let State::Dragging { plate } = self.state {
                    Self::drop_plate(plate, screen_to_board(*x as f32, *y as f32), board);
                    self.state = State::Idle;
                }
            },
            _ => {},
        }
    }

    fn toggle_view(&mut self, board: &mut Board) {
        // Finish any drag so the plate never stays at a fractional cell
        if let State::Dragging { plate } = self.state {
            if let Some(location) = board.plate(plate).map(|p| p.location) {
                Self::drop_plate(plate, location, board);
            }
            self.state = State::Idle;
        }
        self.view = match self.view {
            ViewMode::Flat => ViewMode::Isometric,
            ViewMode::Isometric => ViewMode::Flat,
        };
        self.solved_reported = false;
        tracing::debug!(view = ?self.view, "view toggled");
    }

    fn on_left_click(&mut self, x: i32, y: i32, board: &mut Board) {
        if let Some(button) = PALETTE.iter().find(|b| b.contains(x, y)) {
            self.state = State::ColorArmed {
                color: button.color,
            };
            return;
        }

        let Some(id) = board.topmost_at(x as f32, y as f32).map(|p| p.id()) else {
            return;
        };

        match self.state {
            State::ColorArmed { color } => {
                if let Some(plate) = board.plate_mut(id) {
                    plate.color = color;
                }
                self.state = State::Idle;
            },
            State::Idle | State::Dragging { .. } => {
                board.bring_to_top(id);
                self.state = State::Dragging { plate: id };
            },
        }
    }

    fn on_right_click(&mut self) {
        if let State::ColorArmed { .. } = self.state {
            self.state = State::Idle;
        }
    }

    /// Snap a released plate to the nearest grid cell
    fn drop_plate(id: PlateId, at: Point, board: &mut Board) {
        if let Some(plate) = board.plate_mut(id) {
            plate.location = Point::new(at.x.round(), at.y.round());
            tracing::debug!(x = plate.location.x, y = plate.location.y, "plate dropped");
        }
    }

    /// True once per visit to the isometric view when the board matches the answer
    pub fn check_solved(&mut self, level: &Level, board: &Board) -> bool {
        if self.view != ViewMode::Isometric || self.solved_reported {
            return false;
        }
        if level.is_solved(board) {
            self.solved_reported = true;
            tracing::info!(level = level.id, name = %level.name, "puzzle solved");
            return true;
        }
        false
    }
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new()
    }
}
