//! Level definitions and answer keys.
//!
//! Levels are JSON. The built-in pack is embedded at compile time; packs can
//! also be read from disk. Every level is validated when it is loaded, so a
//! malformed plate never reaches the renderer.

use crate::board::{Board, Color, Plate, Point, Shape};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const BUILTIN_LEVELS: &str = include_str!("../levels/levels.json");

/// A plate as placed when the level starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateDef {
    pub shape: Shape,
    pub location: Point,
    #[serde(default = "default_plate_color")]
    pub color: Color,
}

fn default_plate_color() -> Color {
    Color::GRAY
}

/// One plate of the solution, positioned relative to the reference plate
/// (the plate matching the first entry of the answer key)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerEntry {
    pub offset: Point,
    pub color: Color,
    pub shape: Shape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: u32,
    pub name: String,
    pub plates: Vec<PlateDef>,
    pub answer: Vec<AnswerEntry>,
}

#[derive(Debug, Deserialize)]
struct LevelPack {
    levels: Vec<Level>,
}

impl Level {
    /// Parse and validate a single level
    pub fn from_json(json: &str) -> Result<Self> {
        let level: Level = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Look up a level from the embedded pack
    pub fn builtin(id: u32) -> Result<Self> {
        find(parse_pack(BUILTIN_LEVELS)?, id)
    }

    /// Look up a level from a pack file on disk
    pub fn from_pack_file(path: impl AsRef<Path>, id: u32) -> Result<Self> {
        find(load_pack(path)?, id)
    }

    /// Reject shapes the renderer could not draw faithfully
    pub fn validate(&self) -> Result<()> {
        if self.plates.is_empty() {
            return Err(self.invalid("level has no plates"));
        }
        if self.answer.is_empty() {
            return Err(self.invalid("answer key is empty"));
        }
        for (plate, def) in self.plates.iter().enumerate() {
            def.shape.validate().map_err(|reason| Error::InvalidShape {
                level: self.id,
                plate,
                reason,
            })?;
        }
        for (i, entry) in self.answer.iter().enumerate() {
            entry
                .shape
                .validate()
                .map_err(|reason| self.invalid(format!("answer entry {i}: {reason}")))?;
        }
        Ok(())
    }

    fn invalid(&self, reason: impl Into<String>) -> Error {
        Error::InvalidLevel {
            level: self.id,
            reason: reason.into(),
        }
    }

    /// Replace the board contents with this level's starting plates
    pub fn load(&self, board: &mut Board) {
        board.clear();
        for def in &self.plates {
            board.add_plate(Plate::new(def.shape.clone(), def.location, def.color));
        }
        tracing::info!(
            level = self.id,
            name = %self.name,
            plates = self.plates.len(),
            "level loaded"
        );
    }

    /// Whether the board matches the answer key.
    ///
    /// Positions are compared relative to the reference plate, so the whole
    /// arrangement may sit anywhere on the grid.
    pub fn is_solved(&self, board: &Board) -> bool {
        let Some(first) = self.answer.first() else {
            return false;
        };
        let Some(reference) = board.plates().iter().find(|p| p.shape == first.shape) else {
            return false;
        };
        let origin = reference.location;

        board.plates().iter().all(|plate| {
            let rel = Point::new(plate.location.x - origin.x, plate.location.y - origin.y);
            self.answer.iter().any(|entry| {
                entry.shape == plate.shape && entry.color == plate.color && entry.offset == rel
            })
        })
    }
}

/// Parse every level of a pack, validating each and rejecting duplicate ids
pub fn parse_pack(json: &str) -> Result<Vec<Level>> {
    let pack: LevelPack = serde_json::from_str(json)?;
    for (i, level) in pack.levels.iter().enumerate() {
        level.validate()?;
        if pack.levels[..i].iter().any(|l| l.id == level.id) {
            return Err(level.invalid("duplicate level id"));
        }
    }
    tracing::debug!(levels = pack.levels.len(), "level pack parsed");
    Ok(pack.levels)
}

/// Read and parse a pack file
pub fn load_pack(path: impl AsRef<Path>) -> Result<Vec<Level>> {
    let json = fs::read_to_string(path)?;
    parse_pack(&json)
}

/// Every built-in level, in pack order
pub fn builtin_levels() -> Result<Vec<Level>> {
    parse_pack(BUILTIN_LEVELS)
}

fn find(levels: Vec<Level>, id: u32) -> Result<Level> {
    levels
        .into_iter()
        .find(|l| l.id == id)
        .ok_or(Error::UnknownLevel(id))
}
