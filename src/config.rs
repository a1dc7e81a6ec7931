//! Runtime configuration, read from an optional JSON file and then
//! overridden by command line flags.

use crate::board::Point;
use crate::display::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::Result;
use crate::iso::Projection;
use crate::level::Level;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "luminara.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    /// Level shown at startup
    pub level: u32,
    /// Level pack to use instead of the built-in one
    pub levels_path: Option<PathBuf>,
    /// Main isometric view of the board
    pub board_view: Projection,
    /// Secondary light view, composited additively
    pub light_view: Projection,
    /// Where the light view is blitted on screen
    pub light_view_origin: Point,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            vsync: true,
            level: 6,
            levels_path: None,
            board_view: Projection::new(1.0, Point::new(160.0, 180.0)),
            light_view: Projection::new(1.8, Point::new(10.0, 80.0)),
            light_view_origin: Point::new(400.0, 0.0),
        }
    }
}

impl Config {
    /// Read a config file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        match fs::read_to_string(path.as_ref()) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Like `load`, but falls back to the defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            Self::default()
        })
    }

    /// Load the configured level from the configured pack
    pub fn load_level(&self, id: u32) -> Result<Level> {
        match &self.levels_path {
            Some(path) => Level::from_pack_file(path, id),
            None => Level::builtin(id),
        }
    }
}
