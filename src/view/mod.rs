//! Whole-frame rendering for each view mode

mod flat;
mod iso;

pub use flat::render_flat;
pub use iso::{render_isometric, LIGHT_COLOR, LIGHT_SOURCE};
