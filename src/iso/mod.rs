//! Isometric rendering core: grid→screen projection, plate resolution and
//! per-pixel compositing of overlapping plates.

mod composite;
mod projection;
mod resolve;

pub use composite::{composite, CompositeMode};
pub use projection::{project, Projection, SKEW_X, SKEW_Y, STRETCH_Y};
pub use resolve::{resolve, resolve_all, ScreenShape, ShapeKind, CIRCLE_RESOLUTION};
