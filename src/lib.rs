//! Luminara: arrange colored plates on a grid so their isometric projection
//! matches a target silhouette.
//!
//! The interesting part is the software renderer in [`iso`]: plates are
//! projected with a fixed axonometric transform, rasterized one by one, and
//! composited per pixel either by averaging (paint) or by hue-preserving
//! additive saturation (light).

pub mod board;
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod iso;
pub mod level;
pub mod util;
pub mod view;

pub use error::{Error, Result};
