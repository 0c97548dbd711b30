//! Grid-effects engine: a toggle-only cell grid, invert-drawing primitives,
//! the animated effect screens and the menu that switches between them.
//!
//! The host (window, key polling, blitting) lives in the binary and talks to
//! the engine through [`Engine::frame`] and its read accessors.

pub mod config;
pub mod effects;
pub mod engine;
pub mod grid;
pub mod mask;
pub mod raster;
pub mod screen;

pub use config::{Config, ConfigError};
pub use engine::{Engine, EngineError};
pub use grid::{Grid, Point};
pub use mask::{Mask, MaskError};
pub use screen::{InputKey, MenuState, Screen};
