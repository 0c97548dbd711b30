//! Per-screen animation drivers. Each driver keeps its own state and, once
//! per frame, XORs its shapes into the shared grid.

mod clock;
mod dvd;
mod lines;

pub use clock::ClockEffect;
pub use dvd::DvdEffect;
pub use lines::LinesEffect;

use rand::RngCore;

use crate::grid::Grid;

/// Frames per cycle of the frame counter.
pub const FRAME_CYCLE: u32 = 60;

pub trait Effect {
    fn name(&self) -> &'static str;

    /// Advances the effect by one frame. `frame` is the cyclic counter in
    /// `0..FRAME_CYCLE`.
    fn update(&mut self, frame: u32, grid: &mut Grid, rng: &mut dyn RngCore);
}
