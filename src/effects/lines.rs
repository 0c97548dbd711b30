use rand::{Rng, RngCore};

use super::Effect;
use crate::grid::{Grid, Point};
use crate::raster;

const LINE_INTERVAL: u32 = 15;

/// Flickers a random line across the grid every quarter cycle.
#[derive(Debug, Default)]
pub struct LinesEffect {
    last: Option<(Point, Point)>,
}

impl LinesEffect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Endpoints of the most recently drawn line.
    pub fn last_line(&self) -> Option<(Point, Point)> {
        self.last
    }
}

fn random_point(grid: &Grid, rng: &mut dyn RngCore) -> Point {
    Point::new(
        rng.gen_range(0..grid.cols() as i32),
        rng.gen_range(0..grid.rows() as i32),
    )
}

impl Effect for LinesEffect {
    fn name(&self) -> &'static str {
        "lines"
    }

    fn update(&mut self, frame: u32, grid: &mut Grid, rng: &mut dyn RngCore) {
        if frame % LINE_INTERVAL != 0 {
            return;
        }
        let p1 = random_point(grid, rng);
        let p2 = random_point(grid, rng);
        log::trace!("lines: ({}, {}) -> ({}, {})", p1.x, p1.y, p2.x, p2.y);
        raster::line(grid, p1, p2);
        self.last = Some((p1, p2));
    }
}
