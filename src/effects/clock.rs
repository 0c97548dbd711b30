use std::f64::consts::PI;

use rand::RngCore;

use super::Effect;
use crate::grid::{Grid, Point};
use crate::raster;

/// One minute-hand step, 6 degrees.
const HAND_STEP: f64 = PI / 30.0;
const BLINK_INTERVAL: u32 = 3;

/// A blinking clock face with a hand that sweeps one step per cycle.
#[derive(Debug, Clone)]
pub struct ClockEffect {
    radius: i32,
    hand_origin: Point,
    hand_dest: Point,
}

impl ClockEffect {
    /// Centers the clock on the grid with the hand pointing up.
    pub fn new(cols: usize, rows: usize) -> Self {
        let radius = (rows / 2 * 3 / 4) as i32;
        Self::with_hand(Point::new((cols / 2) as i32, (rows / 2) as i32), radius)
    }

    pub fn with_hand(origin: Point, radius: i32) -> Self {
        Self {
            radius,
            hand_origin: origin,
            hand_dest: Point::new(origin.x, origin.y - radius),
        }
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn hand(&self) -> (Point, Point) {
        (self.hand_origin, self.hand_dest)
    }

    /// Toggles the face ring. Two consecutive blinks cancel out.
    pub fn blink(&self, grid: &mut Grid) {
        raster::circle_outline(grid, self.hand_origin, self.radius);
    }

    /// Rotates the hand clockwise (screen coordinates) by one step and draws it.
    pub fn tick(&mut self, grid: &mut Grid) {
        let vx = f64::from(self.hand_dest.x - self.hand_origin.x);
        let vy = f64::from(self.hand_dest.y - self.hand_origin.y);
        let (sin, cos) = HAND_STEP.sin_cos();
        let rx = vx * cos - vy * sin;
        let ry = vx * sin + vy * cos;

        self.hand_dest = Point::new(
            (f64::from(self.hand_origin.x) + rx).round() as i32,
            (f64::from(self.hand_origin.y) + ry).round() as i32,
        );
        log::trace!("clock: hand now at ({}, {})", self.hand_dest.x, self.hand_dest.y);
        raster::line(grid, self.hand_origin, self.hand_dest);
    }
}

impl Effect for ClockEffect {
    fn name(&self) -> &'static str {
        "clock"
    }

    fn update(&mut self, frame: u32, grid: &mut Grid, _rng: &mut dyn RngCore) {
        if frame % BLINK_INTERVAL == 0 {
            self.blink(grid);
        }
        if frame == 0 {
            self.tick(grid);
        }
    }
}
