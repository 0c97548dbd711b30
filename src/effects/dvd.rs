use rand::RngCore;

use super::Effect;
use crate::grid::{Grid, Point};
use crate::mask::Mask;
use crate::raster;

const MOVE_INTERVAL: u32 = 2;

/// Bounces a mask silhouette between the grid edges, one cell per move.
#[derive(Debug, Clone)]
pub struct DvdEffect {
    mask: Mask,
    origin: Point,
    direction: Point,
}

impl DvdEffect {
    /// Starts the mask in the middle of the grid, heading down and right.
    pub fn new(mask: Mask, cols: usize, rows: usize) -> Self {
        let origin = Point::new(
            (cols.saturating_sub(mask.width()) / 2) as i32,
            (rows.saturating_sub(mask.height()) / 2) as i32,
        );
        Self::with_origin(mask, origin, Point::new(1, 1))
    }

    /// `direction` components must be `1` or `-1`.
    pub fn with_origin(mask: Mask, origin: Point, direction: Point) -> Self {
        Self {
            mask,
            origin,
            direction,
        }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn direction(&self) -> Point {
        self.direction
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Flips direction on every edge the box touches, moves one cell, then
    /// stamps the mask at its new position.
    pub fn step(&mut self, grid: &mut Grid) {
        let cols = grid.cols() as i32;
        let rows = grid.rows() as i32;
        let width = self.mask.width() as i32;
        let height = self.mask.height() as i32;

        if self.origin.y == 0 {
            self.direction.y = 1;
        }
        if self.origin.x + width == cols {
            self.direction.x = -1;
        }
        if self.origin.y + height == rows {
            self.direction.y = -1;
        }
        if self.origin.x == 0 {
            self.direction.x = 1;
        }

        self.origin.x += self.direction.x;
        self.origin.y += self.direction.y;
        log::trace!("dvd: origin ({}, {})", self.origin.x, self.origin.y);
        raster::blit_mask(grid, self.origin, &self.mask);
    }
}

impl Effect for DvdEffect {
    fn name(&self) -> &'static str {
        "dvd"
    }

    fn update(&mut self, frame: u32, grid: &mut Grid, _rng: &mut dyn RngCore) {
        if frame % MOVE_INTERVAL == 0 {
            self.step(grid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn block(width: usize, height: usize) -> Mask {
        let row = vec![true; width];
        let rows: Vec<&[bool]> = (0..height).map(|_| row.as_slice()).collect();
        Mask::from_rows(&rows)
    }

    #[test]
    fn starts_centered() {
        let dvd = DvdEffect::new(block(4, 2), 20, 10);
        assert_eq!(dvd.origin(), Point::new(8, 4));
        assert_eq!(dvd.direction(), Point::new(1, 1));
    }

    #[test]
    fn bounces_off_bottom_right_corner() {
        let mut grid = Grid::new(10, 6);
        let mut dvd = DvdEffect::with_origin(block(3, 2), Point::new(7, 4), Point::new(1, 1));
        dvd.step(&mut grid);

        assert_eq!(dvd.direction(), Point::new(-1, -1));
        assert_eq!(dvd.origin(), Point::new(6, 3));
        assert_eq!(grid.count_set(), 6);
    }

    #[test]
    fn bounces_off_top_left_corner() {
        let mut grid = Grid::new(10, 6);
        let mut dvd = DvdEffect::with_origin(block(3, 2), Point::new(0, 0), Point::new(-1, -1));
        dvd.step(&mut grid);

        assert_eq!(dvd.direction(), Point::new(1, 1));
        assert_eq!(dvd.origin(), Point::new(1, 1));
    }

    #[test]
    fn moves_every_other_frame() {
        let mut grid = Grid::new(10, 6);
        let mut dvd = DvdEffect::with_origin(block(2, 2), Point::new(3, 2), Point::new(1, 1));
        let mut rng = rand::rngs::mock::StepRng::new(0, 1);

        dvd.update(1, &mut grid, &mut rng);
        assert_eq!(dvd.origin(), Point::new(3, 2));
        dvd.update(2, &mut grid, &mut rng);
        assert_eq!(dvd.origin(), Point::new(4, 3));
    }

    #[test]
    fn consecutive_stamps_overlay_by_xor() {
        let mut grid = Grid::new(10, 6);
        let mut dvd = DvdEffect::with_origin(block(2, 2), Point::new(3, 2), Point::new(1, 0));
        dvd.step(&mut grid);
        dvd.step(&mut grid);

        // stamps at x=4..6 and x=5..7 overlap on column 5
        assert!(grid.get(4, 2) && grid.get(6, 2));
        assert!(!grid.get(5, 2) && !grid.get(5, 3));
    }

    proptest! {
        #[test]
        fn box_stays_on_grid(
            width in 1usize..8,
            height in 1usize..6,
            ox in 0i32..32,
            oy in 0i32..24,
            dx in prop::sample::select(vec![-1, 1]),
            dy in prop::sample::select(vec![-1, 1]),
            steps in 1usize..300,
        ) {
            let cols = 20;
            let rows = 12;
            let max_x = (cols - width) as i32;
            let max_y = (rows - height) as i32;
            let origin = Point::new(ox % (max_x + 1), oy % (max_y + 1));

            let mut grid = Grid::new(cols, rows);
            let mut dvd = DvdEffect::with_origin(block(width, height), origin, Point::new(dx, dy));
            for _ in 0..steps {
                dvd.step(&mut grid);
                let o = dvd.origin();
                prop_assert!(o.x >= 0 && o.x <= max_x, "x = {}", o.x);
                prop_assert!(o.y >= 0 && o.y <= max_y, "y = {}", o.y);
            }
        }
    }
}
