use rand::Rng;

/// Integer coordinate in grid space (cells, not pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Fixed-size boolean cell grid. Dimensions never change after construction
/// and the only mutation is [`Grid::toggle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<bool>>, // cells[y][x]
}

impl Grid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![false; cols]; rows],
        }
    }

    /// Builds a grid sized from window dimensions in pixels.
    pub fn for_window(window_width: u32, window_height: u32, tile_size: u32) -> Self {
        Self::new(
            (window_width / tile_size) as usize,
            (window_height / tile_size) as usize,
        )
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.rows
    }

    /// Seeds every cell with an independent fair coin flip.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                *cell = rng.gen_bool(0.5);
            }
        }
    }

    /// Inverts the cell at `(x, y)`.
    ///
    /// Out-of-bounds coordinates leave the grid untouched and return `false`.
    pub fn toggle(&mut self, x: i32, y: i32) -> bool {
        if !self.contains(x, y) {
            log::warn!(
                "Ignoring toggle outside the {}x{} grid at ({}, {})",
                self.cols,
                self.rows,
                x,
                y
            );
            return false;
        }
        let cell = &mut self.cells[y as usize][x as usize];
        *cell = !*cell;
        true
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        self.contains(x, y) && self.cells[y as usize][x as usize]
    }

    /// Row-major traversal of every set cell. Calling it again restarts from
    /// the first row.
    pub fn set_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, &set)| set)
                .map(move |(x, _)| Point::new(x as i32, y as i32))
        })
    }

    pub fn count_set(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|&&set| set).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn window_dimensions_are_divided_by_tile_size() {
        let grid = Grid::for_window(800, 600, 5);
        assert_eq!(grid.cols(), 160);
        assert_eq!(grid.rows(), 120);
        assert_eq!(grid.count_set(), 0);
    }

    #[test]
    fn toggle_outside_bounds_is_rejected() {
        let mut grid = Grid::new(4, 3);
        assert!(!grid.toggle(4, 0));
        assert!(!grid.toggle(0, 3));
        assert!(!grid.toggle(-1, 1));
        assert_eq!(grid.count_set(), 0);
    }

    #[test]
    fn set_cells_walks_row_major() {
        let mut grid = Grid::new(3, 3);
        grid.toggle(2, 0);
        grid.toggle(0, 1);
        grid.toggle(1, 2);
        grid.toggle(0, 0);

        let visited: Vec<Point> = grid.set_cells().collect();
        assert_eq!(
            visited,
            vec![
                Point::new(0, 0),
                Point::new(2, 0),
                Point::new(0, 1),
                Point::new(1, 2),
            ]
        );
        // restartable and side-effect free
        assert_eq!(grid.set_cells().count(), 4);
        assert_eq!(grid.count_set(), 4);
    }

    #[test]
    fn randomize_is_deterministic_for_a_seed() {
        let mut a = Grid::new(40, 30);
        let mut b = Grid::new(40, 30);
        a.randomize(&mut StdRng::seed_from_u64(7));
        b.randomize(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);

        // a fair coin over 1200 cells lands far from both extremes
        let set = a.count_set();
        assert!(set > 400 && set < 800, "set = {set}");
    }

    proptest! {
        #[test]
        fn toggle_twice_restores_cell(seed in any::<u64>(), x in 0i32..16, y in 0i32..9) {
            let mut grid = Grid::new(16, 9);
            grid.randomize(&mut StdRng::seed_from_u64(seed));
            let before = grid.clone();

            prop_assert!(grid.toggle(x, y));
            prop_assert_ne!(grid.get(x, y), before.get(x, y));
            prop_assert!(grid.toggle(x, y));
            prop_assert_eq!(grid, before);
        }
    }
}
