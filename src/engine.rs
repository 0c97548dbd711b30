use std::time::{SystemTime, UNIX_EPOCH};

use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;

use crate::config::Config;
use crate::effects::{ClockEffect, DvdEffect, Effect, LinesEffect, FRAME_CYCLE};
use crate::grid::Grid;
use crate::mask::{Mask, MaskError};
use crate::screen::{InputKey, MenuState, MenuTile, Screen, ScreenController};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to load mask: {0}")]
    Mask(#[from] MaskError),
    #[error("Invalid menu: {0}")]
    Menu(#[from] crate::screen::MenuError),
}

/// All per-process state advanced by [`Engine::frame`].
pub struct Engine {
    grid: Grid,
    controller: ScreenController,
    lines: LinesEffect,
    clock: ClockEffect,
    dvd: DvdEffect,
    rng: StdRng,
    frame_count: u32,
}

pub fn menu_tiles() -> Vec<MenuTile> {
    vec![
        MenuTile::new("lines", Screen::Lines),
        MenuTile::new("clock", Screen::Clock),
        MenuTile::new("dvd", Screen::Dvd),
    ]
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

impl Engine {
    /// Loads the mask named in `config` and seeds the grid.
    pub fn new(config: &Config) -> Result<Self, EngineError> {
        let mask = Mask::load(&config.mask_path, config.grid_cols(), config.grid_rows())?;
        let seed = config.seed.unwrap_or_else(wall_clock_seed);
        log::info!("Random seed: {}", seed);
        Self::with_mask(config, mask, StdRng::seed_from_u64(seed))
    }

    pub fn with_mask(config: &Config, mask: Mask, mut rng: StdRng) -> Result<Self, EngineError> {
        let cols = config.grid_cols();
        let rows = config.grid_rows();
        let menu = MenuState::new(config.menu, menu_tiles())?;

        let mut grid = Grid::new(cols, rows);
        grid.randomize(&mut rng);
        log::info!("Grid is {}x{} cells", cols, rows);

        Ok(Self {
            grid,
            controller: ScreenController::new(menu),
            lines: LinesEffect::new(),
            clock: ClockEffect::new(cols, rows),
            dvd: DvdEffect::new(mask, cols, rows),
            rng,
            frame_count: 0,
        })
    }

    /// Runs one frame: advance the counter, apply the keys pressed since the
    /// last frame in order, then let the active effect draw.
    pub fn frame(&mut self, keys: &[InputKey]) {
        self.frame_count = (self.frame_count + 1) % FRAME_CYCLE;

        for &key in keys {
            self.controller.handle_key(key);
        }

        if self.controller.paused() {
            return;
        }
        let effect: &mut dyn Effect = match self.controller.screen() {
            Screen::Menu => return,
            Screen::Lines => &mut self.lines,
            Screen::Clock => &mut self.clock,
            Screen::Dvd => &mut self.dvd,
        };
        effect.update(self.frame_count, &mut self.grid, &mut self.rng);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn screen(&self) -> Screen {
        self.controller.screen()
    }

    pub fn menu(&self) -> &MenuState {
        self.controller.menu()
    }

    pub fn paused(&self) -> bool {
        self.controller.paused()
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn dvd(&self) -> &DvdEffect {
        &self.dvd
    }
}
