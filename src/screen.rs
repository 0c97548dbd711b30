//! Menu navigation and screen selection.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MenuError {
    #[error("Menu grid must have at least one row and one column, got {cols}x{rows}")]
    EmptyGrid { cols: usize, rows: usize },
    #[error("{tiles} tiles do not fit a {cols}x{rows} menu")]
    TooManyTiles {
        tiles: usize,
        cols: usize,
        rows: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Menu,
    Lines,
    Clock,
    Dvd,
}

/// Keys the host reports once per press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKey {
    Confirm,
    Left,
    Up,
    Right,
    Down,
    Escape,
    Pause,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuTile {
    pub label: String,
    pub target: Screen,
}

impl MenuTile {
    pub fn new(label: &str, target: Screen) -> Self {
        Self {
            label: label.to_string(),
            target,
        }
    }

    pub fn placeholder() -> Self {
        Self::new("placeholder", Screen::Menu)
    }
}

/// Layout constants for the menu, in pixels where applicable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub rows: usize,
    pub cols: usize,
    pub spacing: u32,
    pub title_bar_height: u32,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            rows: 2,
            cols: 3,
            spacing: 40,
            title_bar_height: 40,
        }
    }
}

/// Pixel rectangle of a menu tile outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Menu tiles plus the highlighted selection. Every `(x, y)` inside the
/// tile grid maps to exactly one tile.
#[derive(Debug, Clone)]
pub struct MenuState {
    config: MenuConfig,
    tiles: Vec<MenuTile>, // row-major, rows * cols entries
    selected: (usize, usize),
}

impl MenuState {
    /// Missing trailing tiles are filled with placeholders.
    pub fn new(config: MenuConfig, mut tiles: Vec<MenuTile>) -> Result<Self, MenuError> {
        if config.rows == 0 || config.cols == 0 {
            return Err(MenuError::EmptyGrid {
                cols: config.cols,
                rows: config.rows,
            });
        }
        let slots = config.rows * config.cols;
        if tiles.len() > slots {
            return Err(MenuError::TooManyTiles {
                tiles: tiles.len(),
                cols: config.cols,
                rows: config.rows,
            });
        }
        tiles.resize_with(slots, MenuTile::placeholder);

        Ok(Self {
            config,
            tiles,
            selected: (0, 0),
        })
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn selected(&self) -> (usize, usize) {
        self.selected
    }

    pub fn selected_tile(&self) -> &MenuTile {
        self.tile(self.selected.0, self.selected.1)
    }

    pub fn tile(&self, x: usize, y: usize) -> &MenuTile {
        &self.tiles[y * self.config.cols + x]
    }

    /// Tiles in row-major order with their `(x, y)` position.
    pub fn tiles(&self) -> impl Iterator<Item = ((usize, usize), &MenuTile)> + '_ {
        let cols = self.config.cols;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, tile)| ((i % cols, i / cols), tile))
    }

    /// Moves the selection by one tile, wrapping around both axes.
    pub fn move_selection(&mut self, dx: i32, dy: i32) {
        let cols = self.config.cols as i32;
        let rows = self.config.rows as i32;
        let x = (self.selected.0 as i32 + dx).rem_euclid(cols);
        let y = (self.selected.1 as i32 + dy).rem_euclid(rows);
        self.selected = (x as usize, y as usize);
    }

    /// Outline of tile `(x, y)` for a window of the given size.
    pub fn tile_rect(&self, x: usize, y: usize, window_width: u32, window_height: u32) -> TileRect {
        let MenuConfig {
            rows,
            cols,
            spacing,
            title_bar_height,
        } = self.config;
        let spacing = spacing as f32;
        let width = (window_width as f32 - (cols + 1) as f32 * spacing) / cols as f32;
        let height = (window_height as f32 - title_bar_height as f32 - (rows + 1) as f32 * spacing)
            / rows as f32;

        TileRect {
            x: spacing * (x + 1) as f32 + width * x as f32,
            y: title_bar_height as f32 + spacing * (y + 1) as f32 + height * y as f32,
            width,
            height,
        }
    }
}

/// Screen state machine. Owns the menu and the pause flag shared by all
/// effect screens.
#[derive(Debug, Clone)]
pub struct ScreenController {
    screen: Screen,
    menu: MenuState,
    paused: bool,
}

impl ScreenController {
    pub fn new(menu: MenuState) -> Self {
        Self {
            screen: Screen::Menu,
            menu,
            paused: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn handle_key(&mut self, key: InputKey) {
        match self.screen {
            Screen::Menu => self.handle_menu_key(key),
            _ => match key {
                InputKey::Escape => {
                    log::debug!("Leaving {:?} for the menu", self.screen);
                    self.screen = Screen::Menu;
                }
                InputKey::Pause => {
                    self.paused = !self.paused;
                    log::debug!("Paused: {}", self.paused);
                }
                _ => {}
            },
        }
    }

    fn handle_menu_key(&mut self, key: InputKey) {
        match key {
            InputKey::Confirm => {
                let tile = self.menu.selected_tile();
                if tile.target != Screen::Menu {
                    log::debug!("Entering {:?} from tile {:?}", tile.target, tile.label);
                }
                self.screen = tile.target;
            }
            InputKey::Left => self.menu.move_selection(-1, 0),
            InputKey::Up => self.menu.move_selection(0, -1),
            InputKey::Right => self.menu.move_selection(1, 0),
            InputKey::Down => self.menu.move_selection(0, 1),
            InputKey::Escape | InputKey::Pause => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn default_tiles() -> Vec<MenuTile> {
        vec![
            MenuTile::new("lines", Screen::Lines),
            MenuTile::new("clock", Screen::Clock),
            MenuTile::new("dvd", Screen::Dvd),
        ]
    }

    fn controller() -> ScreenController {
        ScreenController::new(MenuState::new(MenuConfig::default(), default_tiles()).unwrap())
    }

    #[test]
    fn starts_on_menu_with_first_tile() {
        let controller = controller();
        assert_eq!(controller.screen(), Screen::Menu);
        assert_eq!(controller.menu().selected(), (0, 0));
        assert!(!controller.paused());
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut controller = controller();
        controller.handle_key(InputKey::Left);
        assert_eq!(controller.menu().selected(), (2, 0));
        controller.handle_key(InputKey::Up);
        assert_eq!(controller.menu().selected(), (2, 1));
        controller.handle_key(InputKey::Right);
        assert_eq!(controller.menu().selected(), (0, 1));
        controller.handle_key(InputKey::Down);
        assert_eq!(controller.menu().selected(), (0, 0));
    }

    #[test]
    fn confirm_enters_selected_screen() {
        let mut controller = controller();
        controller.handle_key(InputKey::Right);
        controller.handle_key(InputKey::Confirm);
        assert_eq!(controller.screen(), Screen::Clock);

        // arrows are ignored away from the menu
        controller.handle_key(InputKey::Right);
        assert_eq!(controller.menu().selected(), (1, 0));

        controller.handle_key(InputKey::Escape);
        assert_eq!(controller.screen(), Screen::Menu);
    }

    #[test]
    fn placeholder_tiles_stay_on_menu() {
        let mut controller = controller();
        controller.handle_key(InputKey::Down);
        controller.handle_key(InputKey::Confirm);
        assert_eq!(controller.screen(), Screen::Menu);
        assert_eq!(controller.menu().selected_tile().label, "placeholder");
    }

    #[test]
    fn pause_is_shared_and_ignored_on_menu() {
        let mut controller = controller();
        controller.handle_key(InputKey::Pause);
        assert!(!controller.paused());

        controller.handle_key(InputKey::Confirm);
        controller.handle_key(InputKey::Pause);
        assert!(controller.paused());

        controller.handle_key(InputKey::Escape);
        controller.handle_key(InputKey::Right);
        controller.handle_key(InputKey::Confirm);
        assert_eq!(controller.screen(), Screen::Clock);
        assert!(controller.paused());
        controller.handle_key(InputKey::Pause);
        assert!(!controller.paused());
    }

    #[test]
    fn menu_rejects_bad_layouts() {
        let empty = MenuConfig {
            rows: 0,
            ..MenuConfig::default()
        };
        assert_eq!(
            MenuState::new(empty, vec![]).unwrap_err(),
            MenuError::EmptyGrid { cols: 3, rows: 0 }
        );

        let tiny = MenuConfig {
            rows: 1,
            cols: 2,
            ..MenuConfig::default()
        };
        assert!(matches!(
            MenuState::new(tiny, default_tiles()),
            Err(MenuError::TooManyTiles { tiles: 3, .. })
        ));
    }

    #[test]
    fn tiles_are_padded_and_row_major() {
        let menu = MenuState::new(MenuConfig::default(), default_tiles()).unwrap();
        let labels: Vec<_> = menu.tiles().map(|(pos, t)| (pos, t.label.as_str())).collect();
        assert_eq!(labels.len(), 6);
        assert_eq!(labels[2], ((2, 0), "dvd"));
        assert_eq!(labels[3], ((0, 1), "placeholder"));
        assert_eq!(menu.tile(2, 1).target, Screen::Menu);
    }

    #[test]
    fn tile_rects_split_window_below_title_bar() {
        let menu = MenuState::new(MenuConfig::default(), default_tiles()).unwrap();
        // (800 - 4 * 40) / 3 and (600 - 40 - 3 * 40) / 2
        let first = menu.tile_rect(0, 0, 800, 600);
        assert_eq!(first, TileRect { x: 40.0, y: 80.0, width: 640.0 / 3.0, height: 220.0 });

        let last = menu.tile_rect(2, 1, 800, 600);
        assert!((last.x + last.width - 760.0).abs() < 1e-3);
        assert!((last.y + last.height - 560.0).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn selection_stays_in_bounds(
            rows in 1usize..5,
            cols in 1usize..5,
            keys in prop::collection::vec(0u8..4, 0..64),
        ) {
            let config = MenuConfig { rows, cols, ..MenuConfig::default() };
            let mut controller = ScreenController::new(MenuState::new(config, vec![]).unwrap());
            for key in keys {
                let key = match key {
                    0 => InputKey::Left,
                    1 => InputKey::Up,
                    2 => InputKey::Right,
                    _ => InputKey::Down,
                };
                controller.handle_key(key);
                let (x, y) = controller.menu().selected();
                prop_assert!(x < cols && y < rows);
            }
        }
    }
}
