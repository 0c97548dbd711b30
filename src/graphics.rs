use flickergrid::{Engine, Grid, MenuState, Screen};
use pixels::{Pixels, SurfaceTexture};
use winit::window::Window;

use crate::font::FontRenderer;

const BACKGROUND: [u8; 4] = [245, 245, 245, 255];
const INK: [u8; 4] = [0, 0, 0, 255];
const HIGHLIGHT: [u8; 4] = [190, 33, 55, 255];

const TEXT_SIZE: f32 = 20.0;
const SEPARATOR_THICKNESS: u32 = 3;
const OUTLINE_THICKNESS: u32 = 5;

pub struct GraphicsRenderer {
    pixels: Pixels,
    width: u32,
    height: u32,
    tile_size: u32,
    title: String,
    font: Option<FontRenderer>,
}

impl GraphicsRenderer {
    pub fn new(
        window: &Window,
        width: u32,
        height: u32,
        tile_size: u32,
        title: &str,
        font: Option<FontRenderer>,
    ) -> Result<Self, pixels::Error> {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, window);
        let pixels = Pixels::new(width, height, surface_texture)?;

        Ok(Self {
            pixels,
            width,
            height,
            tile_size,
            title: title.to_string(),
            font,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if let Err(err) = self.pixels.resize_surface(width, height) {
            log::error!("Failed to resize surface: {}", err);
        }
    }

    pub fn render(&mut self, engine: &Engine) {
        let width = self.width;
        let height = self.height;
        let frame = self.pixels.frame_mut();
        clear(frame, BACKGROUND);

        match engine.screen() {
            Screen::Menu => {
                render_menu(frame, width, height, &self.title, engine.menu(), self.font.as_ref())
            }
            _ => render_grid(frame, width, engine.grid(), self.tile_size),
        }
    }

    pub fn present(&mut self) -> Result<(), pixels::Error> {
        self.pixels.render()
    }
}

fn clear(frame: &mut [u8], color: [u8; 4]) {
    for pixel in frame.chunks_exact_mut(4) {
        pixel.copy_from_slice(&color);
    }
}

fn fill_rect(frame: &mut [u8], width: u32, x: u32, y: u32, w: u32, h: u32, color: [u8; 4]) {
    let height = (frame.len() / (width as usize * 4)) as u32;
    for py in y..(y + h).min(height) {
        for px in x..(x + w).min(width) {
            let index = ((py * width + px) * 4) as usize;
            frame[index..index + 4].copy_from_slice(&color);
        }
    }
}

fn outline_rect(frame: &mut [u8], width: u32, x: u32, y: u32, w: u32, h: u32, thickness: u32, color: [u8; 4]) {
    if w == 0 || h == 0 {
        return;
    }
    let t = thickness.min(w / 2).min(h / 2).max(1);
    fill_rect(frame, width, x, y, w, t, color);
    fill_rect(frame, width, x, y + h - t, w, t, color);
    fill_rect(frame, width, x, y, t, h, color);
    fill_rect(frame, width, x + w - t, y, t, h, color);
}

/// One filled tile per set cell.
fn render_grid(frame: &mut [u8], width: u32, grid: &Grid, tile_size: u32) {
    for cell in grid.set_cells() {
        fill_rect(
            frame,
            width,
            cell.x as u32 * tile_size,
            cell.y as u32 * tile_size,
            tile_size,
            tile_size,
            INK,
        );
    }
}

fn render_menu(
    frame: &mut [u8],
    width: u32,
    height: u32,
    title: &str,
    menu: &MenuState,
    font: Option<&FontRenderer>,
) {
    if let Some(font) = font {
        let title_x = width as f32 / 2.0 - font.measure(title, TEXT_SIZE) / 2.0;
        font.draw_text(frame, width, title, title_x, 10.0, TEXT_SIZE, rgb(INK));
    }

    let separator_y = menu.config().title_bar_height;
    fill_rect(frame, width, 0, separator_y, width, SEPARATOR_THICKNESS, INK);

    let selected = menu.selected();
    for (pos, tile) in menu.tiles() {
        let rect = menu.tile_rect(pos.0, pos.1, width, height);
        let color = if pos == selected { HIGHLIGHT } else { INK };
        outline_rect(
            frame,
            width,
            rect.x as u32,
            rect.y as u32,
            rect.width as u32,
            rect.height as u32,
            OUTLINE_THICKNESS,
            color,
        );

        if let Some(font) = font {
            let label_x = rect.x + rect.width / 2.0 - font.measure(&tile.label, TEXT_SIZE) / 2.0;
            let label_y = rect.y + rect.height / 2.0 - TEXT_SIZE / 2.0;
            font.draw_text(frame, width, &tile.label, label_x, label_y, TEXT_SIZE, rgb(INK));
        }
    }
}

fn rgb(color: [u8; 4]) -> [u8; 3] {
    [color[0], color[1], color[2]]
}
