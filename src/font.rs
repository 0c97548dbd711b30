//! Text rendering for the menu using ab_glyph.

use std::path::{Path, PathBuf};

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("Cannot read font {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a usable font")]
    Invalid { path: String },
}

// Tried in order when no font is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

pub struct FontRenderer {
    font: FontVec,
}

impl FontRenderer {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, FontError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let font = FontVec::try_from_vec(data).map_err(|_| FontError::Invalid {
            path: path.display().to_string(),
        })?;
        Ok(Self { font })
    }

    /// Loads the configured font, or the first system font that works.
    /// Returns `None` when nothing loads; menu labels are then skipped.
    pub fn find(configured: Option<&Path>) -> Option<Self> {
        let candidates: Vec<PathBuf> = match configured {
            Some(path) => vec![path.to_path_buf()],
            None => SYSTEM_FONTS.iter().map(PathBuf::from).collect(),
        };
        for path in &candidates {
            match Self::load(path) {
                Ok(font) => {
                    log::info!("Using font {}", path.display());
                    return Some(font);
                }
                Err(err) => log::debug!("{}", err),
            }
        }
        log::warn!("No usable font found, menu labels are disabled");
        None
    }

    /// Advance width of `text` in pixels.
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(size));
        text.chars()
            .map(|ch| scaled.h_advance(self.font.glyph_id(ch)))
            .sum()
    }

    /// Draws `text` with its top-left corner at `(x, y)` into an RGBA frame.
    pub fn draw_text(
        &self,
        frame: &mut [u8],
        frame_width: u32,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: [u8; 3],
    ) {
        let frame_height = (frame.len() / (frame_width as usize * 4)) as i32;
        let scaled = self.font.as_scaled(PxScale::from(size));
        let mut caret = x;

        for ch in text.chars() {
            let mut glyph = scaled.scaled_glyph(ch);
            glyph.position = point(caret, y + scaled.ascent());
            caret += scaled.h_advance(glyph.id);

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i32 + gx as i32;
                let py = bounds.min.y as i32 + gy as i32;
                if px < 0 || py < 0 || px >= frame_width as i32 || py >= frame_height {
                    return;
                }
                let idx = (py as usize * frame_width as usize + px as usize) * 4;
                let alpha = coverage.clamp(0.0, 1.0);
                for (channel, &target) in frame[idx..idx + 3].iter_mut().zip(&color) {
                    *channel = (*channel as f32 * (1.0 - alpha) + target as f32 * alpha) as u8;
                }
                frame[idx + 3] = 255;
            });
        }
    }
}
