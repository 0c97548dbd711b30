//! Plain-text bitmap masks.
//!
//! Two encodings are accepted, both line oriented:
//!
//! * `P1` (plain PBM): a `<width> <height>` line followed by `height` rows of
//!   `width` `0`/`1` tokens. A `0` pixel is foreground.
//! * `P3` (plain PPM, the legacy RGB form): a `<width> <height>` line, a
//!   max-value line, then `height` rows of `width` `R G B` triplets. A pixel
//!   is foreground when all three channels are 255.
//!
//! Blank lines and `#` comment lines are skipped.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::grid::Point;

#[derive(Error, Debug)]
pub enum MaskError {
    #[error("Cannot read mask file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Unsupported magic number {0:?}, expected P1 or P3")]
    BadMagic(String),
    #[error("Line {line}: {message}")]
    Malformed { line: usize, message: String },
    #[error("Invalid mask dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("Mask {width}x{height} does not fit inside the {cols}x{rows} grid")]
    TooLarge {
        width: usize,
        height: usize,
        cols: usize,
        rows: usize,
    },
    #[error("Line {line}: color value {value} is not allowed")]
    BadColor { line: usize, value: String },
    #[error("Expected {expected} pixel rows, found {found}")]
    Truncated { expected: usize, found: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Pbm,
    Rgb,
}

/// Immutable rectangular bitmap. `true` marks a foreground pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    cells: Vec<bool>, // row-major
}

impl Mask {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    /// Offsets of all foreground pixels relative to the top-left corner.
    pub fn foreground(&self) -> impl Iterator<Item = Point> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &set)| set)
            .map(move |(i, _)| Point::new((i % width) as i32, (i / width) as i32))
    }

    /// Builds a mask directly from rows of pixels. Rows must share a length.
    pub fn from_rows(rows: &[&[bool]]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        assert!(
            rows.iter().all(|row| row.len() == width),
            "mask rows must have equal length"
        );
        Self {
            width,
            height,
            cells: rows.iter().flat_map(|row| row.iter().copied()).collect(),
        }
    }

    /// Reads and parses a mask that must fit inside a `cols` x `rows` grid.
    pub fn load<P: AsRef<Path>>(path: P, cols: usize, rows: usize) -> Result<Self, MaskError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MaskError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mask = Self::parse(&text, cols, rows)?;
        log::info!(
            "Loaded {}x{} mask from {}",
            mask.width,
            mask.height,
            path.display()
        );
        Ok(mask)
    }

    pub fn parse(text: &str, cols: usize, rows: usize) -> Result<Self, MaskError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        let encoding = match lines.next() {
            Some((_, "P1")) => Encoding::Pbm,
            Some((_, "P3")) => Encoding::Rgb,
            Some((_, other)) => return Err(MaskError::BadMagic(other.to_string())),
            None => return Err(MaskError::BadMagic(String::new())),
        };

        let (line_no, dims) = lines.next().ok_or(MaskError::Truncated {
            expected: 1,
            found: 0,
        })?;
        let (width, height) = parse_dimensions(line_no, dims)?;
        if width == 0 || height == 0 {
            return Err(MaskError::InvalidDimensions { width, height });
        }
        if width >= cols || height >= rows {
            return Err(MaskError::TooLarge {
                width,
                height,
                cols,
                rows,
            });
        }

        if encoding == Encoding::Rgb {
            let (line_no, max) = lines.next().ok_or(MaskError::Truncated {
                expected: height,
                found: 0,
            })?;
            parse_number(line_no, max)?;
        }

        let mut cells = Vec::with_capacity(width * height);
        let mut found = 0;
        for (line_no, line) in lines {
            if found == height {
                return Err(MaskError::Malformed {
                    line: line_no,
                    message: format!("unexpected data after {height} pixel rows"),
                });
            }
            match encoding {
                Encoding::Pbm => parse_pbm_row(line_no, line, width, &mut cells)?,
                Encoding::Rgb => parse_rgb_row(line_no, line, width, &mut cells)?,
            }
            found += 1;
        }
        if found < height {
            return Err(MaskError::Truncated {
                expected: height,
                found,
            });
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }
}

fn parse_number(line: usize, token: &str) -> Result<usize, MaskError> {
    token.parse::<usize>().map_err(|_| MaskError::Malformed {
        line,
        message: format!("{token:?} is not a number"),
    })
}

fn parse_dimensions(line: usize, text: &str) -> Result<(usize, usize), MaskError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    match tokens.as_slice() {
        [width, height] => Ok((parse_number(line, width)?, parse_number(line, height)?)),
        _ => Err(MaskError::Malformed {
            line,
            message: format!("expected \"<width> <height>\", got {text:?}"),
        }),
    }
}

fn check_row_len(line: usize, got: usize, expected: usize) -> Result<(), MaskError> {
    if got != expected {
        return Err(MaskError::Malformed {
            line,
            message: format!("expected {expected} values, found {got}"),
        });
    }
    Ok(())
}

fn parse_pbm_row(
    line: usize,
    text: &str,
    width: usize,
    cells: &mut Vec<bool>,
) -> Result<(), MaskError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    check_row_len(line, tokens.len(), width)?;
    for token in tokens {
        match token {
            "0" => cells.push(true),
            "1" => cells.push(false),
            other => {
                return Err(MaskError::BadColor {
                    line,
                    value: other.to_string(),
                })
            }
        }
    }
    Ok(())
}

fn parse_rgb_row(
    line: usize,
    text: &str,
    width: usize,
    cells: &mut Vec<bool>,
) -> Result<(), MaskError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    check_row_len(line, tokens.len(), width * 3)?;
    for pixel in tokens.chunks_exact(3) {
        let mut channels = [0usize; 3];
        for (channel, token) in channels.iter_mut().zip(pixel) {
            *channel = parse_number(line, token)?;
            if *channel > 255 {
                return Err(MaskError::BadColor {
                    line,
                    value: token.to_string(),
                });
            }
        }
        cells.push(channels == [255, 255, 255]);
    }
    Ok(())
}
