//! Invert-drawing primitives. Every routine toggles cells instead of setting
//! them, so drawing the same shape twice erases it again.

use crate::grid::{Grid, Point};
use crate::mask::Mask;

/// Toggles the cells strictly between `from` and `to` along a Bresenham walk
/// generalized to every octant.
///
/// Both endpoints are left alone, which means a zero-length or single-step
/// line toggles nothing.
pub fn line(grid: &mut Grid, from: Point, to: Point) {
    let mut dx = (to.x - from.x).abs();
    let mut dy = (to.y - from.y).abs();
    let s1 = (to.x - from.x).signum();
    let s2 = (to.y - from.y).signum();

    // Always advance the major axis by one per step.
    let swapped = dy > dx;
    if swapped {
        std::mem::swap(&mut dx, &mut dy);
    }

    let mut e = 2 * dy - dx;
    let (mut x, mut y) = (from.x, from.y);
    for _ in 1..dx {
        if e < 0 {
            if swapped {
                y += s2;
            } else {
                x += s1;
            }
            e += 2 * dy;
        } else {
            x += s1;
            y += s2;
            e += 2 * dy - 2 * dx;
        }
        grid.toggle(x, y);
    }
}

/// Toggles every cell whose rounded distance to `origin` equals `radius`.
// TODO: scan only the ring's bounding box instead of the whole grid once
// grids grow past a few hundred cells a side.
pub fn circle_outline(grid: &mut Grid, origin: Point, radius: i32) {
    for y in 0..grid.rows() as i32 {
        for x in 0..grid.cols() as i32 {
            let dx = f64::from(x - origin.x);
            let dy = f64::from(y - origin.y);
            if (dx * dx + dy * dy).sqrt().round() as i32 == radius {
                grid.toggle(x, y);
            }
        }
    }
}

/// Outlines the quad `p1 -> p2 -> p3 -> p4 -> p1`. Corners are never
/// toggled since [`line`] skips endpoints.
pub fn rectangle_from_quad(grid: &mut Grid, p1: Point, p2: Point, p3: Point, p4: Point) {
    line(grid, p1, p2);
    line(grid, p2, p3);
    line(grid, p3, p4);
    line(grid, p4, p1);
}

/// Toggles the grid under every foreground cell of `mask`, with the mask's
/// top-left corner at `origin`.
///
/// Returns `false` without touching the grid when the mask would not fit.
pub fn blit_mask(grid: &mut Grid, origin: Point, mask: &Mask) -> bool {
    let fits = origin.x >= 0
        && origin.y >= 0
        && origin.x as usize + mask.width() <= grid.cols()
        && origin.y as usize + mask.height() <= grid.rows();
    if !fits {
        log::warn!(
            "Mask {}x{} at ({}, {}) does not fit the {}x{} grid",
            mask.width(),
            mask.height(),
            origin.x,
            origin.y,
            grid.cols(),
            grid.rows()
        );
        return false;
    }

    for offset in mask.foreground() {
        grid.toggle(origin.x + offset.x, origin.y + offset.y);
    }
    true
}
