use crate::{
    animation::ease::Ease,
    raster::{grid::PixelGrid, pixel::Rgba},
};

/// Side length used by the CLI when no resolution is given.
pub const DEFAULT_PREVIEW_RES: u32 = 250;

/// Plot `ease` on a `res x res` grid, one red sample per column.
///
/// Column `i` shows `x = i / (res - 1)`; `y = 0` is the bottom row. Samples
/// that overshoot the unit square are dropped.
pub fn preview_ease(ease: &Ease, res: u32) -> PixelGrid {
    let mut grid = PixelGrid::new(res, res);
    let last = f64::from(res.saturating_sub(1));
    for i in 0..res {
        let x = if last > 0.0 { f64::from(i) / last } else { 0.0 };
        let y = ease.apply(x);
        let row = (last - y * last) as i32;
        grid.paint_flipped(i as i32, last as i32 - row, Rgba::RED);
    }
    grid
}

#[cfg(test)]
#[path = "../../tests/unit/animation/preview.rs"]
mod tests;
