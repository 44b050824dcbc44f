use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::error::{KeyrasterError, KeyrasterResult},
    raster::grid::PixelGrid,
};

/// Quantize a grid into an 8-bit RGB image, dropping alpha.
pub fn encode_rgb8(grid: &PixelGrid) -> KeyrasterResult<image::RgbImage> {
    let (w, h) = grid.dimensions();
    image::RgbImage::from_raw(w, h, grid.to_rgb8())
        .ok_or_else(|| KeyrasterError::render(format!("can not encode {w}x{h} grid")))
}

/// Create the parent directory of `path` when it is missing.
pub fn ensure_parent_dir(path: &Path) -> KeyrasterResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Write `grid` as 8-bit RGB; the file format follows the extension of `path`.
pub fn write_image(grid: &PixelGrid, path: impl AsRef<Path>) -> KeyrasterResult<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    encode_rgb8(grid)?
        .save(path)
        .with_context(|| format!("write image '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/encode.rs"]
mod tests;
