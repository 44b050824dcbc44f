use crate::{
    foundation::error::{KeyrasterError, KeyrasterResult},
    raster::pixel::Rgba,
};

/// Fixed-size grid of [`Rgba`] pixels.
///
/// Storage is row-major with the origin at the top-left. Rendering code
/// addresses pixels with a bottom-left origin and goes through
/// [`PixelGrid::paint_flipped`].
#[derive(Clone, Debug, PartialEq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl PixelGrid {
    /// Grid of cleared (opaque black) pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::default())
    }

    /// Grid with every pixel set to `fill`.
    pub fn filled(width: u32, height: u32, fill: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    /// Wrap existing row-major pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba>) -> KeyrasterResult<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(KeyrasterError::validation(format!(
                "{} pixels do not fill a {width}x{height} grid",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Reset every pixel to opaque black.
    pub fn clear(&mut self) {
        self.fill(Rgba::default());
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = u32::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(y as usize * self.width as usize + x as usize)
    }

    fn index_or_report(&self, x: i32, y: i32) -> Option<usize> {
        let idx = self.index(x, y);
        if idx.is_none() {
            tracing::warn!(
                x,
                y,
                width = self.width,
                height = self.height,
                "pixel coordinate outside grid"
            );
        }
        idx
    }

    /// Pixel at storage coordinates; out-of-bounds access is reported and yields `None`.
    pub fn get(&self, x: i32, y: i32) -> Option<&Rgba> {
        self.index_or_report(x, y).map(|i| &self.pixels[i])
    }

    /// Mutable pixel at storage coordinates; out-of-bounds access is reported and yields `None`.
    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Rgba> {
        self.index_or_report(x, y).map(|i| &mut self.pixels[i])
    }

    /// Overwrite the pixel at storage coordinates.
    ///
    /// Returns `false` (after reporting) when the coordinate is outside the grid.
    pub fn set(&mut self, x: i32, y: i32, px: Rgba) -> bool {
        match self.get_mut(x, y) {
            Some(slot) => {
                *slot = px;
                true
            }
            None => false,
        }
    }

    /// Write a pixel addressed with a bottom-left origin.
    ///
    /// Coordinates outside the grid are dropped silently; lines and shapes
    /// routinely reach past the frame edge.
    pub fn paint_flipped(&mut self, x: i32, y: i32, px: Rgba) {
        let flipped = i64::from(self.height) - 1 - i64::from(y);
        let Ok(flipped) = i32::try_from(flipped) else {
            return;
        };
        if let Some(i) = self.index(x, flipped) {
            self.pixels[i] = px;
        }
    }

    /// Add `other` into this grid channel-wise (additive compositing).
    pub fn accumulate(&mut self, other: &Self) -> KeyrasterResult<()> {
        if self.dimensions() != other.dimensions() {
            return Err(KeyrasterError::render(format!(
                "can not accumulate a {}x{} grid into a {}x{} grid",
                other.width, other.height, self.width, self.height
            )));
        }
        for (dst, src) in self.pixels.iter_mut().zip(&other.pixels) {
            *dst += *src;
        }
        Ok(())
    }

    /// Row-major RGB8 bytes: each channel is scaled by 255, clamped to
    /// `[0, 255]` and truncated.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let quantize = |c: f32| (c * 255.0).clamp(0.0, 255.0) as u8;
        self.pixels
            .iter()
            .flat_map(|px| [quantize(px.r), quantize(px.g), quantize(px.b)])
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/grid.rs"]
mod tests;
