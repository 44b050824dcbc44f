use std::ops::{Add, AddAssign};

/// Value returned by [`Rgba::channel`] for an invalid channel index.
pub const CHANNEL_SENTINEL: f32 = -1.0;

/// Floating point RGBA pixel.
///
/// Channels are nominally in `[0, 1]` but are never clamped before export.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Rgba {
    /// Opaque black; the value of a cleared pixel.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Opaque red; the default paint of lines and triangles.
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);

    /// Pixel from all four channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque pixel.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Channel by index (`0..=3` for r, g, b, a).
    ///
    /// Any other index is reported and yields [`CHANNEL_SENTINEL`].
    pub fn channel(&self, i: usize) -> f32 {
        match i {
            0 => self.r,
            1 => self.g,
            2 => self.b,
            3 => self.a,
            _ => {
                tracing::warn!(i, "can not retrieve pixel channel");
                CHANNEL_SENTINEL
            }
        }
    }

    /// Mutable channel by index, `None` outside `0..=3`.
    pub fn channel_mut(&mut self, i: usize) -> Option<&mut f32> {
        match i {
            0 => Some(&mut self.r),
            1 => Some(&mut self.g),
            2 => Some(&mut self.b),
            3 => Some(&mut self.a),
            _ => None,
        }
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Channel-wise color sum. The result is opaque, matching how composited
/// pixels are stored.
impl Add for Rgba {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::rgb(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Rgba {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/pixel.rs"]
mod tests;
