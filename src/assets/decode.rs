use std::{io::Cursor, path::Path};

use anyhow::Context;
use image::{DynamicImage, ImageFormat};
use tiff::decoder::{Decoder, DecodingResult};

use crate::{
    foundation::error::{KeyrasterError, KeyrasterResult},
    raster::{grid::PixelGrid, pixel::Rgba},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Storage format of one image sample.
pub enum SampleFormat {
    /// Unsigned integer with the given bit depth.
    Unsigned(u32),
    /// Signed integer with the given bit depth.
    Signed(u32),
    /// IEEE float, already normalized.
    Float,
}

impl SampleFormat {
    /// Map a raw sample into the `[0, 1]` channel range.
    ///
    /// Integers are divided by `2^bits - 1`; floats pass through unchanged.
    pub fn normalize(self, raw: f64) -> f32 {
        match self {
            Self::Unsigned(bits) | Self::Signed(bits) => {
                let max = 2f64.powi(bits as i32) - 1.0;
                (raw / max) as f32
            }
            Self::Float => raw as f32,
        }
    }
}

/// Decode encoded image bytes into a [`PixelGrid`].
///
/// TIFF input keeps its native sample type (8/16/32-bit unsigned or signed
/// integers, 32-bit float); other formats go through the `image` decoders.
/// Sample `i` of each pixel lands in channel `i`, so gray images fill red only.
/// Missing alpha stays `1`.
pub fn decode_image(bytes: &[u8]) -> KeyrasterResult<PixelGrid> {
    if image::guess_format(bytes).ok() == Some(ImageFormat::Tiff) {
        return decode_tiff(bytes);
    }

    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let (width, height) = (dyn_img.width(), dyn_img.height());
    check_dimensions(width, height)?;

    let u8_fmt = SampleFormat::Unsigned(8);
    let u16_fmt = SampleFormat::Unsigned(16);
    let pixels = match &dyn_img {
        DynamicImage::ImageLuma8(img) => to_pixels(img.as_raw(), 1, u8_fmt),
        DynamicImage::ImageLumaA8(img) => to_pixels(img.as_raw(), 2, u8_fmt),
        DynamicImage::ImageRgb8(img) => to_pixels(img.as_raw(), 3, u8_fmt),
        DynamicImage::ImageRgba8(img) => to_pixels(img.as_raw(), 4, u8_fmt),
        DynamicImage::ImageLuma16(img) => to_pixels(img.as_raw(), 1, u16_fmt),
        DynamicImage::ImageLumaA16(img) => to_pixels(img.as_raw(), 2, u16_fmt),
        DynamicImage::ImageRgb16(img) => to_pixels(img.as_raw(), 3, u16_fmt),
        DynamicImage::ImageRgba16(img) => to_pixels(img.as_raw(), 4, u16_fmt),
        DynamicImage::ImageRgb32F(img) => to_pixels(img.as_raw(), 3, SampleFormat::Float),
        DynamicImage::ImageRgba32F(img) => to_pixels(img.as_raw(), 4, SampleFormat::Float),
        other => {
            return Err(KeyrasterError::validation(format!(
                "unsupported sample layout {:?}",
                other.color()
            )));
        }
    };

    PixelGrid::from_pixels(width, height, pixels)
}

fn decode_tiff(bytes: &[u8]) -> KeyrasterResult<PixelGrid> {
    let mut decoder = Decoder::new(Cursor::new(bytes)).context("open tiff")?;
    let (width, height) = decoder.dimensions().context("read tiff dimensions")?;
    check_dimensions(width, height)?;
    let data = decoder.read_image().context("decode tiff")?;

    let area = width as usize * height as usize;
    let channels = match &data {
        DecodingResult::U8(v) => v.len(),
        DecodingResult::U16(v) => v.len(),
        DecodingResult::U32(v) => v.len(),
        DecodingResult::I8(v) => v.len(),
        DecodingResult::I16(v) => v.len(),
        DecodingResult::I32(v) => v.len(),
        DecodingResult::F32(v) => v.len(),
        _ => 0,
    } / area;
    if !(1..=4).contains(&channels) {
        return Err(KeyrasterError::validation(format!(
            "unsupported tiff layout {:?}",
            decoder.colortype().ok()
        )));
    }

    let pixels = match &data {
        DecodingResult::U8(v) => to_pixels(v, channels, SampleFormat::Unsigned(8)),
        DecodingResult::U16(v) => to_pixels(v, channels, SampleFormat::Unsigned(16)),
        DecodingResult::U32(v) => to_pixels(v, channels, SampleFormat::Unsigned(32)),
        DecodingResult::I8(v) => to_pixels(v, channels, SampleFormat::Signed(8)),
        DecodingResult::I16(v) => to_pixels(v, channels, SampleFormat::Signed(16)),
        DecodingResult::I32(v) => to_pixels(v, channels, SampleFormat::Signed(32)),
        DecodingResult::F32(v) => to_pixels(v, channels, SampleFormat::Float),
        _ => Vec::new(),
    };
    PixelGrid::from_pixels(width, height, pixels)
}

fn check_dimensions(width: u32, height: u32) -> KeyrasterResult<()> {
    if width == 0 || height == 0 {
        return Err(KeyrasterError::validation(format!(
            "image has zero dimensions ({width}x{height})"
        )));
    }
    Ok(())
}

/// Read and decode the image file at `path`.
pub fn load_image(path: impl AsRef<Path>) -> KeyrasterResult<PixelGrid> {
    let path = path.as_ref();
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
}

fn to_pixels<T>(samples: &[T], channels: usize, format: SampleFormat) -> Vec<Rgba>
where
    T: Copy + Into<f64>,
{
    samples
        .chunks_exact(channels)
        .map(|px| {
            let mut out = Rgba::new(0.0, 0.0, 0.0, 1.0);
            for (i, s) in px.iter().enumerate() {
                if let Some(c) = out.channel_mut(i) {
                    *c = format.normalize((*s).into());
                }
            }
            out
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
