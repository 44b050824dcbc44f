use std::io::Cursor;

use tiff::encoder::{TiffEncoder, colortype};

use super::*;

fn png_bytes(img: DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn integer_samples_divide_by_full_scale() {
    assert_eq!(SampleFormat::Unsigned(8).normalize(255.0), 1.0);
    assert_eq!(SampleFormat::Unsigned(8).normalize(0.0), 0.0);
    assert_eq!(SampleFormat::Unsigned(16).normalize(65535.0), 1.0);
    assert!((SampleFormat::Signed(8).normalize(51.0) - 0.2).abs() < 1e-6);
}

#[test]
fn float_samples_pass_through() {
    assert_eq!(SampleFormat::Float.normalize(0.25), 0.25);
    assert_eq!(SampleFormat::Float.normalize(1.5), 1.5);
}

#[test]
fn rgb8_keeps_rows_top_down() {
    let img = image::RgbImage::from_raw(1, 2, vec![255, 0, 0, 0, 0, 255]).unwrap();
    let grid = decode_image(&png_bytes(DynamicImage::ImageRgb8(img))).unwrap();
    assert_eq!(grid.dimensions(), (1, 2));
    assert_eq!(grid.get(0, 0), Some(&Rgba::RED));
    assert_eq!(grid.get(0, 1), Some(&Rgba::rgb(0.0, 0.0, 1.0)));
}

#[test]
fn gray_fills_red_channel_only() {
    let img = image::GrayImage::from_raw(1, 1, vec![255]).unwrap();
    let grid = decode_image(&png_bytes(DynamicImage::ImageLuma8(img))).unwrap();
    assert_eq!(grid.pixels(), &[Rgba::rgb(1.0, 0.0, 0.0)]);
}

#[test]
fn rgba8_keeps_alpha() {
    let img = image::RgbaImage::from_raw(1, 1, vec![0, 255, 0, 0]).unwrap();
    let grid = decode_image(&png_bytes(DynamicImage::ImageRgba8(img))).unwrap();
    assert_eq!(grid.pixels(), &[Rgba::new(0.0, 1.0, 0.0, 0.0)]);
}

#[test]
fn sixteen_bit_is_normalized() {
    let img: image::ImageBuffer<image::Rgb<u16>, Vec<u16>> =
        image::ImageBuffer::from_raw(1, 1, vec![65535, 0, 65535]).unwrap();
    let grid = decode_image(&png_bytes(DynamicImage::ImageRgb16(img))).unwrap();
    assert_eq!(grid.pixels(), &[Rgba::rgb(1.0, 0.0, 1.0)]);
}

macro_rules! tiff_bytes {
    ($color:ident, $w:expr, $h:expr, $data:expr) => {{
        let mut buf = Cursor::new(Vec::new());
        TiffEncoder::new(&mut buf)
            .unwrap()
            .write_image::<colortype::$color>($w, $h, $data)
            .unwrap();
        buf.into_inner()
    }};
}

#[test]
fn tiff_u32_gray_uses_full_scale() {
    let bytes = tiff_bytes!(Gray32, 2, 1, &[0, u32::MAX]);
    let grid = decode_image(&bytes).unwrap();
    assert_eq!(
        grid.pixels(),
        &[Rgba::rgb(0.0, 0.0, 0.0), Rgba::rgb(1.0, 0.0, 0.0)]
    );
}

#[test]
fn tiff_u32_rgb_fills_three_channels() {
    let bytes = tiff_bytes!(RGB32, 1, 1, &[u32::MAX, 0, u32::MAX]);
    let grid = decode_image(&bytes).unwrap();
    assert_eq!(grid.pixels(), &[Rgba::rgb(1.0, 0.0, 1.0)]);
}

#[test]
fn tiff_signed_samples_divide_by_full_scale() {
    // 65535 = 5 * 13107
    let bytes = tiff_bytes!(GrayI16, 2, 1, &[0, 13107]);
    let grid = decode_image(&bytes).unwrap();
    assert_eq!(grid.pixels()[0].r, 0.0);
    assert_eq!(grid.pixels()[1].r, 0.2);
}

#[test]
fn tiff_float_gray_passes_through() {
    let bytes = tiff_bytes!(Gray32Float, 2, 1, &[0.25, 1.5]);
    let grid = decode_image(&bytes).unwrap();
    assert_eq!(
        grid.pixels(),
        &[Rgba::rgb(0.25, 0.0, 0.0), Rgba::rgb(1.5, 0.0, 0.0)]
    );
}

#[test]
fn tiff_export_round_trip() {
    let src = PixelGrid::from_pixels(
        2,
        1,
        vec![Rgba::rgb(0.1, 0.5, 0.9), Rgba::rgb(1.0, 0.0, 0.33)],
    )
    .unwrap();
    let dir = std::env::temp_dir().join(format!("keyraster-decode-tif-{}", std::process::id()));
    let path = dir.join("0000.tif");
    crate::assets::encode::write_image(&src, &path).unwrap();

    let back = load_image(&path).unwrap();
    assert_eq!(back.dimensions(), (2, 1));
    for (a, b) in src.pixels().iter().zip(back.pixels()) {
        for i in 0..3 {
            assert!((a.channel(i) - b.channel(i)).abs() <= 1.0 / 255.0 + 1e-6);
        }
    }
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn garbage_bytes_are_an_error() {
    assert!(decode_image(b"definitely not an image").is_err());
}

#[test]
fn missing_file_mentions_path() {
    let err = load_image("target/keyraster-missing/nothing.png").unwrap_err();
    assert!(format!("{err:#}").contains("nothing.png"));
}
