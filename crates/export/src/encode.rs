//! Bitmap encoding for artifacts

use crate::Result;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::buffer::ConvertBuffer;
use image::{ExtendedColorType, ImageEncoder, RgbImage, RgbaImage};

/// Drop the alpha channel; captures are already opaque
pub fn flatten(image: &RgbaImage) -> RgbImage {
    image.convert()
}

/// Baseline JPEG at `quality` (1-100)
pub fn encode_jpeg(image: &RgbaImage, quality: u8) -> Result<Vec<u8>> {
    let rgb = flatten(image);
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100)).write_image(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(bytes)
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(image.as_raw(), image.width(), image.height(), ExtendedColorType::Rgba8)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample() -> RgbaImage {
        RgbaImage::from_fn(30, 20, |x, _| if x < 15 { Rgba([255, 255, 255, 255]) } else { Rgba([0, 0, 0, 255]) })
    }

    #[test]
    fn test_flatten_keeps_colour() {
        let rgb = flatten(&sample());
        assert_eq!(rgb.dimensions(), (30, 20));
        assert_eq!(rgb.get_pixel(20, 5).0, [0, 0, 0]);
    }

    #[test]
    fn test_flatten_drops_alpha_without_blending() {
        let image = RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 128]));
        let rgb = flatten(&image);
        assert_eq!(rgb.dimensions(), (4, 3));
        assert!(rgb.pixels().all(|p| p.0 == [10, 20, 30]));
    }

    #[test]
    fn test_jpeg_decodes_to_same_size() {
        let bytes = encode_jpeg(&sample(), 95).unwrap();
        assert_eq!(&bytes[..3], &[0xFF, 0xD8, 0xFF]);
        let decoded = image::load_from_memory_with_format(&bytes, image::ImageFormat::Jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (30, 20));
    }

    #[test]
    fn test_png_is_lossless() {
        let bytes = encode_png(&sample()).unwrap();
        let decoded = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded, sample());
    }
}
