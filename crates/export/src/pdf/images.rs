//! Image XObjects

use super::objects::{PdfDictionary, PdfObject, PdfStream};
use super::options::ImageEncoding;
use super::writer::{PdfError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};

/// An opaque RGB image ready to be written as an XObject
#[derive(Debug, Clone)]
pub struct ImageXObject {
    pub width: u32,
    pub height: u32,
    stream: PdfStream,
}

impl ImageXObject {
    pub fn from_rgb(image: &RgbImage, encoding: ImageEncoding) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(PdfError::InvalidDocument("empty page image".to_string()));
        }
        let mut dict = PdfDictionary::typed("XObject");
        dict.insert("Subtype", PdfObject::name("Image"));
        dict.insert("Width", width);
        dict.insert("Height", height);
        dict.insert("ColorSpace", PdfObject::name("DeviceRGB"));
        dict.insert("BitsPerComponent", 8i64);

        let stream = match encoding {
            // Samples go in raw; the writer applies FlateDecode
            ImageEncoding::Flate => PdfStream::new(dict, image.as_raw().clone()),
            ImageEncoding::Jpeg { quality } => {
                let mut data = Vec::new();
                JpegEncoder::new_with_quality(&mut data, quality.clamp(1, 100))
                    .write_image(image.as_raw(), width, height, ExtendedColorType::Rgb8)
                    .map_err(|e| PdfError::Image(e.to_string()))?;
                dict.insert("Filter", PdfObject::name("DCTDecode"));
                PdfStream::pre_encoded(dict, data)
            }
        };
        Ok(Self {
            width,
            height,
            stream,
        })
    }

    pub fn into_stream(self) -> PdfStream {
        self.stream
    }
}
