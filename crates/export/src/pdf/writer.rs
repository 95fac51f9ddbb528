//! PDF Writer
//!
//! File structure (header, body, xref, trailer), object numbering and
//! stream compression, plus the page-image document writer built on top.

use super::content::ContentStream;
use super::document::{catalog, image_page, page_tree, DocumentInfo, MediaBox};
use super::images::ImageXObject;
use super::objects::{PdfDictionary, PdfObject, PdfStream};
use super::options::{PdfExportOptions, PdfVersion};
use crate::page::mm_to_pt;
use image::RgbImage;
use std::io::{self, Write};
use thiserror::Error;

/// Error type for PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    #[error("Compression error: {0}")]
    Compression(String),
    #[error("Image encoding error: {0}")]
    Image(String),
}

pub type Result<T> = std::result::Result<T, PdfError>;

/// PDF file writer
pub struct PdfWriter<W: Write> {
    writer: W,
    /// Current byte position
    position: u64,
    /// (object number, byte offset)
    offsets: Vec<(u32, u64)>,
    next_obj_num: u32,
    version: PdfVersion,
    compress: bool,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W, version: PdfVersion) -> Self {
        Self {
            writer,
            position: 0,
            offsets: Vec::new(),
            next_obj_num: 1,
            version,
            compress: true,
        }
    }

    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    pub fn allocate_object(&mut self) -> u32 {
        let num = self.next_obj_num;
        self.next_obj_num += 1;
        num
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.write_str(&format!("%PDF-{}\n", self.version.as_str()))?;
        // Binary marker
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])
    }

    fn begin_object(&mut self, obj_num: u32) -> Result<()> {
        if self.offsets.iter().any(|(n, _)| *n == obj_num) {
            return Err(PdfError::InvalidDocument(format!("object {} written twice", obj_num)));
        }
        self.offsets.push((obj_num, self.position));
        self.write_str(&format!("{} 0 obj\n", obj_num))
    }

    pub fn write_object(&mut self, obj_num: u32, object: impl Into<PdfObject>) -> Result<()> {
        self.begin_object(obj_num)?;
        let mut buf = Vec::new();
        object.into().write_to(&mut buf)?;
        self.write_bytes(&buf)?;
        self.write_str("\nendobj\n")
    }

    /// Write a stream object, deflating it unless it is already encoded
    pub fn write_stream_object(&mut self, obj_num: u32, mut stream: PdfStream) -> Result<()> {
        if self.compress && !stream.encoded {
            stream = compress_stream(stream)?;
        }
        stream.dict.insert("Length", stream.data.len() as i64);

        self.begin_object(obj_num)?;
        let mut buf = Vec::new();
        stream.dict.write_to(&mut buf)?;
        self.write_bytes(&buf)?;
        self.write_str("\nstream\n")?;
        self.write_bytes(&stream.data)?;
        self.write_str("\nendstream\nendobj\n")
    }

    pub fn write_xref_and_trailer(&mut self, catalog_ref: u32, info_ref: Option<u32>) -> Result<()> {
        let xref_offset = self.position;
        let mut entries = std::mem::take(&mut self.offsets);
        entries.sort_by_key(|(n, _)| *n);

        self.write_str("xref\n")?;
        self.write_str(&format!("0 {}\n", self.next_obj_num))?;
        self.write_str("0000000000 65535 f \n")?;

        let mut expected = 1u32;
        for (obj_num, offset) in &entries {
            // Allocated but never written
            while expected < *obj_num {
                self.write_str("0000000000 65535 f \n")?;
                expected += 1;
            }
            self.write_str(&format!("{:010} 00000 n \n", offset))?;
            expected = obj_num + 1;
        }
        while expected < self.next_obj_num {
            self.write_str("0000000000 65535 f \n")?;
            expected += 1;
        }

        let mut trailer = PdfDictionary::new();
        trailer.insert("Size", self.next_obj_num);
        trailer.insert("Root", PdfObject::Reference(catalog_ref));
        if let Some(info) = info_ref {
            trailer.insert("Info", PdfObject::Reference(info));
        }
        self.write_str("trailer\n")?;
        let mut buf = Vec::new();
        trailer.write_to(&mut buf)?;
        self.write_bytes(&buf)?;
        self.write_str(&format!("\nstartxref\n{}\n%%EOF\n", xref_offset))?;
        self.offsets = entries;
        Ok(())
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

fn compress_stream(mut stream: PdfStream) -> Result<PdfStream> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&stream.data)
        .map_err(|e| PdfError::Compression(e.to_string()))?;
    stream.data = encoder.finish().map_err(|e| PdfError::Compression(e.to_string()))?;
    stream.encoded = true;
    stream.dict.insert("Filter", PdfObject::name("FlateDecode"));
    Ok(stream)
}

/// One page showing one bitmap band
///
/// Geometry is in millimetres with the origin at the page's top-left.
#[derive(Debug, Clone)]
pub struct PageImage {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub x_mm: f64,
    pub y_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
    pub image: RgbImage,
}

/// Writes a complete document whose pages each carry one image
pub struct PdfDocumentWriter {
    options: PdfExportOptions,
}

impl PdfDocumentWriter {
    pub fn new(options: PdfExportOptions) -> Self {
        Self { options }
    }

    pub fn write_to_bytes(&self, pages: &[PageImage]) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write(&mut buf, pages)?;
        Ok(buf)
    }

    pub fn write<W: Write>(&self, out: W, pages: &[PageImage]) -> Result<()> {
        if pages.is_empty() {
            return Err(PdfError::InvalidDocument("document has no pages".to_string()));
        }

        let mut writer = PdfWriter::new(out, self.options.version);
        writer.set_compression(self.options.compress);
        writer.write_header()?;

        let catalog_ref = writer.allocate_object();
        let pages_ref = writer.allocate_object();
        let info_ref = writer.allocate_object();

        let mut kids = Vec::with_capacity(pages.len());
        for (i, page) in pages.iter().enumerate() {
            let page_ref = writer.allocate_object();
            let content_ref = writer.allocate_object();
            let image_ref = writer.allocate_object();
            let name = format!("Im{}", i + 1);

            let page_height = mm_to_pt(page.page_height_mm);
            let (w, h) = (mm_to_pt(page.width_mm), mm_to_pt(page.height_mm));
            let x = mm_to_pt(page.x_mm);
            // Flip to bottom-left origin
            let y = page_height - mm_to_pt(page.y_mm) - h;

            let mut content = ContentStream::new();
            content.place_image(&name, x, y, w, h);

            let media_box = MediaBox::new(mm_to_pt(page.page_width_mm), page_height);
            writer.write_object(page_ref, image_page(pages_ref, media_box, content_ref, &name, image_ref))?;
            writer.write_stream_object(content_ref, PdfStream::new(PdfDictionary::new(), content.into_bytes()))?;
            let xobject = ImageXObject::from_rgb(&page.image, self.options.image_encoding)?;
            writer.write_stream_object(image_ref, xobject.into_stream())?;
            kids.push(page_ref);
        }

        writer.write_object(pages_ref, page_tree(&kids))?;
        writer.write_object(catalog_ref, catalog(pages_ref))?;
        writer.write_object(info_ref, DocumentInfo::from_options(&self.options).to_dictionary())?;
        writer.write_xref_and_trailer(catalog_ref, Some(info_ref))?;
        writer.finish()?;

        tracing::debug!(pages = pages.len(), "PDF document written");
        Ok(())
    }
}
