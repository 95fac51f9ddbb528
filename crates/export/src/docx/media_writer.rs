//! Media writer for DOCX files
//!
//! Stores inline pictures under word/media/ and generates their
//! DrawingML references.

use crate::docx::error::{DocxError, DocxResult};
use crate::docx::model::DocxDocument;
use crate::docx::relationship_types;
use crate::docx::writer::DocxWriter;
use quick_xml::escape::escape;
use std::io::{Seek, Write};

/// English Metric Units per pixel at 96 dpi
pub const EMU_PER_PIXEL: i64 = 9525;

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

pub struct MediaWriter;

impl MediaWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write every inline image of `doc` and return their relationship
    /// IDs in document order
    pub fn write_media<W: Write + Seek>(&self, doc: &DocxDocument, writer: &mut DocxWriter<W>) -> DocxResult<Vec<String>> {
        let mut rel_ids = Vec::new();
        for (i, image) in doc.images().enumerate() {
            if !image.png.starts_with(PNG_SIGNATURE) {
                return Err(DocxError::Image(format!("{} is not a PNG", image.name)));
            }
            let filename = format!("image{}.png", i + 1);
            writer.write_binary(&format!("word/media/{}", filename), &image.png)?;
            let rel_id = writer
                .doc_rels_mut()
                .add(relationship_types::IMAGE, &format!("media/{}", filename));
            rel_ids.push(rel_id);
        }
        if !rel_ids.is_empty() {
            writer.content_types_mut().add_default("png", "image/png");
        }
        Ok(rel_ids)
    }
}

/// Generate a w:drawing element for an inline picture
pub fn generate_inline_drawing(rel_id: &str, id: u32, width_px: u32, height_px: u32, name: &str) -> String {
    let cx = width_px as i64 * EMU_PER_PIXEL;
    let cy = height_px as i64 * EMU_PER_PIXEL;
    let name = escape(name);

    format!(
        concat!(
            r#"<w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0">"#,
            r#"<wp:extent cx="{cx}" cy="{cy}"/>"#,
            r#"<wp:effectExtent l="0" t="0" r="0" b="0"/>"#,
            r#"<wp:docPr id="{id}" name="{name}" descr="{name}"/>"#,
            r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
            r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
            r#"<pic:pic><pic:nvPicPr><pic:cNvPr id="{id}" name="{name}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
            r#"<pic:blipFill><a:blip r:embed="{rel_id}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
            r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#,
            r#"</pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing>"#,
        ),
        cx = cx,
        cy = cy,
        id = id,
        name = name,
        rel_id = rel_id,
    )
}
