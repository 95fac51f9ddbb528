//! document.xml writer

use crate::docx::error::{DocxError, DocxResult};
use crate::docx::media_writer::generate_inline_drawing;
use crate::docx::model::{Block, DocxDocument, Inline, Paragraph, Run};
use crate::docx::namespaces;
use crate::docx::tables_writer::TableWriter;
use quick_xml::escape::escape;

/// Writer for document.xml
///
/// `image_rels` holds the relationship ID of each inline image in
/// document order.
pub struct DocumentWriter<'a> {
    image_rels: &'a [String],
    next_image: usize,
}

impl<'a> DocumentWriter<'a> {
    pub fn new(image_rels: &'a [String]) -> Self {
        Self {
            image_rels,
            next_image: 0,
        }
    }

    pub fn write(&mut self, doc: &DocxDocument) -> DocxResult<String> {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<w:document xmlns:w="{}" xmlns:r="{}" xmlns:wp="{}" xmlns:a="{}" xmlns:pic="{}">"#,
            namespaces::W,
            namespaces::R,
            namespaces::WP,
            namespaces::A,
            namespaces::PIC,
        ));
        xml.push_str("<w:body>");

        for block in &doc.blocks {
            match block {
                Block::Paragraph(p) => self.write_paragraph(&mut xml, p)?,
                Block::Table(t) => TableWriter::new().write_table(&mut xml, t, |xml, p| self.write_paragraph(xml, p))?,
            }
        }

        // Letter portrait, 10mm margins
        xml.push_str(r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/>"#);
        xml.push_str(r#"<w:pgMar w:top="567" w:right="567" w:bottom="567" w:left="567" w:header="0" w:footer="0" w:gutter="0"/>"#);
        xml.push_str("</w:sectPr>");

        xml.push_str("</w:body></w:document>");
        Ok(xml)
    }

    pub(crate) fn write_paragraph(&mut self, xml: &mut String, para: &Paragraph) -> DocxResult<()> {
        xml.push_str("<w:p>");
        write_paragraph_properties(xml, para);
        for inline in &para.content {
            match inline {
                Inline::Run(run) => write_run(xml, run),
                Inline::Image(image) => {
                    let rel_id = self.image_rels.get(self.next_image).ok_or_else(|| {
                        DocxError::InvalidStructure(format!("no relationship for image {}", image.name))
                    })?;
                    self.next_image += 1;
                    xml.push_str("<w:r>");
                    xml.push_str(&generate_inline_drawing(
                        rel_id,
                        self.next_image as u32,
                        image.width_px,
                        image.height_px,
                        &image.name,
                    ));
                    xml.push_str("</w:r>");
                }
            }
        }
        xml.push_str("</w:p>");
        Ok(())
    }
}

fn write_paragraph_properties(xml: &mut String, para: &Paragraph) {
    if para.style.is_none() && para.alignment.is_none() && para.spacing_after.is_none() {
        return;
    }
    xml.push_str("<w:pPr>");
    if let Some(style) = &para.style {
        xml.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, escape(style.as_str())));
    }
    if let Some(after) = para.spacing_after {
        xml.push_str(&format!(r#"<w:spacing w:after="{}"/>"#, after));
    }
    if let Some(alignment) = para.alignment {
        xml.push_str(&format!(r#"<w:jc w:val="{}"/>"#, alignment.as_str()));
    }
    xml.push_str("</w:pPr>");
}

fn write_run(xml: &mut String, run: &Run) {
    xml.push_str("<w:r>");
    if run.bold || run.size.is_some() || run.color.is_some() {
        xml.push_str("<w:rPr>");
        if run.bold {
            xml.push_str("<w:b/>");
        }
        if let Some(color) = &run.color {
            xml.push_str(&format!(r#"<w:color w:val="{}"/>"#, escape(color.as_str())));
        }
        if let Some(size) = run.size {
            xml.push_str(&format!(r#"<w:sz w:val="{}"/><w:szCs w:val="{}"/>"#, size, size));
        }
        xml.push_str("</w:rPr>");
    }

    let lines: Vec<&str> = run.text.split('\n').collect();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            xml.push_str("<w:br/>");
        }
        if line.is_empty() {
            continue;
        }
        // Leading or trailing spaces are dropped unless preserved
        if line.starts_with(' ') || line.ends_with(' ') {
            xml.push_str(r#"<w:t xml:space="preserve">"#);
        } else {
            xml.push_str("<w:t>");
        }
        xml.push_str(&escape(*line));
        xml.push_str("</w:t>");
    }
    xml.push_str("</w:r>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::model::{Alignment, InlineImage};

    #[test]
    fn test_heading_paragraph() {
        let doc = DocxDocument::new().paragraph(
            Paragraph::new()
                .with_style("Heading1")
                .aligned(Alignment::Center)
                .run(Run::new("CHART & Co").bold().size(32)),
        );
        let xml = DocumentWriter::new(&[]).write(&doc).unwrap();
        assert!(xml.contains(r#"<w:pStyle w:val="Heading1"/>"#));
        assert!(xml.contains(r#"<w:jc w:val="center"/>"#));
        assert!(xml.contains(r#"<w:b/><w:sz w:val="32"/>"#));
        assert!(xml.contains("<w:t>CHART &amp; Co</w:t>"));
    }

    #[test]
    fn test_run_line_breaks_and_spaces() {
        let doc = DocxDocument::new().paragraph(Paragraph::new().run(Run::new("a\n b")));
        let xml = DocumentWriter::new(&[]).write(&doc).unwrap();
        assert!(xml.contains(r#"<w:t>a</w:t><w:br/><w:t xml:space="preserve"> b</w:t>"#));
    }

    #[test]
    fn test_image_without_relationship_fails() {
        let doc = DocxDocument::new().paragraph(Paragraph::new().image(InlineImage {
            png: vec![],
            width_px: 10,
            height_px: 10,
            name: "diagram".into(),
        }));
        assert!(DocumentWriter::new(&[]).write(&doc).is_err());

        let rels = vec!["rId3".to_string()];
        let xml = DocumentWriter::new(&rels).write(&doc).unwrap();
        assert!(xml.contains(r#"r:embed="rId3""#));
    }
}
