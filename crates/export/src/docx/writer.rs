//! DOCX package writer
//!
//! Creates the ZIP archive with the parts a Word processor expects.

use crate::docx::content_types::{create_default_content_types, ContentTypes};
use crate::docx::document_writer::DocumentWriter;
use crate::docx::error::DocxResult;
use crate::docx::media_writer::MediaWriter;
use crate::docx::model::DocxDocument;
use crate::docx::relationships::{create_document_rels, create_root_rels, Relationships};
use crate::docx::styles_writer::{generate_settings_xml, StylesWriter};
use std::io::{Cursor, Seek, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub struct DocxWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    content_types: ContentTypes,
    root_rels: Relationships,
    doc_rels: Relationships,
}

impl<W: Write + Seek> DocxWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            content_types: create_default_content_types(),
            root_rels: create_root_rels(),
            doc_rels: create_document_rels(),
        }
    }

    /// Write a complete package and return the underlying writer
    pub fn write(mut self, doc: &DocxDocument) -> DocxResult<W> {
        // Media first so the document can reference relationship IDs
        let image_rels = MediaWriter::new().write_media(doc, &mut self)?;

        let doc_xml = DocumentWriter::new(&image_rels).write(doc)?;
        self.write_file("word/document.xml", &doc_xml)?;
        self.write_file("word/styles.xml", &StylesWriter::new().write())?;
        self.write_file("word/settings.xml", &generate_settings_xml())?;

        let root_rels_xml = self.root_rels.to_xml();
        self.write_file("_rels/.rels", &root_rels_xml)?;
        let doc_rels_xml = self.doc_rels.to_xml();
        self.write_file("word/_rels/document.xml.rels", &doc_rels_xml)?;

        // Written last, once every part is known
        let content_types_xml = self.content_types.to_xml();
        self.write_file("[Content_Types].xml", &content_types_xml)?;

        Ok(self.zip.finish()?)
    }

    pub fn write_file(&mut self, path: &str, content: &str) -> DocxResult<()> {
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        self.zip.start_file(path, options)?;
        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Binary parts are stored, not deflated
    pub fn write_binary(&mut self, path: &str, data: &[u8]) -> DocxResult<()> {
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        self.zip.start_file(path, options)?;
        self.zip.write_all(data)?;
        Ok(())
    }

    pub fn content_types_mut(&mut self) -> &mut ContentTypes {
        &mut self.content_types
    }

    pub fn doc_rels_mut(&mut self) -> &mut Relationships {
        &mut self.doc_rels
    }
}

/// Serialize a document into an in-memory package
pub fn export_docx_bytes(doc: &DocxDocument) -> DocxResult<Vec<u8>> {
    let cursor = DocxWriter::new(Cursor::new(Vec::new())).write(doc)?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::model::{Paragraph, Run};
    use std::io::Read;

    fn part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_package_parts() {
        let doc = DocxDocument::new().paragraph(Paragraph::new().run(Run::new("hello")));
        let bytes = export_docx_bytes(&doc).unwrap();

        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for expected in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/styles.xml",
            "word/settings.xml",
            "word/_rels/document.xml.rels",
        ] {
            assert!(names.contains(&expected), "missing {}", expected);
        }
        assert!(part(&bytes, "word/document.xml").contains("<w:t>hello</w:t>"));
        // No pictures, no png default
        assert!(!part(&bytes, "[Content_Types].xml").contains("image/png"));
    }
}
