//! Word documents for the two export modes
//!
//! A table of sectioned rows under a centred heading, or a titled
//! picture.

use crate::docx::error::{DocxError, DocxResult};
use crate::docx::model::{Alignment, DocxDocument, InlineImage, Paragraph, Run, Table, TableCell, TableRow};
use crate::docx::writer::export_docx_bytes;

const HEADER_FILL: &str = "6D94C5";
const SECTION_FILL: &str = "FFFFFF";

/// One column of a [`TableSource`]
#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    pub header: String,
    pub width_percent: f64,
}

/// Rows grouped under a full-width section row
#[derive(Debug, Clone, PartialEq)]
pub struct TableSection {
    pub name: String,
    /// One string per column
    pub rows: Vec<Vec<String>>,
}

/// Content of a table-mode document
#[derive(Debug, Clone, PartialEq)]
pub struct TableSource {
    pub title: String,
    pub subtitle: Option<String>,
    pub columns: Vec<TableColumn>,
    pub sections: Vec<TableSection>,
}

/// Heading, subtitle and a bordered table with a repeating header row
pub fn table_document(source: &TableSource) -> DocxResult<Vec<u8>> {
    let span = source.columns.len() as u32;
    if span == 0 {
        return Err(DocxError::InvalidStructure("table has no columns".to_string()));
    }

    let mut table = Table::new(source.columns.iter().map(|c| c.width_percent).collect());
    table = table.row(TableRow::header(
        source
            .columns
            .iter()
            .map(|c| {
                TableCell::new(Paragraph::new().run(Run::new(&c.header).bold().color("FFFFFF"))).shaded(HEADER_FILL)
            })
            .collect(),
    ));
    for section in &source.sections {
        table = table.row(TableRow::new(vec![TableCell::new(
            Paragraph::new().run(Run::new(&section.name).bold()),
        )
        .span(span)
        .shaded(SECTION_FILL)]));
        for row in &section.rows {
            if row.len() != span as usize {
                return Err(DocxError::InvalidStructure(format!(
                    "row in section {} has {} cells, expected {}",
                    section.name,
                    row.len(),
                    span
                )));
            }
            table = table.row(TableRow::new(row.iter().map(|text| TableCell::text(text)).collect()));
        }
    }

    let mut doc = DocxDocument::new().paragraph(
        Paragraph::new()
            .with_style("Heading1")
            .aligned(Alignment::Center)
            .run(Run::new(&source.title).bold().size(32)),
    );
    if let Some(subtitle) = &source.subtitle {
        doc = doc.paragraph(
            Paragraph::new()
                .aligned(Alignment::Center)
                .spacing_after(400)
                .run(Run::new(subtitle).size(24)),
        );
    }
    export_docx_bytes(&doc.table(table))
}

/// Bold title followed by a PNG scaled to `display_width_px`
pub fn image_document(title: &str, png: Vec<u8>, pixel_width: u32, pixel_height: u32, display_width_px: u32) -> DocxResult<Vec<u8>> {
    if pixel_width == 0 || pixel_height == 0 {
        return Err(DocxError::Image("empty image".to_string()));
    }
    let display_height_px =
        ((pixel_height as f64 * display_width_px as f64 / pixel_width as f64).round() as u32).max(1);

    let doc = DocxDocument::new()
        .paragraph(Paragraph::new().spacing_after(200).run(Run::new(title).bold().size(32)))
        .paragraph(Paragraph::new().image(InlineImage {
            png,
            width_px: display_width_px,
            height_px: display_height_px,
            name: title.to_string(),
        }));
    export_docx_bytes(&doc)
}
