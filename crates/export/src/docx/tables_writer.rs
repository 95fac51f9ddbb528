//! Table writer for DOCX files
//!
//! Generates w:tbl elements. Widths are expressed in fiftieths of a
//! percent (`pct`), so the table follows the page width.

use crate::docx::error::{DocxError, DocxResult};
use crate::docx::model::{BorderStyle, Paragraph, Table, TableBorders, TableCell, TableRow};

/// Full table width in fiftieths of a percent
const FULL_WIDTH_PCT: u32 = 5000;

/// Grid width in twips used when a percentage has to become absolute
const GRID_TWIPS: f64 = 10800.0;

pub struct TableWriter;

impl TableWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write a table; cell paragraphs are delegated to `paragraph`
    pub fn write_table(
        &self,
        xml: &mut String,
        table: &Table,
        mut paragraph: impl FnMut(&mut String, &Paragraph) -> DocxResult<()>,
    ) -> DocxResult<()> {
        table.validate().map_err(DocxError::InvalidStructure)?;

        xml.push_str("<w:tbl>");
        self.write_table_properties(xml, table);
        self.write_table_grid(xml, table);
        for row in &table.rows {
            self.write_table_row(xml, table, row, &mut paragraph)?;
        }
        xml.push_str("</w:tbl>");
        Ok(())
    }

    fn write_table_properties(&self, xml: &mut String, table: &Table) {
        xml.push_str("<w:tblPr>");
        xml.push_str(r#"<w:tblStyle w:val="TableGrid"/>"#);
        xml.push_str(&format!(r#"<w:tblW w:w="{}" w:type="pct"/>"#, FULL_WIDTH_PCT));
        write_borders(xml, &table.borders);
        xml.push_str(r#"<w:tblLayout w:type="fixed"/>"#);
        xml.push_str("<w:tblCellMar>");
        xml.push_str(r#"<w:left w:w="108" w:type="dxa"/>"#);
        xml.push_str(r#"<w:right w:w="108" w:type="dxa"/>"#);
        xml.push_str("</w:tblCellMar>");
        xml.push_str(r#"<w:tblLook w:val="04A0" w:firstRow="1" w:lastRow="0" w:firstColumn="1" w:lastColumn="0" w:noHBand="0" w:noVBand="1"/>"#);
        xml.push_str("</w:tblPr>");
    }

    fn write_table_grid(&self, xml: &mut String, table: &Table) {
        xml.push_str("<w:tblGrid>");
        for width in &table.column_widths {
            let twips = (GRID_TWIPS * width / 100.0).round() as i64;
            xml.push_str(&format!(r#"<w:gridCol w:w="{}"/>"#, twips));
        }
        xml.push_str("</w:tblGrid>");
    }

    fn write_table_row(
        &self,
        xml: &mut String,
        table: &Table,
        row: &TableRow,
        paragraph: &mut impl FnMut(&mut String, &Paragraph) -> DocxResult<()>,
    ) -> DocxResult<()> {
        xml.push_str("<w:tr>");
        if row.header {
            xml.push_str("<w:trPr><w:tblHeader/><w:cantSplit/></w:trPr>");
        }
        let mut column = 0usize;
        for cell in &row.cells {
            let span = cell.grid_span.max(1) as usize;
            let percent: f64 = table.column_widths[column..column + span].iter().sum();
            column += span;
            self.write_table_cell(xml, cell, percent, paragraph)?;
        }
        xml.push_str("</w:tr>");
        Ok(())
    }

    fn write_table_cell(
        &self,
        xml: &mut String,
        cell: &TableCell,
        percent: f64,
        paragraph: &mut impl FnMut(&mut String, &Paragraph) -> DocxResult<()>,
    ) -> DocxResult<()> {
        xml.push_str("<w:tc><w:tcPr>");
        xml.push_str(&format!(
            r#"<w:tcW w:w="{}" w:type="pct"/>"#,
            (percent * FULL_WIDTH_PCT as f64 / 100.0).round() as i64
        ));
        if cell.grid_span > 1 {
            xml.push_str(&format!(r#"<w:gridSpan w:val="{}"/>"#, cell.grid_span));
        }
        if let Some(fill) = &cell.shading {
            xml.push_str(&format!(r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#, fill));
        }
        xml.push_str("</w:tcPr>");

        // A cell must hold at least one paragraph
        if cell.paragraphs.is_empty() {
            xml.push_str("<w:p/>");
        }
        for p in &cell.paragraphs {
            paragraph(xml, p)?;
        }
        xml.push_str("</w:tc>");
        Ok(())
    }
}

fn write_borders(xml: &mut String, borders: &TableBorders) {
    let val = match borders.style {
        BorderStyle::None => "nil",
        BorderStyle::Single => "single",
    };
    xml.push_str("<w:tblBorders>");
    for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
        xml.push_str(&format!(
            r#"<w:{} w:val="{}" w:sz="{}" w:space="0" w:color="{}"/>"#,
            edge, val, borders.size, borders.color
        ));
    }
    xml.push_str("</w:tblBorders>");
}
