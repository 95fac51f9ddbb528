//! Minimal WordprocessingML document model
//!
//! Just enough structure for generated reports: styled paragraphs, tables
//! with percentage columns, merged section rows and shading, and inline
//! PNG pictures.

#[derive(Debug, Clone, Default)]
pub struct DocxDocument {
    pub blocks: Vec<Block>,
}

impl DocxDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paragraph(mut self, paragraph: Paragraph) -> Self {
        self.blocks.push(Block::Paragraph(paragraph));
        self
    }

    pub fn table(mut self, table: Table) -> Self {
        self.blocks.push(Block::Table(table));
        self
    }

    /// Inline images in document order
    pub fn images(&self) -> impl Iterator<Item = &InlineImage> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Paragraph(p) => Some(p),
                Block::Table(_) => None,
            })
            .flat_map(|p| p.content.iter())
            .filter_map(|inline| match inline {
                Inline::Image(image) => Some(image),
                Inline::Run(_) => None,
            })
    }
}

#[derive(Debug, Clone)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    pub style: Option<String>,
    pub alignment: Option<Alignment>,
    /// Space after, in twips
    pub spacing_after: Option<u32>,
    pub content: Vec<Inline>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: &str) -> Self {
        self.style = Some(style.to_string());
        self
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn spacing_after(mut self, twips: u32) -> Self {
        self.spacing_after = Some(twips);
        self
    }

    pub fn run(mut self, run: Run) -> Self {
        self.content.push(Inline::Run(run));
        self
    }

    pub fn image(mut self, image: InlineImage) -> Self {
        self.content.push(Inline::Image(image));
        self
    }
}

#[derive(Debug, Clone)]
pub enum Inline {
    Run(Run),
    Image(InlineImage),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    /// Half-points
    pub size: Option<u32>,
    /// Hex RGB without '#'
    pub color: Option<String>,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn size(mut self, half_points: u32) -> Self {
        self.size = Some(half_points);
        self
    }

    pub fn color(mut self, hex: &str) -> Self {
        self.color = Some(hex.trim_start_matches('#').to_uppercase());
        self
    }
}

/// PNG picture displayed at a pixel size (96 dpi)
#[derive(Debug, Clone)]
pub struct InlineImage {
    pub png: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    None,
    Single,
}

/// Same border on all edges and inside lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableBorders {
    pub style: BorderStyle,
    /// Eighths of a point
    pub size: u32,
    pub color: &'static str,
}

impl Default for TableBorders {
    fn default() -> Self {
        Self {
            style: BorderStyle::Single,
            size: 1,
            color: "000000",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Grid column widths as percentages of the table width
    pub column_widths: Vec<f64>,
    pub borders: TableBorders,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn new(column_widths: Vec<f64>) -> Self {
        Self {
            column_widths,
            ..Self::default()
        }
    }

    pub fn row(mut self, row: TableRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Grid columns spanned by each row must add up to the grid
    pub fn validate(&self) -> Result<(), String> {
        let columns = self.column_widths.len() as u32;
        for (i, row) in self.rows.iter().enumerate() {
            let spanned: u32 = row.cells.iter().map(|c| c.grid_span.max(1)).sum();
            if spanned != columns {
                return Err(format!("row {} spans {} of {} columns", i, spanned, columns));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TableRow {
    /// Repeated at the top of each page
    pub header: bool,
    pub cells: Vec<TableCell>,
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { header: false, cells }
    }

    pub fn header(cells: Vec<TableCell>) -> Self {
        Self { header: true, cells }
    }
}

#[derive(Debug, Clone)]
pub struct TableCell {
    pub paragraphs: Vec<Paragraph>,
    pub grid_span: u32,
    /// Hex fill colour
    pub shading: Option<String>,
}

impl TableCell {
    pub fn new(paragraph: Paragraph) -> Self {
        Self {
            paragraphs: vec![paragraph],
            grid_span: 1,
            shading: None,
        }
    }

    pub fn text(text: &str) -> Self {
        Self::new(Paragraph::new().run(Run::new(text)))
    }

    pub fn span(mut self, columns: u32) -> Self {
        self.grid_span = columns;
        self
    }

    pub fn shaded(mut self, hex: &str) -> Self {
        self.shading = Some(hex.trim_start_matches('#').to_uppercase());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_validation() {
        let table = Table::new(vec![50.0, 50.0])
            .row(TableRow::new(vec![TableCell::text("a"), TableCell::text("b")]))
            .row(TableRow::new(vec![TableCell::text("merged").span(2)]));
        assert!(table.validate().is_ok());

        let bad = Table::new(vec![50.0, 50.0]).row(TableRow::new(vec![TableCell::text("a")]));
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_images_in_order() {
        let image = |name: &str| InlineImage {
            png: vec![],
            width_px: 1,
            height_px: 1,
            name: name.to_string(),
        };
        let doc = DocxDocument::new()
            .paragraph(Paragraph::new().run(Run::new("title")))
            .paragraph(Paragraph::new().image(image("a")))
            .paragraph(Paragraph::new().image(image("b")));
        let names: Vec<_> = doc.images().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_colors_normalised() {
        assert_eq!(Run::new("x").color("#fff").color, Some("FFF".to_string()));
        assert_eq!(TableCell::text("x").shaded("#6d94c5").shading, Some("6D94C5".to_string()));
    }
}
