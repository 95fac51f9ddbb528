//! Checklist table region and its print styling

use super::{text_block, wrap, Align, TextStyle, REM};
use crate::checklist::{ChecklistResponses, ChecklistSection, CHECKLIST_COLUMNS, CHECKLIST_SUBTITLE, CHECKLIST_TITLE};
use crate::error::Result;
use render_model::{
    BoxRenderInfo, Color, Element, Paint, Rect, RenderItem, StyleDeclaration, StyleRole, StyleSheet,
};

/// Marker class that scopes the print-only rules
pub const PRINT_CLASS: &str = "checklist-print";

const HEADER_BLUE: Color = Color::rgb(0x6D, 0x94, 0xC5);
const STRIPE: Color = Color::rgb(0xF9, 0xF9, 0xF9);
const INK: Color = Color::rgb(0x1A, 0x1F, 0x2E);
const MUTED: Color = Color::rgb(0x66, 0x66, 0x66);
const BODY: Color = Color::rgb(0x33, 0x33, 0x33);
const FIELD_BORDER: Color = Color::rgb(0xDD, 0xDD, 0xDD);
const PLACEHOLDER: Color = Color::rgb(0x75, 0x75, 0x75);

const PADDING: f64 = 3.0 * REM;
const CELL_PADDING: f64 = REM;
const FIELD_PADDING: f64 = 0.5 * REM;
const PLACEHOLDER_TEXT: &str = "Enter page #";

/// Rules applied while the checklist is captured for PDF: header cells,
/// striped rows and section headers go white with black text, and the
/// response fields lose their border and background.
pub fn print_style_sheet() -> StyleSheet {
    let white = Paint::Solid(Color::WHITE);
    StyleSheet::new()
        .rule(PRINT_CLASS, StyleRole::HeaderCell, StyleDeclaration::default().fill(white))
        .rule(PRINT_CLASS, StyleRole::HeaderText, StyleDeclaration::default().text_color(Color::BLACK))
        .rule(PRINT_CLASS, StyleRole::StripedRow, StyleDeclaration::default().fill(white))
        .rule(PRINT_CLASS, StyleRole::SectionHeader, StyleDeclaration::default().fill(white))
        .rule(PRINT_CLASS, StyleRole::SectionText, StyleDeclaration::default().text_color(Color::BLACK))
        .rule(
            PRINT_CLASS,
            StyleRole::TextField,
            StyleDeclaration::default().stroke(Paint::None).fill(Paint::None),
        )
}

/// Lays out the checklist container
#[derive(Debug, Clone, Copy)]
pub struct ChecklistView {
    /// Container width in CSS pixels
    pub width: f64,
}

impl Default for ChecklistView {
    fn default() -> Self {
        // 1400px page max-width less 2rem page padding either side
        Self { width: 1336.0 }
    }
}

impl ChecklistView {
    pub fn render(&self, sections: &[ChecklistSection], responses: &ChecklistResponses) -> Result<Element> {
        let inner_width = self.width - 2.0 * PADDING;
        let mut items = Vec::new();
        let mut y = PADDING;

        let title = TextStyle::new(2.0 * REM, 1.2).bold().color(INK);
        let lines = wrap(CHECKLIST_TITLE, inner_width, title.font_size);
        let (runs, h) = text_block(&lines, PADDING, y, inner_width, title, Align::Center);
        items.extend(runs);
        y += h + 0.5 * REM;

        let subtitle = TextStyle::new(REM, 1.5).color(MUTED);
        let lines = wrap(CHECKLIST_SUBTITLE, inner_width, subtitle.font_size);
        let (runs, h) = text_block(&lines, PADDING, y, inner_width, subtitle, Align::Center);
        items.extend(runs);
        y += h + 2.0 * REM;

        let table = TableLayout::new(PADDING, inner_width);
        y = table.header_row(&mut items, y);

        let mut body_row = 0usize;
        for section in sections {
            body_row += 1;
            y = table.section_row(&mut items, y, section.name, body_row);
            for item in section.items {
                body_row += 1;
                let cells = [item.label, item.number, item.description];
                y = table.item_row(&mut items, y, cells, responses.get(item.number), body_row);
            }
        }
        y += 2.0 * REM + PADDING;

        let mut element = Element::new(self.width, y)?;
        element.push(RenderItem::Box(
            BoxRenderInfo::filled(Rect::new(0.0, 0.0, self.width, y), Color::WHITE).with_radius(8.0),
        ));
        element.extend(items);
        tracing::debug!(width = self.width, height = y, rows = body_row, "checklist region laid out");
        Ok(element)
    }
}

struct TableLayout {
    x: f64,
    width: f64,
}

impl TableLayout {
    fn new(x: f64, width: f64) -> Self {
        Self { x, width }
    }

    fn columns(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        let mut left = self.x;
        CHECKLIST_COLUMNS.iter().map(move |col| {
            let w = self.width * col.width_percent as f64 / 100.0;
            let start = left;
            left += w;
            (start, w)
        })
    }

    fn cell(bounds: Rect, fill: Option<Color>, role: StyleRole) -> RenderItem {
        RenderItem::Box(BoxRenderInfo {
            bounds,
            fill,
            stroke: Some(Color::BLACK),
            stroke_width: 1.0,
            corner_radius: 0.0,
            role,
        })
    }

    fn header_row(&self, items: &mut Vec<RenderItem>, y: f64) -> f64 {
        let style = TextStyle::new(0.95 * REM, 1.2)
            .bold()
            .color(Color::WHITE)
            .role(StyleRole::HeaderText);
        let mut cells = Vec::new();
        let mut height: f64 = 0.0;
        for ((x, w), col) in self.columns().zip(CHECKLIST_COLUMNS.iter()) {
            let lines = wrap(col.header, w - 2.0 * CELL_PADDING, style.font_size);
            let (runs, h) = text_block(&lines, x + CELL_PADDING, y + CELL_PADDING, w, style, Align::Left);
            height = height.max(h);
            cells.push((x, w, runs));
        }
        let row_height = height + 2.0 * CELL_PADDING;
        for (x, w, runs) in cells {
            items.push(Self::cell(Rect::new(x, y, w, row_height), Some(HEADER_BLUE), StyleRole::HeaderCell));
            items.extend(runs);
        }
        y + row_height
    }

    fn stripe(&self, items: &mut Vec<RenderItem>, y: f64, height: f64, body_row: usize) {
        if body_row % 2 == 0 {
            items.push(RenderItem::Box(
                BoxRenderInfo::filled(Rect::new(self.x, y, self.width, height), STRIPE)
                    .with_role(StyleRole::StripedRow),
            ));
        }
    }

    fn section_row(&self, items: &mut Vec<RenderItem>, y: f64, name: &str, body_row: usize) -> f64 {
        let style = TextStyle::new(0.9 * REM, 1.2)
            .bold()
            .color(INK)
            .role(StyleRole::SectionText);
        let lines = wrap(name, self.width - 2.0 * CELL_PADDING, style.font_size);
        let (runs, h) = text_block(&lines, self.x + CELL_PADDING, y + CELL_PADDING, self.width, style, Align::Left);
        let row_height = h + 2.0 * CELL_PADDING;
        self.stripe(items, y, row_height, body_row);
        items.push(Self::cell(
            Rect::new(self.x, y, self.width, row_height),
            Some(Color::WHITE),
            StyleRole::SectionHeader,
        ));
        items.extend(runs);
        y + row_height
    }

    fn item_row(
        &self,
        items: &mut Vec<RenderItem>,
        y: f64,
        text_cells: [&str; 3],
        response: &str,
        body_row: usize,
    ) -> f64 {
        let styles = [
            TextStyle::new(REM, 1.2).color(INK),
            TextStyle::new(0.85 * REM, 1.6).bold().color(INK),
            TextStyle::new(0.85 * REM, 1.6).color(BODY),
        ];
        let columns: Vec<(f64, f64)> = self.columns().collect();
        let mut content = Vec::new();
        let mut height: f64 = 0.0;

        for ((text, style), (x, w)) in text_cells.iter().zip(styles).zip(columns.iter().copied()) {
            let lines = wrap(text, w - 2.0 * CELL_PADDING, style.font_size);
            let (runs, h) = text_block(&lines, x + CELL_PADDING, y + CELL_PADDING, w, style, Align::Left);
            height = height.max(h);
            content.extend(runs);
        }

        // Response field
        let (field_x, field_w) = columns[3];
        let field_text = if response.is_empty() {
            TextStyle::new(0.9 * REM, 1.2).color(PLACEHOLDER)
        } else {
            TextStyle::new(0.9 * REM, 1.2)
        };
        let field_height = field_text.line_px() + 2.0 * FIELD_PADDING + 2.0;
        height = height.max(field_height);
        let field_bounds = Rect::new(
            field_x + CELL_PADDING,
            y + CELL_PADDING,
            field_w - 2.0 * CELL_PADDING,
            field_height,
        );
        content.push(RenderItem::Box(
            BoxRenderInfo::filled(field_bounds, Color::WHITE)
                .with_stroke(FIELD_BORDER, 1.0)
                .with_radius(4.0)
                .with_role(StyleRole::TextField),
        ));
        let shown = if response.is_empty() { PLACEHOLDER_TEXT } else { response };
        let lines = vec![shown.to_string()];
        let (runs, _) = text_block(
            &lines,
            field_bounds.x + FIELD_PADDING + 1.0,
            field_bounds.y + FIELD_PADDING + 1.0,
            field_bounds.width,
            field_text,
            Align::Left,
        );
        content.extend(runs);

        let row_height = height + 2.0 * CELL_PADDING;
        self.stripe(items, y, row_height, body_row);
        for (x, w) in columns {
            items.push(Self::cell(Rect::new(x, y, w, row_height), None, StyleRole::Plain));
        }
        items.extend(content);
        y + row_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::abstract_checklist;
    use render_model::Surface;

    fn render(responses: &ChecklistResponses) -> Element {
        ChecklistView::default().render(abstract_checklist(), responses).unwrap()
    }

    #[test]
    fn test_region_has_width_and_grows_with_content() {
        let element = render(&ChecklistResponses::new());
        assert_eq!(element.width, 1336.0);
        // 19 rows at no less than 2rem padding each
        assert!(element.height > 19.0 * 2.0 * REM);
    }

    #[test]
    fn test_narrow_view_is_taller() {
        let wide = render(&ChecklistResponses::new());
        let narrow = ChecklistView { width: 800.0 }
            .render(abstract_checklist(), &ChecklistResponses::new())
            .unwrap();
        assert!(narrow.height > wide.height);
    }

    #[test]
    fn test_response_replaces_placeholder() {
        let mut responses = ChecklistResponses::new();
        responses.set("3a", "p. 7");
        let element = render(&responses);
        let texts: Vec<&str> = element
            .items()
            .iter()
            .filter_map(|i| match i {
                RenderItem::GlyphRun(run) => Some(run.text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"p. 7"));
        assert_eq!(texts.iter().filter(|t| **t == PLACEHOLDER_TEXT).count(), 15);
    }

    #[test]
    fn test_print_sheet_whitens_header_only_when_marked() {
        let element = render(&ChecklistResponses::new());
        let header = element
            .items()
            .iter()
            .find_map(|i| match i {
                RenderItem::Box(b) if b.role == StyleRole::HeaderCell => Some(b.clone()),
                _ => None,
            })
            .unwrap();

        let mut surface = Surface::with_target(element);
        surface.insert_style_sheet(print_style_sheet());
        assert_eq!(surface.computed_box_style(&header).fill, Some(HEADER_BLUE));

        surface.target_mut().unwrap().add_class(PRINT_CLASS);
        assert_eq!(surface.computed_box_style(&header).fill, Some(Color::WHITE));
    }

    #[test]
    fn test_even_body_rows_are_striped() {
        let element = render(&ChecklistResponses::new());
        let stripes = element
            .items()
            .iter()
            .filter(|i| i.role() == StyleRole::StripedRow)
            .count();
        // 19 body rows: 3 section rows plus 16 items
        assert_eq!(stripes, 9);
    }
}
