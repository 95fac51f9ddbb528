//! Methodological flow diagram region

use super::{text_block, wrap, Align, TextStyle, REM};
use crate::diagram::DiagramForm;
use crate::error::Result;
use render_model::{
    BoxRenderInfo, Color, Element, LineRenderInfo, Point, PolygonRenderInfo, Rect, RenderItem,
};

const INK: Color = Color::rgb(0x1A, 0x1F, 0x2E);
const DETAIL_FILL: Color = Color::rgb(0xA7, 0xCB, 0xFF);

const MAX_WIDTH: f64 = 720.0;
const PADDING: f64 = 1.5 * REM;
const ROW_MAX_WIDTH: f64 = 680.0;
const ROW_GAP: f64 = 0.6 * REM;
const ARROW_WIDTH: f64 = 640.0;
const ARROW_HEIGHT: f64 = 70.0;
const ARROW_MARGIN: f64 = 0.25 * REM;
const BORDER: f64 = 2.0;
const BOX_MIN_HEIGHT: f64 = 65.0;

/// Which branches a split arrow draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Branches {
    right: bool,
    /// Stem continues to a downward arrowhead
    down: bool,
}

struct Section {
    header: Vec<String>,
    branches: Branches,
    left: Vec<String>,
    right: Option<Vec<String>>,
}

fn count(label: &str, value: &Option<String>) -> String {
    format!("{} (n={})", label, DiagramForm::display(value))
}

fn text(label: &str, value: &Option<String>) -> String {
    format!("{}: {}", label, DiagramForm::display(value))
}

fn sections(form: &DiagramForm) -> Vec<Section> {
    let both = Branches { right: true, down: true };
    vec![
        Section {
            header: vec![
                count("Total generative AI-driven chatbot(s)", &form.total_chatbots),
                text("Name(s) and version identifier(s)", &form.chatbot_names),
            ],
            branches: both,
            left: vec![
                count("Base model", &form.base_model),
                count("Novel base model", &form.novel_base_model),
                count("Tuned model", &form.tuned_model),
                count("Fine-tuned model", &form.fine_tuned_model),
            ],
            right: Some(vec![
                count("Open-source", &form.open_source),
                count("Closed-source/proprietary", &form.closed_source),
                count("Subscription", &form.subscription),
                count("API", &form.api),
                count("Other", &form.other),
            ]),
        },
        Section {
            header: vec!["Prompt engineering".to_string()],
            branches: both,
            left: vec![
                count("Prompt engineers", &form.prompt_engineers),
                count("Investigator-derived", &form.investigator_derived),
                count("Clinician-derived", &form.clinician_derived),
                count("Patient-derived", &form.patient_derived),
            ],
            right: Some(vec![
                count("Prompt sources", &form.prompt_sources),
                count("Total prompts", &form.total_prompts),
                count("Follow-up prompts", &form.follow_up_prompts),
            ]),
        },
        Section {
            header: vec!["Query".to_string()],
            branches: Branches { right: false, down: true },
            left: vec![
                text("Date(s) of query (mm/dd/yyyy)", &form.query_dates),
                count("Chat sessions", &form.chat_sessions),
                text("Location(s)", &form.locations),
                text("Language(s)", &form.languages),
            ],
            right: None,
        },
        Section {
            header: vec!["Performance evaluation".to_string()],
            branches: both,
            left: vec![
                count("Evaluators", &form.evaluators),
                count("Patient/public", &form.patient_public),
                count("Automated", &form.automated),
            ],
            right: Some(vec![
                count("Model output/responses", &form.model_output_responses),
                count("Valid", &form.valid),
                count("Missing/invalid", &form.missing_invalid),
            ]),
        },
        Section {
            header: vec!["Reproducibility".to_string()],
            branches: Branches { right: true, down: false },
            left: vec![count("Repeat queries", &form.repeat_queries)],
            right: Some(vec![
                text("Date(s) of query (mm/dd/yyyy)", &form.reproducibility_dates),
                text("Location(s)", &form.reproducibility_locations),
                count("Discrepancies", &form.discrepancies),
            ]),
        },
    ]
}

/// Lays out the diagram container
#[derive(Debug, Clone, Copy)]
pub struct DiagramView {
    /// Available width; the container never grows past 720px
    pub width: f64,
}

impl Default for DiagramView {
    fn default() -> Self {
        Self { width: MAX_WIDTH }
    }
}

impl DiagramView {
    pub fn render(&self, form: &DiagramForm) -> Result<Element> {
        let width = self.width.min(MAX_WIDTH);
        let inner = width - 2.0 * PADDING;
        let mut items = Vec::new();
        let mut y = PADDING;

        let title_style = TextStyle::new(1.05 * REM, 1.2).bold().color(INK);
        let lines = wrap(form.title(), inner, title_style.font_size);
        let (runs, h) = text_block(&lines, PADDING, y, inner, title_style, Align::Left);
        items.extend(runs);
        y += h + 1.2 * REM;

        let row_width = inner.min(ROW_MAX_WIDTH);
        let row_x = PADDING + (inner - row_width) / 2.0;
        let arrow_width = inner.min(ARROW_WIDTH);
        let arrow_x = PADDING + (inner - arrow_width) / 2.0;

        for section in sections(form) {
            y = header_box(&mut items, &section.header, PADDING, inner, y);

            let arrow_top = y + ARROW_MARGIN;
            split_arrow(&mut items, arrow_x, arrow_top, arrow_width, section.branches);

            // Rows pull up by the arrow height so the boxes sit beside the branches
            let row_top = arrow_top + ARROW_HEIGHT + ARROW_MARGIN - ARROW_HEIGHT;
            let row_bottom = detail_row(&mut items, &section, row_x, row_width, row_top);
            y = row_bottom.max(arrow_top + ARROW_HEIGHT) + 2.0;
        }
        y += PADDING;

        let mut element = Element::new(width, y)?;
        element.push(RenderItem::Box(BoxRenderInfo::filled(
            Rect::new(0.0, 0.0, width, y),
            Color::WHITE,
        )));
        element.extend(items);
        tracing::debug!(width, height = y, title = form.title(), "diagram region laid out");
        Ok(element)
    }
}

fn header_box(items: &mut Vec<RenderItem>, lines: &[String], x: f64, max_width: f64, top: f64) -> f64 {
    let style = TextStyle::new(0.9 * REM, 1.4).bold().color(INK);
    let padding = 0.75 * REM;
    let chrome = 2.0 * (padding + BORDER);
    let wrapped: Vec<String> = lines
        .iter()
        .flat_map(|l| wrap(l, max_width - chrome, style.font_size))
        .collect();
    let text_width = wrapped
        .iter()
        .map(|l| l.chars().count() as f64 * render_model::GlyphRun::char_advance(style.font_size))
        .fold(0.0, f64::max);

    // Shrink-wrapped and centred in the column
    let box_width = (text_width + chrome).min(max_width);
    let box_x = x + (max_width - box_width) / 2.0;
    let text_height = wrapped.len() as f64 * style.line_px();
    let box_height = (text_height + 2.0 * padding).max(BOX_MIN_HEIGHT) + 2.0 * BORDER;

    items.push(RenderItem::Box(
        BoxRenderInfo::filled(Rect::new(box_x, top, box_width, box_height), Color::WHITE)
            .with_stroke(Color::BLACK, BORDER)
            .with_radius(10.0),
    ));
    let text_top = top + (box_height - text_height) / 2.0;
    let (runs, _) = text_block(&wrapped, box_x + BORDER + padding, text_top, box_width - chrome, style, Align::Center);
    items.extend(runs);
    top + box_height
}

fn split_arrow(items: &mut Vec<RenderItem>, x: f64, top: f64, width: f64, branches: Branches) {
    // Drawn in a 640x70 view box stretched to the available width
    let sx = width / ARROW_WIDTH;
    let p = |vx: f64, vy: f64| Point::new(x + vx * sx, top + vy);
    let stroke = |from: Point, to: Point| {
        RenderItem::Line(LineRenderInfo {
            from,
            to,
            color: Color::BLACK,
            width: 2.5,
        })
    };
    let head = |points: [Point; 3]| {
        RenderItem::Polygon(PolygonRenderInfo {
            points: points.to_vec(),
            fill: Color::BLACK,
        })
    };

    let stem_end = if branches.down { ARROW_HEIGHT } else { 35.0 };
    items.push(stroke(p(320.0, 0.0), p(320.0, stem_end)));

    items.push(stroke(p(320.0, 35.0), p(220.0, 35.0)));
    items.push(head([p(220.0, 35.0), p(227.0, 32.0), p(227.0, 38.0)]));

    if branches.right {
        items.push(stroke(p(320.0, 35.0), p(420.0, 35.0)));
        items.push(head([p(420.0, 35.0), p(413.0, 32.0), p(413.0, 38.0)]));
    }
    if branches.down {
        items.push(head([p(320.0, 70.0), p(313.0, 63.0), p(327.0, 63.0)]));
    }
}

/// Lay out the detail row; returns its bottom edge
fn detail_row(items: &mut Vec<RenderItem>, section: &Section, x: f64, width: f64, top: f64) -> f64 {
    // grid-template-columns: 0.35fr auto 0.35fr with an empty middle track
    let column = 0.35 * (width - 2.0 * ROW_GAP);
    let left = detail_box(&section.left, column);
    let right = section.right.as_ref().map(|lines| detail_box(lines, column));
    let row_height = left.2.max(right.as_ref().map_or(0.0, |r| r.2));

    place_detail(items, left, x, top, column, row_height);
    if let Some(right) = right {
        place_detail(items, right, x + width - column, top, column, row_height);
    }
    top + row_height
}

type DetailBox = (Vec<String>, TextStyle, f64);

fn detail_box(lines: &[String], width: f64) -> DetailBox {
    let style = TextStyle::new(0.8 * REM, 1.4).color(INK);
    let content_width = width - 2.0 * (0.75 * REM + BORDER);
    let wrapped: Vec<String> = lines
        .iter()
        .flat_map(|l| wrap(l, content_width, style.font_size))
        .collect();
    let text_height = wrapped.len() as f64 * style.line_px();
    let height = (text_height + 2.0 * 0.65 * REM).max(BOX_MIN_HEIGHT) + 2.0 * BORDER;
    (wrapped, style, height)
}

fn place_detail(items: &mut Vec<RenderItem>, detail: DetailBox, x: f64, row_top: f64, width: f64, row_height: f64) {
    let (lines, style, height) = detail;
    // align-items: center within the row
    let top = row_top + (row_height - height) / 2.0;
    items.push(RenderItem::Box(
        BoxRenderInfo::filled(Rect::new(x, top, width, height), DETAIL_FILL).with_stroke(Color::BLACK, BORDER),
    ));
    let text_height = lines.len() as f64 * style.line_px();
    let text_top = top + (height - text_height) / 2.0;
    let (runs, _) = text_block(
        &lines,
        x + BORDER + 0.75 * REM,
        text_top,
        width - 2.0 * (0.75 * REM + BORDER),
        style,
        Align::Left,
    );
    items.extend(runs);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(element: &Element) -> Vec<String> {
        element
            .items()
            .iter()
            .filter_map(|i| match i {
                RenderItem::GlyphRun(run) => Some(run.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_blank_form_renders_spaces() {
        let element = DiagramView::default().render(&DiagramForm::new()).unwrap();
        let texts = texts(&element);
        assert!(texts.contains(&"Methodological Flow Diagram".to_string()));
        assert!(texts.contains(&"Base model (n= )".to_string()));
        assert!(texts.contains(&"Reproducibility".to_string()));
    }

    #[test]
    fn test_values_flow_into_boxes() {
        let mut form = DiagramForm::new();
        form.set("tunedModel", "2").unwrap();
        form.set("locations", "Toronto, Canada").unwrap();
        let texts = texts(&DiagramView::default().render(&form).unwrap());
        assert!(texts.contains(&"Tuned model (n=2)".to_string()));
        assert!(texts.contains(&"Location(s): Toronto, Canada".to_string()));
    }

    #[test]
    fn test_width_capped() {
        let element = DiagramView { width: 1200.0 }.render(&DiagramForm::new()).unwrap();
        assert_eq!(element.width, MAX_WIDTH);
    }

    #[test]
    fn test_arrowheads_per_section() {
        let element = DiagramView::default().render(&DiagramForm::new()).unwrap();
        let heads = element
            .items()
            .iter()
            .filter(|i| matches!(i, RenderItem::Polygon(_)))
            .count();
        // Three full splits (3 heads), query (left + down), reproducibility (left + right)
        assert_eq!(heads, 3 * 3 + 2 + 2);
    }

    #[test]
    fn test_long_values_grow_region() {
        let short = DiagramView::default().render(&DiagramForm::new()).unwrap();
        let mut form = DiagramForm::new();
        form.set("chatbotNames", "ChatGPT-4o (2024-05-13), Gemini 1.5 Pro, Claude 3 Opus, Llama 3 70B Instruct, Mixtral 8x22B, Command R+").unwrap();
        form.set("queryDates", "01/02/2024, 01/03/2024, 01/04/2024, 01/05/2024, 01/06/2024").unwrap();
        let long = DiagramView::default().render(&form).unwrap();
        assert!(long.height > short.height);
    }
}
