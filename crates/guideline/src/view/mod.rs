//! Region views
//!
//! Builders that lay guideline content out as a capture [`Element`]:
//! block boxes stacked top to bottom, text wrapped at a fixed character
//! advance, all coordinates in CSS pixels.
//!
//! [`Element`]: render_model::Element

pub mod checklist;
pub mod diagram;

use render_model::{Color, GlyphRun, RenderItem, StyleRole};

/// Root font size (1rem)
pub const REM: f64 = 16.0;

#[derive(Debug, Clone, Copy)]
pub(crate) struct TextStyle {
    pub font_size: f64,
    pub line_height: f64,
    pub bold: bool,
    pub color: Color,
    pub role: StyleRole,
}

impl TextStyle {
    pub fn new(font_size: f64, line_height: f64) -> Self {
        Self {
            font_size,
            line_height,
            bold: false,
            color: Color::BLACK,
            role: StyleRole::Plain,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn role(mut self, role: StyleRole) -> Self {
        self.role = role;
        self
    }

    pub fn line_px(&self) -> f64 {
        self.font_size * self.line_height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Align {
    Left,
    Center,
}

/// Wrap text to lines that fit `max_width` pixels
pub(crate) fn wrap(text: &str, max_width: f64, font_size: f64) -> Vec<String> {
    let columns = (max_width / GlyphRun::char_advance(font_size)).floor().max(1.0) as usize;
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        lines.extend(textwrap::wrap(paragraph, columns).into_iter().map(|l| l.into_owned()));
    }
    lines
}

/// Place wrapped lines starting at `top`; returns the runs and the block height
pub(crate) fn text_block(
    lines: &[String],
    x: f64,
    top: f64,
    width: f64,
    style: TextStyle,
    align: Align,
) -> (Vec<RenderItem>, f64) {
    let line_px = style.line_px();
    let mut items = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let run_width = line.chars().count() as f64 * GlyphRun::char_advance(style.font_size);
        let run_x = match align {
            Align::Left => x,
            Align::Center => x + ((width - run_width) / 2.0).max(0.0),
        };
        // Half-leading above the em box, ascent of 0.8em to the baseline
        let baseline = top + i as f64 * line_px + (line_px - style.font_size) / 2.0 + style.font_size * 0.8;
        items.push(RenderItem::GlyphRun(GlyphRun {
            text: line.clone(),
            font_size: style.font_size,
            bold: style.bold,
            color: style.color,
            x: run_x,
            y: baseline,
            role: style.role,
        }));
    }
    (items, lines.len() as f64 * line_px)
}
