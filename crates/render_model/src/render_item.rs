//! Render item types

use serde::{Deserialize, Serialize};

/// A rectangle in CSS pixel coordinates, relative to the region origin
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether a point lies inside the rectangle (right/bottom exclusive)
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(x, y, self.right().max(other.right()) - x, self.bottom().max(other.bottom()) - y)
    }
}

/// A point in CSS pixel coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            3 => {
                let mut out = [0u8; 3];
                for (slot, c) in out.iter_mut().zip(digits.chars()) {
                    let v = c.to_digit(16)? as u8;
                    *slot = v * 17;
                }
                Some(Color::rgb(out[0], out[1], out[2]))
            }
            6 => Some(Color::rgb(
                channel(digits.get(0..2)?)?,
                channel(digits.get(2..4)?)?,
                channel(digits.get(4..6)?)?,
            )),
            8 => Some(Color::rgba(
                channel(digits.get(0..2)?)?,
                channel(digits.get(2..4)?)?,
                channel(digits.get(4..6)?)?,
                channel(digits.get(6..8)?)?,
            )),
            _ => None,
        }
    }

    /// `RRGGBB` without the leading hash, as OOXML expects
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Which print-style rules may restyle an item.
///
/// Roles stand in for the selectors a style sheet would match
/// (`th`, `tbody tr:nth-of-type(even)`, `.section-header`, `input`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleRole {
    #[default]
    Plain,
    HeaderCell,
    HeaderText,
    StripedRow,
    SectionHeader,
    SectionText,
    TextField,
}

/// A filled and/or stroked box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxRenderInfo {
    pub bounds: Rect,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub corner_radius: f64,
    #[serde(default)]
    pub role: StyleRole,
}

impl BoxRenderInfo {
    pub fn filled(bounds: Rect, fill: Color) -> Self {
        Self {
            bounds,
            fill: Some(fill),
            stroke: None,
            stroke_width: 0.0,
            corner_radius: 0.0,
            role: StyleRole::Plain,
        }
    }

    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn with_role(mut self, role: StyleRole) -> Self {
        self.role = role;
        self
    }
}

/// A run of text on a single line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlyphRun {
    /// The text to render
    pub text: String,
    /// Font size in CSS pixels
    pub font_size: f64,
    /// Whether bold
    pub bold: bool,
    /// Text color
    pub color: Color,
    /// Position (baseline start)
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub role: StyleRole,
}

impl GlyphRun {
    /// Advance width of one character cell
    pub fn char_advance(font_size: f64) -> f64 {
        font_size * 0.5
    }

    /// Approximate width of the run
    pub fn width(&self) -> f64 {
        self.text.chars().count() as f64 * Self::char_advance(self.font_size)
    }

    pub fn bounds(&self) -> Rect {
        let ascent = self.font_size * 0.8;
        Rect::new(self.x, self.y - ascent, self.width(), self.font_size)
    }
}

/// A straight stroked segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRenderInfo {
    pub from: Point,
    pub to: Point,
    pub color: Color,
    pub width: f64,
}

/// A filled closed polygon (arrowheads)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolygonRenderInfo {
    pub points: Vec<Point>,
    pub fill: Color,
}

/// Embedded raster content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRenderInfo {
    pub bounds: Rect,
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Straight RGBA, row-major
    pub rgba: Vec<u8>,
    /// Content served from another origin
    pub cross_origin: bool,
}

/// A render item in a region's display list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RenderItem {
    Box(BoxRenderInfo),
    GlyphRun(GlyphRun),
    Line(LineRenderInfo),
    Polygon(PolygonRenderInfo),
    Image(ImageRenderInfo),
}

impl RenderItem {
    pub fn role(&self) -> StyleRole {
        match self {
            RenderItem::Box(b) => b.role,
            RenderItem::GlyphRun(g) => g.role,
            _ => StyleRole::Plain,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            RenderItem::Box(b) => b.bounds,
            RenderItem::GlyphRun(g) => g.bounds(),
            RenderItem::Line(l) => {
                let half = l.width / 2.0;
                let x = l.from.x.min(l.to.x) - half;
                let y = l.from.y.min(l.to.y) - half;
                Rect::new(
                    x,
                    y,
                    (l.from.x - l.to.x).abs() + l.width,
                    (l.from.y - l.to.y).abs() + l.width,
                )
            }
            RenderItem::Polygon(p) => {
                let mut iter = p.points.iter();
                let Some(first) = iter.next() else {
                    return Rect::default();
                };
                let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
                for pt in iter {
                    min_x = min_x.min(pt.x);
                    min_y = min_y.min(pt.y);
                    max_x = max_x.max(pt.x);
                    max_y = max_y.max(pt.y);
                }
                Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
            }
            RenderItem::Image(i) => i.bounds,
        }
    }
}
