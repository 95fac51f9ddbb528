//! In-process rasterizer for region display lists

use super::canvas::Canvas;
use super::{output_dimensions, CaptureOptions, RasterError, Rasterizer, Result};
use image::RgbaImage;
use quick_xml::escape::escape;
use render_model::{Color, GlyphRun, RenderItem, Surface};
use resvg::usvg::{self, fontdb};
use std::fmt::Write as _;
use std::sync::{Arc, OnceLock};

/// Family list tried for every glyph run; the generic name falls through
/// to whatever sans-serif face the font database resolves.
const FONT_FAMILIES: &str = "'DejaVu Sans', 'Liberation Sans', Arial, Helvetica, sans-serif";

fn system_fonts() -> Arc<fontdb::Database> {
    static FONTS: OnceLock<Arc<fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            if db.is_empty() {
                tracing::warn!("no system fonts found, captured text will be blank");
            } else {
                tracing::debug!(faces = db.len(), "system fonts loaded");
            }
            Arc::new(db)
        })
        .clone()
}

/// Paints a region's display list with the surface's style sheets applied.
///
/// Shapes go straight to a tiny-skia pixmap. Consecutive glyph runs are
/// gathered into one SVG text layer and drawn by resvg, so glyphs are
/// shaped and rasterized from real fonts while painting order is kept.
#[derive(Debug, Clone)]
pub struct SoftwareRasterizer {
    fonts: Arc<fontdb::Database>,
}

impl Default for SoftwareRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SoftwareRasterizer {
    /// Rasterizer using the fonts installed on this machine
    pub fn new() -> Self {
        Self { fonts: system_fonts() }
    }

    pub fn with_fonts(fonts: Arc<fontdb::Database>) -> Self {
        Self { fonts }
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    fn paint_text(&self, canvas: &mut Canvas, runs: &[(&GlyphRun, Color)], width: f64, height: f64) -> Result<()> {
        if runs.is_empty() {
            return Ok(());
        }
        let svg = text_layer_svg(runs, width, height);
        let mut options = usvg::Options::default();
        options.fontdb = self.fonts.clone();
        let tree = usvg::Tree::from_str(&svg, &options)
            .map_err(|e| RasterError::Failed(format!("text layer: {}", e)))?;
        let transform = canvas.transform();
        resvg::render(&tree, transform, &mut canvas.as_mut());
        Ok(())
    }
}

fn svg_color(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// One `<text>` per run, stretched to the run's laid-out width
fn text_layer_svg(runs: &[(&GlyphRun, Color)], width: f64, height: f64) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    );
    for (run, color) in runs {
        let text = run.text.trim_end();
        if text.trim().is_empty() || color.a == 0 {
            continue;
        }
        let _ = write!(
            svg,
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}" fill="{}" fill-opacity="{}" xml:space="preserve" textLength="{}" lengthAdjust="spacingAndGlyphs">{}</text>"#,
            run.x,
            run.y,
            FONT_FAMILIES,
            run.font_size,
            if run.bold { "bold" } else { "normal" },
            svg_color(*color),
            color.a as f64 / 255.0,
            text.chars().count() as f64 * GlyphRun::char_advance(run.font_size),
            escape(text),
        );
    }
    svg.push_str("</svg>");
    svg
}

impl Rasterizer for SoftwareRasterizer {
    fn rasterize(&self, surface: &Surface, options: &CaptureOptions) -> Result<RgbaImage> {
        let (width, height) = output_dimensions(surface, options.scale)?;
        let Some(element) = surface.target() else {
            return Err(RasterError::NotMounted);
        };

        // Content is painted at its on-screen size, transform included
        let scale = options.scale * surface.container_transform().scale;
        let mut canvas = Canvas::new(width, height, scale, options.background)?;
        let bounds = element.bounds();
        let mut pending_text: Vec<(&GlyphRun, Color)> = Vec::new();
        let mut skipped = 0usize;

        for item in element.items() {
            if let RenderItem::GlyphRun(run) = item {
                pending_text.push((run, surface.computed_text_color(run)));
                continue;
            }
            self.paint_text(&mut canvas, &pending_text, bounds.width, bounds.height)?;
            pending_text.clear();

            match item {
                RenderItem::Box(info) => {
                    let style = surface.computed_box_style(info);
                    if let Some(fill) = style.fill {
                        canvas.fill_rect(info.bounds, info.corner_radius, fill);
                    }
                    if let Some(stroke) = style.stroke {
                        canvas.stroke_rect(info.bounds, info.corner_radius, info.stroke_width, stroke);
                    }
                }
                RenderItem::Line(line) => canvas.stroke_line(line.from, line.to, line.width, line.color),
                RenderItem::Polygon(poly) => canvas.fill_polygon(&poly.points, poly.fill),
                RenderItem::Image(img) => {
                    if img.cross_origin && !options.allow_cross_origin {
                        skipped += 1;
                        continue;
                    }
                    canvas.draw_pixels(img.bounds, img.pixel_width, img.pixel_height, &img.rgba);
                }
                RenderItem::GlyphRun(_) => {}
            }
        }
        self.paint_text(&mut canvas, &pending_text, bounds.width, bounds.height)?;

        if skipped > 0 {
            tracing::debug!(skipped, "cross-origin images left out of capture");
        }
        tracing::debug!(width, height, scale = options.scale, "region rasterized");
        canvas.into_image()
    }
}
