//! Pixmap canvas
//!
//! Geometry arrives in CSS pixels; the canvas maps it to device pixels
//! with a uniform scale transform. Shapes are painted with tiny-skia,
//! anti-aliased, source-over.

use image::RgbaImage;
use render_model::{Color, Point, Rect};
use resvg::tiny_skia::{
    self, FillRule, FilterQuality, IntSize, Paint, PathBuilder, Pattern, Pixmap, PixmapMut, SpreadMode, Stroke,
    Transform,
};

use super::{RasterError, Result};

pub(crate) struct Canvas {
    pixmap: Pixmap,
    transform: Transform,
}

fn paint_for(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn sk_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(rect.x as f32, rect.y as f32, rect.width as f32, rect.height as f32)
}

/// Rectangle outline with circular corners
fn rounded_rect_path(rect: Rect, radius: f64) -> Option<tiny_skia::Path> {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0) as f32;
    if r <= 0.0 {
        return sk_rect(rect).map(PathBuilder::from_rect);
    }
    let (x, y) = (rect.x as f32, rect.y as f32);
    let (right, bottom) = (rect.right() as f32, rect.bottom() as f32);
    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.quad_to(right, y, right, y + r);
    pb.line_to(right, bottom - r);
    pb.quad_to(right, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.quad_to(x, bottom, x, bottom - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}

impl Canvas {
    pub fn new(width: u32, height: u32, scale: f64, background: Color) -> Result<Self> {
        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| RasterError::Failed(format!("cannot allocate a {}x{} pixmap", width, height)))?;
        pixmap.fill(tiny_skia::Color::from_rgba8(background.r, background.g, background.b, 255));
        Ok(Self {
            pixmap,
            transform: Transform::from_scale(scale as f32, scale as f32),
        })
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn as_mut(&mut self) -> PixmapMut<'_> {
        self.pixmap.as_mut()
    }

    /// The pixels as straight RGBA. The background is opaque, so
    /// premultiplied and straight values coincide.
    pub fn into_image(self) -> Result<RgbaImage> {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        RgbaImage::from_raw(width, height, self.pixmap.take())
            .ok_or_else(|| RasterError::Failed("pixmap size mismatch".to_string()))
    }

    pub fn fill_rect(&mut self, rect: Rect, radius: f64, color: Color) {
        if let Some(path) = rounded_rect_path(rect, radius) {
            self.pixmap
                .fill_path(&path, &paint_for(color), FillRule::Winding, self.transform, None);
        }
    }

    /// Border drawn inside the rectangle's edges
    pub fn stroke_rect(&mut self, rect: Rect, radius: f64, width: f64, color: Color) {
        if width <= 0.0 {
            return;
        }
        let half = width / 2.0;
        let inset = Rect::new(
            rect.x + half,
            rect.y + half,
            (rect.width - width).max(0.0),
            (rect.height - width).max(0.0),
        );
        if let Some(path) = rounded_rect_path(inset, (radius - half).max(0.0)) {
            let stroke = Stroke {
                width: width as f32,
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(&path, &paint_for(color), &stroke, self.transform, None);
        }
    }

    pub fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        if let Some(path) = pb.finish() {
            let stroke = Stroke {
                width: width.max(0.0) as f32,
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(&path, &paint_for(color), &stroke, self.transform, None);
        }
    }

    pub fn fill_polygon(&mut self, points: &[Point], color: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        if rest.len() < 2 {
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(first.x as f32, first.y as f32);
        for p in rest {
            pb.line_to(p.x as f32, p.y as f32);
        }
        pb.close();
        if let Some(path) = pb.finish() {
            self.pixmap
                .fill_path(&path, &paint_for(color), FillRule::EvenOdd, self.transform, None);
        }
    }

    /// Nearest-neighbour blit of straight RGBA pixels into a CSS rectangle
    pub fn draw_pixels(&mut self, rect: Rect, width: u32, height: u32, rgba: &[u8]) {
        let len = width as usize * height as usize * 4;
        if rgba.len() < len {
            return;
        }
        let Some(size) = IntSize::from_wh(width, height) else {
            return;
        };
        let premultiplied: Vec<u8> = rgba[..len]
            .chunks_exact(4)
            .flat_map(|px| {
                let a = px[3] as u32;
                let mul = |c: u8| ((c as u32 * a + 127) / 255) as u8;
                [mul(px[0]), mul(px[1]), mul(px[2]), px[3]]
            })
            .collect();
        let (Some(source), Some(target)) = (Pixmap::from_vec(premultiplied, size), sk_rect(rect)) else {
            return;
        };
        let placement = Transform::from_row(
            (rect.width / width as f64) as f32,
            0.0,
            0.0,
            (rect.height / height as f64) as f32,
            rect.x as f32,
            rect.y as f32,
        );
        let paint = Paint {
            shader: Pattern::new(
                source.as_ref(),
                SpreadMode::Pad,
                FilterQuality::Nearest,
                1.0,
                placement,
            ),
            anti_alias: false,
            ..Paint::default()
        };
        self.pixmap.fill_rect(target, &paint, self.transform, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(canvas: Canvas, x: u32, y: u32) -> [u8; 4] {
        canvas.into_image().unwrap().get_pixel(x, y).0
    }

    #[test]
    fn test_fill_rect_scaled() {
        let mut canvas = Canvas::new(20, 20, 2.0, Color::WHITE).unwrap();
        canvas.fill_rect(Rect::new(2.0, 2.0, 3.0, 3.0), 0.0, Color::BLACK);
        let image = canvas.into_image().unwrap();
        assert_eq!(image.get_pixel(4, 4).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(9, 9).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(10, 10).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(3, 3).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_rounded_corner_skipped() {
        let mut canvas = Canvas::new(20, 20, 1.0, Color::WHITE).unwrap();
        canvas.fill_rect(Rect::new(0.0, 0.0, 20.0, 20.0), 8.0, Color::BLACK);
        let image = canvas.into_image().unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(10, 10).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_stroke_leaves_interior() {
        let mut canvas = Canvas::new(10, 10, 1.0, Color::WHITE).unwrap();
        canvas.stroke_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0, 2.0, Color::BLACK);
        let image = canvas.into_image().unwrap();
        assert_eq!(image.get_pixel(0, 5).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(9, 5).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(5, 5).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_translucent_fill_stays_opaque() {
        let mut canvas = Canvas::new(4, 4, 1.0, Color::WHITE).unwrap();
        canvas.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), 0.0, Color::rgba(0, 0, 0, 128));
        let [r, g, b, a] = pixel(canvas, 2, 2);
        assert_eq!(a, 255);
        assert!((120..=135).contains(&r) && r == g && g == b);
    }

    #[test]
    fn test_polygon_fill() {
        let mut canvas = Canvas::new(10, 10, 1.0, Color::WHITE).unwrap();
        canvas.fill_polygon(
            &[Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(0.0, 10.0)],
            Color::BLACK,
        );
        let image = canvas.into_image().unwrap();
        assert_eq!(image.get_pixel(1, 1).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(8, 8).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_line() {
        let mut canvas = Canvas::new(10, 10, 1.0, Color::WHITE).unwrap();
        canvas.stroke_line(Point::new(5.0, 0.0), Point::new(5.0, 10.0), 2.0, Color::BLACK);
        let image = canvas.into_image().unwrap();
        assert_eq!(image.get_pixel(4, 5).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(5, 5).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(8, 5).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_pixels_scaled_into_rect() {
        let mut canvas = Canvas::new(8, 8, 2.0, Color::WHITE).unwrap();
        // 2x1 source: red then blue, stretched over 4x4 css px
        canvas.draw_pixels(Rect::new(0.0, 0.0, 4.0, 4.0), 2, 1, &[255, 0, 0, 255, 0, 0, 255, 255]);
        let image = canvas.into_image().unwrap();
        assert_eq!(image.get_pixel(1, 4).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(6, 4).0, [0, 0, 255, 255]);
    }
}
