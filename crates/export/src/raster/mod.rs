//! Rasterizer adapter
//!
//! Turns the mounted region of a [`Surface`] into one bitmap at a fixed
//! oversampling scale. The bitmap is always opaque: the configured
//! background is laid down before any item is painted.

mod canvas;
mod software;

pub use software::SoftwareRasterizer;

use image::RgbaImage;
use render_model::{Color, Surface};
use thiserror::Error;

/// Largest edge a capture may have, in device pixels
pub const MAX_CANVAS_EDGE: u32 = 32_767;
/// Largest area a capture may have, in device pixels
pub const MAX_CANVAS_AREA: u64 = 268_435_456;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("No region is mounted")]
    NotMounted,

    #[error("Invalid capture scale: {0}")]
    InvalidScale(f64),

    #[error("Capture of {width}x{height} exceeds canvas limits")]
    TooLarge { width: u64, height: u64 },

    #[error("Rasterization failed: {0}")]
    Failed(String),
}

pub type Result<T> = std::result::Result<T, RasterError>;

/// Parameters of a single capture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    pub scale: f64,
    /// Substituted for transparency
    pub background: Color,
    pub allow_cross_origin: bool,
}

impl CaptureOptions {
    pub fn new(scale: f64) -> Self {
        Self {
            scale,
            background: Color::WHITE,
            allow_cross_origin: true,
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_cross_origin(mut self, allow: bool) -> Self {
        self.allow_cross_origin = allow;
        self
    }
}

/// Converts a mounted region into a bitmap of
/// `(extent.width * scale, extent.height * scale)` pixels, where the
/// extent is the region's on-screen size after its container transform.
pub trait Rasterizer {
    fn rasterize(&self, surface: &Surface, options: &CaptureOptions) -> Result<RgbaImage>;
}

impl<R: Rasterizer + ?Sized> Rasterizer for &R {
    fn rasterize(&self, surface: &Surface, options: &CaptureOptions) -> Result<RgbaImage> {
        (**self).rasterize(surface, options)
    }
}

/// Device size of a capture, checked against canvas limits
pub fn output_dimensions(surface: &Surface, scale: f64) -> Result<(u32, u32)> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(RasterError::InvalidScale(scale));
    }
    let (width, height) = surface.capture_extent().ok_or(RasterError::NotMounted)?;
    let w = ((width * scale).round() as u64).max(1);
    let h = ((height * scale).round() as u64).max(1);
    if w > MAX_CANVAS_EDGE as u64 || h > MAX_CANVAS_EDGE as u64 || w * h > MAX_CANVAS_AREA {
        return Err(RasterError::TooLarge { width: w, height: h });
    }
    Ok((w as u32, h as u32))
}
