//! Band rendering: crop each planned band out of the full bitmap

use crate::paginate::PagePlan;
use crate::pdf::PageImage;
use crate::page::PageSetup;
use crate::encode::flatten;
use image::{imageops, Rgb, RgbImage, RgbaImage};

/// The pixel rows of band `index` as their own bitmap, full width.
///
/// A band with no whole rows becomes a single white row so the page still
/// carries an image without repeating source pixels.
pub fn crop_band(bitmap: &RgbaImage, plan: &PagePlan, index: usize) -> RgbImage {
    let rows = plan.pixel_rows(index);
    if rows.is_empty() {
        return RgbImage::from_pixel(bitmap.width(), 1, Rgb([255, 255, 255]));
    }
    let band = imageops::crop_imm(bitmap, 0, rows.start, bitmap.width(), rows.end - rows.start).to_image();
    flatten(&band)
}

/// One page per placement, each carrying its cropped band
pub fn render_pages(bitmap: &RgbaImage, plan: &PagePlan, page: &PageSetup) -> Vec<PageImage> {
    plan.placements
        .iter()
        .enumerate()
        .map(|(i, placement)| PageImage {
            page_width_mm: page.width_mm(),
            page_height_mm: page.height_mm(),
            x_mm: placement.x,
            y_mm: placement.y,
            width_mm: placement.width,
            height_mm: placement.height,
            image: if plan.is_single_page() {
                flatten(bitmap)
            } else {
                crop_band(bitmap, plan, i)
            },
        })
        .collect()
}
