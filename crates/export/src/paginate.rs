//! Paginator
//!
//! Fits a bitmap to the printable width of a page and, when the scaled
//! image is taller than the printable height, cuts it into horizontal
//! bands of at most one printable height each. Pure geometry.

use crate::error::{ExportError, Result};
use crate::page::PageSetup;
use std::ops::Range;

/// Vertical placement when the whole image fits on one page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinglePageAlign {
    /// Centre within the printable area
    #[default]
    Center,
    /// Place at the top margin
    Top,
}

/// One image placement on one output page; page units are millimetres,
/// source units are bitmap pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub src_y: f64,
    pub src_height: f64,
}

/// The ordered placements for a bitmap, one per page
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    pub image_width: f64,
    pub image_height: f64,
    pub bitmap_width: u32,
    pub bitmap_height: u32,
    pub placements: Vec<Placement>,
}

impl PagePlan {
    pub fn page_count(&self) -> usize {
        self.placements.len()
    }

    pub fn is_single_page(&self) -> bool {
        self.placements.len() == 1
    }

    /// Whole pixel rows of band `index`.
    ///
    /// Boundaries are rounded once and shared by neighbouring bands, so
    /// the ranges tile `0..bitmap_height` without gaps or overlap. A band
    /// thinner than half a row rounds to an empty range.
    pub fn pixel_rows(&self, index: usize) -> Range<u32> {
        let boundary = |i: usize| -> u32 {
            match self.placements.get(i) {
                Some(p) => (p.src_y.round() as u32).min(self.bitmap_height),
                None => self.bitmap_height,
            }
        };
        let start = boundary(index);
        start..boundary(index + 1).max(start)
    }
}

/// Compute placements for a bitmap on pages with the given printable area
pub fn paginate(
    bitmap_width: u32,
    bitmap_height: u32,
    available_width: f64,
    available_height: f64,
    margin: f64,
    align: SinglePageAlign,
) -> Result<PagePlan> {
    if bitmap_width == 0 || bitmap_height == 0 {
        return Err(ExportError::InvalidGeometry(format!(
            "bitmap must be non-empty, got {}x{}",
            bitmap_width, bitmap_height
        )));
    }
    if !(available_width > 0.0 && available_height > 0.0) {
        return Err(ExportError::InvalidGeometry(format!(
            "printable area must be positive, got {}x{}",
            available_width, available_height
        )));
    }

    let bmp_h = bitmap_height as f64;
    let image_width = available_width;
    let image_height = bmp_h * image_width / bitmap_width as f64;

    let mut placements = Vec::new();
    if image_height <= available_height {
        let y = match align {
            SinglePageAlign::Center => margin + (available_height - image_height) / 2.0,
            SinglePageAlign::Top => margin,
        };
        placements.push(Placement {
            x: margin,
            y,
            width: image_width,
            height: image_height,
            src_y: 0.0,
            src_height: bmp_h,
        });
    } else {
        let mut index = 0u32;
        loop {
            let position = index as f64 * available_height;
            if position >= image_height {
                break;
            }
            let page_image_height = available_height.min(image_height - position);
            placements.push(Placement {
                x: margin,
                y: margin,
                width: image_width,
                height: page_image_height,
                src_y: position / image_height * bmp_h,
                src_height: page_image_height / image_height * bmp_h,
            });
            index += 1;
        }
    }

    tracing::debug!(
        bitmap_width,
        bitmap_height,
        image_height,
        pages = placements.len(),
        "paginated"
    );

    Ok(PagePlan {
        image_width,
        image_height,
        bitmap_width,
        bitmap_height,
        placements,
    })
}

/// Paginate against a page setup's printable area
pub fn paginate_for(
    bitmap_width: u32,
    bitmap_height: u32,
    page: &PageSetup,
    align: SinglePageAlign,
) -> Result<PagePlan> {
    page.validate()?;
    paginate(
        bitmap_width,
        bitmap_height,
        page.available_width(),
        page.available_height(),
        page.margin_mm,
        align,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tall_bitmap_three_pages() {
        let plan = paginate(1200, 3000, 277.0, 277.0, 10.0, SinglePageAlign::Center).unwrap();
        assert_eq!(plan.image_width, 277.0);
        assert_eq!(plan.image_height, 692.5);
        assert_eq!(plan.page_count(), 3);

        let last = plan.placements[2];
        assert!((last.height - 138.5).abs() < 1e-9);
        for p in &plan.placements {
            assert_eq!((p.x, p.y, p.width), (10.0, 10.0, 277.0));
        }
        assert_eq!(plan.placements[0].height, 277.0);
        assert!((plan.placements[1].src_y - 1200.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_bitmap_single_centered_page() {
        // 1000x500 onto 400 wide: image is 200 tall, area is 260
        let plan = paginate(1000, 500, 400.0, 260.0, 10.0, SinglePageAlign::Center).unwrap();
        assert!(plan.is_single_page());
        let p = plan.placements[0];
        assert_eq!(p.height, 200.0);
        assert_eq!(p.y, 10.0 + (260.0 - 200.0) / 2.0);
        assert_eq!((p.src_y, p.src_height), (0.0, 500.0));
    }

    #[test]
    fn test_top_alignment() {
        let plan = paginate(1000, 500, 400.0, 260.0, 10.0, SinglePageAlign::Top).unwrap();
        assert_eq!(plan.placements[0].y, 10.0);
    }

    #[test]
    fn test_exact_fit_is_single_page() {
        let plan = paginate(100, 100, 200.0, 200.0, 0.0, SinglePageAlign::Center).unwrap();
        assert!(plan.is_single_page());
        assert_eq!(plan.placements[0].y, 0.0);
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_page() {
        // image height 600 over a 200 printable height
        let plan = paginate(100, 300, 200.0, 200.0, 5.0, SinglePageAlign::Center).unwrap();
        assert_eq!(plan.image_height, 600.0);
        assert_eq!(plan.page_count(), 3);
        assert!(plan.placements.iter().all(|p| p.height == 200.0));
    }

    #[test]
    fn test_pixel_rows_tile_bitmap() {
        let plan = paginate(1200, 3000, 277.0, 277.0, 10.0, SinglePageAlign::Center).unwrap();
        assert_eq!(plan.pixel_rows(0), 0..1200);
        assert_eq!(plan.pixel_rows(1), 1200..2400);
        assert_eq!(plan.pixel_rows(2), 2400..3000);
    }

    #[test]
    fn test_sub_pixel_band_has_no_rows() {
        // 3x2 onto 2mm: image is 1.333mm, the second band covers a third of a row
        let plan = paginate(3, 2, 2.0, 1.0, 0.0, SinglePageAlign::Center).unwrap();
        assert_eq!(plan.page_count(), 2);
        assert_eq!(plan.pixel_rows(0), 0..2);
        assert!(plan.pixel_rows(1).is_empty());
        assert_eq!(plan.pixel_rows(1).start, 2);
    }

    #[test]
    fn test_rejects_empty_bitmap() {
        assert!(paginate(0, 10, 100.0, 100.0, 0.0, SinglePageAlign::Center).is_err());
        assert!(paginate(10, 10, 0.0, 100.0, 0.0, SinglePageAlign::Center).is_err());
    }

    #[test]
    fn test_paginate_for_letter_portrait() {
        let page = PageSetup::letter_portrait();
        let plan = paginate_for(1800, 10000, &page, SinglePageAlign::Center).unwrap();
        let expected = (plan.image_height / page.available_height()).ceil() as usize;
        assert_eq!(plan.page_count(), expected);
    }
}
