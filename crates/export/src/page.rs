//! Physical page geometry

use crate::error::{ExportError, Result};
use serde::{Deserialize, Serialize};

pub const MM_PER_INCH: f64 = 25.4;
pub const POINTS_PER_INCH: f64 = 72.0;

/// Millimetres to PDF points
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * POINTS_PER_INCH / MM_PER_INCH
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    Letter,
    A4,
}

impl PageSize {
    /// Portrait (width, height) in millimetres
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match self {
            PageSize::Letter => (215.9, 279.4),
            PageSize::A4 => (210.0, 297.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page size, orientation and a uniform margin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSetup {
    pub size: PageSize,
    pub orientation: Orientation,
    pub margin_mm: f64,
}

impl PageSetup {
    pub fn new(size: PageSize, orientation: Orientation, margin_mm: f64) -> Self {
        Self {
            size,
            orientation,
            margin_mm,
        }
    }

    pub fn letter_portrait() -> Self {
        Self::new(PageSize::Letter, Orientation::Portrait, 10.0)
    }

    pub fn letter_landscape() -> Self {
        Self::new(PageSize::Letter, Orientation::Landscape, 10.0)
    }

    pub fn width_mm(&self) -> f64 {
        let (w, h) = self.size.dimensions_mm();
        match self.orientation {
            Orientation::Portrait => w,
            Orientation::Landscape => h,
        }
    }

    pub fn height_mm(&self) -> f64 {
        let (w, h) = self.size.dimensions_mm();
        match self.orientation {
            Orientation::Portrait => h,
            Orientation::Landscape => w,
        }
    }

    pub fn available_width(&self) -> f64 {
        self.width_mm() - 2.0 * self.margin_mm
    }

    pub fn available_height(&self) -> f64 {
        self.height_mm() - 2.0 * self.margin_mm
    }

    /// Margins must leave a positive printable area
    pub fn validate(&self) -> Result<()> {
        if !self.margin_mm.is_finite() || self.margin_mm < 0.0 {
            return Err(ExportError::InvalidGeometry(format!(
                "margin must be non-negative, got {}",
                self.margin_mm
            )));
        }
        if self.available_width() <= 0.0 || self.available_height() <= 0.0 {
            return Err(ExportError::InvalidGeometry(format!(
                "margin {}mm leaves no printable area",
                self.margin_mm
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_landscape_area() {
        let page = PageSetup::letter_landscape();
        assert_eq!(page.width_mm(), 279.4);
        assert_eq!(page.height_mm(), 215.9);
        assert!((page.available_width() - 259.4).abs() < 1e-9);
        assert!((page.available_height() - 195.9).abs() < 1e-9);
    }

    #[test]
    fn test_mm_to_pt() {
        assert!((mm_to_pt(215.9) - 612.0).abs() < 1e-9);
        assert!((mm_to_pt(279.4) - 792.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate_margin() {
        assert!(PageSetup::letter_portrait().validate().is_ok());
        assert!(PageSetup::new(PageSize::Letter, Orientation::Portrait, 120.0).validate().is_err());
        assert!(PageSetup::new(PageSize::A4, Orientation::Portrait, -1.0).validate().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&PageSetup::letter_landscape()).unwrap();
        assert_eq!(json, r#"{"size":"letter","orientation":"landscape","marginMm":10.0}"#);
    }
}
