//! Export pipeline
//!
//! capture -> paginate -> render bands -> assemble -> save. Every stage is
//! synchronous; callers own the style mutations and settle delay that
//! precede a capture. An artifact reaches the sink only after assembly
//! succeeded, so a failure anywhere produces no file.

use crate::artifact::{Artifact, ArtifactKind, ArtifactReceipt, ArtifactSink};
use crate::band::render_pages;
use crate::docx::{image_document, table_document, TableSource};
use crate::encode::{encode_jpeg, encode_png};
use crate::paginate::{paginate_for, PagePlan};
use crate::pdf::{PdfDocumentWriter, PdfExportOptions};
use crate::raster::{CaptureOptions, Rasterizer};
use crate::settings::{CaptureProfile, ExportSettings};
use crate::Result;
use image::RgbaImage;
use render_model::Surface;

pub const SVG_NOTICE: &str = "SVG export coming soon! Use PDF or JPG for now.";

/// What an export request ended in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved(ArtifactReceipt),
    /// The capture target was not mounted; nothing was produced
    Skipped,
    /// Nothing was attempted; the message is for the user
    Notice(String),
}

impl ExportOutcome {
    pub fn receipt(&self) -> Option<&ArtifactReceipt> {
        match self {
            ExportOutcome::Saved(receipt) => Some(receipt),
            _ => None,
        }
    }
}

/// Input of a word-processor export
pub enum DocumentSource<'a> {
    /// Structured table, no rasterization
    Table(&'a TableSource),
    /// One capture embedded under a title
    Image {
        surface: &'a Surface,
        profile: &'a CaptureProfile,
        title: &'a str,
    },
}

pub struct ExportPipeline<R, S> {
    rasterizer: R,
    sink: S,
    settings: ExportSettings,
}

impl<R: Rasterizer, S: ArtifactSink> ExportPipeline<R, S> {
    pub fn new(rasterizer: R, sink: S, settings: ExportSettings) -> Self {
        Self {
            rasterizer,
            sink,
            settings,
        }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn capture_options(&self, profile: &CaptureProfile) -> CaptureOptions {
        CaptureOptions::new(profile.scale)
            .with_background(self.settings.background_color())
            .with_cross_origin(self.settings.allow_cross_origin)
    }

    /// Rasterize the mounted region; `None` when nothing is mounted
    pub fn capture(&self, surface: &Surface, profile: &CaptureProfile) -> Result<Option<RgbaImage>> {
        if !surface.is_mounted() {
            tracing::warn!("capture target not mounted, export skipped");
            return Ok(None);
        }
        let bitmap = self.rasterizer.rasterize(surface, &self.capture_options(profile))?;
        tracing::debug!(
            width = bitmap.width(),
            height = bitmap.height(),
            scale = profile.scale,
            "region captured"
        );
        Ok(Some(bitmap))
    }

    /// Band geometry for a bitmap under a profile's page setup
    pub fn plan(&self, bitmap_width: u32, bitmap_height: u32, profile: &CaptureProfile) -> Result<PagePlan> {
        paginate_for(bitmap_width, bitmap_height, &profile.page, profile.single_page_align.into())
    }

    fn save(&self, kind: ArtifactKind, bytes: Vec<u8>) -> Result<ExportOutcome> {
        let receipt = self.sink.save(Artifact::new(kind, bytes))?;
        Ok(ExportOutcome::Saved(receipt))
    }

    /// Multi-page PDF, one band per page
    pub fn export_pdf(
        &self,
        surface: &Surface,
        profile: &CaptureProfile,
        kind: ArtifactKind,
        options: &PdfExportOptions,
    ) -> Result<ExportOutcome> {
        tracing::info!(file = kind.file_name(), "PDF export started");
        let Some(bitmap) = self.capture(surface, profile)? else {
            return Ok(ExportOutcome::Skipped);
        };
        let plan = self.plan(bitmap.width(), bitmap.height(), profile)?;
        tracing::info!(
            pages = plan.page_count(),
            image_height_mm = plan.image_height,
            "capture paginated"
        );
        let pages = render_pages(&bitmap, &plan, &profile.page);
        let bytes = PdfDocumentWriter::new(options.clone()).write_to_bytes(&pages)?;
        self.save(kind, bytes)
    }

    /// The full bitmap as one JPEG, no pagination
    pub fn export_jpeg(&self, surface: &Surface, profile: &CaptureProfile, kind: ArtifactKind) -> Result<ExportOutcome> {
        tracing::info!(file = kind.file_name(), "JPEG export started");
        let Some(bitmap) = self.capture(surface, profile)? else {
            return Ok(ExportOutcome::Skipped);
        };
        let bytes = encode_jpeg(&bitmap, self.settings.jpeg_quality())?;
        self.save(kind, bytes)
    }

    pub fn export_document(&self, source: DocumentSource<'_>, kind: ArtifactKind) -> Result<ExportOutcome> {
        tracing::info!(file = kind.file_name(), "Word export started");
        let bytes = match source {
            DocumentSource::Table(table) => table_document(table)?,
            DocumentSource::Image { surface, profile, title } => {
                let Some(bitmap) = self.capture(surface, profile)? else {
                    return Ok(ExportOutcome::Skipped);
                };
                let png = encode_png(&bitmap)?;
                image_document(
                    title,
                    png,
                    bitmap.width(),
                    bitmap.height(),
                    self.settings.docx_image_width_px,
                )?
            }
        };
        self.save(kind, bytes)
    }

    /// Vector output is not available
    pub fn export_svg(&self) -> ExportOutcome {
        tracing::info!("SVG export requested");
        ExportOutcome::Notice(SVG_NOTICE.to_string())
    }
}
