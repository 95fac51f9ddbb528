//! Page-level export behaviour: capture-time mutations, their cleanup,
//! the settle delay and the fixed output names

use chart_export::pages::{AbstractChecklistPage, DiagramPage};
use export::raster::{CaptureOptions, RasterError, Rasterizer, SoftwareRasterizer};
use export::{
    ArtifactKind, DirectorySink, ExportError, ExportOutcome, ExportPipeline, ExportSettings, MemorySink, SVG_NOTICE,
};
use guideline::view::checklist::PRINT_CLASS;
use image::RgbaImage;
use render_model::{Surface, Transform};
use std::sync::Mutex;
use std::time::Duration;

/// Surface state seen by the rasterizer at capture time
#[derive(Debug, Clone, Copy, PartialEq)]
struct Observed {
    print_class: bool,
    style_sheets: usize,
    transform: Transform,
}

/// Records what it sees, then optionally fails
#[derive(Default)]
struct SpyRasterizer {
    seen: Mutex<Vec<Observed>>,
    fail: bool,
}

impl SpyRasterizer {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn seen(&self) -> Vec<Observed> {
        self.seen.lock().unwrap().clone()
    }
}

impl Rasterizer for SpyRasterizer {
    fn rasterize(&self, surface: &Surface, options: &CaptureOptions) -> Result<RgbaImage, RasterError> {
        self.seen.lock().unwrap().push(Observed {
            print_class: surface.target().map(|el| el.has_class(PRINT_CLASS)).unwrap_or(false),
            style_sheets: surface.style_sheet_count(),
            transform: surface.container_transform(),
        });
        if self.fail {
            return Err(RasterError::Failed("canvas tainted".into()));
        }
        SoftwareRasterizer::new().rasterize(surface, options)
    }
}

/// Small captures keep the tests quick; geometry is unaffected
fn settings() -> ExportSettings {
    let mut settings = ExportSettings::default();
    settings.checklist.scale = 0.5;
    settings.diagram.scale = 0.5;
    settings
}

fn assert_clean_checklist(page: &AbstractChecklistPage) {
    let surface = page.surface();
    assert_eq!(surface.style_sheet_count(), 0);
    assert!(!surface.target().unwrap().has_class(PRINT_CLASS));
}

#[tokio::test]
async fn checklist_print_styling_is_present_during_capture_only() {
    let pipeline = ExportPipeline::new(SpyRasterizer::default(), MemorySink::new(), settings());
    let mut page = AbstractChecklistPage::new();
    page.mount().unwrap();

    let outcome = page.save_as_pdf(&pipeline).await.unwrap();
    assert_eq!(outcome.receipt().unwrap().file_name, "chart-abstract-checklist.pdf");

    let seen = pipeline.rasterizer().seen();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].print_class);
    assert_eq!(seen[0].style_sheets, 1);
    assert_clean_checklist(&page);
}

#[tokio::test]
async fn checklist_cleanup_survives_capture_failure() {
    let dir = tempfile::TempDir::new().unwrap();
    let pipeline = ExportPipeline::new(SpyRasterizer::failing(), DirectorySink::new(dir.path()), settings());
    let mut page = AbstractChecklistPage::new();
    page.mount().unwrap();

    let err = page.save_as_pdf(&pipeline).await.unwrap_err();
    assert!(matches!(err, ExportError::Raster(RasterError::Failed(_))));
    assert_eq!(pipeline.rasterizer().seen().len(), 1);
    assert_clean_checklist(&page);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn diagram_captures_at_identity_and_restores_zoom() {
    let pipeline = ExportPipeline::new(SpyRasterizer::default(), MemorySink::new(), settings());
    let mut page = DiagramPage::new();
    page.mount().unwrap();
    page.set_zoom(0.8);

    page.download_jpg(&pipeline).await.unwrap();
    page.save_as_pdf(&pipeline).await.unwrap();
    page.download_word(&pipeline).await.unwrap();

    let seen = pipeline.rasterizer().seen();
    assert_eq!(seen.len(), 3);
    assert!(seen.iter().all(|o| o.transform.is_identity() && !o.print_class));
    assert_eq!(page.zoom(), 0.8);
}

#[tokio::test]
async fn diagram_zoom_restored_after_failure() {
    let pipeline = ExportPipeline::new(SpyRasterizer::failing(), MemorySink::new(), settings());
    let mut page = DiagramPage::new();
    page.mount().unwrap();
    page.set_zoom(1.25);

    assert!(page.download_jpg(&pipeline).await.is_err());
    assert!(page.download_word(&pipeline).await.is_err());
    assert_eq!(page.zoom(), 1.25);
    assert!(pipeline.sink().is_empty());
}

#[tokio::test(start_paused = true)]
async fn capture_waits_for_the_settle_delay() {
    let pipeline = ExportPipeline::new(SoftwareRasterizer::new(), MemorySink::new(), settings());
    let mut page = DiagramPage::new();
    page.mount().unwrap();

    let start = tokio::time::Instant::now();
    page.download_jpg(&pipeline).await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(100));
}

#[tokio::test]
async fn unmounted_pages_are_skipped() {
    let pipeline = ExportPipeline::new(SpyRasterizer::default(), MemorySink::new(), settings());
    let mut checklist = AbstractChecklistPage::new();
    let mut diagram = DiagramPage::new();

    assert_eq!(checklist.save_as_pdf(&pipeline).await.unwrap(), ExportOutcome::Skipped);
    assert_eq!(diagram.save_as_pdf(&pipeline).await.unwrap(), ExportOutcome::Skipped);
    assert_eq!(diagram.download_jpg(&pipeline).await.unwrap(), ExportOutcome::Skipped);
    assert_eq!(diagram.download_word(&pipeline).await.unwrap(), ExportOutcome::Skipped);
    assert!(pipeline.rasterizer().seen().is_empty());
    assert!(pipeline.sink().is_empty());
}

#[test]
fn blank_checklist_word_needs_no_mount_or_capture() {
    let pipeline = ExportPipeline::new(SpyRasterizer::failing(), MemorySink::new(), settings());
    let page = AbstractChecklistPage::new();
    let outcome = page.download_word(&pipeline).unwrap();
    assert_eq!(outcome.receipt().unwrap().file_name, "chart-abstract-checklist.docx");
    assert!(pipeline.rasterizer().seen().is_empty());
}

#[test]
fn svg_is_a_notice() {
    let pipeline = ExportPipeline::new(SpyRasterizer::default(), MemorySink::new(), settings());
    let page = DiagramPage::new();
    assert_eq!(page.download_svg(&pipeline), ExportOutcome::Notice(SVG_NOTICE.to_string()));
    assert!(pipeline.sink().is_empty());
}

#[tokio::test]
async fn file_name_ignores_diagram_title() {
    let pipeline = ExportPipeline::new(SoftwareRasterizer::new(), MemorySink::new(), settings());
    let mut page = DiagramPage::new();
    page.set_field("diagramTitle", "My ../../study: v2").unwrap();
    page.mount().unwrap();

    let outcome = page.save_as_pdf(&pipeline).await.unwrap();
    assert_eq!(outcome.receipt().unwrap().file_name, "chart-methodological-diagram.pdf");
    let pdf = pipeline.sink().get(ArtifactKind::DiagramPdf).unwrap().bytes;
    assert!(String::from_utf8_lossy(&pdf).contains("/Title (My ../../study: v2)"));
}

#[tokio::test]
async fn concurrent_exports_do_not_interfere() {
    let pipeline = ExportPipeline::new(SoftwareRasterizer::new(), MemorySink::new(), settings());
    let mut checklist = AbstractChecklistPage::new();
    let mut diagram = DiagramPage::new();
    checklist.mount().unwrap();
    diagram.mount().unwrap();
    diagram.set_zoom(0.5);

    let (a, b) = tokio::join!(checklist.save_as_pdf(&pipeline), diagram.download_jpg(&pipeline));
    assert!(a.unwrap().receipt().is_some());
    assert!(b.unwrap().receipt().is_some());

    assert_eq!(pipeline.sink().len(), 2);
    assert_clean_checklist(&checklist);
    assert_eq!(diagram.zoom(), 0.5);
}

#[tokio::test]
async fn directory_sink_writes_contract_names() {
    let dir = tempfile::TempDir::new().unwrap();
    let pipeline = ExportPipeline::new(SoftwareRasterizer::new(), DirectorySink::new(dir.path()), settings());
    let mut checklist = AbstractChecklistPage::new();
    let mut diagram = DiagramPage::new();
    checklist.mount().unwrap();
    diagram.mount().unwrap();

    checklist.save_as_pdf(&pipeline).await.unwrap();
    checklist.download_word(&pipeline).unwrap();
    diagram.save_as_pdf(&pipeline).await.unwrap();
    diagram.download_jpg(&pipeline).await.unwrap();
    diagram.download_word(&pipeline).await.unwrap();

    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "chart-abstract-checklist.docx",
            "chart-abstract-checklist.pdf",
            "chart-methodological-diagram.docx",
            "chart-methodological-diagram.jpg",
            "chart-methodological-diagram.pdf",
        ]
    );

    let jpg = std::fs::read(dir.path().join("chart-methodological-diagram.jpg")).unwrap();
    assert_eq!(&jpg[..2], &[0xFF, 0xD8]);
}
