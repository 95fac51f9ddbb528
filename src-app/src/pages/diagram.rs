//! Methodological diagram page

use export::raster::Rasterizer;
use export::{ArtifactKind, ArtifactSink, DocumentSource, ExportOutcome, ExportPipeline, TransformResetScope};
use guideline::view::diagram::DiagramView;
use guideline::DiagramForm;
use render_model::{Surface, Transform};

pub struct DiagramPage {
    form: DiagramForm,
    surface: Surface,
    view: DiagramView,
}

impl Default for DiagramPage {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagramPage {
    pub fn new() -> Self {
        Self::with_form(DiagramForm::new())
    }

    pub fn with_form(form: DiagramForm) -> Self {
        Self {
            form,
            surface: Surface::new(),
            view: DiagramView::default(),
        }
    }

    pub fn mount(&mut self) -> guideline::Result<()> {
        let element = self.view.render(&self.form)?;
        self.surface.mount(element);
        Ok(())
    }

    pub fn unmount(&mut self) {
        self.surface.unmount();
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn form(&self) -> &DiagramForm {
        &self.form
    }

    fn relayout(&mut self) -> guideline::Result<()> {
        if self.surface.is_mounted() {
            self.mount()?;
        }
        Ok(())
    }

    /// Update one form field by its key
    pub fn set_field(&mut self, key: &str, value: &str) -> guideline::Result<()> {
        self.form.set(key, value)?;
        self.relayout()
    }

    /// Apply a `key=value` assignment
    pub fn apply_assignment(&mut self, assignment: &str) -> guideline::Result<()> {
        self.form.apply_assignment(assignment)?;
        self.relayout()
    }

    pub fn reset_form(&mut self) -> guideline::Result<()> {
        self.form.reset();
        self.relayout()
    }

    /// Preview zoom on the container
    pub fn set_zoom(&mut self, scale: f64) {
        self.surface.set_container_transform(Transform::scale(scale));
    }

    pub fn zoom(&self) -> f64 {
        self.surface.container_transform().scale
    }

    fn check_mounted(&self, what: &str) -> bool {
        if !self.surface.is_mounted() {
            tracing::warn!(export = what, "diagram region not mounted, export skipped");
            return false;
        }
        true
    }

    /// "Save as PDF": portrait pages; the diagram title goes into the
    /// document info only
    pub async fn save_as_pdf<R: Rasterizer, S: ArtifactSink>(
        &mut self,
        pipeline: &ExportPipeline<R, S>,
    ) -> export::Result<ExportOutcome> {
        if !self.check_mounted("pdf") {
            return Ok(ExportOutcome::Skipped);
        }
        let settings = pipeline.settings();
        let profile = settings.diagram;
        let options = settings.pdf.clone().with_title(self.form.title());

        let scope = TransformResetScope::apply(&mut self.surface);
        tokio::time::sleep(settings.stabilization_delay()).await;
        pipeline.export_pdf(&scope, &profile, ArtifactKind::DiagramPdf, &options)
    }

    /// "Download as JPG": the whole capture, unpaginated
    pub async fn download_jpg<R: Rasterizer, S: ArtifactSink>(
        &mut self,
        pipeline: &ExportPipeline<R, S>,
    ) -> export::Result<ExportOutcome> {
        if !self.check_mounted("jpg") {
            return Ok(ExportOutcome::Skipped);
        }
        let settings = pipeline.settings();
        let profile = settings.diagram;

        let scope = TransformResetScope::apply(&mut self.surface);
        tokio::time::sleep(settings.stabilization_delay()).await;
        pipeline.export_jpeg(&scope, &profile, ArtifactKind::DiagramJpg)
    }

    /// "Download as Word": title paragraph above the captured diagram
    pub async fn download_word<R: Rasterizer, S: ArtifactSink>(
        &mut self,
        pipeline: &ExportPipeline<R, S>,
    ) -> export::Result<ExportOutcome> {
        if !self.check_mounted("docx") {
            return Ok(ExportOutcome::Skipped);
        }
        let settings = pipeline.settings();
        let profile = settings.diagram;
        let title = self.form.title().to_string();

        let scope = TransformResetScope::apply(&mut self.surface);
        tokio::time::sleep(settings.stabilization_delay()).await;
        pipeline.export_document(
            DocumentSource::Image {
                surface: &scope,
                profile: &profile,
                title: &title,
            },
            ArtifactKind::DiagramDocx,
        )
    }

    /// "Download as SVG" is not available yet
    pub fn download_svg<R: Rasterizer, S: ArtifactSink>(&self, pipeline: &ExportPipeline<R, S>) -> ExportOutcome {
        pipeline.export_svg()
    }
}
