//! Abstract checklist page

use export::docx::{TableColumn, TableSection, TableSource};
use export::raster::Rasterizer;
use export::{ArtifactKind, ArtifactSink, DocumentSource, ExportOutcome, ExportPipeline, PrintStyleScope};
use guideline::view::checklist::{print_style_sheet, ChecklistView, PRINT_CLASS};
use guideline::{
    abstract_checklist, ChecklistResponses, CHECKLIST_COLUMNS, CHECKLIST_SUBTITLE, CHECKLIST_TITLE,
};
use render_model::Surface;

pub struct AbstractChecklistPage {
    surface: Surface,
    responses: ChecklistResponses,
    view: ChecklistView,
}

impl Default for AbstractChecklistPage {
    fn default() -> Self {
        Self::new()
    }
}

impl AbstractChecklistPage {
    /// A page whose checklist region is not mounted yet
    pub fn new() -> Self {
        Self {
            surface: Surface::new(),
            responses: ChecklistResponses::new(),
            view: ChecklistView::default(),
        }
    }

    pub fn with_responses(mut self, responses: ChecklistResponses) -> Self {
        self.responses = responses;
        self
    }

    /// Lay the checklist out into the surface
    pub fn mount(&mut self) -> guideline::Result<()> {
        let element = self.view.render(abstract_checklist(), &self.responses)?;
        self.surface.mount(element);
        Ok(())
    }

    pub fn unmount(&mut self) {
        self.surface.unmount();
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn responses(&self) -> &ChecklistResponses {
        &self.responses
    }

    /// Record a page number; a mounted region is laid out again
    pub fn set_response(&mut self, item_number: &str, value: &str) -> guideline::Result<()> {
        self.responses.set(item_number, value);
        if self.surface.is_mounted() {
            self.mount()?;
        }
        Ok(())
    }

    /// "Save as PDF": print styling, settle, capture, landscape pages
    pub async fn save_as_pdf<R: Rasterizer, S: ArtifactSink>(
        &mut self,
        pipeline: &ExportPipeline<R, S>,
    ) -> export::Result<ExportOutcome> {
        if !self.surface.is_mounted() {
            tracing::warn!("checklist region not mounted, PDF export skipped");
            return Ok(ExportOutcome::Skipped);
        }
        let settings = pipeline.settings();
        let profile = settings.checklist;
        let options = settings.pdf.clone().with_title(CHECKLIST_TITLE);

        // Restored when the scope drops, whatever the outcome
        let scope = PrintStyleScope::apply(&mut self.surface, print_style_sheet(), PRINT_CLASS);
        tokio::time::sleep(settings.stabilization_delay()).await;
        pipeline.export_pdf(&scope, &profile, ArtifactKind::ChecklistPdf, &options)
    }

    /// "Download Blank Word Document": the checklist as a table, no capture
    pub fn download_word<R: Rasterizer, S: ArtifactSink>(
        &self,
        pipeline: &ExportPipeline<R, S>,
    ) -> export::Result<ExportOutcome> {
        let source = checklist_table_source();
        pipeline.export_document(DocumentSource::Table(&source), ArtifactKind::ChecklistDocx)
    }
}

/// The checklist as a sectioned table: label, number, description and an
/// empty page-number cell per item
pub fn checklist_table_source() -> TableSource {
    TableSource {
        title: CHECKLIST_TITLE.to_string(),
        subtitle: Some(CHECKLIST_SUBTITLE.to_string()),
        columns: CHECKLIST_COLUMNS
            .iter()
            .map(|c| TableColumn {
                header: c.header.to_string(),
                width_percent: c.width_percent as f64,
            })
            .collect(),
        sections: abstract_checklist()
            .iter()
            .map(|section| TableSection {
                name: section.name.to_string(),
                rows: section
                    .items
                    .iter()
                    .map(|item| {
                        vec![
                            item.label.to_string(),
                            item.number.to_string(),
                            item.description.to_string(),
                            String::new(),
                        ]
                    })
                    .collect(),
            })
            .collect(),
    }
}
