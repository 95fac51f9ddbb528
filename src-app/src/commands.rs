//! Command handlers behind the CLI
//!
//! Each handler builds a pipeline over the software rasterizer and a
//! directory sink, mounts the page and runs one export.

use crate::pages::{AbstractChecklistPage, DiagramPage};
use anyhow::Context;
use export::raster::SoftwareRasterizer;
use export::{DirectorySink, ExportOutcome, ExportPipeline, ExportSettings};
use guideline::{ChecklistResponses, DiagramForm};
use std::path::Path;

/// Output format of the diagram page
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DiagramFormat {
    Pdf,
    Jpg,
    Docx,
    Svg,
}

fn pipeline(settings: ExportSettings) -> ExportPipeline<SoftwareRasterizer, DirectorySink> {
    let sink = DirectorySink::new(settings.output_dir.clone());
    ExportPipeline::new(SoftwareRasterizer::new(), sink, settings)
}

fn read_json(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Checklist PDF, with page numbers filled in from an optional JSON map
pub async fn checklist_pdf(settings: ExportSettings, responses: Option<&Path>) -> anyhow::Result<ExportOutcome> {
    let responses = match responses {
        Some(path) => ChecklistResponses::from_json(&read_json(path)?)
            .with_context(|| format!("invalid responses in {}", path.display()))?,
        None => ChecklistResponses::new(),
    };
    let pipeline = pipeline(settings);
    let mut page = AbstractChecklistPage::new().with_responses(responses);
    page.mount().context("failed to lay out the checklist")?;
    page.save_as_pdf(&pipeline).await.context("checklist PDF export failed")
}

/// Blank checklist as a Word table
pub fn checklist_docx(settings: ExportSettings) -> anyhow::Result<ExportOutcome> {
    let pipeline = pipeline(settings);
    AbstractChecklistPage::new()
        .download_word(&pipeline)
        .context("checklist Word export failed")
}

/// Diagram in the requested format. `form` is a JSON file of form values;
/// `assignments` are `key=value` pairs applied on top of it.
pub async fn diagram(
    settings: ExportSettings,
    format: DiagramFormat,
    form: Option<&Path>,
    assignments: &[String],
) -> anyhow::Result<ExportOutcome> {
    let form = match form {
        Some(path) => DiagramForm::from_json(&read_json(path)?)
            .with_context(|| format!("invalid diagram form in {}", path.display()))?,
        None => DiagramForm::new(),
    };
    let pipeline = pipeline(settings);
    let mut page = DiagramPage::with_form(form);
    for assignment in assignments {
        page.apply_assignment(assignment)
            .with_context(|| format!("cannot apply '{}'", assignment))?;
    }
    page.mount().context("failed to lay out the diagram")?;

    let outcome = match format {
        DiagramFormat::Pdf => page.save_as_pdf(&pipeline).await,
        DiagramFormat::Jpg => page.download_jpg(&pipeline).await,
        DiagramFormat::Docx => page.download_word(&pipeline).await,
        DiagramFormat::Svg => Ok(page.download_svg(&pipeline)),
    };
    outcome.with_context(|| format!("diagram {:?} export failed", format))
}

/// One line for the user
pub fn describe(outcome: &ExportOutcome) -> String {
    match outcome {
        ExportOutcome::Saved(receipt) => match &receipt.location {
            Some(path) => format!("Saved {} ({} bytes)", path.display(), receipt.len),
            None => format!("Saved {} ({} bytes)", receipt.file_name, receipt.len),
        },
        ExportOutcome::Skipped => "Nothing to export: the region is not mounted".to_string(),
        ExportOutcome::Notice(message) => message.clone(),
    }
}
