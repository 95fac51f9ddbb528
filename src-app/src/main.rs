//! CHART export - command-line entry point

use chart_export::commands::{self, DiagramFormat};
use chart_export::state::SettingsState;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chart-export", version, about = "Export the CHART abstract checklist and methodological diagram")]
struct Cli {
    /// Settings file (JSON); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory the exported files are written to
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Abstract checklist exports
    Checklist {
        #[command(subcommand)]
        action: ChecklistAction,
    },
    /// Methodological diagram exports
    Diagram {
        #[arg(value_enum)]
        format: DiagramFormat,

        /// JSON file of diagram form values
        #[arg(long)]
        form: Option<PathBuf>,

        /// Form field as key=value, e.g. --set totalChatbots=3
        #[arg(long = "set", value_name = "KEY=VALUE")]
        assignments: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ChecklistAction {
    /// Landscape PDF of the filled-in checklist
    Pdf {
        /// JSON map of item number to reported page
        #[arg(long)]
        responses: Option<PathBuf>,
    },
    /// Blank checklist as a Word table
    Docx,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let state = match &cli.config {
        Some(path) => SettingsState::load(path)?,
        None => SettingsState::in_memory(),
    };
    let mut settings = state.snapshot();
    if let Some(out) = cli.out {
        settings.output_dir = out;
    }
    tracing::info!(output_dir = %settings.output_dir.display(), "Starting CHART export");

    let outcome = match cli.command {
        Command::Checklist { action } => match action {
            ChecklistAction::Pdf { responses } => commands::checklist_pdf(settings, responses.as_deref()).await?,
            ChecklistAction::Docx => commands::checklist_docx(settings)?,
        },
        Command::Diagram {
            format,
            form,
            assignments,
        } => commands::diagram(settings, format, form.as_deref(), &assignments).await?,
    };

    println!("{}", commands::describe(&outcome));
    Ok(())
}
