//! Finished artifacts and the save trigger
//!
//! An artifact is handed to a sink only after it is fully assembled; a
//! sink never sees partial output.

use crate::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Every file the export pages can produce. The names are fixed and do
/// not depend on any user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    ChecklistPdf,
    ChecklistDocx,
    DiagramPdf,
    DiagramJpg,
    DiagramDocx,
}

pub const DOCX_MEDIA_TYPE: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

impl ArtifactKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            ArtifactKind::ChecklistPdf => "chart-abstract-checklist.pdf",
            ArtifactKind::ChecklistDocx => "chart-abstract-checklist.docx",
            ArtifactKind::DiagramPdf => "chart-methodological-diagram.pdf",
            ArtifactKind::DiagramJpg => "chart-methodological-diagram.jpg",
            ArtifactKind::DiagramDocx => "chart-methodological-diagram.docx",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            ArtifactKind::ChecklistPdf | ArtifactKind::DiagramPdf => "application/pdf",
            ArtifactKind::DiagramJpg => "image/jpeg",
            ArtifactKind::ChecklistDocx | ArtifactKind::DiagramDocx => DOCX_MEDIA_TYPE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(kind: ArtifactKind, bytes: Vec<u8>) -> Self {
        Self { kind, bytes }
    }

    pub fn file_name(&self) -> &'static str {
        self.kind.file_name()
    }
}

/// Where a saved artifact ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReceipt {
    pub file_name: String,
    pub len: usize,
    pub location: Option<PathBuf>,
}

/// The save trigger
pub trait ArtifactSink {
    fn save(&self, artifact: Artifact) -> Result<ArtifactReceipt>;
}

impl<S: ArtifactSink + ?Sized> ArtifactSink for &S {
    fn save(&self, artifact: Artifact) -> Result<ArtifactReceipt> {
        (**self).save(artifact)
    }
}

/// Writes artifacts into a directory under their fixed names.
///
/// Bytes go to a temporary file in the same directory that is renamed
/// over the target once complete, so a failed write leaves no file.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for DirectorySink {
    fn save(&self, artifact: Artifact) -> Result<ArtifactReceipt> {
        std::fs::create_dir_all(&self.dir)?;
        let target = self.dir.join(artifact.file_name());

        let mut temp = tempfile::NamedTempFile::new_in(&self.dir)?;
        temp.write_all(&artifact.bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(&target).map_err(|e| e.error)?;

        tracing::info!(
            file = artifact.file_name(),
            bytes = artifact.bytes.len(),
            path = %target.display(),
            "artifact saved"
        );
        Ok(ArtifactReceipt {
            file_name: artifact.file_name().to_string(),
            len: artifact.bytes.len(),
            location: Some(target),
        })
    }
}

/// Keeps artifacts in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    saved: Mutex<Vec<Artifact>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artifacts(&self) -> Vec<Artifact> {
        self.saved.lock().map(|saved| saved.clone()).unwrap_or_default()
    }

    pub fn get(&self, kind: ArtifactKind) -> Option<Artifact> {
        self.artifacts().into_iter().rev().find(|a| a.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.saved.lock().map(|saved| saved.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ArtifactSink for MemorySink {
    fn save(&self, artifact: Artifact) -> Result<ArtifactReceipt> {
        let receipt = ArtifactReceipt {
            file_name: artifact.file_name().to_string(),
            len: artifact.bytes.len(),
            location: None,
        };
        // A poisoned list still accepts pushes
        let mut saved = self.saved.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        saved.push(artifact);
        Ok(receipt)
    }
}
