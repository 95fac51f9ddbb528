//! Export settings
//!
//! Capture profiles, codec parameters and PDF metadata, persisted as a
//! camelCase JSON document. Missing keys take their defaults.

use crate::page::PageSetup;
use crate::paginate::SinglePageAlign;
use crate::pdf::PdfExportOptions;
use crate::Result;
use render_model::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How one kind of region is captured and paged
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureProfile {
    /// Oversampling factor applied before rasterization
    pub scale: f64,
    pub page: PageSetup,
    /// Placement of an image that fits on a single page
    #[serde(default = "default_align")]
    pub single_page_align: AlignSetting,
}

/// Serialisable form of [`SinglePageAlign`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlignSetting {
    #[default]
    Center,
    Top,
}

impl From<AlignSetting> for SinglePageAlign {
    fn from(a: AlignSetting) -> Self {
        match a {
            AlignSetting::Center => SinglePageAlign::Center,
            AlignSetting::Top => SinglePageAlign::Top,
        }
    }
}

fn default_align() -> AlignSetting {
    AlignSetting::Center
}

impl CaptureProfile {
    /// Landscape letter at 2x
    pub fn checklist() -> Self {
        Self {
            scale: 2.0,
            page: PageSetup::letter_landscape(),
            single_page_align: AlignSetting::Center,
        }
    }

    /// Portrait letter at 2.5x
    pub fn diagram() -> Self {
        Self {
            scale: 2.5,
            page: PageSetup::letter_portrait(),
            single_page_align: AlignSetting::Center,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSettings {
    pub checklist: CaptureProfile,
    pub diagram: CaptureProfile,
    /// JPEG quality, 1-100
    pub jpeg_quality: u8,
    /// Wait after a style mutation before capturing
    pub stabilization_delay_ms: u64,
    /// Substituted for transparency in captures
    pub background: String,
    /// Whether region images from another origin are captured
    pub allow_cross_origin: bool,
    /// Width of the embedded diagram image in Word output
    pub docx_image_width_px: u32,
    pub pdf: PdfExportOptions,
    pub output_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            checklist: CaptureProfile::checklist(),
            diagram: CaptureProfile::diagram(),
            jpeg_quality: 95,
            stabilization_delay_ms: 100,
            background: "#ffffff".to_string(),
            allow_cross_origin: true,
            docx_image_width_px: 600,
            pdf: PdfExportOptions::default(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl ExportSettings {
    pub fn stabilization_delay(&self) -> Duration {
        Duration::from_millis(self.stabilization_delay_ms)
    }

    /// Parsed background colour; unparseable values fall back to white
    pub fn background_color(&self) -> Color {
        match Color::from_hex(&self.background) {
            Some(c) => Color::rgb(c.r, c.g, c.b),
            None => {
                tracing::warn!(background = %self.background, "invalid background colour, using white");
                Color::WHITE
            }
        }
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }
}

/// Loads and saves [`ExportSettings`] at a fixed path
pub struct SettingsManager {
    settings_path: PathBuf,
    current: ExportSettings,
}

impl SettingsManager {
    pub fn new(settings_path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: settings_path.into(),
            current: ExportSettings::default(),
        }
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Load settings from disk; a missing file yields defaults and a
    /// malformed one is logged and replaced by defaults
    pub fn load_sync(&mut self) -> Result<&ExportSettings> {
        self.current = if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            match serde_json::from_str::<ExportSettings>(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(
                        path = %self.settings_path.display(),
                        "Failed to parse settings file, using defaults: {}",
                        e
                    );
                    ExportSettings::default()
                }
            }
        } else {
            ExportSettings::default()
        };
        Ok(&self.current)
    }

    pub fn save_sync(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    pub fn get(&self) -> &ExportSettings {
        &self.current
    }

    pub fn update_sync(&mut self, settings: ExportSettings) -> Result<()> {
        self.current = settings;
        self.save_sync()
    }

    pub fn into_settings(self) -> ExportSettings {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Orientation;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = ExportSettings::default();

        assert_eq!(settings.checklist.scale, 2.0);
        assert_eq!(settings.checklist.page.orientation, Orientation::Landscape);
        assert_eq!(settings.diagram.scale, 2.5);
        assert_eq!(settings.diagram.page.orientation, Orientation::Portrait);
        assert_eq!(settings.checklist.page.margin_mm, 10.0);
        assert_eq!(settings.jpeg_quality, 95);
        assert_eq!(settings.stabilization_delay(), Duration::from_millis(100));
        assert_eq!(settings.background_color(), Color::WHITE);
        assert_eq!(settings.docx_image_width_px, 600);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let settings: ExportSettings = serde_json::from_str(r#"{"jpegQuality": 80}"#).unwrap();
        assert_eq!(settings.jpeg_quality, 80);
        assert_eq!(settings.diagram, CaptureProfile::diagram());
    }

    #[test]
    fn test_background_fallback() {
        let settings = ExportSettings {
            background: "not-a-colour".into(),
            ..ExportSettings::default()
        };
        assert_eq!(settings.background_color(), Color::WHITE);

        let settings = ExportSettings {
            background: "#00000000".into(),
            ..ExportSettings::default()
        };
        // Alpha is dropped; the background is always opaque
        assert_eq!(settings.background_color(), Color::BLACK);
    }

    #[test]
    fn test_settings_manager_load_save_sync() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("export.json");
        let mut manager = SettingsManager::new(&path);

        assert_eq!(manager.load_sync().unwrap(), &ExportSettings::default());

        let mut changed = ExportSettings::default();
        changed.stabilization_delay_ms = 0;
        changed.diagram.scale = 3.0;
        manager.update_sync(changed).unwrap();

        let mut manager2 = SettingsManager::new(&path);
        let loaded = manager2.load_sync().unwrap();
        assert_eq!(loaded.stabilization_delay_ms, 0);
        assert_eq!(loaded.diagram.scale, 3.0);
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("export.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut manager = SettingsManager::new(&path);
        assert_eq!(manager.load_sync().unwrap(), &ExportSettings::default());
    }
}
