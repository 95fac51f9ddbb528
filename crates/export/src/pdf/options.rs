//! PDF export options

use serde::{Deserialize, Serialize};

/// PDF header version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PdfVersion {
    #[default]
    #[serde(rename = "1.4")]
    V1_4,
    #[serde(rename = "1.7")]
    V1_7,
}

impl PdfVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            PdfVersion::V1_4 => "1.4",
            PdfVersion::V1_7 => "1.7",
        }
    }
}

/// How page images are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageEncoding {
    /// Lossless RGB samples, Flate compressed
    #[default]
    Flate,
    /// Baseline JPEG (DCTDecode) at the given quality
    Jpeg { quality: u8 },
}

/// Options for PDF export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PdfExportOptions {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    /// Compress content streams
    pub compress: bool,
    pub version: PdfVersion,
    pub image_encoding: ImageEncoding,
    /// Stamp CreationDate in the info dictionary
    pub include_creation_date: bool,
}

impl Default for PdfExportOptions {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            subject: None,
            compress: true,
            version: PdfVersion::default(),
            image_encoding: ImageEncoding::default(),
            include_creation_date: true,
        }
    }
}

impl PdfExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_image_encoding(mut self, encoding: ImageEncoding) -> Self {
        self.image_encoding = encoding;
        self
    }

    /// Leave out the creation date so output is byte-for-byte repeatable
    pub fn without_creation_date(mut self) -> Self {
        self.include_creation_date = false;
        self
    }
}
