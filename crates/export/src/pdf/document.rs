//! Document structure: info dictionary, media boxes, page tree nodes

use super::objects::{PdfDictionary, PdfObject};
use super::options::PdfExportOptions;

/// PDF document information
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    /// PDF date string, `D:YYYYMMDDHHmmSS`
    pub creation_date: Option<String>,
}

impl DocumentInfo {
    pub fn from_options(options: &PdfExportOptions) -> Self {
        Self {
            title: options.title.clone(),
            author: options.author.clone(),
            subject: options.subject.clone(),
            creator: Some("CHART guideline export".to_string()),
            producer: Some(concat!("chart-export ", env!("CARGO_PKG_VERSION")).to_string()),
            creation_date: options
                .include_creation_date
                .then(|| chrono::Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()),
        }
    }

    pub fn to_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::new();
        let fields = [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("Creator", &self.creator),
            ("Producer", &self.producer),
            ("CreationDate", &self.creation_date),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                dict.insert(key, value.as_str());
            }
        }
        dict
    }
}

/// Page dimensions in points, origin bottom-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaBox {
    pub width: f64,
    pub height: f64,
}

impl MediaBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn to_array(&self) -> PdfObject {
        PdfObject::Array(vec![
            PdfObject::Integer(0),
            PdfObject::Integer(0),
            PdfObject::Real(self.width),
            PdfObject::Real(self.height),
        ])
    }
}

pub fn catalog(pages_ref: u32) -> PdfDictionary {
    let mut dict = PdfDictionary::typed("Catalog");
    dict.insert("Pages", PdfObject::Reference(pages_ref));
    dict
}

pub fn page_tree(kids: &[u32]) -> PdfDictionary {
    let mut dict = PdfDictionary::typed("Pages");
    dict.insert(
        "Kids",
        PdfObject::Array(kids.iter().map(|k| PdfObject::Reference(*k)).collect()),
    );
    dict.insert("Count", kids.len() as i64);
    dict
}

/// A leaf page showing one image XObject
pub fn image_page(parent: u32, media_box: MediaBox, contents: u32, image_name: &str, image_ref: u32) -> PdfDictionary {
    let mut xobjects = PdfDictionary::new();
    xobjects.insert(image_name, PdfObject::Reference(image_ref));
    let mut resources = PdfDictionary::new();
    resources.insert("XObject", xobjects);
    resources.insert(
        "ProcSet",
        PdfObject::Array(vec![PdfObject::name("PDF"), PdfObject::name("ImageC")]),
    );

    let mut dict = PdfDictionary::typed("Page");
    dict.insert("Parent", PdfObject::Reference(parent));
    dict.insert("MediaBox", media_box.to_array());
    dict.insert("Resources", resources);
    dict.insert("Contents", PdfObject::Reference(contents));
    dict
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_dictionary() {
        let info = DocumentInfo::from_options(
            &PdfExportOptions::default().with_title("My Diagram").without_creation_date(),
        );
        let dict = info.to_dictionary();
        assert_eq!(dict.get("Title"), Some(&PdfObject::from("My Diagram")));
        assert!(dict.get("Producer").is_some());
        assert!(dict.get("CreationDate").is_none());
        assert!(dict.get("Author").is_none());
    }

    #[test]
    fn test_info_title_keeps_non_ascii() {
        let info = DocumentInfo::from_options(
            &PdfExportOptions::default().with_title("Диаграмма").without_creation_date(),
        );
        let dict = info.to_dictionary();
        match dict.get("Title") {
            Some(PdfObject::String(bytes)) => {
                assert_eq!(&bytes[..2], &[0xFE, 0xFF]);
                let units: Vec<u16> = bytes[2..]
                    .chunks(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                    .collect();
                assert_eq!(String::from_utf16(&units).unwrap(), "Диаграмма");
            }
            other => panic!("unexpected title {:?}", other),
        }
    }

    #[test]
    fn test_page_tree_count() {
        let tree = page_tree(&[3, 6, 9]);
        assert_eq!(tree.get("Count"), Some(&PdfObject::Integer(3)));
    }
}
