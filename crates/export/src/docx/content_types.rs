//! [Content_Types].xml generation

use crate::docx::content_type_values;
use std::collections::BTreeMap;

/// Content types of every part in the package
#[derive(Debug, Clone, Default)]
pub struct ContentTypes {
    /// By extension, e.g. "png" -> "image/png"
    pub defaults: BTreeMap<String, String>,
    /// By part name, e.g. "/word/document.xml"
    pub overrides: BTreeMap<String, String>,
}

impl ContentTypes {
    pub fn new() -> Self {
        let mut ct = Self::default();
        ct.add_default("rels", content_type_values::RELATIONSHIPS);
        ct.add_default("xml", "application/xml");
        ct
    }

    pub fn add_default(&mut self, extension: &str, content_type: &str) {
        self.defaults.insert(extension.to_string(), content_type.to_string());
    }

    pub fn add_override(&mut self, part_name: &str, content_type: &str) {
        self.overrides.insert(normalize(part_name), content_type.to_string());
    }

    /// Overrides win over extension defaults
    pub fn get_content_type(&self, path: &str) -> Option<&str> {
        if let Some(ct) = self.overrides.get(&normalize(path)) {
            return Some(ct);
        }
        path.rsplit('.').next().and_then(|ext| self.defaults.get(ext)).map(String::as_str)
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
        for (ext, ct) in &self.defaults {
            xml.push_str(&format!(r#"<Default Extension="{}" ContentType="{}"/>"#, ext, ct));
        }
        for (part, ct) in &self.overrides {
            xml.push_str(&format!(r#"<Override PartName="{}" ContentType="{}"/>"#, part, ct));
        }
        xml.push_str("</Types>");
        xml
    }
}

fn normalize(part_name: &str) -> String {
    if part_name.starts_with('/') {
        part_name.to_string()
    } else {
        format!("/{}", part_name)
    }
}

/// Content types for a new package with a main document and styles
pub fn create_default_content_types() -> ContentTypes {
    let mut ct = ContentTypes::new();
    ct.add_override("/word/document.xml", content_type_values::DOCUMENT);
    ct.add_override("/word/styles.xml", content_type_values::STYLES);
    ct.add_override("/word/settings.xml", content_type_values::SETTINGS);
    ct
}
