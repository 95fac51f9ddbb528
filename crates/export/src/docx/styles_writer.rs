//! styles.xml writer
//!
//! Generated documents only reference a handful of styles, so the sheet
//! is fixed: document defaults, Normal, Heading1 and TableGrid.

use crate::docx::namespaces;

pub struct StylesWriter;

impl StylesWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<w:styles xmlns:w="{}">"#, namespaces::W));
        self.write_doc_defaults(&mut xml);

        xml.push_str(r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal">"#);
        xml.push_str(r#"<w:name w:val="Normal"/><w:qFormat/></w:style>"#);

        xml.push_str(r#"<w:style w:type="paragraph" w:styleId="Heading1">"#);
        xml.push_str(r#"<w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/>"#);
        xml.push_str(r#"<w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr>"#);
        xml.push_str(r#"<w:rPr><w:b/><w:sz w:val="32"/><w:szCs w:val="32"/></w:rPr>"#);
        xml.push_str("</w:style>");

        xml.push_str(r#"<w:style w:type="table" w:styleId="TableGrid">"#);
        xml.push_str(r#"<w:name w:val="Table Grid"/>"#);
        xml.push_str(r#"<w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr>"#);
        xml.push_str("</w:style>");

        xml.push_str("</w:styles>");
        xml
    }

    fn write_doc_defaults(&self, xml: &mut String) {
        xml.push_str("<w:docDefaults>");
        xml.push_str("<w:rPrDefault><w:rPr>");
        xml.push_str(r#"<w:rFonts w:ascii="Arial" w:hAnsi="Arial" w:cs="Arial"/>"#);
        xml.push_str(r#"<w:sz w:val="22"/><w:szCs w:val="22"/>"#);
        xml.push_str("</w:rPr></w:rPrDefault>");
        xml.push_str("<w:pPrDefault><w:pPr>");
        xml.push_str(r#"<w:spacing w:after="160" w:line="259" w:lineRule="auto"/>"#);
        xml.push_str("</w:pPr></w:pPrDefault>");
        xml.push_str("</w:docDefaults>");
    }
}

/// Minimal settings.xml
pub fn generate_settings_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<w:settings xmlns:w="{}"><w:compat>"#,
            r#"<w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/>"#,
            r#"</w:compat></w:settings>"#,
        ),
        namespaces::W
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_defined() {
        let xml = StylesWriter::new().write();
        assert!(xml.contains(r#"w:styleId="Heading1""#));
        assert!(xml.contains(r#"w:styleId="TableGrid""#));
        assert!(generate_settings_xml().contains("compatibilityMode"));
    }
}
