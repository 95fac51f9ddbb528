//! PDF object model
//!
//! The handful of object types a page-image document needs, and their
//! serialization into PDF syntax.

use std::collections::BTreeMap;
use std::io::{self, Write};

/// PDF object types
#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    /// Literal string, written in parentheses
    String(Vec<u8>),
    Name(String),
    Array(Vec<PdfObject>),
    Dictionary(PdfDictionary),
    /// Indirect reference (object number, generation 0)
    Reference(u32),
}

impl PdfObject {
    pub fn name(s: impl Into<String>) -> Self {
        PdfObject::Name(s.into())
    }

    pub fn string(s: impl Into<Vec<u8>>) -> Self {
        PdfObject::String(s.into())
    }

    /// Text string for document metadata. ASCII is stored as is; anything
    /// else becomes UTF-16BE behind a byte order mark.
    pub fn text(s: &str) -> Self {
        if s.is_ascii() {
            return PdfObject::String(s.as_bytes().to_vec());
        }
        let mut bytes = Vec::with_capacity(2 + s.len() * 2);
        bytes.extend_from_slice(&[0xFE, 0xFF]);
        for unit in s.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        PdfObject::String(bytes)
    }

    pub fn reference(obj_num: u32) -> Self {
        PdfObject::Reference(obj_num)
    }

    /// Serialize into `out`
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            PdfObject::Null => out.write_all(b"null"),
            PdfObject::Boolean(b) => write!(out, "{}", b),
            PdfObject::Integer(n) => write!(out, "{}", n),
            PdfObject::Real(n) => out.write_all(format_real(*n).as_bytes()),
            PdfObject::String(bytes) => write_literal(out, bytes),
            PdfObject::Name(name) => write_name(out, name),
            PdfObject::Array(items) => {
                out.write_all(b"[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.write_all(b" ")?;
                    }
                    item.write_to(out)?;
                }
                out.write_all(b"]")
            }
            PdfObject::Dictionary(dict) => dict.write_to(out),
            PdfObject::Reference(n) => write!(out, "{} 0 R", n),
        }
    }
}

impl From<i64> for PdfObject {
    fn from(n: i64) -> Self {
        PdfObject::Integer(n)
    }
}

impl From<u32> for PdfObject {
    fn from(n: u32) -> Self {
        PdfObject::Integer(n as i64)
    }
}

impl From<f64> for PdfObject {
    fn from(n: f64) -> Self {
        PdfObject::Real(n)
    }
}

impl From<&str> for PdfObject {
    fn from(s: &str) -> Self {
        PdfObject::text(s)
    }
}

impl From<PdfDictionary> for PdfObject {
    fn from(dict: PdfDictionary) -> Self {
        PdfObject::Dictionary(dict)
    }
}

impl From<Vec<PdfObject>> for PdfObject {
    fn from(items: Vec<PdfObject>) -> Self {
        PdfObject::Array(items)
    }
}

/// Shortest decimal form, at most six fractional digits
pub fn format_real(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        return format!("{}", n as i64);
    }
    let s = format!("{:.6}", n);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn write_literal<W: Write>(out: &mut W, bytes: &[u8]) -> io::Result<()> {
    out.write_all(b"(")?;
    for &byte in bytes {
        match byte {
            b'(' | b')' | b'\\' => out.write_all(&[b'\\', byte])?,
            b'\n' => out.write_all(b"\\n")?,
            b'\r' => out.write_all(b"\\r")?,
            b'\t' => out.write_all(b"\\t")?,
            0x20..=0x7E => out.write_all(&[byte])?,
            _ => write!(out, "\\{:03o}", byte)?,
        }
    }
    out.write_all(b")")
}

fn write_name<W: Write>(out: &mut W, name: &str) -> io::Result<()> {
    out.write_all(b"/")?;
    for byte in name.bytes() {
        let delimiter = matches!(
            byte,
            b'#' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
        );
        if (0x21..=0x7E).contains(&byte) && !delimiter {
            out.write_all(&[byte])?;
        } else {
            write!(out, "#{:02X}", byte)?;
        }
    }
    Ok(())
}

/// PDF dictionary with keys kept in sorted order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfDictionary {
    entries: BTreeMap<String, PdfObject>,
}

impl PdfDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dictionary whose `/Type` is `type_name`
    pub fn typed(type_name: &str) -> Self {
        let mut dict = Self::new();
        dict.insert("Type", PdfObject::name(type_name));
        dict
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PdfObject>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&PdfObject> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(b"<<")?;
        for (key, value) in &self.entries {
            out.write_all(b" ")?;
            write_name(out, key)?;
            out.write_all(b" ")?;
            value.write_to(out)?;
        }
        out.write_all(b" >>")
    }
}

/// Stream dictionary plus payload
#[derive(Debug, Clone, PartialEq)]
pub struct PdfStream {
    pub dict: PdfDictionary,
    pub data: Vec<u8>,
    /// Payload already carries its own filter
    pub encoded: bool,
}

impl PdfStream {
    pub fn new(dict: PdfDictionary, data: Vec<u8>) -> Self {
        Self {
            dict,
            data,
            encoded: false,
        }
    }

    pub fn pre_encoded(dict: PdfDictionary, data: Vec<u8>) -> Self {
        Self {
            dict,
            data,
            encoded: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(obj: &PdfObject) -> String {
        let mut buf = Vec::new();
        obj.write_to(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(render(&PdfObject::Null), "null");
        assert_eq!(render(&PdfObject::Boolean(true)), "true");
        assert_eq!(render(&PdfObject::Integer(-7)), "-7");
        assert_eq!(render(&PdfObject::Reference(4)), "4 0 R");
    }

    #[test]
    fn test_reals() {
        assert_eq!(format_real(612.0), "612");
        assert_eq!(format_real(28.346457), "28.346457");
        assert_eq!(format_real(0.5), "0.5");
        assert_eq!(format_real(-0.0000001), "0");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(render(&PdfObject::from("a(b)\\c")), "(a\\(b\\)\\\\c)");
        assert_eq!(render(&PdfObject::string(vec![0xE9])), "(\\351)");
    }

    #[test]
    fn test_non_ascii_text_is_utf16be() {
        assert_eq!(
            PdfObject::text("Café"),
            PdfObject::String(vec![0xFE, 0xFF, 0x00, b'C', 0x00, b'a', 0x00, b'f', 0x00, 0xE9])
        );
        // 0x28 in the low byte of a code unit is still escaped
        assert_eq!(render(&PdfObject::from("é(")), "(\\376\\377\\000\\351\\000\\()");
        assert_eq!(PdfObject::text("plain"), PdfObject::String(b"plain".to_vec()));
    }

    #[test]
    fn test_name_escaping() {
        assert_eq!(render(&PdfObject::name("Im1")), "/Im1");
        assert_eq!(render(&PdfObject::name("A B")), "/A#20B");
    }

    #[test]
    fn test_dictionary_sorted() {
        let mut dict = PdfDictionary::typed("Page");
        dict.insert("Contents", PdfObject::Reference(5));
        dict.insert("Count", 2i64);
        assert_eq!(
            render(&PdfObject::Dictionary(dict)),
            "<< /Contents 5 0 R /Count 2 /Type /Page >>"
        );
    }

    #[test]
    fn test_array() {
        let arr = PdfObject::Array(vec![
            PdfObject::Integer(0),
            PdfObject::Integer(0),
            PdfObject::Real(612.0),
            PdfObject::Real(792.0),
        ]);
        assert_eq!(render(&arr), "[0 0 612 792]");
    }
}
