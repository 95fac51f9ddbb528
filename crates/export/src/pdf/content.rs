//! Content stream builder
//!
//! Only the graphics-state and XObject operators are needed to place one
//! image per page: `q`/`Q`, `cm` and `Do`.

use super::objects::format_real;

#[derive(Debug, Default)]
pub struct ContentStream {
    data: Vec<u8>,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn op(&mut self, operands: &[f64], operator: &str) -> &mut Self {
        for n in operands {
            self.data.extend_from_slice(format_real(*n).as_bytes());
            self.data.push(b' ');
        }
        self.data.extend_from_slice(operator.as_bytes());
        self.data.push(b'\n');
        self
    }

    /// Save graphics state (q)
    pub fn save_state(&mut self) -> &mut Self {
        self.op(&[], "q")
    }

    /// Restore graphics state (Q)
    pub fn restore_state(&mut self) -> &mut Self {
        self.op(&[], "Q")
    }

    /// Concatenate matrix (cm)
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> &mut Self {
        self.op(&[a, b, c, d, e, f], "cm")
    }

    /// Paint an XObject (Do)
    pub fn draw_xobject(&mut self, name: &str) -> &mut Self {
        self.data.push(b'/');
        self.data.extend_from_slice(name.as_bytes());
        self.op(&[], " Do")
    }

    /// Paint an image XObject into a rectangle given in PDF user space
    /// (origin bottom-left)
    pub fn place_image(&mut self, name: &str, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.save_state()
            .transform(width, 0.0, 0.0, height, x, y)
            .draw_xobject(name)
            .restore_state()
    }
}
