//! The capture surface: mounted region, document style sheets and the
//! parent container transform

use crate::error::{RenderError, Result};
use crate::render_item::{BoxRenderInfo, Color, GlyphRun, Rect, RenderItem};
use crate::style::{cascade_box, cascade_text, ComputedBoxStyle, StyleDeclaration, StyleSheet, StyleSheetId};
use std::collections::BTreeSet;
use std::fmt;

/// A laid-out region with its class list and display list
#[derive(Debug, Clone)]
pub struct Element {
    /// Layout width in CSS pixels
    pub width: f64,
    /// Layout height in CSS pixels
    pub height: f64,
    classes: BTreeSet<String>,
    items: Vec<RenderItem>,
}

impl Element {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(RenderError::InvalidGeometry(format!(
                "region must have positive size, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            classes: BTreeSet::new(),
            items: Vec::new(),
        })
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn push(&mut self, item: RenderItem) {
        self.items.push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = RenderItem>) {
        self.items.extend(items);
    }

    pub fn items(&self) -> &[RenderItem] {
        &self.items
    }

    /// Add a class; returns false if it was already present
    pub fn add_class(&mut self, class: &str) -> bool {
        self.classes.insert(class.to_string())
    }

    /// Remove a class; returns false if it was absent
    pub fn remove_class(&mut self, class: &str) -> bool {
        self.classes.remove(class)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// CSS transform of the region's parent container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform { scale: 1.0 };

    pub fn scale(scale: f64) -> Self {
        Self { scale }
    }

    pub fn is_identity(&self) -> bool {
        self.scale == 1.0
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            write!(f, "none")
        } else {
            write!(f, "scale({})", self.scale)
        }
    }
}

/// Everything a rasterizer can observe when capturing a region
#[derive(Debug, Default)]
pub struct Surface {
    target: Option<Element>,
    container_transform: Transform,
    sheets: Vec<(StyleSheetId, StyleSheet)>,
    next_sheet_id: u64,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(element: Element) -> Self {
        Self {
            target: Some(element),
            ..Self::default()
        }
    }

    /// Mount a region, returning the previously mounted one
    pub fn mount(&mut self, element: Element) -> Option<Element> {
        self.target.replace(element)
    }

    pub fn unmount(&mut self) -> Option<Element> {
        self.target.take()
    }

    pub fn is_mounted(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&Element> {
        self.target.as_ref()
    }

    pub fn target_mut(&mut self) -> Option<&mut Element> {
        self.target.as_mut()
    }

    pub fn container_transform(&self) -> Transform {
        self.container_transform
    }

    /// Replace the container transform, returning the previous value
    pub fn set_container_transform(&mut self, transform: Transform) -> Transform {
        std::mem::replace(&mut self.container_transform, transform)
    }

    pub fn insert_style_sheet(&mut self, sheet: StyleSheet) -> StyleSheetId {
        let id = StyleSheetId(self.next_sheet_id);
        self.next_sheet_id += 1;
        self.sheets.push((id, sheet));
        tracing::trace!(sheet = id.0, "style sheet inserted");
        id
    }

    pub fn remove_style_sheet(&mut self, id: StyleSheetId) -> Result<StyleSheet> {
        let index = self
            .sheets
            .iter()
            .position(|(sheet_id, _)| *sheet_id == id)
            .ok_or(RenderError::UnknownStyleSheet(id.0))?;
        Ok(self.sheets.remove(index).1)
    }

    pub fn style_sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Size of the region as laid out on screen, after the container transform
    pub fn capture_extent(&self) -> Option<(f64, f64)> {
        self.target.as_ref().map(|el| {
            (
                el.width * self.container_transform.scale,
                el.height * self.container_transform.scale,
            )
        })
    }

    fn applicable(&self, role: crate::StyleRole) -> impl Iterator<Item = &StyleDeclaration> {
        let target = self.target.as_ref();
        self.sheets
            .iter()
            .flat_map(|(_, sheet)| sheet.rules().iter())
            .filter(move |rule| {
                rule.role == role && target.is_some_and(|el| el.has_class(&rule.scope_class))
            })
            .map(|rule| &rule.declaration)
    }

    pub fn computed_box_style(&self, item: &BoxRenderInfo) -> ComputedBoxStyle {
        cascade_box(item, self.applicable(item.role))
    }

    pub fn computed_text_color(&self, run: &GlyphRun) -> Color {
        cascade_text(run, self.applicable(run.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Paint, StyleRole};

    fn header_cell() -> BoxRenderInfo {
        BoxRenderInfo::filled(Rect::new(0.0, 0.0, 10.0, 10.0), Color::rgb(0x6D, 0x94, 0xC5))
            .with_role(StyleRole::HeaderCell)
    }

    fn whitening_sheet() -> StyleSheet {
        StyleSheet::new().rule(
            "print",
            StyleRole::HeaderCell,
            StyleDeclaration::default().fill(Paint::Solid(Color::WHITE)),
        )
    }

    #[test]
    fn test_rule_needs_scope_class() {
        let mut surface = Surface::with_target(Element::new(100.0, 50.0).unwrap());
        surface.insert_style_sheet(whitening_sheet());

        let cell = header_cell();
        assert_eq!(surface.computed_box_style(&cell).fill, cell.fill);

        surface.target_mut().unwrap().add_class("print");
        assert_eq!(surface.computed_box_style(&cell).fill, Some(Color::WHITE));
    }

    #[test]
    fn test_remove_style_sheet() {
        let mut surface = Surface::with_target(Element::new(100.0, 50.0).unwrap().with_class("print"));
        let id = surface.insert_style_sheet(whitening_sheet());
        assert_eq!(surface.style_sheet_count(), 1);

        surface.remove_style_sheet(id).unwrap();
        assert_eq!(surface.style_sheet_count(), 0);
        assert!(matches!(
            surface.remove_style_sheet(id),
            Err(RenderError::UnknownStyleSheet(_))
        ));

        let cell = header_cell();
        assert_eq!(surface.computed_box_style(&cell).fill, cell.fill);
    }

    #[test]
    fn test_paint_none_clears_stroke() {
        let mut surface = Surface::with_target(Element::new(100.0, 50.0).unwrap().with_class("print"));
        surface.insert_style_sheet(StyleSheet::new().rule(
            "print",
            StyleRole::TextField,
            StyleDeclaration::default().stroke(Paint::None).fill(Paint::None),
        ));
        let field = BoxRenderInfo::filled(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE)
            .with_stroke(Color::rgb(0xCC, 0xCC, 0xCC), 1.0)
            .with_role(StyleRole::TextField);
        let computed = surface.computed_box_style(&field);
        assert_eq!(computed.fill, None);
        assert_eq!(computed.stroke, None);
    }

    #[test]
    fn test_capture_extent_follows_transform() {
        let mut surface = Surface::with_target(Element::new(720.0, 400.0).unwrap());
        assert_eq!(surface.capture_extent(), Some((720.0, 400.0)));

        let previous = surface.set_container_transform(Transform::scale(0.5));
        assert!(previous.is_identity());
        assert_eq!(surface.capture_extent(), Some((360.0, 200.0)));
        assert_eq!(surface.container_transform().to_string(), "scale(0.5)");
    }

    #[test]
    fn test_invalid_geometry() {
        assert!(Element::new(0.0, 10.0).is_err());
        assert!(Element::new(10.0, f64::NAN).is_err());
    }

    #[test]
    fn test_unmounted_surface() {
        let surface = Surface::new();
        assert!(!surface.is_mounted());
        assert_eq!(surface.capture_extent(), None);
    }
}
