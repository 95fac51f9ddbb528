//! Scoped surface mutations for capture
//!
//! Each scope mutates the surface when created and restores it when
//! dropped, so the live view is put back on success, on error returns and
//! on unwinding alike. Scopes deref to the surface they guard and nest.

use render_model::{StyleSheet, StyleSheetId, Surface, Transform};
use std::ops::{Deref, DerefMut};

/// A temporary style sheet plus a marker class on the mounted region
pub struct PrintStyleScope<'a> {
    surface: &'a mut Surface,
    sheet: StyleSheetId,
    class: String,
    added_class: bool,
}

impl<'a> PrintStyleScope<'a> {
    pub fn apply(surface: &'a mut Surface, sheet: StyleSheet, marker_class: &str) -> Self {
        let sheet = surface.insert_style_sheet(sheet);
        let added_class = surface
            .target_mut()
            .map(|el| el.add_class(marker_class))
            .unwrap_or(false);
        tracing::debug!(class = marker_class, "print styling applied");
        Self {
            surface,
            sheet,
            class: marker_class.to_string(),
            added_class,
        }
    }
}

impl Deref for PrintStyleScope<'_> {
    type Target = Surface;

    fn deref(&self) -> &Surface {
        self.surface
    }
}

impl DerefMut for PrintStyleScope<'_> {
    fn deref_mut(&mut self) -> &mut Surface {
        self.surface
    }
}

impl Drop for PrintStyleScope<'_> {
    fn drop(&mut self) {
        // Only remove a class this scope added
        if self.added_class {
            if let Some(el) = self.surface.target_mut() {
                el.remove_class(&self.class);
            }
        }
        if let Err(e) = self.surface.remove_style_sheet(self.sheet) {
            tracing::warn!("print style sheet already gone: {}", e);
        }
        tracing::debug!(class = %self.class, "print styling removed");
    }
}

/// Identity transform on the region's container for the scope's lifetime
pub struct TransformResetScope<'a> {
    surface: &'a mut Surface,
    saved: Transform,
}

impl<'a> TransformResetScope<'a> {
    pub fn apply(surface: &'a mut Surface) -> Self {
        let saved = surface.set_container_transform(Transform::IDENTITY);
        if !saved.is_identity() {
            tracing::debug!(transform = %saved, "container transform reset for capture");
        }
        Self { surface, saved }
    }

    /// The transform that will be restored
    pub fn saved(&self) -> Transform {
        self.saved
    }
}

impl Deref for TransformResetScope<'_> {
    type Target = Surface;

    fn deref(&self) -> &Surface {
        self.surface
    }
}

impl DerefMut for TransformResetScope<'_> {
    fn deref_mut(&mut self) -> &mut Surface {
        self.surface
    }
}

impl Drop for TransformResetScope<'_> {
    fn drop(&mut self) {
        self.surface.set_container_transform(self.saved);
        if !self.saved.is_identity() {
            tracing::debug!(transform = %self.saved, "container transform restored");
        }
    }
}
