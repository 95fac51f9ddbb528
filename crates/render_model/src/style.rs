//! Style sheets scoped by a marker class
//!
//! A rule applies to every item of a given [`StyleRole`] while the
//! mounted region carries the rule's scope class. Later sheets win.

use crate::render_item::{BoxRenderInfo, Color, GlyphRun, StyleRole};
use serde::{Deserialize, Serialize};

/// Paint override for a fill or stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Paint {
    /// `none` / `transparent`
    None,
    Solid(Color),
}

impl Paint {
    fn resolve(self) -> Option<Color> {
        match self {
            Paint::None => None,
            Paint::Solid(c) => Some(c),
        }
    }
}

/// Property overrides of a single rule; `None` leaves the property alone
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleDeclaration {
    pub fill: Option<Paint>,
    pub stroke: Option<Paint>,
    pub text_color: Option<Color>,
}

impl StyleDeclaration {
    pub fn fill(mut self, paint: Paint) -> Self {
        self.fill = Some(paint);
        self
    }

    pub fn stroke(mut self, paint: Paint) -> Self {
        self.stroke = Some(paint);
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRule {
    pub scope_class: String,
    pub role: StyleRole,
    pub declaration: StyleDeclaration,
}

/// A style node inserted into the document head
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    rules: Vec<StyleRule>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, scope_class: &str, role: StyleRole, declaration: StyleDeclaration) -> Self {
        self.rules.push(StyleRule {
            scope_class: scope_class.to_string(),
            role,
            declaration,
        });
        self
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Handle of an inserted sheet, used to remove it again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleSheetId(pub u64);

/// Resolved paint of a box after cascading all applicable rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedBoxStyle {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
}

pub(crate) fn cascade_box<'a>(
    item: &BoxRenderInfo,
    rules: impl Iterator<Item = &'a StyleDeclaration>,
) -> ComputedBoxStyle {
    let mut computed = ComputedBoxStyle {
        fill: item.fill,
        stroke: item.stroke,
    };
    for decl in rules {
        if let Some(fill) = decl.fill {
            computed.fill = fill.resolve();
        }
        if let Some(stroke) = decl.stroke {
            computed.stroke = stroke.resolve();
        }
    }
    computed
}

pub(crate) fn cascade_text<'a>(
    run: &GlyphRun,
    rules: impl Iterator<Item = &'a StyleDeclaration>,
) -> Color {
    rules.fold(run.color, |color, decl| decl.text_color.unwrap_or(color))
}
