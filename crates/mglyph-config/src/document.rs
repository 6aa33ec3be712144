//! Validated configuration document.
//!
//! Every node carries the [`DocPath`] it was read from so later stages can
//! report errors against the input. Sequences keep declaration order; that
//! order is the render order downstream.

use std::collections::BTreeSet;

use mglyph_types::{DocPath, GlyphRef, IconName};

// ══════════════════════════════════════════════════════════════════════════════
// Top Level
// ══════════════════════════════════════════════════════════════════════════════

/// A complete configuration: the ordered groups of one controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub groups: Vec<GroupSpec>,
}

impl Document {
    /// The union of every catalog icon the groups draw from the font.
    ///
    /// Computed from the whole document up front so the font does not depend
    /// on build order. The per-widget binary-sensor glyph is not wired into
    /// the object graph and therefore not part of the union.
    pub fn referenced_icons(&self) -> BTreeSet<IconName> {
        self.groups
            .iter()
            .filter_map(|group| group.glyph.glyph.icon())
            .collect()
    }

    /// Number of widgets across all groups.
    pub fn widget_count(&self) -> usize {
        self.groups.iter().map(|g| g.widgets.len()).sum()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Identifiers
// ══════════════════════════════════════════════════════════════════════════════

/// An identifier together with the path it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub path: DocPath,
}

impl Ident {
    pub fn new(name: impl Into<String>, path: DocPath) -> Self {
        Self {
            name: name.into(),
            path,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Groups & Glyphs
// ══════════════════════════════════════════════════════════════════════════════

/// `{ id, glyph, widgets }`
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSpec {
    pub id: Ident,
    pub glyph: GlyphSpec,
    pub widgets: Vec<WidgetSpec>,
    pub path: DocPath,
}

/// `{ type: "image" | "mdi", id }`
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphSpec {
    pub glyph: GlyphRef,
    pub path: DocPath,
}

// ══════════════════════════════════════════════════════════════════════════════
// Widgets
// ══════════════════════════════════════════════════════════════════════════════

/// `{ source }`
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSpec {
    pub source: SourceSpec,
    pub path: DocPath,
}

/// The data source of a widget, discriminated by `type`.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceSpec {
    Sensor(SensorSource),
    BinarySensor(BinarySensorSource),
}

impl SourceSpec {
    /// The external entity this source binds to.
    pub fn target(&self) -> &Ident {
        match self {
            Self::Sensor(s) => &s.id,
            Self::BinarySensor(b) => &b.id,
        }
    }
}

/// `{ type: "sensor", id }`
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSource {
    pub id: Ident,
}

/// `{ type: "binary_sensor", id, glyph?, switch, binary_sensor }`
#[derive(Debug, Clone, PartialEq)]
pub struct BinarySensorSource {
    pub id: Ident,
    /// Accepted by the schema but not wired into the object graph.
    pub glyph: Option<GlyphSpec>,
    pub switch: SwitchSpec,
    pub binary_sensor: OutputSpec,
}

/// The sticky-switch companion declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchSpec {
    pub id: Ident,
    pub name: Option<String>,
    pub sticky: Option<bool>,
}

/// The alert binary-sensor companion declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSpec {
    pub id: Ident,
    pub name: Option<String>,
}
