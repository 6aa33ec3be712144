//! The compiled object graph: controller → groups → widgets.
//!
//! Everything here is plain data. The display runtime consumes it; the CLI
//! serializes it into the build manifest.

use std::collections::BTreeMap;

use mglyph_types::{Codepoint, IconName};
use serde::Serialize;

use crate::latch::AlertLatch;

/// Frame interval of every animated glyph.
pub const ANIMATION_INTERVAL_MS: u32 = 200;

// ══════════════════════════════════════════════════════════════════════════════
// Glyphs
// ══════════════════════════════════════════════════════════════════════════════

/// A glyph bound to something drawable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GlyphHandle {
    /// A platform image asset.
    Image { asset: String },
    /// One glyph of the synthesized font.
    Mdi {
        icon: IconName,
        codepoint: Codepoint,
        font: String,
    },
    /// Frames cycled at a fixed interval.
    Animation {
        frames: Vec<GlyphHandle>,
        interval_ms: u32,
    },
}

impl GlyphHandle {
    /// Font codepoints this glyph draws, in frame order.
    pub fn codepoints(&self) -> Vec<Codepoint> {
        match self {
            Self::Image { .. } => Vec::new(),
            Self::Mdi { codepoint, .. } => vec![*codepoint],
            Self::Animation { frames, .. } => frames.iter().flat_map(|f| f.codepoints()).collect(),
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Controller & Groups
// ══════════════════════════════════════════════════════════════════════════════

/// Root of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Controller {
    /// Font every `Mdi` glyph draws from.
    pub font_id: String,
    /// Icon → codepoint table for the icons in the font.
    pub icons: BTreeMap<IconName, Codepoint>,
    /// Groups in render order.
    pub groups: Vec<Group>,
}

impl Controller {
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn widgets(&self) -> impl Iterator<Item = &Widget> + '_ {
        self.groups.iter().flat_map(|g| g.widgets.iter())
    }

    pub fn widget_mut(&mut self, id: &str) -> Option<&mut Widget> {
        self.groups
            .iter_mut()
            .flat_map(|g| g.widgets.iter_mut())
            .find(|w| w.id() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub id: String,
    pub glyph: GlyphHandle,
    /// Widgets in render order.
    pub widgets: Vec<Widget>,
}

// ══════════════════════════════════════════════════════════════════════════════
// Widgets
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Widget {
    Sensor(SensorWidget),
    BinarySensor(BinarySensorWidget),
}

impl Widget {
    pub fn id(&self) -> &str {
        match self {
            Self::Sensor(w) => &w.id,
            Self::BinarySensor(w) => &w.id,
        }
    }

    /// The external entity the widget displays.
    pub fn source(&self) -> &str {
        match self {
            Self::Sensor(w) => &w.sensor,
            Self::BinarySensor(w) => &w.source,
        }
    }
}

/// Shows a sensor reading, optionally prefixed by an icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorWidget {
    pub id: String,
    pub sensor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<GlyphHandle>,
}

/// Shows a binary sensor through its alert output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinarySensorWidget {
    pub id: String,
    pub source: String,
    pub alert_sensor: AlertSensor,
    pub sticky_switch: StickySwitch,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_glyph: Option<GlyphHandle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub off_glyph: Option<GlyphHandle>,
}

impl BinarySensorWidget {
    /// Feed a source update through the alert latch.
    pub fn on_source_state(&mut self, incoming: bool) -> Option<bool> {
        let sticky = self.sticky_switch.is_on();
        self.alert_sensor.latch.on_source_state(sticky, incoming)
    }

    /// The glyph to draw for the current alert state.
    pub fn current_glyph(&self) -> Option<&GlyphHandle> {
        if self.alert_sensor.latch.is_raised() {
            self.on_glyph.as_ref()
        } else {
            self.off_glyph.as_ref()
        }
    }
}

/// The alert binary-sensor companion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertSensor {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip)]
    pub latch: AlertLatch,
}

/// The sticky-switch companion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StickySwitch {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    state: Option<bool>,
}

impl StickySwitch {
    pub fn new(id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
            state: None,
        }
    }

    pub fn publish_state(&mut self, state: bool) {
        self.state = Some(state);
    }

    /// Published state; `None` until something publishes.
    pub fn state(&self) -> Option<bool> {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state == Some(true)
    }
}
