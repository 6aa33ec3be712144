//! Glyph index map - codepoint → record offset in the encoded font.
//!
//! Lets the emitter (or a host-side viewer) jump straight to a glyph record
//! without scanning the table.

use mglyph_types::{Codepoint, IconName};
use serde::{Deserialize, Serialize};

/// Index of every glyph record in a synthesized font.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphMap {
    pub entries: Vec<GlyphMapEntry>,
}

/// One glyph record location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphMapEntry {
    pub icon: IconName,
    pub codepoint: Codepoint,
    /// Byte offset of the record header within the encoded font.
    pub offset: u32,
    /// Record length including header.
    pub len: u32,
}

impl GlyphMap {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, icon: IconName, codepoint: Codepoint, offset: u32, len: u32) {
        self.entries.push(GlyphMapEntry {
            icon,
            codepoint,
            offset,
            len,
        });
    }

    pub fn find(&self, codepoint: Codepoint) -> Option<&GlyphMapEntry> {
        self.entries.iter().find(|e| e.codepoint == codepoint)
    }

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    pub fn from_json(data: &[u8]) -> Option<Self> {
        serde_json::from_slice(data).ok()
    }
}
