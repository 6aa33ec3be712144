//! The synthesized font artifact.

use mglyph_types::{Codepoint, IconName};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::glyph_map::GlyphMap;

/// One glyph of the synthesized font.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontGlyph {
    pub icon: IconName,
    pub codepoint: Codepoint,
    pub x_offset: i16,
    pub y_offset: i16,
    pub width: u16,
    pub height: u16,
    pub advance: u16,
    /// 1-bpp bitmap, see [`crate::layout`].
    #[serde(skip)]
    pub bitmap: Vec<u8>,
}

/// An immutable, synthesized font containing exactly the requested glyphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontAsset {
    id: String,
    size: u16,
    line_height: u16,
    glyphs: Vec<FontGlyph>,
    glyph_map: GlyphMap,
    #[serde(skip)]
    bytes: Vec<u8>,
}

impl FontAsset {
    pub(crate) fn new(
        id: String,
        size: u16,
        line_height: u16,
        glyphs: Vec<FontGlyph>,
        glyph_map: GlyphMap,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            id,
            size,
            line_height,
            glyphs,
            glyph_map,
            bytes,
        }
    }

    /// Identifier the emitter declares the font under.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    pub fn line_height(&self) -> u16 {
        self.line_height
    }

    /// Glyphs in ascending codepoint order.
    pub fn glyphs(&self) -> &[FontGlyph] {
        &self.glyphs
    }

    pub fn glyph_map(&self) -> &GlyphMap {
        &self.glyph_map
    }

    /// Codepoints present in the font, ascending.
    pub fn codepoints(&self) -> impl Iterator<Item = Codepoint> + '_ {
        self.glyphs.iter().map(|g| g.codepoint)
    }

    pub fn contains(&self, codepoint: Codepoint) -> bool {
        self.glyph(codepoint).is_some()
    }

    pub fn glyph(&self, codepoint: Codepoint) -> Option<&FontGlyph> {
        self.glyphs
            .binary_search_by_key(&codepoint, |g| g.codepoint)
            .ok()
            .map(|i| &self.glyphs[i])
    }

    /// The codepoint an icon was synthesized at, if it is in the font.
    pub fn codepoint_of(&self, icon: IconName) -> Option<Codepoint> {
        self.glyphs
            .iter()
            .find(|g| g.icon == icon)
            .map(|g| g.codepoint)
    }

    /// The encoded `MGF1` table.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// SHA-256 of the encoded table.
    pub fn digest(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&Sha256::digest(&self.bytes));
        out
    }

    pub fn digest_hex(&self) -> String {
        self.digest().iter().map(|b| format!("{b:02x}")).collect()
    }
}
