//! Font synthesis: one pass over the requested icons.
//!
//! 1. Order the requested glyphs by codepoint (then icon name)
//! 2. Rasterize each from the source typeface at the requested size
//! 3. Pack coverage to 1-bpp bitmaps
//! 4. Encode the `MGF1` table and build the glyph index map

use std::collections::BTreeMap;

use mglyph_types::{Codepoint, IconName};
use tracing::{debug, info};

use crate::asset::{FontAsset, FontGlyph};
use crate::error::{FontError, FontResult};
use crate::glyph_map::GlyphMap;
use crate::layout::{self, HEADER_SIZE, MAGIC, RECORD_HEADER_SIZE, VERSION};
use crate::typeface::Typeface;

/// What to synthesize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontRequest {
    pub id: String,
    /// Pixel size.
    pub size: u16,
    pub glyphs: BTreeMap<IconName, Codepoint>,
}

/// Build the font asset for `request` from `typeface`.
pub fn synthesize(request: &FontRequest, typeface: &dyn Typeface) -> FontResult<FontAsset> {
    let mut ordered: Vec<(IconName, Codepoint)> =
        request.glyphs.iter().map(|(i, c)| (*i, *c)).collect();
    ordered.sort_by_key(|(icon, codepoint)| (*codepoint, *icon));
    // Two catalog names sharing one codepoint need only one record.
    ordered.dedup_by_key(|(_, codepoint)| *codepoint);

    let px = f32::from(request.size);
    let line_height = clamp_u16(typeface.line_height(px).ceil());

    let mut glyphs = Vec::with_capacity(ordered.len());
    for (icon, codepoint) in ordered {
        let ch = codepoint.as_char();
        if !typeface.has_glyph(ch) {
            return Err(FontError::GlyphMissing { icon, codepoint });
        }
        let raster = typeface.rasterize(ch, px);
        let overflow = || FontError::LimitExceeded(format!("glyph '{icon}' metrics out of range"));
        let glyph = FontGlyph {
            icon,
            codepoint,
            x_offset: i16::try_from(raster.xmin).map_err(|_| overflow())?,
            y_offset: i16::try_from(raster.ymin).map_err(|_| overflow())?,
            width: u16::try_from(raster.width).map_err(|_| overflow())?,
            height: u16::try_from(raster.height).map_err(|_| overflow())?,
            advance: clamp_u16(raster.advance.round()),
            bitmap: layout::pack_bitmap(&raster.coverage, raster.width, raster.height),
        };
        debug!(%icon, %codepoint, width = glyph.width, height = glyph.height, "rasterized glyph");
        glyphs.push(glyph);
    }

    let (bytes, glyph_map) = encode(request.size, line_height, &glyphs)?;
    info!(
        font = %request.id,
        size = request.size,
        glyphs = glyphs.len(),
        bytes = bytes.len(),
        "synthesized font"
    );
    Ok(FontAsset::new(
        request.id.clone(),
        request.size,
        line_height,
        glyphs,
        glyph_map,
        bytes,
    ))
}

fn encode(size: u16, line_height: u16, glyphs: &[FontGlyph]) -> FontResult<(Vec<u8>, GlyphMap)> {
    let count = u32::try_from(glyphs.len())
        .map_err(|_| FontError::LimitExceeded("too many glyphs".into()))?;

    let mut out = Vec::with_capacity(HEADER_SIZE);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.extend_from_slice(&size.to_le_bytes());
    out.extend_from_slice(&line_height.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());

    let mut glyph_map = GlyphMap::new();
    for glyph in glyphs {
        let offset = offset_u32(out.len())?;
        let bitmap_len = offset_u32(glyph.bitmap.len())?;
        out.extend_from_slice(&glyph.codepoint.value().to_le_bytes());
        out.extend_from_slice(&glyph.x_offset.to_le_bytes());
        out.extend_from_slice(&glyph.y_offset.to_le_bytes());
        out.extend_from_slice(&glyph.width.to_le_bytes());
        out.extend_from_slice(&glyph.height.to_le_bytes());
        out.extend_from_slice(&glyph.advance.to_le_bytes());
        out.extend_from_slice(&bitmap_len.to_le_bytes());
        out.extend_from_slice(&glyph.bitmap);
        let len = offset_u32(RECORD_HEADER_SIZE + glyph.bitmap.len())?;
        glyph_map.push(glyph.icon, glyph.codepoint, offset, len);
    }
    Ok((out, glyph_map))
}

fn offset_u32(n: usize) -> FontResult<u32> {
    u32::try_from(n).map_err(|_| FontError::LimitExceeded("font table exceeds 4 GiB".into()))
}

fn clamp_u16(value: f32) -> u16 {
    value.clamp(0.0, f32::from(u16::MAX)) as u16
}
