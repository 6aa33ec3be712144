//! Source typeface abstraction.
//!
//! The synthesizer only needs three things from a typeface: whether it has
//! an outline for a codepoint, a coverage bitmap at a pixel size, and the
//! line height. [`FontdueTypeface`] provides them from TrueType/OpenType
//! bytes.

use crate::error::{FontError, FontResult};

/// A rasterized glyph: 8-bit coverage, row-major, `width * height` bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterGlyph {
    pub xmin: i32,
    pub ymin: i32,
    pub width: usize,
    pub height: usize,
    pub advance: f32,
    pub coverage: Vec<u8>,
}

/// A loaded source typeface.
pub trait Typeface {
    fn has_glyph(&self, ch: char) -> bool;

    fn rasterize(&self, ch: char, px: f32) -> RasterGlyph;

    fn line_height(&self, px: f32) -> f32;
}

/// Turns typeface resource bytes into a [`Typeface`].
pub type TypefaceLoader = fn(name: &str, bytes: &[u8], px: f32) -> FontResult<Box<dyn Typeface>>;

/// Default loader backed by `fontdue`.
pub fn load_fontdue(name: &str, bytes: &[u8], px: f32) -> FontResult<Box<dyn Typeface>> {
    Ok(Box::new(FontdueTypeface::from_bytes(name, bytes, px)?))
}

/// TrueType/OpenType typeface parsed by `fontdue`.
pub struct FontdueTypeface {
    font: fontdue::Font,
}

impl FontdueTypeface {
    pub fn from_bytes(name: &str, bytes: &[u8], px: f32) -> FontResult<Self> {
        let settings = fontdue::FontSettings {
            scale: px,
            ..fontdue::FontSettings::default()
        };
        let font = fontdue::Font::from_bytes(bytes, settings).map_err(|message| {
            FontError::InvalidSource {
                name: name.to_string(),
                message: message.to_string(),
            }
        })?;
        Ok(Self { font })
    }
}

impl Typeface for FontdueTypeface {
    fn has_glyph(&self, ch: char) -> bool {
        self.font.lookup_glyph_index(ch) != 0
    }

    fn rasterize(&self, ch: char, px: f32) -> RasterGlyph {
        let (metrics, coverage) = self.font.rasterize(ch, px);
        RasterGlyph {
            xmin: metrics.xmin,
            ymin: metrics.ymin,
            width: metrics.width,
            height: metrics.height,
            advance: metrics.advance_width,
            coverage,
        }
    }

    fn line_height(&self, px: f32) -> f32 {
        self.font
            .horizontal_line_metrics(px)
            .map(|m| m.new_line_size)
            .unwrap_or(px)
    }
}
