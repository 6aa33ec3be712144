//! `MGF1` binary layout constants and encoding helpers.
//!
//! All integers are little-endian.
//!
//! ```text
//! header (14 bytes)
//!   +0   [u8; 4]  magic "MGF1"
//!   +4   u16      version
//!   +6   u16      pixel size
//!   +8   u16      line height
//!   +10  u32      glyph count
//!
//! glyph record (repeated, ascending codepoint)
//!   +0   u32      codepoint
//!   +4   i16      x offset
//!   +6   i16      y offset
//!   +8   u16      width
//!   +10  u16      height
//!   +12  u16      advance
//!   +14  u32      bitmap length
//!   +18  [u8]     1-bpp bitmap, rows padded to whole bytes, MSB first
//! ```

pub const MAGIC: &[u8; 4] = b"MGF1";
pub const VERSION: u16 = 1;
pub const HEADER_SIZE: usize = 14;
pub const RECORD_HEADER_SIZE: usize = 18;

/// Coverage at or above this value is a lit pixel.
pub const COVERAGE_THRESHOLD: u8 = 128;

/// Bytes needed for one packed row of `width` pixels.
pub fn row_bytes(width: usize) -> usize {
    width.div_ceil(8)
}

/// Pack 8-bit coverage into a 1-bpp bitmap.
pub fn pack_bitmap(coverage: &[u8], width: usize, height: usize) -> Vec<u8> {
    let stride = row_bytes(width);
    let mut packed = vec![0u8; stride * height];
    for y in 0..height {
        for x in 0..width {
            if coverage.get(y * width + x).copied().unwrap_or(0) >= COVERAGE_THRESHOLD {
                packed[y * stride + x / 8] |= 0x80 >> (x % 8);
            }
        }
    }
    packed
}

/// Whether the pixel at `(x, y)` is lit in a packed bitmap.
pub fn pixel(packed: &[u8], width: usize, x: usize, y: usize) -> bool {
    let stride = row_bytes(width);
    packed
        .get(y * stride + x / 8)
        .is_some_and(|byte| byte & (0x80 >> (x % 8)) != 0)
}
