//! Matrix glyph font synthesizer: builds one minimal bitmap font containing
//! exactly the icons a configuration references.
//!
//! # Architecture
//!
//! The synthesizer takes a [`FontRequest`] (font id, pixel size, and the
//! icon → codepoint pairs to include) plus a [`Typeface`] to rasterize
//! from, and produces an immutable [`FontAsset`].
//!
//! ## Determinism
//!
//! Glyphs are always encoded in ascending codepoint order, so the same
//! request against the same typeface yields byte-identical output no matter
//! how the caller collected the icon set.
//!
//! ## Binary layout
//!
//! See [`layout`] for the `MGF1` table format.

pub mod asset;
pub mod error;
pub mod glyph_map;
pub mod layout;
pub mod synth;
pub mod typeface;

pub use asset::{FontAsset, FontGlyph};
pub use error::{FontError, FontResult};
pub use glyph_map::GlyphMap;
pub use synth::{synthesize, FontRequest};
pub use typeface::{load_fontdue, FontdueTypeface, RasterGlyph, Typeface, TypefaceLoader};
