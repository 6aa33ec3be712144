//! Shared types for the matrix glyph compiler.
//!
//! This crate defines the fixed icon catalog vocabulary, glyph references,
//! document paths, diagnostics, and the resource locator seam used across
//! all compiler stages.

mod error;
mod glyph;
mod icon;
mod path;
mod resource;

pub use error::{Diagnostic, Diagnostics, ErrorCategory, ErrorCode, Severity, MAX_ERRORS};
pub use glyph::GlyphRef;
pub use icon::{Codepoint, IconName, UnsupportedIconName};
pub use path::{DocPath, Segment};
pub use resource::{MemoryLocator, ResourceError, ResourceLocator};

/// Result type used throughout the compiler.
pub type Result<T> = std::result::Result<T, Diagnostic>;
