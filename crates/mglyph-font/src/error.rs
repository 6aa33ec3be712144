//! Font synthesis error types.

use mglyph_types::{Codepoint, Diagnostic, DocPath, ErrorCode, IconName, ResourceError};
use thiserror::Error;

/// Errors that can occur while synthesizing the font asset.
#[derive(Debug, Error)]
pub enum FontError {
    /// The typeface resource could not be located.
    #[error("font source unavailable: {0}")]
    SourceUnavailable(#[source] ResourceError),

    /// The typeface bytes could not be parsed.
    #[error("font source '{name}' is not a usable typeface: {message}")]
    InvalidSource { name: String, message: String },

    /// The typeface has no outline for a requested codepoint.
    #[error("typeface has no glyph for icon '{icon}' ({codepoint})")]
    GlyphMissing { icon: IconName, codepoint: Codepoint },

    /// A glyph or table exceeded the limits of the binary layout.
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}

impl FontError {
    /// Convert into a structured diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = match self {
            Self::SourceUnavailable(_) => ErrorCode::FONT_SOURCE_UNAVAILABLE,
            Self::InvalidSource { .. } | Self::LimitExceeded(_) => ErrorCode::FONT_SOURCE_INVALID,
            Self::GlyphMissing { .. } => ErrorCode::GLYPH_MISSING_FROM_TYPEFACE,
        };
        Diagnostic::new(code, self.to_string(), DocPath::root())
    }
}

/// Font synthesis result type alias.
pub type FontResult<T> = Result<T, FontError>;
