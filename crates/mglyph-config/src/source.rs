//! Document text formats.

use std::path::Path;

use mglyph_types::{Diagnostic, DocPath, ErrorCode};
use serde_json::Value;

/// Text format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Toml,
}

impl SourceFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Parse document text into a generic tree.
///
/// Both formats produce the same tree shape, so one schema validates both.
pub fn parse_tree(text: &str, format: SourceFormat) -> Result<Value, Diagnostic> {
    match format {
        SourceFormat::Json => serde_json::from_str(text).map_err(|e| {
            Diagnostic::new(
                ErrorCode::MALFORMED_DOCUMENT,
                format!("invalid JSON at {}:{}: {e}", e.line(), e.column()),
                DocPath::root(),
            )
        }),
        SourceFormat::Toml => toml::from_str(text).map_err(|e| {
            Diagnostic::new(
                ErrorCode::MALFORMED_DOCUMENT,
                format!("invalid TOML: {}", e.message()),
                DocPath::root(),
            )
        }),
    }
}
