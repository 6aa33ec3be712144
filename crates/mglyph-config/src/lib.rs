//! Matrix glyph configuration: document text to a validated [`Document`].
//!
//! ```text
//! JSON / TOML text → tree → schema validation → Document
//! ```
//!
//! Validation is exhaustive: every structural problem in the document is
//! reported in one [`mglyph_types::Diagnostics`] batch before any build
//! step runs.

pub mod document;
mod source;
mod validate;

pub use document::{
    BinarySensorSource, Document, GlyphSpec, GroupSpec, Ident, OutputSpec, SensorSource,
    SourceSpec, SwitchSpec, WidgetSpec,
};
pub use source::{parse_tree, SourceFormat};
pub use validate::{is_identifier, ValidationResult, Validator};

/// Parse and validate a configuration document in one step.
pub fn load(text: &str, format: SourceFormat) -> ValidationResult {
    match parse_tree(text, format) {
        Ok(tree) => validate(&tree),
        Err(error) => ValidationResult {
            document: None,
            errors: mglyph_types::Diagnostics::single(error),
        },
    }
}

/// Validate an already-parsed document tree.
pub fn validate(tree: &serde_json::Value) -> ValidationResult {
    Validator::new().validate(tree)
}
