use crate::DocPath;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of errors stored before further errors are only counted.
pub const MAX_ERRORS: usize = 20;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Schema,
    Catalog,
    Reference,
    Resource,
    Internal,
}

/// Numeric error code (E100–E599).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Schema errors (E100–E199) ──
    pub const MISSING_FIELD: Self = Self(100);
    pub const WRONG_TYPE: Self = Self(101);
    pub const UNKNOWN_FIELD: Self = Self(102);
    pub const INVALID_IDENTIFIER: Self = Self(103);
    pub const MALFORMED_DOCUMENT: Self = Self(104);
    /// Accepted by the schema but has no effect on the output.
    pub const IGNORED_FIELD: Self = Self(105);
    pub const UNSUPPORTED_ICON_NAME: Self = Self(110);
    pub const UNSUPPORTED_GLYPH_TYPE: Self = Self(111);
    pub const UNSUPPORTED_SOURCE_TYPE: Self = Self(112);

    // ── Catalog errors (E200–E299) ──
    pub const MISSING_CATALOG_RESOURCE: Self = Self(200);
    pub const INCOMPLETE_CATALOG: Self = Self(201);
    pub const MALFORMED_CATALOG: Self = Self(202);

    // ── Reference errors (E300–E399) ──
    pub const UNKNOWN_ASSET: Self = Self(300);
    pub const UNBOUND_REFERENCE: Self = Self(301);
    pub const DUPLICATE_DECLARATION: Self = Self(302);

    // ── Resource errors (E400–E499) ──
    pub const FONT_SOURCE_UNAVAILABLE: Self = Self(400);
    pub const FONT_SOURCE_INVALID: Self = Self(401);
    pub const GLYPH_MISSING_FROM_TYPEFACE: Self = Self(402);

    // ── Internal errors (E500–E599) ──
    pub const UNRESOLVED_ICON: Self = Self(500);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            100..=199 => ErrorCategory::Schema,
            200..=299 => ErrorCategory::Catalog,
            300..=399 => ErrorCategory::Reference,
            400..=499 => ErrorCategory::Resource,
            _ => ErrorCategory::Internal,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema => write!(f, "schema"),
            Self::Catalog => write!(f, "catalog"),
            Self::Reference => write!(f, "reference"),
            Self::Resource => write!(f, "resource"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

/// A structured compiler diagnostic.
///
/// Hosts render these directly; they must not parse free-form strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Error code (e.g., E110).
    pub code: ErrorCode,
    pub severity: Severity,
    /// Error category (derived from code).
    pub category: ErrorCategory,
    pub message: String,
    /// Where in the document the problem is. Root for document-wide issues.
    pub path: DocPath,
    /// Optional fix suggestion, such as the set of valid values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>, path: DocPath) -> Self {
        Self {
            code,
            severity: Severity::Error,
            category: code.category(),
            message: message.into(),
            path,
            suggestion: None,
        }
    }

    /// Create a warning; warnings never fail a compilation.
    pub fn warning(code: ErrorCode, message: impl Into<String>, path: DocPath) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::new(code, message, path)
        }
    }

    /// Attach a fix suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.path, self.code, self.category, self.message
        )
    }
}

impl std::error::Error for Diagnostic {}

/// The structured output of a compilation's error reporting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub total_errors: usize,
    pub total_warnings: usize,
}

impl Diagnostics {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A result holding exactly one error.
    pub fn single(error: Diagnostic) -> Self {
        let mut diagnostics = Self::empty();
        diagnostics.push_error(error);
        diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    /// Add an error, respecting the MAX_ERRORS limit.
    pub fn push_error(&mut self, error: Diagnostic) {
        if self.errors.len() < MAX_ERRORS {
            self.errors.push(error);
        }
        self.total_errors += 1;
    }

    pub fn push_warning(&mut self, warning: Diagnostic) {
        self.warnings.push(warning);
        self.total_warnings += 1;
    }

    /// Move all entries of `other` into `self`.
    pub fn extend(&mut self, other: Diagnostics) {
        let hidden = other.total_errors - other.errors.len();
        for error in other.errors {
            self.push_error(error);
        }
        self.total_errors += hidden;
        for warning in other.warnings {
            self.push_warning(warning);
        }
    }

    /// Whether any stored error carries `code`.
    pub fn contains(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "error {error}")?;
        }
        let hidden = self.total_errors - self.errors.len();
        if hidden > 0 {
            writeln!(f, "... and {hidden} more errors")?;
        }
        for warning in &self.warnings {
            writeln!(f, "warning {warning}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}
