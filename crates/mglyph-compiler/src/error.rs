//! Widget-tree build errors.

use mglyph_types::{Diagnostic, DocPath, ErrorCode, IconName};
use thiserror::Error;

use crate::registry::EntityKind;

/// Errors raised while binding the document to the platform and building
/// the object graph. Each carries the document path it was raised at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// An `image` glyph names an asset the platform never declared.
    #[error("image asset '{id}' is not declared")]
    UnknownAsset { id: String, path: DocPath },

    /// A widget source does not name a declared entity of the right kind.
    #[error("{expected} '{id}' is not declared{}", found_note(.found))]
    UnboundReference {
        id: String,
        expected: EntityKind,
        found: Option<EntityKind>,
        path: DocPath,
    },

    /// An id is declared twice across the platform and the document.
    #[error("'{id}' is already declared as {existing}")]
    DuplicateDeclaration {
        id: String,
        existing: EntityKind,
        path: DocPath,
    },

    /// An icon resolved by the catalog is absent from the synthesized font.
    #[error("icon '{icon}' is missing from the synthesized font")]
    UnresolvedIcon { icon: IconName, path: DocPath },
}

fn found_note(found: &Option<EntityKind>) -> String {
    match found {
        Some(kind) => format!(" (found {kind})"),
        None => String::new(),
    }
}

impl BuildError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownAsset { .. } => ErrorCode::UNKNOWN_ASSET,
            Self::UnboundReference { .. } => ErrorCode::UNBOUND_REFERENCE,
            Self::DuplicateDeclaration { .. } => ErrorCode::DUPLICATE_DECLARATION,
            Self::UnresolvedIcon { .. } => ErrorCode::UNRESOLVED_ICON,
        }
    }

    pub fn path(&self) -> &DocPath {
        match self {
            Self::UnknownAsset { path, .. }
            | Self::UnboundReference { path, .. }
            | Self::DuplicateDeclaration { path, .. }
            | Self::UnresolvedIcon { path, .. } => path,
        }
    }

    /// Convert into a structured diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(self.code(), self.to_string(), self.path().clone())
    }
}

/// Build result type alias.
pub type BuildResult<T> = Result<T, BuildError>;
