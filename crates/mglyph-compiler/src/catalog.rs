//! Icon catalog: the fixed icon set bound to codepoints from the metadata
//! resource.
//!
//! The metadata is a JSON array of `{ "name": ..., "codepoint": "<hex>" }`
//! records, usually the full Material Design Icons list. Entries outside the
//! supported set are skipped; every supported name must be present.

use std::collections::BTreeMap;

use mglyph_types::{
    Codepoint, Diagnostic, DocPath, ErrorCode, IconName, ResourceError, ResourceLocator,
    UnsupportedIconName,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// Default name of the icon metadata resource.
pub const METADATA_RESOURCE: &str = "mdi.meta.json";

/// Errors raised while building the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("icon metadata unavailable: {0}")]
    MissingResource(#[source] ResourceError),

    #[error("icon metadata '{resource}' is malformed: {message}")]
    Malformed { resource: String, message: String },

    #[error("icon metadata does not define: {}", join_icons(.missing))]
    Incomplete { missing: Vec<IconName> },

    #[error(transparent)]
    UnsupportedIconName(#[from] UnsupportedIconName),
}

impl CatalogError {
    /// Convert into a structured diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = match self {
            Self::MissingResource(_) => ErrorCode::MISSING_CATALOG_RESOURCE,
            Self::Malformed { .. } => ErrorCode::MALFORMED_CATALOG,
            Self::Incomplete { .. } => ErrorCode::INCOMPLETE_CATALOG,
            Self::UnsupportedIconName(_) => ErrorCode::UNSUPPORTED_ICON_NAME,
        };
        let diagnostic = Diagnostic::new(code, self.to_string(), DocPath::root());
        match self {
            Self::UnsupportedIconName(_) => {
                diagnostic.with_suggestion(format!("use one of: {}", IconName::valid_names()))
            }
            _ => diagnostic,
        }
    }
}

fn join_icons(icons: &[IconName]) -> String {
    icons
        .iter()
        .map(|i| i.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Deserialize)]
struct MetadataRecord {
    name: String,
    codepoint: String,
}

/// Every supported icon name bound to its codepoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconCatalog {
    codes: BTreeMap<IconName, Codepoint>,
}

impl IconCatalog {
    /// Resolve `resource` through `locator` and build the catalog from it.
    pub fn load(locator: &dyn ResourceLocator, resource: &str) -> Result<Self, CatalogError> {
        let bytes = locator
            .resolve(resource)
            .map_err(CatalogError::MissingResource)?;
        let catalog = Self::from_metadata(resource, &bytes)?;
        info!(resource, icons = catalog.len(), "loaded icon catalog");
        Ok(catalog)
    }

    /// Build the catalog from raw metadata bytes.
    ///
    /// A later record for the same name replaces an earlier one. Records
    /// outside the supported set are not inspected beyond their name.
    pub fn from_metadata(resource: &str, bytes: &[u8]) -> Result<Self, CatalogError> {
        let records: Vec<MetadataRecord> =
            serde_json::from_slice(bytes).map_err(|e| CatalogError::Malformed {
                resource: resource.to_string(),
                message: e.to_string(),
            })?;

        let mut codes = BTreeMap::new();
        let mut skipped = 0usize;
        for record in records {
            let Ok(icon) = record.name.parse::<IconName>() else {
                skipped += 1;
                continue;
            };
            let codepoint =
                Codepoint::from_hex(&record.codepoint).ok_or_else(|| CatalogError::Malformed {
                    resource: resource.to_string(),
                    message: format!(
                        "icon '{icon}' has invalid codepoint '{}'",
                        record.codepoint
                    ),
                })?;
            codes.insert(icon, codepoint);
        }
        debug!(resource, mapped = codes.len(), skipped, "read icon metadata");

        let missing: Vec<IconName> = IconName::ALL
            .iter()
            .copied()
            .filter(|icon| !codes.contains_key(icon))
            .collect();
        if !missing.is_empty() {
            return Err(CatalogError::Incomplete { missing });
        }
        Ok(Self { codes })
    }

    /// Codepoint of a supported icon.
    pub fn get(&self, icon: IconName) -> Option<Codepoint> {
        self.codes.get(&icon).copied()
    }

    /// Look up an icon by its textual name.
    pub fn lookup(&self, name: &str) -> Result<Codepoint, CatalogError> {
        let icon: IconName = name.parse()?;
        self.get(icon).ok_or(CatalogError::Incomplete {
            missing: vec![icon],
        })
    }

    /// All entries in icon-name order.
    pub fn iter(&self) -> impl Iterator<Item = (IconName, Codepoint)> + '_ {
        self.codes.iter().map(|(i, c)| (*i, *c))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
