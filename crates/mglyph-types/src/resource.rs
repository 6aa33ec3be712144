//! Resource lookup seam.
//!
//! The compiler never walks search paths itself. The surrounding platform
//! supplies a [`ResourceLocator`] that turns a resource name such as
//! `mdi.meta.json` into bytes.

use std::collections::BTreeMap;
use thiserror::Error;

/// Failure to produce a named resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    #[error("resource '{name}' not found (searched: {})", .searched.join(", "))]
    NotFound { name: String, searched: Vec<String> },

    #[error("resource '{name}' at {location} could not be read: {message}")]
    Unreadable {
        name: String,
        location: String,
        message: String,
    },
}

impl ResourceError {
    pub fn name(&self) -> &str {
        match self {
            Self::NotFound { name, .. } | Self::Unreadable { name, .. } => name,
        }
    }
}

/// Capability to resolve a resource name to its bytes.
pub trait ResourceLocator {
    fn resolve(&self, name: &str) -> Result<Vec<u8>, ResourceError>;
}

/// A locator backed by an in-memory table.
#[derive(Debug, Clone, Default)]
pub struct MemoryLocator {
    resources: BTreeMap<String, Vec<u8>>,
}

impl MemoryLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource, builder style.
    pub fn with(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.resources.insert(name.into(), bytes.into());
    }
}

impl ResourceLocator for MemoryLocator {
    fn resolve(&self, name: &str) -> Result<Vec<u8>, ResourceError> {
        self.resources
            .get(name)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound {
                name: name.to_string(),
                searched: vec!["<memory>".to_string()],
            })
    }
}
