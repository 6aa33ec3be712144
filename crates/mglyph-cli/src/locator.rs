//! Filesystem resource lookup.

use std::io::ErrorKind;
use std::path::PathBuf;

use mglyph_types::{ResourceError, ResourceLocator};
use tracing::debug;

/// Resolves resource names against an ordered list of directories; the
/// first directory holding the file wins.
#[derive(Debug, Clone)]
pub struct DirLocator {
    roots: Vec<PathBuf>,
}

impl DirLocator {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }
}

impl ResourceLocator for DirLocator {
    fn resolve(&self, name: &str) -> Result<Vec<u8>, ResourceError> {
        for root in &self.roots {
            let path = root.join(name);
            match std::fs::read(&path) {
                Ok(bytes) => {
                    debug!(path = %path.display(), bytes = bytes.len(), "resolved resource");
                    return Ok(bytes);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(ResourceError::Unreadable {
                        name: name.to_string(),
                        location: path.display().to_string(),
                        message: e.to_string(),
                    })
                }
            }
        }
        Err(ResourceError::NotFound {
            name: name.to_string(),
            searched: self
                .roots
                .iter()
                .map(|r| r.display().to_string())
                .collect(),
        })
    }
}
