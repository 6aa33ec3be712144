//! Platform manifest loading.

use std::path::Path;

use anyhow::{Context, Result};
use mglyph_compiler::{PlatformManifest, PlatformRegistry};
use mglyph_config::SourceFormat;

/// Read a JSON or TOML platform manifest into a registry. No manifest
/// means an empty platform.
pub fn load_registry(path: Option<&Path>) -> Result<PlatformRegistry> {
    let Some(path) = path else {
        return Ok(PlatformRegistry::new());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading platform manifest {}", path.display()))?;
    let manifest: PlatformManifest = match SourceFormat::from_path(path) {
        Some(SourceFormat::Toml) => toml::from_str(&text)
            .with_context(|| format!("parsing platform manifest {}", path.display()))?,
        _ => serde_json::from_str(&text)
            .with_context(|| format!("parsing platform manifest {}", path.display()))?,
    };
    manifest
        .into_registry()
        .with_context(|| format!("declaring entities from {}", path.display()))
}
