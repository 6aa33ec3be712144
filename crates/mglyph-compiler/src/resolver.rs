//! Glyph resolution: symbolic glyph references to drawable handles.

use mglyph_font::FontAsset;
use mglyph_types::{DocPath, GlyphRef, IconName};

use crate::catalog::IconCatalog;
use crate::error::{BuildError, BuildResult};
use crate::graph::{GlyphHandle, ANIMATION_INTERVAL_MS};
use crate::registry::{EntityKind, PlatformRegistry};

/// Binds glyph references against the catalog, the synthesized font and
/// the platform's image assets.
#[derive(Debug, Clone, Copy)]
pub struct GlyphResolver<'a> {
    catalog: &'a IconCatalog,
    font: &'a FontAsset,
}

impl<'a> GlyphResolver<'a> {
    pub fn new(catalog: &'a IconCatalog, font: &'a FontAsset) -> Self {
        Self { catalog, font }
    }

    pub fn font(&self) -> &'a FontAsset {
        self.font
    }

    pub fn catalog(&self) -> &'a IconCatalog {
        self.catalog
    }

    /// Resolve a glyph reference read at `path`.
    pub fn resolve(
        &self,
        glyph: &GlyphRef,
        path: &DocPath,
        registry: &PlatformRegistry,
    ) -> BuildResult<GlyphHandle> {
        match glyph {
            GlyphRef::Image(asset) => {
                registry.require(asset, EntityKind::Image, &path.key("id"))?;
                Ok(GlyphHandle::Image {
                    asset: asset.clone(),
                })
            }
            GlyphRef::Mdi(icon) => self.icon(*icon, path),
        }
    }

    /// Resolve a catalog icon. The font was synthesized from the same
    /// catalog, so a miss means the union and the build disagree.
    pub fn icon(&self, icon: IconName, path: &DocPath) -> BuildResult<GlyphHandle> {
        let codepoint = self
            .catalog
            .get(icon)
            .filter(|cp| self.font.contains(*cp))
            .ok_or_else(|| BuildError::UnresolvedIcon {
                icon,
                path: path.clone(),
            })?;
        Ok(GlyphHandle::Mdi {
            icon,
            codepoint,
            font: self.font.id().to_string(),
        })
    }

    /// An animation cycling through `frames`.
    pub fn animation(&self, frames: &[IconName], path: &DocPath) -> BuildResult<GlyphHandle> {
        let frames = frames
            .iter()
            .map(|icon| self.icon(*icon, path))
            .collect::<BuildResult<Vec<_>>>()?;
        Ok(GlyphHandle::Animation {
            frames,
            interval_ms: ANIMATION_INTERVAL_MS,
        })
    }
}
