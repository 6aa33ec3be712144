//! Matrix glyph compiler: orchestrates the full compilation pipeline.
//!
//! ```text
//! document → schema validation → icon catalog → icon union
//!          → font synthesis (once) → widget tree + companion registrations
//! ```
//!
//! Validation reports every schema problem at once. Every later stage stops
//! at its first error. A failed compilation hands back nothing: the
//! [`PlatformRegistry`] is consumed and only returned inside a successful
//! [`Compilation`], so no partial registrations survive a failure.

pub mod builder;
pub mod catalog;
pub mod defaults;
pub mod error;
pub mod graph;
pub mod latch;
pub mod registry;
pub mod resolver;

use mglyph_config::{Document, SourceFormat};
use mglyph_font::{load_fontdue, synthesize, FontAsset, FontError, FontRequest, TypefaceLoader};
use mglyph_types::{Diagnostics, IconName, ResourceLocator};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

pub use builder::{font_icons, widget_id, TreeBuilder};
pub use catalog::{CatalogError, IconCatalog, METADATA_RESOURCE};
pub use error::{BuildError, BuildResult};
pub use graph::{
    AlertSensor, BinarySensorWidget, Controller, GlyphHandle, Group, SensorWidget, StickySwitch,
    Widget, ANIMATION_INTERVAL_MS,
};
pub use latch::AlertLatch;
pub use registry::{
    Declaration, EntityKind, EntityMeta, ManifestEntity, Origin, PlatformManifest,
    PlatformRegistry, Registration,
};
pub use resolver::GlyphResolver;

/// Default font identifier.
pub const FONT_ID: &str = "matrix_glyphs_font";
/// Default font pixel size.
pub const FONT_SIZE: u16 = 8;
/// Default name of the typeface resource.
pub const TYPEFACE_RESOURCE: &str = "mdi.ttf";

// ══════════════════════════════════════════════════════════════════════════════
// Options
// ══════════════════════════════════════════════════════════════════════════════

/// Knobs of one compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileOptions {
    pub font_id: String,
    pub font_size: u16,
    pub metadata_resource: String,
    pub typeface_resource: String,
    /// Give widgets the default glyphs implied by their source's unit and
    /// device class.
    pub device_class_defaults: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            font_id: FONT_ID.to_string(),
            font_size: FONT_SIZE,
            metadata_resource: METADATA_RESOURCE.to_string(),
            typeface_resource: TYPEFACE_RESOURCE.to_string(),
            device_class_defaults: false,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Compiler
// ══════════════════════════════════════════════════════════════════════════════

/// Everything a successful compilation produces.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub controller: Controller,
    pub font: FontAsset,
    /// The input registry plus every companion the build registered.
    pub registry: PlatformRegistry,
    pub warnings: Diagnostics,
}

/// The compilation driver.
pub struct Compiler<'a> {
    locator: &'a dyn ResourceLocator,
    options: CompileOptions,
    typeface_loader: TypefaceLoader,
}

impl<'a> Compiler<'a> {
    /// A compiler resolving resources through `locator`, rasterizing with
    /// fontdue.
    pub fn new(locator: &'a dyn ResourceLocator) -> Self {
        Self {
            locator,
            options: CompileOptions::default(),
            typeface_loader: load_fontdue,
        }
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_typeface_loader(mut self, loader: TypefaceLoader) -> Self {
        self.typeface_loader = loader;
        self
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile configuration text.
    pub fn compile_source(
        &self,
        text: &str,
        format: SourceFormat,
        registry: PlatformRegistry,
    ) -> Result<Compilation, Diagnostics> {
        let tree = mglyph_config::parse_tree(text, format).map_err(Diagnostics::single)?;
        self.compile(&tree, registry)
    }

    /// Compile an already-parsed document tree.
    pub fn compile(
        &self,
        tree: &serde_json::Value,
        registry: PlatformRegistry,
    ) -> Result<Compilation, Diagnostics> {
        let validation = mglyph_config::validate(tree);
        match validation.document {
            Some(document) if !validation.errors.has_errors() => {
                self.compile_document(&document, registry)
            }
            _ => Err(validation.errors),
        }
    }

    /// Compile a validated document.
    pub fn compile_document(
        &self,
        document: &Document,
        mut registry: PlatformRegistry,
    ) -> Result<Compilation, Diagnostics> {
        let catalog = IconCatalog::load(self.locator, &self.options.metadata_resource)
            .map_err(|e| Diagnostics::single(e.to_diagnostic()))?;

        let icons = font_icons(document, &registry, self.options.device_class_defaults);
        debug!(icons = icons.len(), "collected icon union");

        let font = self
            .synthesize(&catalog, &icons)
            .map_err(|e| Diagnostics::single(e.to_diagnostic()))?;

        let resolver = GlyphResolver::new(&catalog, &font);
        let mut builder = TreeBuilder::new(resolver, &mut registry)
            .with_device_class_defaults(self.options.device_class_defaults);
        let controller = builder
            .build_controller(document, &icons)
            .map_err(|e| Diagnostics::single(e.to_diagnostic()))?;
        let warnings = builder.into_warnings();

        info!(
            groups = controller.groups.len(),
            widgets = document.widget_count(),
            glyphs = font.glyphs().len(),
            companions = registry.registrations().len(),
            "compiled controller"
        );
        Ok(Compilation {
            controller,
            font,
            registry,
            warnings,
        })
    }

    fn synthesize(
        &self,
        catalog: &IconCatalog,
        icons: &std::collections::BTreeSet<IconName>,
    ) -> Result<FontAsset, FontError> {
        let glyphs = icons
            .iter()
            .filter_map(|icon| catalog.get(*icon).map(|cp| (*icon, cp)))
            .collect();
        let request = FontRequest {
            id: self.options.font_id.clone(),
            size: self.options.font_size,
            glyphs,
        };
        let name = &self.options.typeface_resource;
        let bytes = self
            .locator
            .resolve(name)
            .map_err(FontError::SourceUnavailable)?;
        let typeface = (self.typeface_loader)(name, &bytes, f32::from(request.size))?;
        synthesize(&request, typeface.as_ref())
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Host-facing entry points
// ══════════════════════════════════════════════════════════════════════════════

/// Schema-check configuration text without touching any resource.
pub fn check(text: &str, format: SourceFormat) -> Diagnostics {
    mglyph_config::load(text, format).errors
}

/// Summary of the synthesized font.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontSummary {
    pub id: String,
    pub size: u16,
    pub line_height: u16,
    pub glyphs: usize,
    pub bytes: usize,
    /// SHA-256 of the encoded table, hex.
    pub digest: String,
}

impl FontSummary {
    pub fn of(font: &FontAsset) -> Self {
        Self {
            id: font.id().to_string(),
            size: font.size(),
            line_height: font.line_height(),
            glyphs: font.glyphs().len(),
            bytes: font.bytes().len(),
            digest: font.digest_hex(),
        }
    }
}

/// Serializable outcome of one compilation, for hosts that only speak JSON.
#[derive(Debug, Clone, Serialize)]
pub struct CompileResult {
    pub success: bool,
    /// SHA-256 of the configuration text, hex.
    pub source_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<Controller>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<FontSummary>,
    pub registrations: Vec<Registration>,
    pub diagnostics: Diagnostics,
}

/// Compile `text` and fold the outcome into a [`CompileResult`].
pub fn compile_to_result(
    compiler: &Compiler<'_>,
    text: &str,
    format: SourceFormat,
    registry: PlatformRegistry,
) -> CompileResult {
    let source_hash = source_hash(text);
    match compiler.compile_source(text, format, registry) {
        Ok(compilation) => CompileResult {
            success: true,
            source_hash,
            font: Some(FontSummary::of(&compilation.font)),
            registrations: compilation.registry.registrations().to_vec(),
            controller: Some(compilation.controller),
            diagnostics: compilation.warnings,
        },
        Err(diagnostics) => CompileResult {
            success: false,
            source_hash,
            controller: None,
            font: None,
            registrations: Vec::new(),
            diagnostics,
        },
    }
}

/// SHA-256 of configuration text, hex.
pub fn source_hash(text: &str) -> String {
    Sha256::digest(text.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
