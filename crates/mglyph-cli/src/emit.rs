//! Build artifacts: the controller manifest and the font table.
//!
//! ```text
//! <out>/<font_id>.mgf          encoded MGF1 font
//! <out>/<font_id>.glyphs.json  glyph index map
//! <out>/<stem>.manifest.json   controller graph, registrations, warnings
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mglyph_compiler::{Compilation, Controller, FontSummary, Registration};
use mglyph_types::Diagnostics;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
struct BuildManifest<'a> {
    source: String,
    source_hash: String,
    font: FontSummary,
    controller: &'a Controller,
    registrations: &'a [Registration],
    warnings: &'a Diagnostics,
}

/// Paths written by [`write_artifacts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub manifest: PathBuf,
    pub font: PathBuf,
    pub glyph_map: PathBuf,
}

/// Write every artifact of `compilation` into `out_dir`, creating it if
/// needed.
pub fn write_artifacts(
    out_dir: &Path,
    source: &Path,
    source_hash: String,
    compilation: &Compilation,
) -> Result<Artifacts> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let font_id = compilation.font.id();
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("config");
    let artifacts = Artifacts {
        manifest: out_dir.join(format!("{stem}.manifest.json")),
        font: out_dir.join(format!("{font_id}.mgf")),
        glyph_map: out_dir.join(format!("{font_id}.glyphs.json")),
    };

    let manifest = BuildManifest {
        source: source.display().to_string(),
        source_hash,
        font: FontSummary::of(&compilation.font),
        controller: &compilation.controller,
        registrations: compilation.registry.registrations(),
        warnings: &compilation.warnings,
    };
    let json = serde_json::to_vec_pretty(&manifest).context("serializing build manifest")?;
    let glyph_map = compilation
        .font
        .glyph_map()
        .to_json()
        .context("serializing glyph map")?;

    write(&artifacts.font, compilation.font.bytes())?;
    write(&artifacts.glyph_map, &glyph_map)?;
    write(&artifacts.manifest, &json)?;
    info!(
        manifest = %artifacts.manifest.display(),
        font = %artifacts.font.display(),
        "wrote artifacts"
    );
    Ok(artifacts)
}

fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mglyph_compiler::Compiler;
    use mglyph_config::SourceFormat;
    use mglyph_font::{FontResult, RasterGlyph, Typeface};
    use mglyph_types::MemoryLocator;

    struct Solid;

    impl Typeface for Solid {
        fn has_glyph(&self, _ch: char) -> bool {
            true
        }

        fn rasterize(&self, _ch: char, px: f32) -> RasterGlyph {
            let side = px as usize;
            RasterGlyph {
                xmin: 0,
                ymin: 0,
                width: side,
                height: side,
                advance: px,
                coverage: vec![255; side * side],
            }
        }

        fn line_height(&self, px: f32) -> f32 {
            px
        }
    }

    fn solid(_name: &str, _bytes: &[u8], _px: f32) -> FontResult<Box<dyn Typeface>> {
        Ok(Box::new(Solid))
    }

    const METADATA: &str = r#"[
        {"name": "bed", "codepoint": "F02E3"},
        {"name": "keyboard-space", "codepoint": "F1050"},
        {"name": "walk", "codepoint": "F0583"},
        {"name": "run", "codepoint": "F070E"},
        {"name": "doorbell", "codepoint": "F12E4"},
        {"name": "countertop", "codepoint": "F0818"},
        {"name": "sofa-single", "codepoint": "F09A6"},
        {"name": "silverware-spoon", "codepoint": "F0A4C"},
        {"name": "thermometer", "codepoint": "F050F"},
        {"name": "sun-thermometer", "codepoint": "F18D6"}
    ]"#;

    #[test]
    fn writes_font_map_and_manifest() {
        let locator = MemoryLocator::new()
            .with("mdi.meta.json", METADATA)
            .with("mdi.ttf", Vec::<u8>::new());
        let text = r#"{ "groups": [ { "id": "bedroom", "glyph": { "type": "mdi", "id": "bed" }, "widgets": [] } ] }"#;
        let compilation = Compiler::new(&locator)
            .with_typeface_loader(solid)
            .compile_source(text, SourceFormat::Json, Default::default())
            .unwrap();

        let out = tempfile::tempdir().unwrap();
        let artifacts = write_artifacts(
            out.path(),
            Path::new("conf/bedroom.json"),
            mglyph_compiler::source_hash(text),
            &compilation,
        )
        .unwrap();

        assert_eq!(
            artifacts.manifest.file_name().unwrap(),
            "bedroom.manifest.json"
        );
        assert_eq!(
            std::fs::read(&artifacts.font).unwrap(),
            compilation.font.bytes()
        );
        let manifest: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&artifacts.manifest).unwrap()).unwrap();
        assert_eq!(manifest["controller"]["groups"][0]["id"], "bedroom");
        assert_eq!(manifest["font"]["glyphs"], 1);
        assert_eq!(manifest["font"]["digest"], compilation.font.digest_hex());
        let glyph_map = std::fs::read(&artifacts.glyph_map).unwrap();
        let glyph_map = mglyph_font::GlyphMap::from_json(&glyph_map).unwrap();
        assert_eq!(&glyph_map, compilation.font.glyph_map());
        assert_eq!(glyph_map.entries.len(), 1);
    }
}
