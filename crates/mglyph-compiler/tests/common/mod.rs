//! Shared fixtures: an in-memory resource set, a fake typeface, and a
//! platform with a handful of entities.

#![allow(dead_code)]

use std::collections::BTreeSet;

use mglyph_compiler::{
    Compilation, CompileOptions, Compiler, EntityKind, EntityMeta, PlatformRegistry,
};
use mglyph_font::{FontError, FontResult, RasterGlyph, Typeface};
use mglyph_types::{Codepoint, Diagnostics, ErrorCode, MemoryLocator};

pub const ICONS: [(&str, &str); 10] = [
    ("bed", "F02E3"),
    ("keyboard-space", "F1050"),
    ("walk", "F0583"),
    ("run", "F070E"),
    ("doorbell", "F12E4"),
    ("countertop", "F0818"),
    ("sofa-single", "F09A6"),
    ("silverware-spoon", "F0A4C"),
    ("thermometer", "F050F"),
    ("sun-thermometer", "F18D6"),
];

pub fn cp(name: &str) -> Codepoint {
    let hex = ICONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, h)| *h)
        .unwrap();
    Codepoint::from_hex(hex).unwrap()
}

/// Metadata with every fixture icon except `skip`, plus an unrelated entry.
pub fn metadata_without(skip: &[&str]) -> String {
    let mut records = vec![r#"{"name":"rocket","codepoint":"F0463","aliases":["launch"]}"#.to_string()];
    records.extend(
        ICONS
            .iter()
            .filter(|(name, _)| !skip.contains(name))
            .map(|(name, hex)| format!(r#"{{"name":"{name}","codepoint":"{hex}"}}"#)),
    );
    format!("[{}]", records.join(","))
}

/// Fake typeface bytes: the UTF-8 text of every codepoint it has.
pub fn typeface_without(skip: &[&str]) -> Vec<u8> {
    ICONS
        .iter()
        .filter(|(name, _)| !skip.contains(name))
        .map(|(name, _)| cp(name).as_char())
        .collect::<String>()
        .into_bytes()
}

pub fn locator() -> MemoryLocator {
    MemoryLocator::new()
        .with("mdi.meta.json", metadata_without(&[]))
        .with("mdi.ttf", typeface_without(&[]))
}

struct TextTypeface {
    chars: BTreeSet<char>,
}

impl Typeface for TextTypeface {
    fn has_glyph(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    fn rasterize(&self, ch: char, px: f32) -> RasterGlyph {
        let side = px as usize;
        RasterGlyph {
            xmin: 0,
            ymin: 0,
            width: side,
            height: side,
            advance: px,
            coverage: (0..side * side)
                .map(|i| if (i as u32 + ch as u32) % 3 == 0 { 255 } else { 0 })
                .collect(),
        }
    }

    fn line_height(&self, px: f32) -> f32 {
        px
    }
}

pub fn text_typeface(name: &str, bytes: &[u8], _px: f32) -> FontResult<Box<dyn Typeface>> {
    let text = std::str::from_utf8(bytes).map_err(|e| FontError::InvalidSource {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    Ok(Box::new(TextTypeface {
        chars: text.chars().collect(),
    }))
}

pub fn compiler(locator: &MemoryLocator) -> Compiler<'_> {
    Compiler::new(locator).with_typeface_loader(text_typeface)
}

pub fn with_defaults(compiler: Compiler<'_>) -> Compiler<'_> {
    compiler.with_options(CompileOptions {
        device_class_defaults: true,
        ..CompileOptions::default()
    })
}

pub fn registry() -> PlatformRegistry {
    let mut registry = PlatformRegistry::new();
    let entities = [
        ("temp1", EntityKind::Sensor, EntityMeta::default().with_unit("°C")),
        ("humidity", EntityKind::Sensor, EntityMeta::default().with_unit("%")),
        (
            "hall_motion",
            EntityKind::BinarySensor,
            EntityMeta::default().with_device_class("motion"),
        ),
        (
            "front_door",
            EntityKind::BinarySensor,
            EntityMeta::default().with_device_class("door"),
        ),
        ("porch_light", EntityKind::Switch, EntityMeta::default()),
        ("kitchen", EntityKind::Image, EntityMeta::default()),
    ];
    for (id, kind, meta) in entities {
        registry.declare(id, kind, meta).unwrap();
    }
    registry
}

pub fn compile(doc: &serde_json::Value) -> Result<Compilation, Diagnostics> {
    let locator = locator();
    compiler(&locator).compile(doc, registry())
}

pub fn assert_error(result: Result<Compilation, Diagnostics>, expected: ErrorCode) -> Diagnostics {
    let errors = match result {
        Ok(_) => panic!("expected error code {expected}, compilation succeeded"),
        Err(errors) => errors,
    };
    assert!(
        errors.contains(expected),
        "expected error code {expected}, got: {:?}",
        errors
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.code, e.message))
            .collect::<Vec<_>>()
    );
    errors
}

pub fn binary_source(id: &str, switch: &str, alert: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "binary_sensor",
        "id": id,
        "switch": { "id": switch },
        "binary_sensor": { "id": alert }
    })
}
