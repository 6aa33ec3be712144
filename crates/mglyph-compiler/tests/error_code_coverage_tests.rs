//! Error code coverage tests: every code in E100–E599 has at least one test
//! asserting the pipeline emits it.

mod common;

use std::collections::BTreeMap;

use common::*;
use mglyph_compiler::{BuildError, Compiler, GlyphResolver, IconCatalog};
use mglyph_font::{synthesize, FontRequest};
use mglyph_types::{DocPath, ErrorCode, IconName, MemoryLocator};
use serde_json::json;

fn group(glyph: serde_json::Value, source: serde_json::Value) -> serde_json::Value {
    json!({ "groups": [ { "id": "g", "glyph": glyph, "widgets": [ { "source": source } ] } ] })
}

fn mdi(id: &str) -> serde_json::Value {
    json!({ "type": "mdi", "id": id })
}

fn sensor(id: &str) -> serde_json::Value {
    json!({ "type": "sensor", "id": id })
}

// ══════════════════════════════════════════════════════════════════════════════
// E100–E112: schema
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn e100_missing_field() {
    let doc = json!({ "groups": [ { "id": "g", "widgets": [] } ] });
    assert_error(compile(&doc), ErrorCode::MISSING_FIELD);
}

#[test]
fn e101_wrong_type() {
    let mut source = binary_source("front_door", "s", "a");
    source["switch"]["sticky"] = json!("yes");
    assert_error(compile(&group(mdi("bed"), source)), ErrorCode::WRONG_TYPE);
}

#[test]
fn e102_unknown_field() {
    let mut doc = group(mdi("bed"), sensor("temp1"));
    doc["groups"][0]["colour"] = json!("red");
    assert_error(compile(&doc), ErrorCode::UNKNOWN_FIELD);
}

#[test]
fn e103_invalid_identifier() {
    assert_error(
        compile(&group(mdi("bed"), sensor("temp-1"))),
        ErrorCode::INVALID_IDENTIFIER,
    );
}

#[test]
fn e104_malformed_document() {
    let locator = locator();
    let result = compiler(&locator).compile_source(
        "groups = [",
        mglyph_config::SourceFormat::Toml,
        registry(),
    );
    assert_error(result, ErrorCode::MALFORMED_DOCUMENT);
}

#[test]
fn e110_unsupported_icon_name() {
    assert_error(
        compile(&group(mdi("rocket"), sensor("temp1"))),
        ErrorCode::UNSUPPORTED_ICON_NAME,
    );
}

#[test]
fn e111_unsupported_glyph_type() {
    let glyph = json!({ "type": "emoji", "id": "bed" });
    assert_error(
        compile(&group(glyph, sensor("temp1"))),
        ErrorCode::UNSUPPORTED_GLYPH_TYPE,
    );
}

#[test]
fn e112_unsupported_source_type() {
    let source = json!({ "type": "text_sensor", "id": "temp1" });
    assert_error(
        compile(&group(mdi("bed"), source)),
        ErrorCode::UNSUPPORTED_SOURCE_TYPE,
    );
}

// ══════════════════════════════════════════════════════════════════════════════
// E200–E202: catalog
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn e200_missing_catalog_resource() {
    let locator = MemoryLocator::new().with("mdi.ttf", typeface_without(&[]));
    let errors = assert_error(
        compiler(&locator).compile(&group(mdi("bed"), sensor("temp1")), registry()),
        ErrorCode::MISSING_CATALOG_RESOURCE,
    );
    assert!(errors.errors[0].message.contains("mdi.meta.json"));
}

#[test]
fn e201_incomplete_catalog() {
    let locator = MemoryLocator::new()
        .with("mdi.meta.json", metadata_without(&["doorbell"]))
        .with("mdi.ttf", typeface_without(&[]));
    assert_error(
        compiler(&locator).compile(&group(mdi("bed"), sensor("temp1")), registry()),
        ErrorCode::INCOMPLETE_CATALOG,
    );
}

#[test]
fn e202_malformed_catalog() {
    let locator = MemoryLocator::new()
        .with("mdi.meta.json", r#"{"bed": "F02E3"}"#)
        .with("mdi.ttf", typeface_without(&[]));
    assert_error(
        compiler(&locator).compile(&group(mdi("bed"), sensor("temp1")), registry()),
        ErrorCode::MALFORMED_CATALOG,
    );
}

// ══════════════════════════════════════════════════════════════════════════════
// E300–E302: references
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn e300_unknown_asset() {
    let glyph = json!({ "type": "image", "id": "garage" });
    let errors = assert_error(compile(&group(glyph, sensor("temp1"))), ErrorCode::UNKNOWN_ASSET);
    assert_eq!(errors.errors[0].path.to_string(), "groups[0].glyph.id");
}

#[test]
fn e301_unbound_reference() {
    let errors = assert_error(
        compile(&group(mdi("bed"), sensor("pressure"))),
        ErrorCode::UNBOUND_REFERENCE,
    );
    assert_eq!(
        errors.errors[0].path.to_string(),
        "groups[0].widgets[0].source.id"
    );
}

#[test]
fn e301_wrong_entity_kind() {
    let errors = assert_error(
        compile(&group(mdi("bed"), sensor("front_door"))),
        ErrorCode::UNBOUND_REFERENCE,
    );
    assert!(errors.errors[0].message.contains("binary sensor"));
}

#[test]
fn e302_duplicate_declaration() {
    let doc = json!({ "groups": [
        { "id": "g", "glyph": mdi("bed"), "widgets": [] },
        { "id": "g", "glyph": mdi("walk"), "widgets": [] },
    ] });
    let errors = assert_error(compile(&doc), ErrorCode::DUPLICATE_DECLARATION);
    assert_eq!(errors.errors[0].path.to_string(), "groups[1].id");
}

// ══════════════════════════════════════════════════════════════════════════════
// E400–E402: font resources
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn e400_font_source_unavailable() {
    let locator = MemoryLocator::new().with("mdi.meta.json", metadata_without(&[]));
    assert_error(
        compiler(&locator).compile(&group(mdi("bed"), sensor("temp1")), registry()),
        ErrorCode::FONT_SOURCE_UNAVAILABLE,
    );
}

#[test]
fn e401_font_source_invalid() {
    // The default loader parses real font files; fixture bytes are not one.
    let locator = locator();
    assert_error(
        Compiler::new(&locator).compile(&group(mdi("bed"), sensor("temp1")), registry()),
        ErrorCode::FONT_SOURCE_INVALID,
    );
}

#[test]
fn e402_glyph_missing_from_typeface() {
    let locator = MemoryLocator::new()
        .with("mdi.meta.json", metadata_without(&[]))
        .with("mdi.ttf", typeface_without(&["bed"]));
    assert_error(
        compiler(&locator).compile(&group(mdi("bed"), sensor("temp1")), registry()),
        ErrorCode::GLYPH_MISSING_FROM_TYPEFACE,
    );
}

// ══════════════════════════════════════════════════════════════════════════════
// E500: internal consistency
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn e500_unresolved_icon() {
    let catalog = IconCatalog::from_metadata("mdi.meta.json", metadata_without(&[]).as_bytes())
        .unwrap();
    let typeface = text_typeface("mdi.ttf", &typeface_without(&[]), 8.0).unwrap();
    let request = FontRequest {
        id: "matrix_glyphs_font".into(),
        size: 8,
        glyphs: BTreeMap::from([(IconName::Walk, cp("walk"))]),
    };
    let font = synthesize(&request, typeface.as_ref()).unwrap();

    let resolver = GlyphResolver::new(&catalog, &font);
    assert!(resolver.icon(IconName::Walk, &DocPath::root()).is_ok());
    let err = resolver
        .icon(IconName::Bed, &DocPath::root().key("groups"))
        .unwrap_err();
    assert!(matches!(err, BuildError::UnresolvedIcon { icon: IconName::Bed, .. }));
    assert_eq!(err.to_diagnostic().code, ErrorCode::UNRESOLVED_ICON);
}
