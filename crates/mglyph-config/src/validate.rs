//! Schema validation: generic tree → [`Document`].
//!
//! The validator keeps going after a problem so the caller gets the full
//! list in one pass. A [`Document`] is only produced when nothing failed.
//!
//! Error codes emitted:
//! - E100: required field missing
//! - E101: value has the wrong type
//! - E102: field not allowed here
//! - E103: malformed identifier
//! - E110: icon name outside the fixed catalog
//! - E111: unknown glyph `type`
//! - E112: unknown widget source `type`

use serde_json::{Map, Value};
use tracing::debug;

use mglyph_types::{Diagnostic, Diagnostics, DocPath, ErrorCode, GlyphRef, IconName};

use crate::document::*;

const GLYPH_TYPES: &str = "image, mdi";
const SOURCE_TYPES: &str = "sensor, binary_sensor";

/// Result of validation.
#[derive(Debug)]
pub struct ValidationResult {
    pub document: Option<Document>,
    pub errors: Diagnostics,
}

/// Whether `name` is a valid entity identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Walks a document tree and checks it against the widget-tree schema.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Diagnostics,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a complete document.
    pub fn validate(mut self, root: &Value) -> ValidationResult {
        let document = self.document(root);
        let document = if self.errors.has_errors() {
            debug!(errors = self.errors.total_errors, "document rejected");
            None
        } else {
            document
        };
        ValidationResult {
            document,
            errors: self.errors,
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Levels
    // ══════════════════════════════════════════════════════════════════════

    fn document(&mut self, root: &Value) -> Option<Document> {
        let path = DocPath::root();
        let map = self.object(root, &path)?;
        self.allow_fields(map, &path, &["groups"]);
        let groups_value = self.required(map, "groups", &path)?;
        let groups_path = path.key("groups");

        let mut groups = Vec::new();
        let mut ok = true;
        for (i, item) in self.list(groups_value, &groups_path) {
            match self.group(item, groups_path.index(i)) {
                Some(group) => groups.push(group),
                None => ok = false,
            }
        }
        debug!(groups = groups.len(), "validated groups");
        ok.then_some(Document { groups })
    }

    fn group(&mut self, value: &Value, path: DocPath) -> Option<GroupSpec> {
        let map = self.object(value, &path)?;
        self.allow_fields(map, &path, &["id", "glyph", "widgets"]);

        let id = self.ident(map, "id", &path);
        let glyph = self
            .required(map, "glyph", &path)
            .and_then(|v| self.glyph(v, path.key("glyph")));

        let mut widgets = Some(Vec::new());
        if let Some(widgets_value) = self.required(map, "widgets", &path) {
            let widgets_path = path.key("widgets");
            for (i, item) in self.list(widgets_value, &widgets_path) {
                let widget = self.widget(item, widgets_path.index(i));
                match (widgets.as_mut(), widget) {
                    (Some(list), Some(widget)) => list.push(widget),
                    _ => widgets = None,
                }
            }
        } else {
            widgets = None;
        }

        Some(GroupSpec {
            id: id?,
            glyph: glyph?,
            widgets: widgets?,
            path,
        })
    }

    fn glyph(&mut self, value: &Value, path: DocPath) -> Option<GlyphSpec> {
        let map = self.object(value, &path)?;
        self.allow_fields(map, &path, &["type", "id"]);
        let kind = self.required_string(map, "type", &path);
        let id_value = self.required(map, "id", &path);

        let glyph = match kind.as_deref()? {
            "image" => {
                let id = self.identifier(id_value?, &path.key("id"))?;
                GlyphRef::Image(id)
            }
            "mdi" => {
                let id_path = path.key("id");
                let name = self.string(id_value?, &id_path)?;
                match name.parse::<IconName>() {
                    Ok(icon) => GlyphRef::Mdi(icon),
                    Err(e) => {
                        self.errors.push_error(
                            Diagnostic::new(ErrorCode::UNSUPPORTED_ICON_NAME, e.to_string(), id_path)
                                .with_suggestion(format!(
                                    "use one of: {}",
                                    IconName::valid_names()
                                )),
                        );
                        return None;
                    }
                }
            }
            other => {
                self.errors.push_error(
                    Diagnostic::new(
                        ErrorCode::UNSUPPORTED_GLYPH_TYPE,
                        format!("unsupported glyph type '{other}'"),
                        path.key("type"),
                    )
                    .with_suggestion(format!("use one of: {GLYPH_TYPES}")),
                );
                return None;
            }
        };
        Some(GlyphSpec { glyph, path })
    }

    fn widget(&mut self, value: &Value, path: DocPath) -> Option<WidgetSpec> {
        let map = self.object(value, &path)?;
        self.allow_fields(map, &path, &["source"]);
        let source_value = self.required(map, "source", &path)?;
        let source = self.source(source_value, path.key("source"))?;
        Some(WidgetSpec { source, path })
    }

    fn source(&mut self, value: &Value, path: DocPath) -> Option<SourceSpec> {
        let map = self.object(value, &path)?;
        let kind = self.required_string(map, "type", &path)?;

        match kind.as_str() {
            "sensor" => {
                self.allow_fields(map, &path, &["type", "id"]);
                let id = self.ident(map, "id", &path)?;
                Some(SourceSpec::Sensor(SensorSource { id }))
            }
            "binary_sensor" => {
                self.allow_fields(
                    map,
                    &path,
                    &["type", "id", "glyph", "switch", "binary_sensor"],
                );
                let id = self.ident(map, "id", &path);

                let glyph = match map.get("glyph") {
                    Some(v) => Some(self.glyph(v, path.key("glyph"))),
                    None => None,
                };
                let switch = self
                    .required(map, "switch", &path)
                    .and_then(|v| self.switch(v, path.key("switch")));
                let output = self
                    .required(map, "binary_sensor", &path)
                    .and_then(|v| self.output(v, path.key("binary_sensor")));

                Some(SourceSpec::BinarySensor(BinarySensorSource {
                    id: id?,
                    glyph: match glyph {
                        Some(g) => Some(g?),
                        None => None,
                    },
                    switch: switch?,
                    binary_sensor: output?,
                }))
            }
            other => {
                self.errors.push_error(
                    Diagnostic::new(
                        ErrorCode::UNSUPPORTED_SOURCE_TYPE,
                        format!("unsupported source type '{other}'"),
                        path.key("type"),
                    )
                    .with_suggestion(format!("use one of: {SOURCE_TYPES}")),
                );
                None
            }
        }
    }

    fn switch(&mut self, value: &Value, path: DocPath) -> Option<SwitchSpec> {
        let map = self.object(value, &path)?;
        self.allow_fields(map, &path, &["id", "name", "sticky"]);
        let id = self.ident(map, "id", &path);
        let name = self.optional_string(map, "name", &path);
        let sticky = match map.get("sticky") {
            Some(Value::Bool(b)) => Some(Some(*b)),
            Some(other) => {
                self.wrong_type(other, "a boolean", path.key("sticky"));
                None
            }
            None => Some(None),
        };
        Some(SwitchSpec {
            id: id?,
            name: name?,
            sticky: sticky?,
        })
    }

    fn output(&mut self, value: &Value, path: DocPath) -> Option<OutputSpec> {
        let map = self.object(value, &path)?;
        self.allow_fields(map, &path, &["id", "name"]);
        let id = self.ident(map, "id", &path);
        let name = self.optional_string(map, "name", &path);
        Some(OutputSpec {
            id: id?,
            name: name?,
        })
    }

    // ══════════════════════════════════════════════════════════════════════
    // Helpers
    // ══════════════════════════════════════════════════════════════════════

    fn object<'v>(&mut self, value: &'v Value, path: &DocPath) -> Option<&'v Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            other => {
                self.wrong_type(other, "a mapping", path.clone());
                None
            }
        }
    }

    /// A sequence, or a single item treated as a one-element sequence.
    fn list<'v>(&mut self, value: &'v Value, path: &DocPath) -> Vec<(usize, &'v Value)> {
        match value {
            Value::Array(items) => items.iter().enumerate().collect(),
            Value::Object(_) => vec![(0, value)],
            other => {
                self.wrong_type(other, "a list", path.clone());
                Vec::new()
            }
        }
    }

    fn allow_fields(&mut self, map: &Map<String, Value>, path: &DocPath, allowed: &[&str]) {
        for key in map.keys() {
            if !allowed.contains(&key.as_str()) {
                self.errors.push_error(
                    Diagnostic::new(
                        ErrorCode::UNKNOWN_FIELD,
                        format!("unknown field '{key}'"),
                        path.key(key.as_str()),
                    )
                    .with_suggestion(format!("allowed fields: {}", allowed.join(", "))),
                );
            }
        }
    }

    fn required<'v>(
        &mut self,
        map: &'v Map<String, Value>,
        key: &str,
        path: &DocPath,
    ) -> Option<&'v Value> {
        let value = map.get(key);
        if value.is_none() {
            self.errors.push_error(Diagnostic::new(
                ErrorCode::MISSING_FIELD,
                format!("required field '{key}' is missing"),
                path.key(key),
            ));
        }
        value
    }

    fn string(&mut self, value: &Value, path: &DocPath) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            other => {
                self.wrong_type(other, "a string", path.clone());
                None
            }
        }
    }

    fn required_string(
        &mut self,
        map: &Map<String, Value>,
        key: &str,
        path: &DocPath,
    ) -> Option<String> {
        let value = self.required(map, key, path)?;
        self.string(value, &path.key(key))
    }

    /// `Some(None)` when absent, `None` when present but invalid.
    fn optional_string(
        &mut self,
        map: &Map<String, Value>,
        key: &str,
        path: &DocPath,
    ) -> Option<Option<String>> {
        match map.get(key) {
            Some(value) => self.string(value, &path.key(key)).map(Some),
            None => Some(None),
        }
    }

    fn identifier(&mut self, value: &Value, path: &DocPath) -> Option<String> {
        let name = self.string(value, path)?;
        if is_identifier(&name) {
            Some(name)
        } else {
            self.errors.push_error(
                Diagnostic::new(
                    ErrorCode::INVALID_IDENTIFIER,
                    format!("'{name}' is not a valid identifier"),
                    path.clone(),
                )
                .with_suggestion("identifiers use letters, digits and '_' and do not start with a digit"),
            );
            None
        }
    }

    fn ident(&mut self, map: &Map<String, Value>, key: &str, path: &DocPath) -> Option<Ident> {
        let value = self.required(map, key, path)?;
        let id_path = path.key(key);
        let name = self.identifier(value, &id_path)?;
        Some(Ident::new(name, id_path))
    }

    fn wrong_type(&mut self, found: &Value, expected: &str, path: DocPath) {
        self.errors.push_error(Diagnostic::new(
            ErrorCode::WRONG_TYPE,
            format!("expected {expected}, found {}", describe(found)),
            path,
        ));
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
