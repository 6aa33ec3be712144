//! Platform registry: the entities visible to the compiler and the
//! companion entities it registers.
//!
//! The platform declares what already exists (sensors, binary sensors,
//! switches, image assets). The build then claims the group and companion
//! ids the document introduces. All of these share one namespace and are
//! never removed. Generated widget ids are kept out of it.

use std::collections::BTreeMap;
use std::fmt;

use mglyph_types::DocPath;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BuildError, BuildResult};

/// Kind of a declared entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Sensor,
    BinarySensor,
    Switch,
    Image,
    Group,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sensor => "sensor",
            Self::BinarySensor => "binary sensor",
            Self::Switch => "switch",
            Self::Image => "image",
            Self::Group => "group",
        };
        f.write_str(name)
    }
}

/// Attributes the platform reports for an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_class: Option<String>,
}

impl EntityMeta {
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_device_class(mut self, device_class: impl Into<String>) -> Self {
        self.device_class = Some(device_class.into());
        self
    }
}

/// Where a declaration came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Platform,
    Document(DocPath),
}

/// One id in the shared namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub kind: EntityKind,
    pub meta: EntityMeta,
    pub origin: Origin,
}

/// A companion entity created by the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub kind: EntityKind,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Widget that owns the companion.
    pub owner: String,
    /// State published before registration, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_state: Option<bool>,
}

/// Declared entities plus the ordered list of companion registrations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlatformRegistry {
    declarations: BTreeMap<String, Declaration>,
    registrations: Vec<Registration>,
}

impl PlatformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an entity that exists outside the document.
    pub fn declare(
        &mut self,
        id: impl Into<String>,
        kind: EntityKind,
        meta: EntityMeta,
    ) -> BuildResult<()> {
        self.insert(id.into(), kind, meta, Origin::Platform, DocPath::root())
    }

    /// Claim an id introduced by the document (groups).
    pub fn claim(&mut self, id: &str, kind: EntityKind, path: &DocPath) -> BuildResult<()> {
        self.insert(
            id.to_string(),
            kind,
            EntityMeta::default(),
            Origin::Document(path.clone()),
            path.clone(),
        )
    }

    /// Register a companion entity; it becomes visible to later lookups.
    pub fn register(&mut self, registration: Registration, path: &DocPath) -> BuildResult<()> {
        self.claim(&registration.id, registration.kind, path)?;
        debug!(
            id = %registration.id,
            kind = %registration.kind,
            owner = %registration.owner,
            "registered companion"
        );
        self.registrations.push(registration);
        Ok(())
    }

    /// Look up `id` and check it is of `kind`.
    pub fn require(&self, id: &str, kind: EntityKind, path: &DocPath) -> BuildResult<&Declaration> {
        match self.declarations.get(id) {
            Some(declaration) if declaration.kind == kind => Ok(declaration),
            _ if kind == EntityKind::Image => Err(BuildError::UnknownAsset {
                id: id.to_string(),
                path: path.clone(),
            }),
            found => Err(BuildError::UnboundReference {
                id: id.to_string(),
                expected: kind,
                found: found.map(|d| d.kind),
                path: path.clone(),
            }),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Declaration> {
        self.declarations.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.declarations.contains_key(id)
    }

    /// Companion registrations in build order.
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    /// All declared ids with their declarations, in id order.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &Declaration)> + '_ {
        self.declarations.iter().map(|(id, d)| (id.as_str(), d))
    }

    fn insert(
        &mut self,
        id: String,
        kind: EntityKind,
        meta: EntityMeta,
        origin: Origin,
        path: DocPath,
    ) -> BuildResult<()> {
        if let Some(existing) = self.declarations.get(&id) {
            return Err(BuildError::DuplicateDeclaration {
                id,
                existing: existing.kind,
                path,
            });
        }
        self.declarations.insert(id, Declaration { kind, meta, origin });
        Ok(())
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Platform manifest
// ══════════════════════════════════════════════════════════════════════════════

/// One entity in a platform manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntity {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_class: Option<String>,
}

/// Serialized form of the entities a platform exposes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlatformManifest {
    pub sensor: Vec<ManifestEntity>,
    pub binary_sensor: Vec<ManifestEntity>,
    pub switch: Vec<ManifestEntity>,
    pub image: Vec<ManifestEntity>,
}

impl PlatformManifest {
    /// Declare every listed entity in a fresh registry.
    pub fn into_registry(self) -> BuildResult<PlatformRegistry> {
        let mut registry = PlatformRegistry::new();
        let sections = [
            (EntityKind::Sensor, self.sensor),
            (EntityKind::BinarySensor, self.binary_sensor),
            (EntityKind::Switch, self.switch),
            (EntityKind::Image, self.image),
        ];
        for (kind, entities) in sections {
            for entity in entities {
                let meta = EntityMeta {
                    unit: entity.unit,
                    device_class: entity.device_class,
                };
                registry.declare(entity.id, kind, meta)?;
            }
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(path: &str) -> DocPath {
        path.parse().unwrap()
    }

    #[test]
    fn test_require_checks_kind() {
        let mut registry = PlatformRegistry::new();
        registry
            .declare("motion", EntityKind::BinarySensor, EntityMeta::default())
            .unwrap();
        assert!(registry
            .require("motion", EntityKind::BinarySensor, &at("x"))
            .is_ok());

        let err = registry
            .require("motion", EntityKind::Sensor, &at("x"))
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::UnboundReference {
                id: "motion".into(),
                expected: EntityKind::Sensor,
                found: Some(EntityKind::BinarySensor),
                path: at("x"),
            }
        );
        assert_eq!(err.to_string(), "sensor 'motion' is not declared (found binary sensor)");
    }

    #[test]
    fn test_missing_image_is_unknown_asset() {
        let registry = PlatformRegistry::new();
        let err = registry
            .require("kitchen", EntityKind::Image, &at("groups[0].glyph.id"))
            .unwrap_err();
        assert!(matches!(err, BuildError::UnknownAsset { .. }));
        assert_eq!(err.path().to_string(), "groups[0].glyph.id");
    }

    #[test]
    fn test_register_is_append_only() {
        let mut registry = PlatformRegistry::new();
        let alert = Registration {
            kind: EntityKind::BinarySensor,
            id: "door_alert".into(),
            name: None,
            owner: "front_widget_0".into(),
            initial_state: None,
        };
        registry.register(alert.clone(), &at("a")).unwrap();
        let err = registry.register(alert, &at("b")).unwrap_err();
        assert!(matches!(
            err,
            BuildError::DuplicateDeclaration { existing: EntityKind::BinarySensor, .. }
        ));
        assert_eq!(registry.registrations().len(), 1);
    }

    #[test]
    fn test_manifest_from_json() {
        let manifest: PlatformManifest = serde_json::from_str(
            r#"{
                "sensor": [{"id": "temp1", "unit": "°C"}],
                "binary_sensor": [{"id": "door", "device_class": "door"}]
            }"#,
        )
        .unwrap();
        let registry = manifest.into_registry().unwrap();
        let temp = registry.get("temp1").unwrap();
        assert_eq!(temp.kind, EntityKind::Sensor);
        assert_eq!(temp.meta.unit.as_deref(), Some("°C"));
        assert_eq!(temp.origin, Origin::Platform);
        assert!(registry.contains("door"));
    }

    #[test]
    fn test_manifest_rejects_duplicate_ids() {
        let manifest: PlatformManifest = serde_json::from_str(
            r#"{"sensor": [{"id": "x"}], "switch": [{"id": "x"}]}"#,
        )
        .unwrap();
        assert!(manifest.into_registry().is_err());
    }
}
