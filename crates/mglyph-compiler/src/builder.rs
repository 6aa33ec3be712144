//! Widget-tree construction: validated document → object graph.
//!
//! Walks groups and widgets in declaration order, binds every reference
//! against the platform registry and registers each binary-sensor widget's
//! companions (alert sensor first, then the sticky switch).
//!
//! Error codes emitted:
//! - E300: image glyph names an undeclared asset
//! - E301: widget source is undeclared or of the wrong kind
//! - E302: group or companion id collides with an existing declaration
//! - E500: catalog icon missing from the synthesized font

use std::collections::BTreeSet;

use mglyph_config::{
    BinarySensorSource, Document, GroupSpec, SensorSource, SourceSpec, WidgetSpec,
};
use mglyph_types::{Diagnostic, Diagnostics, DocPath, ErrorCode, IconName};
use tracing::{debug, warn};

use crate::defaults::{self, BinaryDefault};
use crate::error::BuildResult;
use crate::graph::{
    AlertSensor, BinarySensorWidget, Controller, GlyphHandle, Group, SensorWidget, StickySwitch,
    Widget,
};
use crate::latch::AlertLatch;
use crate::registry::{EntityKind, EntityMeta, PlatformRegistry, Registration};
use crate::resolver::GlyphResolver;

/// Every icon the finished graph will draw from the font.
///
/// The document's own references, plus the device-class defaults of each
/// widget source when `device_class_defaults` is on. Widgets are walked in
/// build order so a source may be a companion an earlier widget registers.
/// Sources nobody declares contribute nothing; the build reports them.
pub fn font_icons(
    document: &Document,
    registry: &PlatformRegistry,
    device_class_defaults: bool,
) -> BTreeSet<IconName> {
    let mut icons = document.referenced_icons();
    if !device_class_defaults {
        return icons;
    }
    let default_meta = EntityMeta::default();
    let mut companions = BTreeSet::new();
    for widget in document.groups.iter().flat_map(|g| g.widgets.iter()) {
        let target = widget.source.target();
        let meta = match registry.get(&target.name) {
            Some(declaration) => Some(&declaration.meta),
            None if companions.contains(target.name.as_str()) => Some(&default_meta),
            None => None,
        };
        match (&widget.source, meta) {
            (SourceSpec::Sensor(_), Some(meta)) => icons.extend(defaults::sensor_icon(meta)),
            (SourceSpec::BinarySensor(source), meta) => {
                if let Some(meta) = meta {
                    icons.extend(defaults::binary_sensor_glyphs(meta).icons());
                }
                companions.insert(source.binary_sensor.id.name.as_str());
                companions.insert(source.switch.id.name.as_str());
            }
            (SourceSpec::Sensor(_), None) => {}
        }
    }
    icons
}

/// Builds the controller graph, registering companions as it goes.
pub struct TreeBuilder<'a> {
    resolver: GlyphResolver<'a>,
    registry: &'a mut PlatformRegistry,
    device_class_defaults: bool,
    warnings: Diagnostics,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(resolver: GlyphResolver<'a>, registry: &'a mut PlatformRegistry) -> Self {
        Self {
            resolver,
            registry,
            device_class_defaults: false,
            warnings: Diagnostics::empty(),
        }
    }

    pub fn with_device_class_defaults(mut self, enabled: bool) -> Self {
        self.device_class_defaults = enabled;
        self
    }

    /// Warnings collected so far.
    pub fn warnings(&self) -> &Diagnostics {
        &self.warnings
    }

    pub fn into_warnings(self) -> Diagnostics {
        self.warnings
    }

    /// Build the whole controller. Stops at the first error.
    ///
    /// `icons` is the union the font was synthesized from; every name in it
    /// lands in the controller's icon table, including names whose codepoint
    /// another icon already put in the font.
    pub fn build_controller(
        &mut self,
        document: &Document,
        icons: &BTreeSet<IconName>,
    ) -> BuildResult<Controller> {
        let font = self.resolver.font();
        let catalog = self.resolver.catalog();
        let groups = document
            .groups
            .iter()
            .map(|group| self.build_group(group))
            .collect::<BuildResult<Vec<_>>>()?;
        Ok(Controller {
            font_id: font.id().to_string(),
            icons: icons
                .iter()
                .filter_map(|icon| {
                    catalog
                        .get(*icon)
                        .filter(|cp| font.contains(*cp))
                        .map(|cp| (*icon, cp))
                })
                .collect(),
            groups,
        })
    }

    pub fn build_group(&mut self, spec: &GroupSpec) -> BuildResult<Group> {
        self.registry
            .claim(&spec.id.name, EntityKind::Group, &spec.id.path)?;
        let glyph = self
            .resolver
            .resolve(&spec.glyph.glyph, &spec.glyph.path, self.registry)?;
        let widgets = spec
            .widgets
            .iter()
            .enumerate()
            .map(|(index, widget)| self.build_widget(widget, &spec.id.name, index))
            .collect::<BuildResult<Vec<_>>>()?;
        debug!(group = %spec.id.name, widgets = widgets.len(), "built group");
        Ok(Group {
            id: spec.id.name.clone(),
            glyph,
            widgets,
        })
    }

    pub fn build_widget(
        &mut self,
        spec: &WidgetSpec,
        group: &str,
        index: usize,
    ) -> BuildResult<Widget> {
        let id = widget_id(group, index);
        let source_path = spec.path.key("source");
        match &spec.source {
            SourceSpec::Sensor(source) => self.sensor_widget(id, source, &source_path),
            SourceSpec::BinarySensor(source) => {
                self.binary_sensor_widget(id, source, &source_path)
            }
        }
    }

    fn sensor_widget(
        &mut self,
        id: String,
        source: &SensorSource,
        path: &DocPath,
    ) -> BuildResult<Widget> {
        let meta = self.source_meta(&source.id.name, EntityKind::Sensor, &source.id.path)?;
        let icon = match self.default_sensor_icon(&meta) {
            Some(icon) => Some(self.resolver.icon(icon, path)?),
            None => None,
        };
        Ok(Widget::Sensor(SensorWidget {
            id,
            sensor: source.id.name.clone(),
            icon,
        }))
    }

    fn binary_sensor_widget(
        &mut self,
        id: String,
        source: &BinarySensorSource,
        path: &DocPath,
    ) -> BuildResult<Widget> {
        let meta = self.source_meta(&source.id.name, EntityKind::BinarySensor, &source.id.path)?;

        if let Some(glyph) = &source.glyph {
            warn!(widget = %id, path = %glyph.path, "binary sensor glyph is ignored");
            self.warnings.push_warning(Diagnostic::warning(
                ErrorCode::IGNORED_FIELD,
                "glyph on a binary sensor source has no effect",
                glyph.path.clone(),
            ));
        }

        let alert_sensor = AlertSensor {
            id: source.binary_sensor.id.name.clone(),
            name: source.binary_sensor.name.clone(),
            latch: AlertLatch::new(),
        };
        let mut sticky_switch =
            StickySwitch::new(source.switch.id.name.clone(), source.switch.name.clone());
        if let Some(sticky) = source.switch.sticky {
            sticky_switch.publish_state(sticky);
        }

        self.registry.register(
            Registration {
                kind: EntityKind::BinarySensor,
                id: alert_sensor.id.clone(),
                name: alert_sensor.name.clone(),
                owner: id.clone(),
                initial_state: None,
            },
            &source.binary_sensor.id.path,
        )?;
        self.registry.register(
            Registration {
                kind: EntityKind::Switch,
                id: sticky_switch.id.clone(),
                name: sticky_switch.name.clone(),
                owner: id.clone(),
                initial_state: sticky_switch.state(),
            },
            &source.switch.id.path,
        )?;

        let (on_glyph, off_glyph) = self.default_binary_glyphs(&meta, path)?;
        Ok(Widget::BinarySensor(BinarySensorWidget {
            id,
            source: source.id.name.clone(),
            alert_sensor,
            sticky_switch,
            on_glyph,
            off_glyph,
        }))
    }

    fn source_meta(&self, id: &str, kind: EntityKind, path: &DocPath) -> BuildResult<EntityMeta> {
        Ok(self.registry.require(id, kind, path)?.meta.clone())
    }

    fn default_sensor_icon(&self, meta: &EntityMeta) -> Option<IconName> {
        if self.device_class_defaults {
            defaults::sensor_icon(meta)
        } else {
            None
        }
    }

    fn default_binary_glyphs(
        &self,
        meta: &EntityMeta,
        path: &DocPath,
    ) -> BuildResult<(Option<GlyphHandle>, Option<GlyphHandle>)> {
        if !self.device_class_defaults {
            return Ok((None, None));
        }
        Ok(match defaults::binary_sensor_glyphs(meta) {
            BinaryDefault::Animated(frames) => {
                (Some(self.resolver.animation(&frames, path)?), None)
            }
            BinaryDefault::Static(icon) => {
                let glyph = self.resolver.icon(icon, path)?;
                (Some(glyph.clone()), Some(glyph))
            }
        })
    }
}

/// Generated id of the `index`-th widget of `group`.
///
/// Widget ids live outside the declared namespace, so a group or entity
/// spelled like one never collides with it. Distinct (group, index) pairs
/// always give distinct ids: the text after the last `_widget_` is all
/// digits.
pub fn widget_id(group: &str, index: usize) -> String {
    format!("{group}_widget_{index}")
}
