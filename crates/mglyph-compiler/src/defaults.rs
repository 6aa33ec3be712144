//! Glyphs implied by a platform entity's unit and device class.
//!
//! Only consulted when device-class defaults are enabled. The font union and
//! the tree builder both read from here so the two never disagree.

use mglyph_types::IconName;

use crate::registry::EntityMeta;

const TEMPERATURE_UNIT: &str = "°C";
const TEMPERATURE_CLASS: &str = "temperature";
const MOTION_CLASS: &str = "motion";

/// Default on/off glyphs of a binary-sensor widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryDefault {
    /// Animated frames while the alert is raised, nothing otherwise.
    Animated(Vec<IconName>),
    /// The same static icon in both states.
    Static(IconName),
}

impl BinaryDefault {
    pub fn icons(&self) -> Vec<IconName> {
        match self {
            Self::Animated(frames) => frames.clone(),
            Self::Static(icon) => vec![*icon],
        }
    }
}

/// The icon a sensor widget shows in front of its reading.
pub fn sensor_icon(meta: &EntityMeta) -> Option<IconName> {
    let temperature = meta.unit.as_deref() == Some(TEMPERATURE_UNIT)
        || meta.device_class.as_deref() == Some(TEMPERATURE_CLASS);
    temperature.then_some(IconName::Thermometer)
}

/// The glyphs a binary-sensor widget shows for its alert state.
pub fn binary_sensor_glyphs(meta: &EntityMeta) -> BinaryDefault {
    match meta.device_class.as_deref() {
        Some(MOTION_CLASS) => BinaryDefault::Animated(vec![IconName::Run, IconName::Walk]),
        _ => BinaryDefault::Static(IconName::KeyboardSpace),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_by_unit_or_class() {
        let by_unit = EntityMeta::default().with_unit("°C");
        let by_class = EntityMeta::default().with_device_class("temperature");
        assert_eq!(sensor_icon(&by_unit), Some(IconName::Thermometer));
        assert_eq!(sensor_icon(&by_class), Some(IconName::Thermometer));
        assert_eq!(sensor_icon(&EntityMeta::default().with_unit("%")), None);
    }

    #[test]
    fn test_motion_is_animated() {
        let motion = EntityMeta::default().with_device_class("motion");
        assert_eq!(
            binary_sensor_glyphs(&motion),
            BinaryDefault::Animated(vec![IconName::Run, IconName::Walk])
        );
        assert_eq!(
            binary_sensor_glyphs(&EntityMeta::default()),
            BinaryDefault::Static(IconName::KeyboardSpace)
        );
    }
}
