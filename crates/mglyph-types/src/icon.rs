use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A member of the fixed icon catalog.
///
/// The set is closed: configurations may only reference these names, and
/// the metadata resource must provide a codepoint for every one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconName {
    Bed,
    KeyboardSpace,
    Walk,
    Run,
    Doorbell,
    Countertop,
    SofaSingle,
    SilverwareSpoon,
    Thermometer,
    SunThermometer,
}

impl IconName {
    /// Every supported icon, in catalog order.
    pub const ALL: [IconName; 10] = [
        IconName::Bed,
        IconName::KeyboardSpace,
        IconName::Walk,
        IconName::Run,
        IconName::Doorbell,
        IconName::Countertop,
        IconName::SofaSingle,
        IconName::SilverwareSpoon,
        IconName::Thermometer,
        IconName::SunThermometer,
    ];

    /// The metadata name of this icon.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bed => "bed",
            Self::KeyboardSpace => "keyboard-space",
            Self::Walk => "walk",
            Self::Run => "run",
            Self::Doorbell => "doorbell",
            Self::Countertop => "countertop",
            Self::SofaSingle => "sofa-single",
            Self::SilverwareSpoon => "silverware-spoon",
            Self::Thermometer => "thermometer",
            Self::SunThermometer => "sun-thermometer",
        }
    }

    /// Comma-separated list of all supported names, for error messages.
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|icon| icon.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for IconName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A name that is not part of the fixed icon catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported icon name '{name}', expected one of: {}", IconName::valid_names())]
pub struct UnsupportedIconName {
    pub name: String,
}

impl FromStr for IconName {
    type Err = UnsupportedIconName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|icon| icon.as_str() == s)
            .ok_or_else(|| UnsupportedIconName {
                name: s.to_string(),
            })
    }
}

/// A Unicode scalar value assigned to an icon by the metadata resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Codepoint(char);

impl Codepoint {
    pub fn new(ch: char) -> Self {
        Self(ch)
    }

    /// Parse a hexadecimal codepoint such as `"F02E3"`.
    ///
    /// Returns `None` for malformed hex or values that are not scalar values.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim();
        let digits = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("U+"))
            .unwrap_or(digits);
        let value = u32::from_str_radix(digits, 16).ok()?;
        char::from_u32(value).map(Self)
    }

    pub fn as_char(self) -> char {
        self.0
    }

    pub fn value(self) -> u32 {
        self.0 as u32
    }
}

impl fmt::Display for Codepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U+{:04X}", self.value())
    }
}

impl Serialize for Codepoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.value())
    }
}

impl<'de> Deserialize<'de> for Codepoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u32::deserialize(deserializer)?;
        char::from_u32(value)
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom(format!("{value:#x} is not a scalar value")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_icon_parses_from_its_name() {
        for icon in IconName::ALL {
            assert_eq!(icon.as_str().parse::<IconName>(), Ok(icon));
        }
    }

    #[test]
    fn test_unknown_icon_names_valid_set() {
        let err = "rocket".parse::<IconName>().unwrap_err();
        assert_eq!(err.name, "rocket");
        let message = err.to_string();
        assert!(message.contains("'rocket'"));
        for icon in IconName::ALL {
            assert!(message.contains(icon.as_str()), "missing {icon} in {message}");
        }
    }

    #[test]
    fn test_serde_uses_metadata_names() {
        let json = serde_json::to_string(&IconName::SunThermometer).unwrap();
        assert_eq!(json, "\"sun-thermometer\"");
        let back: IconName = serde_json::from_str("\"keyboard-space\"").unwrap();
        assert_eq!(back, IconName::KeyboardSpace);
    }

    #[test]
    fn test_codepoint_from_hex() {
        let cp = Codepoint::from_hex("F02E3").unwrap();
        assert_eq!(cp.value(), 0xF02E3);
        assert_eq!(cp.to_string(), "U+F02E3");
        assert_eq!(Codepoint::from_hex("0x41").unwrap().as_char(), 'A');
    }

    #[test]
    fn test_codepoint_rejects_invalid_values() {
        assert!(Codepoint::from_hex("zz").is_none());
        assert!(Codepoint::from_hex("D800").is_none());
        assert!(Codepoint::from_hex("110000").is_none());
    }

    #[test]
    fn test_codepoint_serializes_as_number() {
        let cp = Codepoint::new('A');
        assert_eq!(serde_json::to_string(&cp).unwrap(), "65");
        assert!(serde_json::from_str::<Codepoint>("55296").is_err());
    }
}
