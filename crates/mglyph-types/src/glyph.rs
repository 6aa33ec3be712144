use serde::{Deserialize, Serialize};
use std::fmt;

use crate::IconName;

/// A symbolic glyph reference: either a pre-declared image asset or a
/// catalog icon that will be drawn from the synthesized font.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum GlyphRef {
    Image(String),
    Mdi(IconName),
}

impl GlyphRef {
    /// The catalog icon this reference needs in the font, if any.
    pub fn icon(&self) -> Option<IconName> {
        match self {
            Self::Mdi(icon) => Some(*icon),
            Self::Image(_) => None,
        }
    }
}

impl fmt::Display for GlyphRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image(asset) => write!(f, "image:{asset}"),
            Self::Mdi(icon) => write!(f, "mdi:{icon}"),
        }
    }
}
