use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One step into the configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// Location of a value inside the configuration document.
///
/// Rendered as `groups[1].widgets[0].source.id`; the document root renders
/// as `<root>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct DocPath {
    segments: Vec<Segment>,
}

const ROOT: &str = "<root>";

impl DocPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend this path with a mapping key.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.segments.push(Segment::Key(key.into()));
        next
    }

    /// Extend this path with a sequence index.
    pub fn index(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.segments.push(Segment::Index(index));
        next
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str(ROOT);
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => f.write_str(key)?,
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for DocPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ROOT || s.is_empty() {
            return Ok(Self::root());
        }
        let mut segments = Vec::new();
        for part in s.split('.') {
            let (key, mut rest) = match part.find('[') {
                Some(pos) => part.split_at(pos),
                None => (part, ""),
            };
            if key.is_empty() && rest.is_empty() {
                return Err(format!("empty path segment in '{s}'"));
            }
            if !key.is_empty() {
                segments.push(Segment::Key(key.to_string()));
            }
            while !rest.is_empty() {
                let close = rest
                    .find(']')
                    .ok_or_else(|| format!("unclosed index in '{s}'"))?;
                let index = rest[1..close]
                    .parse::<usize>()
                    .map_err(|_| format!("invalid index in '{s}'"))?;
                segments.push(Segment::Index(index));
                rest = &rest[close + 1..];
                if !rest.is_empty() && !rest.starts_with('[') {
                    return Err(format!("unexpected text after index in '{s}'"));
                }
            }
        }
        Ok(Self { segments })
    }
}

impl From<DocPath> for String {
    fn from(path: DocPath) -> Self {
        path.to_string()
    }
}

impl TryFrom<String> for DocPath {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
