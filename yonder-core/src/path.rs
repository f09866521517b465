use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;
use yonder_derive::Error;

pub const SEPARATOR: char = '/';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Paths must begin with the separator
    NotAbsolute(String),

    /// A segment was empty, `.`, `..` or contained the separator
    InvalidSegment(String),
}

/// Absolute location within a single hierarchical namespace
///
/// The root has no segments. Equality, ordering and hashing are structural
/// over the segments.
#[derive(
    Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(try_from = "String", into = "String")]
pub struct PathValue {
    segments: Vec<String>,
}

impl PathValue {
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a path such as `/data/in`; repeated and trailing separators
    /// are ignored
    pub fn parse(s: &str) -> Result<Self, PathError> {
        if !s.starts_with(SEPARATOR) {
            return Err(PathError::NotAbsolute(s.to_string()));
        }

        Self::from_segments(
            s.split(SEPARATOR)
                .filter(|x| !x.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    pub fn from_segments(segments: Vec<String>) -> Result<Self, PathError> {
        if let Some(bad) = segments.iter().find(|s| !is_valid_segment(s)) {
            return Err(PathError::InvalidSegment(bad.clone()));
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments below the root
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Final segment of the path, or `None` for the root
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.segments.split_last()?;
        Some(Self {
            segments: init.to_vec(),
        })
    }

    /// Produces a new path with `segment` appended
    pub fn join(&self, segment: &str) -> Result<Self, PathError> {
        if !is_valid_segment(segment) {
            return Err(PathError::InvalidSegment(segment.to_string()));
        }

        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Ok(Self { segments })
    }

    /// Whether `self` is `other` or lies beneath it
    pub fn starts_with(&self, other: &PathValue) -> bool {
        self.segments.starts_with(&other.segments)
    }
}

fn is_valid_segment(s: &str) -> bool {
    !s.is_empty() && s != "." && s != ".." && !s.contains(SEPARATOR)
}

impl fmt::Display for PathValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "{}", SEPARATOR);
        }

        for segment in &self.segments {
            write!(f, "{}{}", SEPARATOR, segment)?;
        }

        Ok(())
    }
}

impl FromStr for PathValue {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PathValue {
    type Error = PathError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<PathValue> for String {
    fn from(path: PathValue) -> Self {
        path.to_string()
    }
}
