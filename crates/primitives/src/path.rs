#[cfg(test)]
#[path = "tests/path.rs"]
mod tests;

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Address of a node in the configuration tree.
///
/// Externally a path is a single string with its segments joined by one
/// space. Segments are never empty and never contain the delimiter, so
/// splitting the rendered form always yields the original segments. The path
/// with no segments is the root of the tree and renders as `""`.
///
/// On the wire a path is a JSON array of its segments.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Path(Vec<String>);

#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum InvalidPath {
    #[error("path `{0}` contains an empty segment")]
    EmptySegment(String),
    #[error("segment `{0}` contains the path delimiter")]
    DelimiterInSegment(String),
}

impl Path {
    pub const DELIMITER: char = ' ';

    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Builds a path from already separated segments, validating each one.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, InvalidPath>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut path = Self::root();

        for segment in segments {
            path.push(segment)?;
        }

        Ok(path)
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The terminal segment, `None` for the root.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn push(&mut self, segment: impl Into<String>) -> Result<(), InvalidPath> {
        let segment = segment.into();

        validate_segment(&segment)?;

        self.0.push(segment);

        Ok(())
    }

    /// Returns a copy of this path extended by one segment.
    pub fn child(&self, segment: impl Into<String>) -> Result<Self, InvalidPath> {
        let mut path = self.clone();
        path.push(segment)?;
        Ok(path)
    }

    #[must_use]
    pub fn into_segments(self) -> Vec<String> {
        self.0
    }
}

fn validate_segment(segment: &str) -> Result<(), InvalidPath> {
    if segment.is_empty() {
        return Err(InvalidPath::EmptySegment(segment.to_owned()));
    }

    if segment.contains(Path::DELIMITER) {
        return Err(InvalidPath::DelimiterInSegment(segment.to_owned()));
    }

    Ok(())
}

impl FromStr for Path {
    type Err = InvalidPath;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::root());
        }

        let segments = s
            .split(Self::DELIMITER)
            .map(|segment| {
                if segment.is_empty() {
                    Err(InvalidPath::EmptySegment(s.to_owned()))
                } else {
                    Ok(segment.to_owned())
                }
            })
            .collect::<Result<_, _>>()?;

        Ok(Self(segments))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments = self.0.iter();

        if let Some(first) = segments.next() {
            f.write_str(first)?;
        }

        for segment in segments {
            write!(f, "{}{segment}", Self::DELIMITER)?;
        }

        Ok(())
    }
}

impl TryFrom<Vec<String>> for Path {
    type Error = InvalidPath;

    fn try_from(segments: Vec<String>) -> Result<Self, Self::Error> {
        for segment in &segments {
            validate_segment(segment)?;
        }

        Ok(Self(segments))
    }
}

impl From<Path> for Vec<String> {
    fn from(path: Path) -> Self {
        path.0
    }
}

impl AsRef<[String]> for Path {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}
