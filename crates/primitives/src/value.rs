#[cfg(test)]
#[path = "tests/value.rs"]
mod tests;

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::path::{InvalidPath, Path};

/// A node's children, keyed by segment name.
pub type Tree = BTreeMap<String, ConfigValue>;

/// Value stored at a path.
///
/// Lists are multi-valued leaves: every element lives at the same path. The
/// store has no numeric or boolean leaves, so anything that is not an object,
/// an array of strings or a string is rejected while decoding.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Tree(Tree),
    List(Vec<String>),
    Scalar(String),
}

/// JSON shape encountered while decoding a [`ConfigValue`].
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum Shape {
    #[error("null")]
    Null,
    #[error("boolean")]
    Bool,
    #[error("number")]
    Number,
    #[error("string")]
    String,
    #[error("array")]
    Array,
    #[error("object")]
    Object,
}

impl Shape {
    #[must_use]
    pub const fn of(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(_) => Self::Bool,
            JsonValue::Number(_) => Self::Number,
            JsonValue::String(_) => Self::String,
            JsonValue::Array(_) => Self::Array,
            JsonValue::Object(_) => Self::Object,
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum ValueError {
    #[error("unsupported value type {shape} at `{path}`")]
    UnsupportedValueType { path: String, shape: Shape },
    #[error("unsupported value type {shape} in list element {index} at `{path}`")]
    UnsupportedListElement {
        path: String,
        index: usize,
        shape: Shape,
    },
    #[error("expected a tree, found {0}")]
    NotATree(Shape),
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum FlattenError {
    #[error("invalid key under `{parent}`: {source}")]
    InvalidKey {
        parent: Path,
        #[source]
        source: InvalidPath,
    },
}

impl ConfigValue {
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value.as_str()),
            Self::Tree(_) | Self::List(_) => None,
        }
    }

    #[must_use]
    pub const fn as_tree(&self) -> Option<&Tree> {
        match self {
            Self::Tree(tree) => Some(tree),
            Self::List(_) | Self::Scalar(_) => None,
        }
    }

    #[must_use]
    pub fn into_tree(self) -> Option<Tree> {
        match self {
            Self::Tree(tree) => Some(tree),
            Self::List(_) | Self::Scalar(_) => None,
        }
    }

    /// Decodes a JSON object into a [`Tree`].
    pub fn tree_from_json(value: JsonValue) -> Result<Tree, ValueError> {
        match value {
            JsonValue::Object(_) => match Self::try_from(value)? {
                Self::Tree(tree) => Ok(tree),
                Self::List(_) | Self::Scalar(_) => Err(ValueError::NotATree(Shape::Object)),
            },
            other => Err(ValueError::NotATree(Shape::of(&other))),
        }
    }

    fn from_json_at(value: JsonValue, location: &mut Vec<String>) -> Result<Self, ValueError> {
        match value {
            JsonValue::Object(map) => {
                let mut tree = Tree::new();

                for (key, child) in map {
                    location.push(key.clone());
                    let child = Self::from_json_at(child, location)?;
                    let _ignored = location.pop();
                    let _ignored = tree.insert(key, child);
                }

                Ok(Self::Tree(tree))
            }
            JsonValue::Array(elements) => {
                let mut list = Vec::with_capacity(elements.len());

                for (index, element) in elements.into_iter().enumerate() {
                    match element {
                        JsonValue::String(element) => list.push(element),
                        other => {
                            return Err(ValueError::UnsupportedListElement {
                                path: location.join(" "),
                                index,
                                shape: Shape::of(&other),
                            })
                        }
                    }
                }

                Ok(Self::List(list))
            }
            JsonValue::String(value) => Ok(Self::Scalar(value)),
            other @ (JsonValue::Null | JsonValue::Bool(_) | JsonValue::Number(_)) => {
                Err(ValueError::UnsupportedValueType {
                    path: location.join(" "),
                    shape: Shape::of(&other),
                })
            }
        }
    }
}

impl TryFrom<JsonValue> for ConfigValue {
    type Error = ValueError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        Self::from_json_at(value, &mut Vec::new())
    }
}

impl<'de> Deserialize<'de> for ConfigValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;

        Self::try_from(value).map_err(D::Error::custom)
    }
}

impl From<Tree> for ConfigValue {
    fn from(tree: Tree) -> Self {
        Self::Tree(tree)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(list: Vec<String>) -> Self {
        Self::List(list)
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_owned())
    }
}

/// A single `(path, value)` association produced by [`flatten`].
///
/// An empty `value` marks either an empty container or an empty scalar; both
/// are addressed by `path` alone.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlatEntry {
    pub path: Path,
    pub value: String,
}

impl FlatEntry {
    #[must_use]
    pub fn new(path: Path, value: impl Into<String>) -> Self {
        Self {
            path,
            value: value.into(),
        }
    }
}

/// Flattens `value` into `(path, value)` pairs rooted at `base`.
///
/// Traversal is depth-first in key order. Empty trees and lists emit a single
/// entry with an empty value so that their existence survives the flattening.
/// List elements repeat the list's path rather than extending it.
pub fn flatten(value: &ConfigValue, base: &Path) -> Result<Vec<FlatEntry>, FlattenError> {
    let mut entries = Vec::new();

    flatten_into(&mut entries, value, base)?;

    Ok(entries)
}

/// Flattens a whole tree starting from the root path.
pub fn flatten_tree(tree: &Tree) -> Result<Vec<FlatEntry>, FlattenError> {
    let mut entries = Vec::new();

    flatten_children(&mut entries, tree, &Path::root())?;

    Ok(entries)
}

fn flatten_into(
    entries: &mut Vec<FlatEntry>,
    value: &ConfigValue,
    base: &Path,
) -> Result<(), FlattenError> {
    match value {
        ConfigValue::Tree(tree) => flatten_children(entries, tree, base),
        ConfigValue::List(list) => {
            if list.is_empty() {
                entries.push(FlatEntry::new(base.clone(), ""));
            }

            entries.extend(
                list.iter()
                    .map(|element| FlatEntry::new(base.clone(), element.as_str())),
            );

            Ok(())
        }
        ConfigValue::Scalar(scalar) => {
            entries.push(FlatEntry::new(base.clone(), scalar.as_str()));
            Ok(())
        }
    }
}

fn flatten_children(
    entries: &mut Vec<FlatEntry>,
    tree: &Tree,
    base: &Path,
) -> Result<(), FlattenError> {
    if tree.is_empty() {
        entries.push(FlatEntry::new(base.clone(), ""));
        return Ok(());
    }

    for (key, child) in tree {
        let path = base
            .child(key.as_str())
            .map_err(|source| FlattenError::InvalidKey {
                parent: base.clone(),
                source,
            })?;

        flatten_into(entries, child, &path)?;
    }

    Ok(())
}
