#[cfg(test)]
#[path = "tests/operation.rs"]
mod tests;

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::path::Path;
use crate::value::FlatEntry;

/// Store endpoint an operation is submitted to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Endpoint {
    Retrieve,
    Configure,
}

impl Endpoint {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Retrieve => "retrieve",
            Self::Configure => "configure",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Elementary operation understood by the store.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Operation {
    ShowConfig { path: Path },
    Set { path: Path, value: String },
    Delete { path: Path },
}

impl Operation {
    #[must_use]
    pub const fn show(path: Path) -> Self {
        Self::ShowConfig { path }
    }

    #[must_use]
    pub fn set(path: Path, value: impl Into<String>) -> Self {
        Self::Set {
            path,
            value: value.into(),
        }
    }

    #[must_use]
    pub const fn delete(path: Path) -> Self {
        Self::Delete { path }
    }

    #[must_use]
    pub const fn path(&self) -> &Path {
        match self {
            Self::ShowConfig { path } | Self::Set { path, .. } | Self::Delete { path } => path,
        }
    }

    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(self, Self::Set { .. } | Self::Delete { .. })
    }

    #[must_use]
    pub const fn endpoint(&self) -> Endpoint {
        if self.is_mutation() {
            Endpoint::Configure
        } else {
            Endpoint::Retrieve
        }
    }
}

impl From<FlatEntry> for Operation {
    fn from(entry: FlatEntry) -> Self {
        Self::Set {
            path: entry.path,
            value: entry.value,
        }
    }
}

/// Operations submitted together in one request.
///
/// The store applies a batch as a unit; the client does not roll back.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Batch(Vec<Operation>);

impl Batch {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, operation: Operation) {
        self.0.push(operation);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.0
    }
}

impl FromIterator<Operation> for Batch {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Batch {
    type Item = Operation;
    type IntoIter = std::vec::IntoIter<Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Request body: one unwrapped operation or a batch.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Single(Operation),
    Batch(Batch),
}

impl Payload {
    /// Only a non-empty batch of reads goes to the retrieve endpoint.
    #[must_use]
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Single(operation) => operation.endpoint(),
            Self::Batch(batch) => {
                if !batch.is_empty() && !batch.0.iter().any(Operation::is_mutation) {
                    Endpoint::Retrieve
                } else {
                    Endpoint::Configure
                }
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Batch(batch) => batch.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Operation> for Payload {
    fn from(operation: Operation) -> Self {
        Self::Single(operation)
    }
}

impl From<Batch> for Payload {
    fn from(batch: Batch) -> Self {
        Self::Batch(batch)
    }
}
