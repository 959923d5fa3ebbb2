use cfgtree_primitives::{FlattenError, InvalidPath, Path, ValueError};
use thiserror::Error;

use crate::transport::Transport;

/// Fragment of the store's message for a show on a path that does not exist.
pub const EMPTY_PATH_FRAGMENT: &str = "specified path is empty";

/// Whether a store error message reports a path with nothing under it.
///
/// The store has no error codes, so this is a substring match.
#[must_use]
pub fn is_empty_path_error(message: &str) -> bool {
    message.contains(EMPTY_PATH_FRAGMENT)
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError<T: Transport> {
    #[error(transparent)]
    InvalidPath(#[from] InvalidPath),
    #[error(transparent)]
    Flatten(#[from] FlattenError),
    #[error("unexpected response shape: {0}")]
    UnexpectedResponseShape(#[source] ValueError),
    #[error("value missing from configuration tree returned for `{path}`")]
    MissingValue { path: Path },
    /// Error message reported by the store, verbatim.
    #[error("{0}")]
    Store(String),
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
    #[error("transport error: {0}")]
    Transport(T::Error),
}

impl<T: Transport> ClientError<T> {
    /// The store's message, if the store itself rejected the request.
    #[must_use]
    pub fn store_message(&self) -> Option<&str> {
        match self {
            Self::Store(message) => Some(message),
            Self::InvalidPath(_)
            | Self::Flatten(_)
            | Self::UnexpectedResponseShape(_)
            | Self::MissingValue { .. }
            | Self::Protocol(_)
            | Self::Transport(_) => None,
        }
    }

    #[must_use]
    pub fn is_empty_path(&self) -> bool {
        self.store_message().is_some_and(is_empty_path_error)
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    #[error("failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode response envelope: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("store reported failure without an error message")]
    Unsuccessful,
}
