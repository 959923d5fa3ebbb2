//! Configuration operations on top of a [`Connection`].

use std::sync::Arc;

use cfgtree_primitives::{
    flatten_tree, Batch, ConfigValue, FlatEntry, Operation, Path, Payload, Tree,
};
use tracing::debug;

use crate::config::ClientConfig;
use crate::connection::Connection;
use crate::errors::ClientError;
use crate::http::{HttpError, HttpTransport};
use crate::transport::Transport;

/// Handle to a configuration store.
///
/// Cloning is cheap; clones share one [`Connection`] and therefore its
/// single in-flight exchange.
#[derive(Debug)]
pub struct Client<T> {
    connection: Arc<Connection<T>>,
}

impl<T> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            connection: Arc::clone(&self.connection),
        }
    }
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self {
            connection: Arc::new(Connection::new(transport)),
        }
    }

    #[must_use]
    pub fn connection(&self) -> &Connection<T> {
        &self.connection
    }

    #[must_use]
    pub fn config(&self) -> ConfigService<'_, T> {
        ConfigService {
            connection: &self.connection,
        }
    }
}

impl Client<HttpTransport> {
    pub fn from_config(config: &ClientConfig) -> Result<Self, HttpError> {
        HttpTransport::new(config).map(Self::new)
    }
}

/// Tree operations against the store's configuration.
///
/// Path arguments use the space-delimited form and are validated before
/// anything is sent.
#[derive(Debug)]
pub struct ConfigService<'a, T> {
    connection: &'a Connection<T>,
}

impl<T> Clone for ConfigService<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ConfigService<'_, T> {}

impl<T: Transport> ConfigService<'_, T> {
    /// Returns the subtree at `path`, or `None` if nothing is configured there.
    pub async fn show_tree(&self, path: &str) -> Result<Option<Tree>, ClientError<T>> {
        let path = path.parse()?;

        self.show_tree_at(path).await
    }

    /// Returns the scalar stored at `path`, or `None` if the path is empty.
    ///
    /// The store answers a show with the parent node, so the value is looked
    /// up under the path's last segment.
    pub async fn show(&self, path: &str) -> Result<Option<String>, ClientError<T>> {
        let path: Path = path.parse()?;

        let Some(mut tree) = self.show_tree_at(path.clone()).await? else {
            return Ok(None);
        };

        let value = path.last().and_then(|terminal| tree.remove(terminal));

        match value {
            Some(ConfigValue::Scalar(value)) => Ok(Some(value)),
            Some(ConfigValue::Tree(_) | ConfigValue::List(_)) | None => {
                Err(ClientError::MissingValue { path })
            }
        }
    }

    pub async fn set(&self, path: &str, value: &str) -> Result<(), ClientError<T>> {
        let operation = Operation::set(path.parse()?, value);

        let _ignored = self.connection.request(&operation.into()).await?;

        Ok(())
    }

    /// Deletes every path in one batch.
    pub async fn delete<I, S>(&self, paths: I) -> Result<(), ClientError<T>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let batch = paths
            .into_iter()
            .map(|path| path.as_ref().parse().map(Operation::delete))
            .collect::<Result<Batch, _>>()?;

        self.submit(batch).await
    }

    /// Sets every value in `tree` in one batch.
    pub async fn set_tree(&self, tree: &Tree) -> Result<(), ClientError<T>> {
        let batch: Batch = flatten_tree(tree)?
            .into_iter()
            .map(Operation::from)
            .collect();

        self.submit(batch).await
    }

    /// Deletes every value in `tree` in one batch.
    ///
    /// A value is addressed by its path plus the value's words, which removes
    /// a single list element or a specific assignment. Empty containers delete
    /// their own path, so an empty `tree` deletes the root.
    pub async fn delete_tree(&self, tree: &Tree) -> Result<(), ClientError<T>> {
        let mut batch = Batch::new();

        for FlatEntry { mut path, value } in flatten_tree(tree)? {
            for word in value.split(Path::DELIMITER).filter(|word| !word.is_empty()) {
                path.push(word)?;
            }

            batch.push(Operation::delete(path));
        }

        self.submit(batch).await
    }

    async fn show_tree_at(&self, path: Path) -> Result<Option<Tree>, ClientError<T>> {
        let payload = Payload::from(Operation::show(path.clone()));

        let data = match self.connection.request(&payload).await {
            Ok(data) => data,
            Err(err) if err.is_empty_path() => {
                debug!(%path, "nothing configured at path");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        ConfigValue::tree_from_json(data)
            .map(Some)
            .map_err(ClientError::UnexpectedResponseShape)
    }

    async fn submit(&self, batch: Batch) -> Result<(), ClientError<T>> {
        debug!(operations = batch.len(), "submitting batch");

        let _ignored = self.connection.request(&batch.into()).await?;

        Ok(())
    }
}
