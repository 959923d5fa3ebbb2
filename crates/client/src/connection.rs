//! Request gateway to the configuration store.
//!
//! A [`Connection`] encodes a [`Payload`], hands it to its [`Transport`] and
//! decodes the uniform response envelope. Only one exchange is in flight per
//! connection at any time.

use cfgtree_primitives::Payload;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::errors::{ClientError, ProtocolError};
use crate::transport::{Transport, TransportRequest};

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    data: JsonValue,
    #[serde(default)]
    error: Option<String>,
}

impl Envelope {
    fn into_data<T: Transport>(self) -> Result<JsonValue, ClientError<T>> {
        if let Some(message) = self.error {
            return Err(ClientError::Store(message));
        }

        if self.success == Some(false) {
            return Err(ProtocolError::Unsuccessful.into());
        }

        Ok(self.data)
    }
}

#[derive(Debug)]
pub struct Connection<T> {
    transport: T,
    exchange: Mutex<()>,
}

impl<T: Transport> Connection<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            exchange: Mutex::new(()),
        }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Submits `payload` and returns the envelope's `data`.
    ///
    /// An `error` in the envelope comes back as [`ClientError::Store`] with
    /// the message untouched.
    pub async fn request(&self, payload: &Payload) -> Result<JsonValue, ClientError<T>> {
        let endpoint = payload.endpoint();

        let _guard = self.exchange.lock().await;

        let body = serde_json::to_string(payload).map_err(ProtocolError::Encode)?;

        debug!(%endpoint, operations = payload.len(), "sending request");
        trace!(%endpoint, %body, "request body");

        let response = self
            .transport
            .send(TransportRequest::new(endpoint), body)
            .await
            .map_err(ClientError::Transport)?;

        let envelope: Envelope =
            serde_json::from_slice(&response).map_err(ProtocolError::Decode)?;

        envelope.into_data()
    }
}
