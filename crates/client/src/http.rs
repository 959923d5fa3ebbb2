use async_trait::async_trait;
use cfgtree_primitives::Endpoint;
use thiserror::Error;
use tracing::trace;
use url::Url;

use crate::config::ClientConfig;
use crate::transport::{Transport, TransportRequest};

/// Posts requests as form data to `<url>/<endpoint>`.
///
/// The form carries the API key as `key` and the encoded operations as
/// `data`. The HTTP status is not inspected: the store reports failures inside
/// the response envelope, which is decoded by the caller.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: Url,
    key: String,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HttpError {
    #[error("base url `{0}` cannot be extended with an endpoint")]
    InvalidBaseUrl(Url),
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Self::with_client(client, config)
    }

    /// Uses a caller-built client; the configured timeout is not applied.
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Result<Self, HttpError> {
        if config.url.cannot_be_a_base() {
            return Err(HttpError::InvalidBaseUrl(config.url.clone()));
        }

        Ok(Self {
            client,
            url: config.url.clone(),
            key: config.key.clone(),
        })
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, HttpError> {
        let mut url = self.url.clone();

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| HttpError::InvalidBaseUrl(self.url.clone()))?;

            let _ignored = segments.pop_if_empty().push(endpoint.as_str());
        }

        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    type Error = HttpError;

    async fn send(
        &self,
        request: TransportRequest,
        payload: String,
    ) -> Result<Vec<u8>, Self::Error> {
        let url = self.endpoint_url(request.endpoint)?;

        let response = self
            .client
            .post(url)
            .form(&[("key", self.key.as_str()), ("data", payload.as_str())])
            .send()
            .await?;

        trace!(status = %response.status(), endpoint = %request.endpoint, "received response");

        response.bytes().await.map(Into::into).map_err(Into::into)
    }
}
