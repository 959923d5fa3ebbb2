use core::error::Error;

use async_trait::async_trait;
use cfgtree_primitives::Endpoint;

/// Moves an encoded request to the store and returns the raw response body.
///
/// A transport does not interpret the body; decoding the envelope is left to
/// the [`Connection`](crate::connection::Connection).
#[async_trait]
pub trait Transport: Send + Sync {
    type Error: Error + Send + Sync + 'static;

    async fn send(&self, request: TransportRequest, payload: String)
        -> Result<Vec<u8>, Self::Error>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    type Error = T::Error;

    async fn send(
        &self,
        request: TransportRequest,
        payload: String,
    ) -> Result<Vec<u8>, Self::Error> {
        (**self).send(request, payload).await
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct TransportRequest {
    pub endpoint: Endpoint,
}

impl TransportRequest {
    #[must_use]
    pub const fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }
}
