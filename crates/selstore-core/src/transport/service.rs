//! Transport service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use super::{ApiRequest, ApiResponse, ApiTransport, TRACING_TARGET};
use crate::Result;

/// Transport service wrapper with observability.
///
/// This wrapper adds structured logging to any transport implementation.
/// The inner transport is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct TransportService {
    inner: Arc<dyn ApiTransport>,
}

impl fmt::Debug for TransportService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportService").finish_non_exhaustive()
    }
}

impl TransportService {
    /// Create a new transport service wrapper.
    pub fn new<T>(transport: T) -> Self
    where
        T: ApiTransport + 'static,
    {
        Self {
            inner: Arc::new(transport),
        }
    }

    /// Sends a request through the wrapped transport.
    pub async fn request(&self, request: ApiRequest) -> Result<ApiResponse> {
        let started_at = Instant::now();
        let request_id = request.request_id;

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request_id,
            method = %request.method,
            path = %request.path,
            "Sending storage request"
        );

        let result = self.inner.request(request).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(response) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    request_id = %request_id,
                    status_code = response.status_code,
                    body_len = response.body.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Storage request completed"
                );
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    request_id = %request_id,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Storage request failed"
                );
            }
        }

        result
    }
}

#[async_trait::async_trait]
impl ApiTransport for TransportService {
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse> {
        TransportService::request(self, request).await
    }
}
