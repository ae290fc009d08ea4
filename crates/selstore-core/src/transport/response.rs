//! Storage API response types.

use bytes::Bytes;
use jiff::Timestamp;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::Result;

/// Raw response returned by an [`ApiTransport`](super::ApiTransport).
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Request ID this response corresponds to.
    pub request_id: Uuid,
    /// HTTP status code returned by the storage API.
    pub status_code: u16,
    /// Undecoded response body.
    pub body: Bytes,
    /// Timestamp when the request was initiated.
    pub started_at: Timestamp,
    /// Timestamp when the response was received.
    pub finished_at: Timestamp,
}

impl ApiResponse {
    /// Creates a new response, stamping the finish time as now.
    pub fn new(
        request_id: Uuid,
        status_code: u16,
        body: impl Into<Bytes>,
        started_at: Timestamp,
    ) -> Self {
        Self {
            request_id,
            status_code,
            body: body.into(),
            started_at,
            finished_at: Timestamp::now(),
        }
    }

    /// Returns whether the request succeeded (2xx status code).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Returns whether the body is empty.
    ///
    /// Swift answers `204 No Content` for an empty container.
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Calculates the response time as a span.
    pub fn duration(&self) -> jiff::Span {
        self.started_at.until(self.finished_at).unwrap_or_default()
    }
}
