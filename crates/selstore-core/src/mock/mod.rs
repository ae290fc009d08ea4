//! Recording mock transport for testing.
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! selstore-core = { version = "...", features = ["test-utils"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use selstore_core::ContainerRef;
//! use selstore_core::listing::ListingQueryBuilder;
//! use selstore_core::mock::MockTransport;
//!
//! let transport = MockTransport::default();
//! let files = ListingQueryBuilder::new(transport.clone().into_service(), ContainerRef::named("test"))
//!     .limit(5)
//!     .get()
//!     .await?;
//!
//! assert_eq!(transport.last_request().unwrap().query_param("limit"), Some("5"));
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use bytes::Bytes;
use jiff::Timestamp;

use crate::transport::{ApiRequest, ApiResponse, ApiTransport, TransportService};
use crate::{Error, Result};

/// Body returned by [`MockTransport::default`].
pub const DEFAULT_MOCK_BODY: &str = r#"[{"name":"test1"},{"name":"test2"}]"#;

#[derive(Debug)]
struct MockTransportInner {
    status_code: u16,
    body: Bytes,
    requests: Mutex<Vec<ApiRequest>>,
}

/// Transport that answers every request with a canned response and records
/// what it was asked.
///
/// Clones share the recorded requests, so a test can hand one clone to the
/// code under test and inspect the other.
#[derive(Debug, Clone)]
pub struct MockTransport {
    inner: Arc<MockTransportInner>,
}

impl MockTransport {
    /// Creates a mock answering `status_code` with `body`.
    ///
    /// Non-2xx status codes are turned into errors, like a real transport.
    pub fn new(status_code: u16, body: impl Into<Bytes>) -> Self {
        Self {
            inner: Arc::new(MockTransportInner {
                status_code,
                body: body.into(),
                requests: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Creates a mock answering `200 OK` with the given JSON body.
    pub fn with_json(body: &serde_json::Value) -> Self {
        Self::new(200, body.to_string())
    }

    /// Creates a mock failing every request with `status_code`.
    pub fn failing(status_code: u16) -> Self {
        Self::new(status_code, Bytes::new())
    }

    /// Returns every request received so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.inner
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests().pop()
    }

    /// Converts this mock into a [`TransportService`].
    pub fn into_service(self) -> TransportService {
        TransportService::new(self)
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new(200, DEFAULT_MOCK_BODY)
    }
}

#[async_trait::async_trait]
impl ApiTransport for MockTransport {
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse> {
        let started_at = Timestamp::now();
        let request_id = request.request_id;

        self.inner
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        let response = ApiResponse::new(
            request_id,
            self.inner.status_code,
            self.inner.body.clone(),
            started_at,
        );

        if !response.is_success() {
            return Err(Error::from_status(response.status_code));
        }

        Ok(response)
    }
}
