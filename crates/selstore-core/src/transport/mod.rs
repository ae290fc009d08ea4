//! Transport abstraction for the storage API.
//!
//! The listing builder never talks HTTP directly. It hands an [`ApiRequest`]
//! to an injected [`ApiTransport`] and decodes whatever [`ApiResponse`] comes
//! back. Errors raised by the transport reach the caller unchanged.

mod request;
mod response;
mod service;

pub use request::{ApiRequest, Method};
pub use response::ApiResponse;
pub use service::TransportService;

use crate::Result;

/// Tracing target for transport operations.
pub const TRACING_TARGET: &str = "selstore_core::transport";

/// Core trait for sending requests to the storage API.
///
/// Implementations return `Err` for transport failures and for non-success
/// HTTP statuses; an `Ok` response is always a 2xx answer.
#[async_trait::async_trait]
pub trait ApiTransport: Send + Sync {
    /// Sends a single request and returns the raw response.
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse>;
}
