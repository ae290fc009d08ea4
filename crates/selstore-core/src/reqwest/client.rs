//! Reqwest-based HTTP transport for the storage API.

use std::sync::Arc;

use jiff::Timestamp;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use super::{Error, ReqwestConfig, TRACING_TARGET};
use crate::transport::{ApiRequest, ApiResponse, ApiTransport, Method, TransportService};

/// Header carrying the storage token.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Inner transport that holds the HTTP client and configuration.
struct ReqwestTransportInner {
    http: Client,
    config: ReqwestConfig,
}

/// Reqwest-based transport sending storage API requests over HTTP.
///
/// This transport implements the [`ApiTransport`] trait. Non-2xx answers are
/// returned as errors classified by status code.
///
/// # Examples
///
/// ```rust,ignore
/// use selstore_core::reqwest::{ReqwestConfig, ReqwestTransport};
/// use selstore_core::ApiRequest;
///
/// let config = ReqwestConfig::new("https://api.selcdn.ru/v1/SEL_1")?
///     .with_auth_token(token);
/// let transport = ReqwestTransport::new(config)?;
///
/// let response = transport.request(ApiRequest::get("/photos")).await?;
/// ```
#[derive(Clone)]
pub struct ReqwestTransport {
    inner: Arc<ReqwestTransportInner>,
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    /// Creates a new reqwest transport with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the auth token is not a valid header value or the
    /// HTTP client cannot be created.
    pub fn new(config: ReqwestConfig) -> crate::Result<Self> {
        let timeout = config.effective_timeout();
        let user_agent = config.effective_user_agent();

        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %config.base_url,
            timeout_ms = timeout.as_millis(),
            has_token = config.auth_token.is_some(),
            "Creating reqwest transport"
        );

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.auth_token {
            let mut value = HeaderValue::from_str(token).map_err(Error::from)?;
            value.set_sensitive(true);
            headers.insert(AUTH_TOKEN_HEADER, value);
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(&user_agent)
            .default_headers(headers)
            .build()
            .map_err(Error::from)?;

        let inner = ReqwestTransportInner { http, config };
        let transport = Self {
            inner: Arc::new(inner),
        };

        tracing::info!(
            target: TRACING_TARGET,
            "Reqwest transport created successfully"
        );

        Ok(transport)
    }

    /// Gets the transport configuration.
    pub fn config(&self) -> &ReqwestConfig {
        &self.inner.config
    }

    /// Converts this transport into a [`TransportService`] for use with dependency injection.
    pub fn into_service(self) -> TransportService {
        TransportService::new(self)
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Head => reqwest::Method::HEAD,
            Method::Put => reqwest::Method::PUT,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait::async_trait]
impl ApiTransport for ReqwestTransport {
    async fn request(&self, request: ApiRequest) -> crate::Result<ApiResponse> {
        let started_at = Timestamp::now();
        let url = self.inner.config.endpoint(&request.path)?;

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            method = %request.method,
            url = %url,
            "Sending request"
        );

        let http_response = self
            .inner
            .http
            .request(Self::method(request.method), url)
            .query(&request.query)
            .send()
            .await
            .map_err(Error::from)?;

        let status_code = http_response.status().as_u16();
        if !http_response.status().is_success() {
            tracing::debug!(
                target: TRACING_TARGET,
                request_id = %request.request_id,
                status_code,
                "Storage API rejected request"
            );

            return Err(crate::Error::from_status(status_code)
                .with_context(format!("{} {}", request.method, request.path)));
        }

        let body = http_response.bytes().await.map_err(Error::from)?;
        let response = ApiResponse::new(request.request_id, status_code, body, started_at);

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            status_code,
            body_len = response.body.len(),
            "Request completed"
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;
    use crate::listing::ListingQueryBuilder;
    use crate::{ContainerRef, ErrorKind};

    fn config() -> ReqwestConfig {
        ReqwestConfig::new("https://api.selcdn.ru/v1/SEL_1").unwrap()
    }

    /// Accepts one connection, answers it with `response` and returns the
    /// request head it received.
    async fn serve_once(response: String) -> (ReqwestConfig, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let read = socket.read(&mut buf).await.unwrap();
                if read == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..read]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8(head).unwrap()
        });

        let config = ReqwestConfig::new(&format!("http://{address}/v1/SEL_1"))
            .unwrap()
            .with_auth_token("token");
        (config, handle)
    }

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    #[test]
    fn test_transport_creation() {
        let transport = ReqwestTransport::new(config().with_auth_token("token")).unwrap();
        assert_eq!(transport.config().auth_token.as_deref(), Some("token"));
    }

    #[test]
    fn test_invalid_token_is_rejected() {
        let error = ReqwestTransport::new(config().with_auth_token("bad\ntoken")).unwrap_err();
        assert_eq!(error.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_method_mapping() {
        assert_eq!(ReqwestTransport::method(Method::Get), reqwest::Method::GET);
        assert_eq!(ReqwestTransport::method(Method::Delete), reqwest::Method::DELETE);
    }

    #[tokio::test]
    async fn test_listing_request_on_the_wire() {
        let body = r#"[{"name":"a.txt","bytes":3},{"subdir":"photos/"}]"#;
        let (config, server) = serve_once(http_response("200 OK", body)).await;
        let transport = ReqwestTransport::new(config).unwrap().into_service();

        let files = ListingQueryBuilder::new(transport, ContainerRef::named("test"))
            .get()
            .await
            .unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name(), Some("a.txt"));
        assert_eq!(files[1].name(), Some("photos/"));

        let head = server.await.unwrap();
        let request_line = head.lines().next().unwrap();
        assert_eq!(
            request_line,
            "GET /v1/SEL_1/test?limit=10000&marker=&path=&prefix=&delimiter= HTTP/1.1"
        );

        let head = head.to_ascii_lowercase();
        assert!(head.contains("accept: application/json\r\n"));
        assert!(head.contains("x-auth-token: token\r\n"));
    }

    #[tokio::test]
    async fn test_filters_on_the_wire() {
        let (config, server) = serve_once(http_response("200 OK", "[]")).await;
        let transport = ReqwestTransport::new(config).unwrap().into_service();

        let files = ListingQueryBuilder::new(transport, ContainerRef::named("test"))
            .from_directory("/docs/")
            .with_prefix("/2024")
            .limit_after(5, "2024-01.pdf")
            .get()
            .await
            .unwrap();
        assert!(files.is_empty());

        let head = server.await.unwrap();
        assert_eq!(
            head.lines().next().unwrap(),
            "GET /v1/SEL_1/test?limit=5&marker=docs%2F2024-01.pdf&path=&prefix=docs%2F2024&delimiter= HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_not_found_status() {
        let (config, server) = serve_once(http_response("404 Not Found", "")).await;
        let transport = ReqwestTransport::new(config).unwrap();

        let error = transport
            .request(ApiRequest::get("/test"))
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::NotFound);
        assert_eq!(error.context.as_deref(), Some("GET /test"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_no_content_is_empty_listing() {
        let (config, server) = serve_once(
            "HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n".to_owned(),
        )
        .await;
        let transport = ReqwestTransport::new(config).unwrap().into_service();

        let files = ListingQueryBuilder::new(transport, ContainerRef::named("test"))
            .get()
            .await
            .unwrap();

        assert!(files.is_empty());
        server.await.unwrap();
    }
}
