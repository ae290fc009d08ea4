//! Storage API request types.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use uuid::Uuid;

/// HTTP method of a storage API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Head,
    Put,
    Post,
    Delete,
}

/// A single request against the storage API.
///
/// The path is relative to the transport's base URL. Query parameters keep
/// their insertion order and are always sent, even when empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Unique identifier for this request.
    pub request_id: Uuid,
    /// HTTP method.
    pub method: Method,
    /// Request path, e.g. `/my-container`.
    pub path: String,
    /// Ordered query parameters.
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    /// Creates a new request with no query parameters.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            method,
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Creates a new `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Appends multiple query parameters.
    #[must_use]
    pub fn with_query<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Returns the first value of the named query parameter.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}
