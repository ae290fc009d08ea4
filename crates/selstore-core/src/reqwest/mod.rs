//! Reqwest-based HTTP transport for the storage API.
//!
//! This module provides a reqwest-based implementation of the [`ApiTransport`] trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use selstore_core::reqwest::{ReqwestConfig, ReqwestTransport};
//! use selstore_core::TransportService;
//!
//! let transport = ReqwestTransport::new(ReqwestConfig::new("https://api.selcdn.ru/v1/SEL_1")?)?;
//!
//! // Convert to a service for dependency injection
//! let service: TransportService = transport.into_service();
//! ```
//!
//! [`ApiTransport`]: crate::ApiTransport

mod client;
mod config;
mod error;

pub use client::{AUTH_TOKEN_HEADER, ReqwestTransport};
pub use config::{DEFAULT_TIMEOUT_SECS, ReqwestConfig};
pub use error::{Error, Result};

/// Tracing target for reqwest transport operations.
pub const TRACING_TARGET: &str = "selstore_core::reqwest";
