#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod collection;
mod container;
mod error;

pub mod file;
pub mod listing;
pub mod transport;

#[cfg(feature = "reqwest")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
pub mod reqwest;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

pub use collection::Collection;
pub use container::{Container, ContainerRef};
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use file::{FileEntry, StoredFile};
pub use listing::{ListingQuery, ListingQueryBuilder, QueryState};
pub use transport::{ApiRequest, ApiResponse, ApiTransport, Method, TransportService};
