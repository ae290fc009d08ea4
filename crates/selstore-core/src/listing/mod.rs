//! Container listing.
//!
//! [`ListingQueryBuilder`] collects filters through chained calls and turns
//! them into one `GET` against the container path. Overlapping filters are
//! merged at execution time:
//!
//! | filters set            | `path`      | `prefix`            | `marker`            |
//! |------------------------|-------------|---------------------|---------------------|
//! | directory              | `dir`       | empty               | empty               |
//! | directory + prefix     | empty       | `dir/prefix`        | empty               |
//! | directory + marker     | `dir`       | empty               | `dir/marker`        |
//! | prefix                 | empty       | `prefix`            | empty               |

mod builder;
mod query;

pub use builder::{ListingQueryBuilder, Transform};
pub use query::{DEFAULT_LIMIT, ListingQuery, PATH_SEPARATOR, QueryState};

/// Tracing target for listing operations.
pub const TRACING_TARGET: &str = "selstore_core::listing";
