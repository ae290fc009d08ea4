//! Fluent builder for container listings.

use std::fmt;
use std::sync::Arc;

use super::TRACING_TARGET;
use super::query::{ListingQuery, QueryState, trim_directory};
use crate::collection::Collection;
use crate::container::ContainerRef;
use crate::file::{FileEntry, StoredFile};
use crate::transport::{ApiRequest, TransportService};
use crate::Result;

/// Function turning a raw listing record into the collection element type.
pub type Transform<T> = Arc<dyn Fn(FileEntry) -> T + Send + Sync>;

/// Accumulates listing filters and executes a single listing request.
///
/// Filters are plain setters; nothing is combined or validated until
/// [`get`](Self::get) builds the outgoing query.
///
/// # Examples
///
/// ```rust,ignore
/// use selstore_core::ContainerRef;
/// use selstore_core::listing::ListingQueryBuilder;
///
/// let files = ListingQueryBuilder::new(transport, ContainerRef::named("photos"))
///     .from_directory("/2024")
///     .with_prefix("cat-")
///     .limit_after(100, "cat-0099.jpg")
///     .as_file_objects()
///     .get()
///     .await?;
///
/// for file in &files {
///     println!("{:?} {:?}", file.name(), file.size());
/// }
/// ```
#[must_use]
pub struct ListingQueryBuilder<T = FileEntry> {
    transport: TransportService,
    container: ContainerRef,
    state: QueryState,
    transform: Transform<T>,
    transformed: bool,
}

impl<T> fmt::Debug for ListingQueryBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListingQueryBuilder")
            .field("container", &self.container)
            .field("state", &self.state)
            .field("transformed", &self.transformed)
            .finish_non_exhaustive()
    }
}

impl ListingQueryBuilder<FileEntry> {
    /// Creates a builder listing `container` through `transport`.
    pub fn new(transport: TransportService, container: ContainerRef) -> Self {
        Self {
            transport,
            container,
            state: QueryState::default(),
            transform: Arc::new(|entry: FileEntry| entry),
            transformed: false,
        }
    }

    /// Maps every listing record through `transform` when the listing runs.
    ///
    /// The function is stored, not called; it runs once per record inside
    /// [`get`](ListingQueryBuilder::get).
    pub fn as_objects<U, F>(self, transform: F) -> ListingQueryBuilder<U>
    where
        F: Fn(FileEntry) -> U + Send + Sync + 'static,
    {
        ListingQueryBuilder {
            transport: self.transport,
            container: self.container,
            state: self.state,
            transform: Arc::new(transform),
            transformed: true,
        }
    }

    /// Returns [`StoredFile`] objects bound to this container instead of raw records.
    pub fn as_file_objects(self) -> ListingQueryBuilder<StoredFile> {
        let container = self.container.name().to_owned();
        self.as_objects(move |entry| StoredFile::new(container.clone(), entry))
    }
}

impl<T> ListingQueryBuilder<T> {
    /// Restricts the listing to a pseudo-directory.
    ///
    /// Surrounding separators are removed, so `/photos/2024/` is stored as
    /// `photos/2024`. The path is not checked for existence.
    pub fn from_directory(mut self, path: impl AsRef<str>) -> Self {
        self.state.directory = Some(trim_directory(path.as_ref()).to_owned());
        self
    }

    /// Restricts the listing to keys starting with `prefix`.
    ///
    /// When a directory is also set, the prefix is taken relative to it.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.state.prefix = Some(prefix.into());
        self
    }

    /// Groups keys sharing a common prefix up to `delimiter`.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.state.delimiter = Some(delimiter.into());
        self
    }

    /// Limits the number of returned entries and clears any marker.
    ///
    /// The value is sent as-is; the server decides what a non-positive limit means.
    pub fn limit(mut self, count: i64) -> Self {
        self.state.limit = Some(count);
        self.state.marker = None;
        self
    }

    /// Limits the number of returned entries, starting after `marker`.
    ///
    /// `marker` is the last key of the previous page. When a directory is set
    /// it may be given relative to that directory.
    pub fn limit_after(mut self, count: i64, marker: impl Into<String>) -> Self {
        self.state.limit = Some(count);
        self.state.marker = Some(marker.into());
        self
    }

    /// Container being listed.
    pub fn container(&self) -> &ContainerRef {
        &self.container
    }

    /// Filters accumulated so far.
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Returns the parameters [`get`](Self::get) would send, without sending them.
    pub fn query(&self) -> ListingQuery {
        self.state.normalize()
    }

    /// Executes the listing.
    ///
    /// Issues exactly one `GET` to the container path. Every call sends a new
    /// request built from the current filters; nothing is cached. Errors from
    /// the transport are returned unchanged.
    pub async fn get(&self) -> Result<Collection<T>> {
        let query = self.query();

        tracing::debug!(
            target: TRACING_TARGET,
            container = %self.container.name(),
            limit = query.limit,
            marker = %query.marker,
            path = %query.path,
            prefix = %query.prefix,
            delimiter = %query.delimiter,
            transformed = self.transformed,
            "Listing container"
        );

        let request = ApiRequest::get(self.container.path()).with_query(query.to_pairs());
        let response = self.transport.request(request).await?;

        let entries: Vec<FileEntry> = if response.is_empty() {
            Vec::new()
        } else {
            response.json()?
        };

        let files: Collection<T> = entries
            .into_iter()
            .map(|entry| (self.transform)(entry))
            .collect();

        tracing::info!(
            target: TRACING_TARGET,
            container = %self.container.name(),
            count = files.len(),
            "Container listed"
        );

        Ok(files)
    }
}
