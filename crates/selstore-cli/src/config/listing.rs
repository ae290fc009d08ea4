//! Listing filter arguments.

use clap::Args;
use selstore_core::listing::ListingQueryBuilder;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Filters applied to a container listing.
///
/// # Examples
///
/// ```bash
/// # Second page of JPEGs under photos/2024
/// selstore list photos --directory 2024 --prefix cat- --limit 100 --marker cat-0099.jpg
/// ```
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct ListingArgs {
    /// Container to list.
    pub container: String,

    /// Request path of the container listing; defaults to `/<container>`.
    #[arg(long)]
    pub container_path: Option<String>,

    /// Only list objects inside this pseudo-directory.
    #[arg(short = 'd', long)]
    pub directory: Option<String>,

    /// Only list objects whose names start with this prefix.
    ///
    /// Relative to `--directory` when both are given.
    #[arg(short = 'p', long)]
    pub prefix: Option<String>,

    /// Group names sharing a common prefix up to this delimiter.
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Maximum number of entries to return.
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Last name of the previous page.
    #[arg(short = 'm', long, requires = "limit")]
    pub marker: Option<String>,

    /// Print typed file objects instead of raw listing records.
    #[arg(long)]
    pub objects: bool,
}

impl ListingArgs {
    /// Applies the filters to a builder.
    pub fn apply<T>(&self, mut builder: ListingQueryBuilder<T>) -> ListingQueryBuilder<T> {
        if let Some(directory) = &self.directory {
            builder = builder.from_directory(directory);
        }
        if let Some(prefix) = &self.prefix {
            builder = builder.with_prefix(prefix);
        }
        if let Some(delimiter) = &self.delimiter {
            builder = builder.with_delimiter(delimiter);
        }
        match (self.limit, &self.marker) {
            (Some(limit), Some(marker)) => builder.limit_after(limit, marker),
            (Some(limit), None) => builder.limit(limit),
            (None, _) => builder,
        }
    }

    /// Logs the listing filters.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            container = %self.container,
            directory = ?self.directory,
            prefix = ?self.prefix,
            delimiter = ?self.delimiter,
            limit = ?self.limit,
            marker = ?self.marker,
            objects = self.objects,
            "Listing configuration"
        );
    }
}
