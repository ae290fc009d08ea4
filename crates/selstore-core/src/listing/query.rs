//! Listing filter state and its normalized wire form.

use serde::{Deserialize, Serialize};

/// Page size sent when the caller did not set one.
pub const DEFAULT_LIMIT: i64 = 10_000;

/// Separator used to build pseudo-directory keys.
pub const PATH_SEPARATOR: char = '/';

/// Filters accumulated by a [`ListingQueryBuilder`](super::ListingQueryBuilder).
///
/// Every field is independent; setting a field again overwrites it. The
/// state is never rewritten by normalization, see [`QueryState::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    /// Pseudo-directory scope, stored without surrounding separators.
    pub directory: Option<String>,
    /// Key prefix, stored verbatim.
    pub prefix: Option<String>,
    /// Grouping delimiter, stored verbatim.
    pub delimiter: Option<String>,
    /// Maximum number of entries; not validated.
    pub limit: Option<i64>,
    /// Last key of the previous page, relative to `directory` when one is set.
    pub marker: Option<String>,
}

impl QueryState {
    /// Computes the parameters actually sent to the listing endpoint.
    ///
    /// The marker is qualified with the directory. When a prefix is also
    /// present the directory is folded into the prefix and `path` is sent
    /// empty, since the server matches `prefix` against full keys.
    pub fn normalize(&self) -> ListingQuery {
        let directory = non_empty(&self.directory);
        let prefix = non_empty(&self.prefix);
        let marker = non_empty(&self.marker);

        let marker = match (marker, directory) {
            (Some(marker), Some(directory)) => join(directory, marker),
            (Some(marker), None) => marker.to_owned(),
            (None, _) => String::new(),
        };

        let (path, prefix) = match (prefix, directory) {
            (Some(prefix), Some(directory)) => (String::new(), join(directory, prefix)),
            (Some(prefix), None) => (String::new(), prefix.to_owned()),
            (None, directory) => (directory.unwrap_or_default().to_owned(), String::new()),
        };

        ListingQuery {
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
            marker,
            path,
            prefix,
            delimiter: self.delimiter.clone().unwrap_or_default(),
        }
    }
}

/// Normalized listing parameters.
///
/// All five parameters are always sent; unused ones carry an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingQuery {
    pub limit: i64,
    pub marker: String,
    pub path: String,
    pub prefix: String,
    pub delimiter: String,
}

impl ListingQuery {
    /// Returns the query as ordered `(name, value)` pairs.
    pub fn to_pairs(&self) -> [(&'static str, String); 5] {
        [
            ("limit", self.limit.to_string()),
            ("marker", self.marker.clone()),
            ("path", self.path.clone()),
            ("prefix", self.prefix.clone()),
            ("delimiter", self.delimiter.clone()),
        ]
    }
}

impl Default for ListingQuery {
    fn default() -> Self {
        QueryState::default().normalize()
    }
}

/// Strips separators from both ends of a directory path.
pub(crate) fn trim_directory(path: &str) -> &str {
    path.trim_matches(PATH_SEPARATOR)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

fn join(directory: &str, relative: &str) -> String {
    format!(
        "{directory}{PATH_SEPARATOR}{}",
        relative.trim_start_matches(PATH_SEPARATOR)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> QueryState {
        QueryState::default()
    }

    #[test]
    fn test_defaults() {
        let query = state().normalize();
        assert_eq!(
            query,
            ListingQuery {
                limit: DEFAULT_LIMIT,
                marker: String::new(),
                path: String::new(),
                prefix: String::new(),
                delimiter: String::new(),
            }
        );
        assert_eq!(query, ListingQuery::default());
    }

    #[test]
    fn test_directory_alone_becomes_path() {
        let query = QueryState {
            directory: Some("photos/2024".into()),
            ..state()
        }
        .normalize();

        assert_eq!(query.path, "photos/2024");
        assert_eq!(query.prefix, "");
    }

    #[test]
    fn test_prefix_absorbs_directory() {
        let query = QueryState {
            directory: Some("test".into()),
            prefix: Some("/file-".into()),
            ..state()
        }
        .normalize();

        assert_eq!(query.path, "");
        assert_eq!(query.prefix, "test/file-");
    }

    #[test]
    fn test_marker_is_qualified_by_directory() {
        let query = QueryState {
            directory: Some("test".into()),
            marker: Some("//last.txt".into()),
            limit: Some(5),
            ..state()
        }
        .normalize();

        assert_eq!(query.marker, "test/last.txt");
        assert_eq!(query.path, "test");
        assert_eq!(query.limit, 5);
    }

    #[test]
    fn test_empty_strings_count_as_unset() {
        let query = QueryState {
            directory: Some(String::new()),
            prefix: Some("img-".into()),
            marker: Some(String::new()),
            ..state()
        }
        .normalize();

        assert_eq!(query.prefix, "img-");
        assert_eq!(query.marker, "");
        assert_eq!(query.path, "");
    }

    #[test]
    fn test_limit_is_not_validated() {
        let query = QueryState {
            limit: Some(-3),
            ..state()
        }
        .normalize();
        assert_eq!(query.limit, -3);
    }

    #[test]
    fn test_normalize_does_not_touch_state() {
        let state = QueryState {
            directory: Some("test".into()),
            prefix: Some("file-".into()),
            marker: Some("a".into()),
            ..state()
        };
        let before = state.clone();
        let _ = state.normalize();
        assert_eq!(state, before);
    }

    #[test]
    fn test_pairs_order() {
        let names: Vec<_> = ListingQuery::default()
            .to_pairs()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, ["limit", "marker", "path", "prefix", "delimiter"]);
    }

    #[test]
    fn test_trim_directory() {
        assert_eq!(trim_directory("/test-directory"), "test-directory");
        assert_eq!(trim_directory("photos/2024//"), "photos/2024");
        assert_eq!(trim_directory("/"), "");
    }
}
