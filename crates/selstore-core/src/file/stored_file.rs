//! Typed view over a listing record.

use hipstr::HipStr;
use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};

use super::FileEntry;

/// Content type the storage API reports for explicit directory markers.
pub const DIRECTORY_CONTENT_TYPE: &str = "application/directory";

/// A file stored in a container, built from a [`FileEntry`].
///
/// Accessors read the underlying record lazily and return `None` when the
/// server did not send the attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFile {
    container: HipStr<'static>,
    #[serde(flatten)]
    entry: FileEntry,
}

impl StoredFile {
    /// Wraps a listing record returned for `container`.
    pub fn new(container: impl Into<HipStr<'static>>, entry: FileEntry) -> Self {
        Self {
            container: container.into(),
            entry,
        }
    }

    /// Name of the container holding this file.
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Full object name inside the container.
    pub fn name(&self) -> Option<&str> {
        self.entry.name()
    }

    /// Object size in bytes.
    pub fn size(&self) -> Option<u64> {
        self.entry
            .get_u64("bytes")
            .or_else(|| self.entry.get_u64("size"))
    }

    pub fn content_type(&self) -> Option<&str> {
        self.entry.get_str("content_type")
    }

    /// MD5 checksum of the object body.
    pub fn hash(&self) -> Option<&str> {
        self.entry.get_str("hash")
    }

    /// Last modification time.
    ///
    /// The API sends naive timestamps such as `2016-01-10T10:12:27.123456`,
    /// which are interpreted as UTC.
    pub fn last_modified(&self) -> Option<Timestamp> {
        let raw = self.entry.get_str("last_modified")?;
        if let Ok(timestamp) = raw.parse::<Timestamp>() {
            return Some(timestamp);
        }

        raw.parse::<DateTime>()
            .ok()?
            .to_zoned(TimeZone::UTC)
            .ok()
            .map(|zoned| zoned.timestamp())
    }

    /// Returns whether the record describes a directory rather than an object.
    pub fn is_directory(&self) -> bool {
        (self.entry.contains_key("subdir") && !self.entry.contains_key("name"))
            || self.content_type() == Some(DIRECTORY_CONTENT_TYPE)
    }

    /// Path of the object including its container, e.g. `photos/2024/cat.jpg`.
    pub fn path(&self) -> Option<String> {
        self.name()
            .map(|name| format!("{}/{}", self.container, name.trim_start_matches('/')))
    }

    /// Returns the underlying listing record.
    pub fn entry(&self) -> &FileEntry {
        &self.entry
    }

    /// Consumes the file and returns the underlying listing record.
    pub fn into_entry(self) -> FileEntry {
        self.entry
    }
}
