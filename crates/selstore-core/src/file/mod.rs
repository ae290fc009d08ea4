//! Listing records and typed file objects.

mod entry;
mod stored_file;

pub use entry::FileEntry;
pub use stored_file::{DIRECTORY_CONTENT_TYPE, StoredFile};
