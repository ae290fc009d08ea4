//! Containers and their identity.

use hipstr::HipStr;
use serde::{Deserialize, Serialize};

use crate::file::FileEntry;
use crate::listing::ListingQueryBuilder;
use crate::transport::TransportService;

/// Identity of a container: its name and the request path of its listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerRef {
    name: HipStr<'static>,
    path: HipStr<'static>,
}

impl ContainerRef {
    /// Creates a reference with an explicit request path.
    pub fn new(name: impl Into<HipStr<'static>>, path: impl Into<HipStr<'static>>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Creates a reference whose request path is `/{name}`.
    pub fn named(name: impl Into<HipStr<'static>>) -> Self {
        let name = name.into();
        let path = HipStr::from(format!("/{}", name.trim_start_matches('/')));
        Self { name, path }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Request path of the container listing.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// A container bound to a transport.
///
/// Each call to [`Container::files`] starts a fresh listing; builders are
/// not shared between listings.
#[derive(Debug, Clone)]
pub struct Container {
    reference: ContainerRef,
    transport: TransportService,
}

impl Container {
    pub fn new(reference: ContainerRef, transport: TransportService) -> Self {
        Self {
            reference,
            transport,
        }
    }

    /// Container name.
    pub fn name(&self) -> &str {
        self.reference.name()
    }

    pub fn reference(&self) -> &ContainerRef {
        &self.reference
    }

    /// Starts a listing of the files stored in this container.
    pub fn files(&self) -> ListingQueryBuilder<FileEntry> {
        ListingQueryBuilder::new(self.transport.clone(), self.reference.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;

    #[test]
    fn test_named_reference() {
        let reference = ContainerRef::named("photos");
        assert_eq!(reference.name(), "photos");
        assert_eq!(reference.path(), "/photos");
    }

    #[tokio::test]
    async fn test_files_lists_container() {
        let transport = MockTransport::default();
        let container = Container::new(ContainerRef::named("photos"), transport.clone().into_service());

        let files = container.files().with_prefix("2024/").get().await.unwrap();

        assert_eq!(files.len(), 2);
        let request = transport.last_request().unwrap();
        assert_eq!(request.path, "/photos");
        assert_eq!(request.query_param("prefix"), Some("2024/"));
    }
}
