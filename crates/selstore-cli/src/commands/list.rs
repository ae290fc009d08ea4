//! `selstore list`: prints one page of a container listing.

use anyhow::Context;
use selstore_core::{Container, ContainerRef, TransportService};
use serde_json::Value;

use crate::TRACING_TARGET_COMMAND;
use crate::config::ListingArgs;

/// Runs a listing and returns the collection as JSON.
///
/// Raw records are returned verbatim; with `--objects` each record is
/// reduced to the typed file attributes.
pub async fn list(args: &ListingArgs, transport: TransportService) -> anyhow::Result<Value> {
    let reference = match &args.container_path {
        Some(path) => ContainerRef::new(args.container.clone(), path.clone()),
        None => ContainerRef::named(args.container.clone()),
    };
    let container = Container::new(reference, transport);
    let builder = args.apply(container.files());

    tracing::debug!(
        target: TRACING_TARGET_COMMAND,
        query = ?builder.query(),
        "Running listing"
    );

    let output = if args.objects {
        let files = builder
            .as_file_objects()
            .get()
            .await
            .with_context(|| format!("failed to list container '{}'", args.container))?;

        files
            .iter()
            .map(|file| {
                serde_json::json!({
                    "name": file.name(),
                    "path": file.path(),
                    "size": file.size(),
                    "content_type": file.content_type(),
                    "hash": file.hash(),
                    "last_modified": file.last_modified(),
                    "directory": file.is_directory(),
                })
            })
            .collect::<Value>()
    } else {
        let files = builder
            .get()
            .await
            .with_context(|| format!("failed to list container '{}'", args.container))?;

        serde_json::to_value(&files).context("failed to encode listing")?
    };

    Ok(output)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use selstore_core::mock::MockTransport;
    use serde_json::json;

    use super::*;
    use crate::config::{Cli, Command};

    fn args(extra: &[&str]) -> ListingArgs {
        let mut argv = vec![
            "selstore",
            "--base-url",
            "https://api.selcdn.ru/v1/SEL_1",
            "list",
            "test",
        ];
        argv.extend_from_slice(extra);
        let Command::List(args) = Cli::try_parse_from(argv).unwrap().command;
        args
    }

    #[tokio::test]
    async fn test_list_raw_records() {
        let transport = MockTransport::default();
        let output = list(
            &args(&[
                "--directory",
                "/test",
                "--prefix",
                "/file-",
                "--delimiter",
                "test",
                "--limit",
                "10",
                "--marker",
                "last-previous-file.txt",
            ]),
            transport.clone().into_service(),
        )
        .await
        .unwrap();

        assert_eq!(output, json!([{ "name": "test1" }, { "name": "test2" }]));

        let request = transport.last_request().unwrap();
        assert_eq!(request.path, "/test");
        assert_eq!(request.query_param("limit"), Some("10"));
        assert_eq!(request.query_param("marker"), Some("test/last-previous-file.txt"));
        assert_eq!(request.query_param("path"), Some(""));
        assert_eq!(request.query_param("prefix"), Some("test/file-"));
        assert_eq!(request.query_param("delimiter"), Some("test"));
    }

    #[tokio::test]
    async fn test_list_objects() {
        let transport = MockTransport::with_json(&json!([
            { "name": "a.txt", "bytes": 3, "content_type": "text/plain" }
        ]));
        let output = list(&args(&["--objects"]), transport.into_service())
            .await
            .unwrap();

        assert_eq!(output[0]["path"], "test/a.txt");
        assert_eq!(output[0]["size"], 3);
        assert_eq!(output[0]["directory"], false);
    }

    #[tokio::test]
    async fn test_list_error_has_context() {
        let transport = MockTransport::failing(404);
        let error = list(&args(&[]), transport.into_service()).await.unwrap_err();
        assert!(format!("{error:#}").contains("failed to list container 'test'"));
    }
}
