use super::types::DownloadOutcome;
use crate::error::WallfetchError;
use reqwest::Client;
use std::io::{ErrorKind, Write};
use std::path::Path;

pub const PART_SUFFIX: &str = ".part";

async fn is_regular_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|metadata| metadata.is_file())
        .unwrap_or(false)
}

/// Downloads `url` into `destination` unless a file is already there.
///
/// The body lands under its final name only once it is complete, and never over an
/// existing file, so two tasks racing for the same destination end with exactly one
/// writer and one [`DownloadOutcome::Skipped`].
pub async fn fetch_and_store(
    client: &Client,
    url: &str,
    destination: &Path,
) -> Result<DownloadOutcome, WallfetchError> {
    if is_regular_file(destination).await {
        tracing::debug!(path = %destination.display(), "Already exists, skipping");
        return Ok(DownloadOutcome::Skipped);
    }

    tracing::debug!(url = %url, path = %destination.display(), "Downloading");
    let fetch_error = |source: reqwest::Error| WallfetchError::Fetch {
        url: url.to_string(),
        source,
    };
    let body = client
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(fetch_error)?
        .bytes()
        .await
        .map_err(fetch_error)?;

    // Another task may have finished the same file while we were downloading.
    if is_regular_file(destination).await {
        tracing::debug!(path = %destination.display(), "Created concurrently, skipping write");
        return Ok(DownloadOutcome::Skipped);
    }

    let bytes = body.len() as u64;
    let target = destination.to_path_buf();
    let persisted = tokio::task::spawn_blocking(move || persist_body(&target, &body))
        .await
        .map_err(std::io::Error::other)
        .and_then(|result| result);

    match persisted {
        Ok(true) => Ok(DownloadOutcome::Downloaded { bytes }),
        Ok(false) => {
            if !is_regular_file(destination).await {
                return Err(WallfetchError::Write {
                    path: destination.to_path_buf(),
                    source: std::io::Error::new(
                        ErrorKind::AlreadyExists,
                        "destination is not a regular file",
                    ),
                });
            }
            tracing::debug!(path = %destination.display(), "Created concurrently, skipping write");
            Ok(DownloadOutcome::Skipped)
        }
        Err(e) => Err(WallfetchError::Write {
            path: destination.to_path_buf(),
            source: e,
        }),
    }
}

/// Writes `body` to a hidden `.part` file beside `destination`, then links it into place.
///
/// Returns `false` when something already occupies `destination`. An interrupted write
/// leaves at most a stray `.part` file, never a truncated file under the final name.
fn persist_body(destination: &Path, body: &[u8]) -> std::io::Result<bool> {
    let dir = destination
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut part = tempfile::Builder::new()
        .prefix(".")
        .suffix(PART_SUFFIX)
        .tempfile_in(dir)?;
    part.write_all(body)?;
    part.as_file().sync_all()?;

    match part.persist_noclobber(destination) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_downloads_missing_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/img/one_std.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg-bytes".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let temp_dir = tempfile::tempdir().unwrap();
        let destination = temp_dir.path().join("one_std.jpg");
        let url = format!("{}/img/one_std.jpg", server.uri());

        let outcome = fetch_and_store(&Client::new(), &url, &destination)
            .await
            .unwrap();

        assert_eq!(outcome, DownloadOutcome::Downloaded { bytes: 10 });
        assert_eq!(std::fs::read(&destination).unwrap(), b"jpeg-bytes");
    }

    #[tokio::test]
    async fn test_existing_file_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("new"))
            .expect(0)
            .mount(&server)
            .await;

        let temp_dir = tempfile::tempdir().unwrap();
        let destination = temp_dir.path().join("one_std.jpg");
        std::fs::write(&destination, b"old").unwrap();
        let url = format!("{}/img/one_std.jpg", server.uri());

        let outcome = fetch_and_store(&Client::new(), &url, &destination)
            .await
            .unwrap();

        assert_eq!(outcome, DownloadOutcome::Skipped);
        assert_eq!(std::fs::read(&destination).unwrap(), b"old");
    }

    #[tokio::test]
    async fn test_http_error_leaves_no_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let temp_dir = tempfile::tempdir().unwrap();
        let destination = temp_dir.path().join("missing.jpg");
        let url = format!("{}/img/missing.jpg", server.uri());

        let result = fetch_and_store(&Client::new(), &url, &destination).await;

        assert!(matches!(result, Err(WallfetchError::Fetch { .. })));
        assert!(!destination.exists());
    }

    #[tokio::test]
    async fn test_unwritable_destination_is_write_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("data"))
            .mount(&server)
            .await;

        let temp_dir = tempfile::tempdir().unwrap();
        let destination = temp_dir.path().join("no-such-dir").join("file.jpg");
        let url = format!("{}/img/file.jpg", server.uri());

        let result = fetch_and_store(&Client::new(), &url, &destination).await;

        assert!(matches!(result, Err(WallfetchError::Write { path, .. }) if path == destination));
    }

    #[tokio::test]
    async fn test_directory_at_destination_is_not_treated_as_existing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("data"))
            .expect(1)
            .mount(&server)
            .await;

        let temp_dir = tempfile::tempdir().unwrap();
        let destination = temp_dir.path().join("clash.jpg");
        std::fs::create_dir(&destination).unwrap();
        let url = format!("{}/img/clash.jpg", server.uri());

        let result = fetch_and_store(&Client::new(), &url, &destination).await;

        assert!(matches!(result, Err(WallfetchError::Write { .. })));
        assert!(destination.is_dir());
    }

    fn part_files(dir: &Path) -> Vec<String> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(PART_SUFFIX))
            .collect()
    }

    #[tokio::test]
    async fn test_successful_download_leaves_no_part_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("complete"))
            .mount(&server)
            .await;

        let temp_dir = tempfile::tempdir().unwrap();
        let destination = temp_dir.path().join("uhd.jpg");
        let url = format!("{}/img/uhd.jpg", server.uri());

        fetch_and_store(&Client::new(), &url, &destination)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&destination).unwrap(), b"complete");
        assert!(part_files(temp_dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_leftover_part_file_does_not_count_as_downloaded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("complete"))
            .expect(1)
            .mount(&server)
            .await;

        let temp_dir = tempfile::tempdir().unwrap();
        let destination = temp_dir.path().join("uhd.jpg");
        std::fs::write(temp_dir.path().join(".uhd.jpg.part"), b"trunc").unwrap();
        let url = format!("{}/img/uhd.jpg", server.uri());

        let outcome = fetch_and_store(&Client::new(), &url, &destination)
            .await
            .unwrap();

        assert_eq!(outcome, DownloadOutcome::Downloaded { bytes: 8 });
        assert_eq!(std::fs::read(&destination).unwrap(), b"complete");
    }

    #[test]
    fn test_persist_body_never_overwrites() {
        let temp_dir = tempfile::tempdir().unwrap();
        let destination = temp_dir.path().join("taken.jpg");
        std::fs::write(&destination, b"first").unwrap();

        let written = persist_body(&destination, b"second").unwrap();

        assert!(!written);
        assert_eq!(std::fs::read(&destination).unwrap(), b"first");
        assert!(part_files(temp_dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_identical_tasks_write_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("same"))
            .mount(&server)
            .await;

        let temp_dir = tempfile::tempdir().unwrap();
        let destination = temp_dir.path().join("dup.jpg");
        let url = format!("{}/img/dup.jpg", server.uri());
        let client = Client::new();

        let (a, b) = tokio::join!(
            fetch_and_store(&client, &url, &destination),
            fetch_and_store(&client, &url, &destination)
        );

        let outcomes = [a.unwrap(), b.unwrap()];
        let written = outcomes
            .iter()
            .filter(|o| matches!(o, DownloadOutcome::Downloaded { .. }))
            .count();
        assert_eq!(written, 1);
        assert!(outcomes.contains(&DownloadOutcome::Downloaded { bytes: 4 }));
        assert_eq!(std::fs::read(&destination).unwrap(), b"same");
        assert!(part_files(temp_dir.path()).is_empty());
    }
}
