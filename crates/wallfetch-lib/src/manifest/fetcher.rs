use super::types::{Manifest, MediaItem};
use crate::error::WallfetchError;
use reqwest::Client;

/// Fetches one manifest source and returns its items in feed order.
pub async fn fetch_manifest(
    client: &Client,
    source: &str,
) -> Result<Vec<MediaItem>, WallfetchError> {
    let fetch_error = |source_err: reqwest::Error| WallfetchError::Fetch {
        url: source.to_string(),
        source: source_err,
    };

    let body = client
        .get(source)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(fetch_error)?
        .bytes()
        .await
        .map_err(fetch_error)?;

    parse_manifest(source, &body)
}

pub fn parse_manifest(source: &str, body: &[u8]) -> Result<Vec<MediaItem>, WallfetchError> {
    let manifest: Manifest = serde_json::from_slice(body).map_err(|e| WallfetchError::Parse {
        url: source.to_string(),
        source: e,
    })?;
    Ok(manifest.images)
}
