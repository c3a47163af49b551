use eyre::Result;
use serde_json::json;
use std::collections::BTreeSet;
use std::path::Path;
use tempfile::TempDir;
use wallfetch_lib::config::{FetchConfig, ResolutionTag};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const IMAGE_PATH_PREFIX: &str = "/img/";

pub fn scenario_tags() -> Vec<ResolutionTag> {
    vec![
        ResolutionTag::new("standard", "_std.jpg"),
        ResolutionTag::new("high", "_hi.jpg"),
    ]
}

pub fn create_test_config(server: &MockServer, sources: &[&str], output_dir: &Path) -> FetchConfig {
    FetchConfig {
        sources: sources
            .iter()
            .map(|source| format!("{}{}", server.uri(), source))
            .collect(),
        origin: server.uri(),
        tags: scenario_tags(),
        id_prefix: "OHR.".to_string(),
        output_dir: output_dir.to_path_buf(),
        save_metadata: false,
    }
}

pub fn setup_test_environment() -> Result<TempDir> {
    Ok(tempfile::tempdir()?)
}

pub fn manifest_body(base_paths: &[&str]) -> String {
    let images: Vec<_> = base_paths
        .iter()
        .enumerate()
        .map(|(i, base)| {
            json!({
                "startdate": format!("202509{:02}", 10 + i),
                "urlbase": base,
                "title": format!("Image {i}"),
                "copyright": "Somebody",
            })
        })
        .collect();
    json!({ "images": images, "tooltips": { "loading": "Loading..." } }).to_string()
}

pub async fn mount_manifest(server: &MockServer, manifest_path: &str, base_paths: &[&str]) {
    Mock::given(method("GET"))
        .and(path(manifest_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(manifest_body(base_paths)))
        .mount(server)
        .await;
}

pub async fn mount_image(server: &MockServer, image_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(image_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Requests the server has seen for variant images so far.
pub async fn image_requests(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|request| request.url.path().to_string())
        .filter(|request_path| request_path.starts_with(IMAGE_PATH_PREFIX))
        .collect()
}

/// Names of the regular files directly under `dir`.
pub fn list_files(dir: &Path) -> Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("wallfetch_lib=debug,wallfetch_e2e_tests=debug")
        .with_test_writer()
        .try_init()
        .ok();
}
