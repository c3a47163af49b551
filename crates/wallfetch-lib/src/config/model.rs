use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ORIGIN: &str = "https://cn.bing.com";

/// The archive endpoint only serves a handful of days per request, so the feed
/// is split over two index ranges.
pub const DEFAULT_SOURCES: [&str; 2] = [
    "https://cn.bing.com/HPImageArchive.aspx?format=js&idx=0&n=7",
    "https://cn.bing.com/HPImageArchive.aspx?format=js&idx=8&n=8",
];

pub const DEFAULT_ID_PREFIX: &str = "OHR.";

pub const DEFAULT_OUTPUT_SUBDIR: &str = "BingImages";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResolutionTag {
    pub name: String,
    pub suffix: String,
}

impl ResolutionTag {
    pub fn new(name: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            suffix: suffix.into(),
        }
    }
}

pub fn default_tags() -> Vec<ResolutionTag> {
    vec![
        ResolutionTag::new("hd", "_1920x1080.jpg"),
        ResolutionTag::new("uhd", "_UHD.jpg"),
    ]
}

/// Everything a [`Coordinator`](crate::pipeline::Coordinator) run needs.
#[derive(Clone, Debug)]
pub struct FetchConfig {
    pub sources: Vec<String>,
    pub origin: String,
    pub tags: Vec<ResolutionTag>,
    pub id_prefix: String,
    pub output_dir: PathBuf,
    pub save_metadata: bool,
}

impl FetchConfig {
    /// Builds a config with the fixed feed endpoints and resolutions.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            origin: DEFAULT_ORIGIN.to_string(),
            tags: default_tags(),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            output_dir: output_dir.into(),
            save_metadata: false,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// Optional settings file. Feed endpoints and resolutions are not exposed here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub save_metadata: Option<bool>,
}

/// `<pictures>/BingImages`, or `./BingImages` when the platform has no pictures directory.
pub fn default_output_dir() -> PathBuf {
    dirs::picture_dir()
        .map(|pictures| pictures.join(DEFAULT_OUTPUT_SUBDIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_SUBDIR))
}
