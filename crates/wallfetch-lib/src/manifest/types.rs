use serde::{Deserialize, Serialize};

/// One record of the image archive feed.
///
/// Only `urlbase` drives downloads; everything else is carried through untouched.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MediaItem {
    pub urlbase: String,
    #[serde(default)]
    pub startdate: String,
    #[serde(default)]
    pub fullstartdate: String,
    #[serde(default)]
    pub enddate: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub copyright: String,
    #[serde(default)]
    pub copyrightlink: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub quiz: String,
    #[serde(default)]
    pub hsh: String,
}

impl MediaItem {
    pub fn with_base_path(urlbase: impl Into<String>) -> Self {
        Self {
            urlbase: urlbase.into(),
            startdate: String::new(),
            fullstartdate: String::new(),
            enddate: String::new(),
            url: String::new(),
            copyright: String::new(),
            copyrightlink: String::new(),
            title: String::new(),
            quiz: String::new(),
            hsh: String::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Tooltips {
    #[serde(default)]
    pub loading: String,
    #[serde(default)]
    pub previous: String,
    #[serde(default)]
    pub next: String,
    #[serde(default)]
    pub walle: String,
    #[serde(default)]
    pub walls: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Manifest {
    pub images: Vec<MediaItem>,
    #[serde(default)]
    pub tooltips: Option<Tooltips>,
}
