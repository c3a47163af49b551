use crate::config::{FetchConfig, ResolutionTag};
use crate::error::WallfetchError;
use crate::manifest::MediaItem;
use url::Url;

const ID_QUERY_PARAM: &str = "id";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantSpec {
    pub tag: String,
    pub url: Url,
    pub filename: String,
}

/// Derives the downloadable variants of a [`MediaItem`] without touching the network.
#[derive(Clone, Debug)]
pub struct VariantResolver {
    origin: String,
    tags: Vec<ResolutionTag>,
    id_prefix: String,
}

impl VariantResolver {
    pub fn new(
        origin: impl Into<String>,
        tags: Vec<ResolutionTag>,
        id_prefix: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            tags,
            id_prefix: id_prefix.into(),
        }
    }

    pub fn from_config(config: &FetchConfig) -> Self {
        Self::new(
            config.origin.clone(),
            config.tags.clone(),
            config.id_prefix.clone(),
        )
    }

    /// One result per configured tag, in tag order. A failure only affects its own variant.
    pub fn resolve(&self, item: &MediaItem) -> Vec<Result<VariantSpec, WallfetchError>> {
        self.tags
            .iter()
            .map(|tag| self.resolve_tag(item, tag))
            .collect()
    }

    fn resolve_tag(
        &self,
        item: &MediaItem,
        tag: &ResolutionTag,
    ) -> Result<VariantSpec, WallfetchError> {
        let raw = format!("{}{}{}", self.origin, item.urlbase, tag.suffix);
        let url = Url::parse(&raw).map_err(|e| WallfetchError::MalformedUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        let filename = filename_for(&url, &self.id_prefix)?;

        Ok(VariantSpec {
            tag: tag.name.clone(),
            url,
            filename,
        })
    }
}

/// The `id` query value minus `id_prefix`, falling back to the last path segment.
pub fn filename_for(url: &Url, id_prefix: &str) -> Result<String, WallfetchError> {
    let identifier = url
        .query_pairs()
        .find(|(key, _)| key == ID_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .or_else(|| {
            url.path_segments()
                .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
                .map(str::to_string)
        })
        .unwrap_or_default();

    let filename = identifier
        .strip_prefix(id_prefix)
        .unwrap_or(&identifier)
        .to_string();

    if filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(['/', '\\'])
    {
        return Err(WallfetchError::MalformedUrl {
            url: url.to_string(),
            reason: format!("cannot derive a file name from identifier {identifier:?}"),
        });
    }

    Ok(filename)
}
