mod fetcher;
mod types;

pub use fetcher::{fetch_manifest, parse_manifest};
pub use types::{Manifest, MediaItem, Tooltips};
