mod downloader;
mod types;

pub use downloader::fetch_and_store;
pub use types::{DownloadOutcome, DownloadTask};
