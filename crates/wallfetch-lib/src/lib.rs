pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod manifest;
pub mod metadata;
pub mod pipeline;
pub mod variant;

pub use crate::config::FetchConfig;
pub use error::WallfetchError;
pub use pipeline::{Coordinator, RunReport};
