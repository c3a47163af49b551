use crate::cli::FetchParams;
use crate::error::WallfetchError;
use crate::pipeline::{Coordinator, RunReport};
use reqwest::Client;

pub const USER_AGENT: &str = concat!("wallfetch/", env!("CARGO_PKG_VERSION"));

pub fn build_client() -> Result<Client, WallfetchError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(Into::into)
}

pub async fn run_fetch(params: FetchParams) -> Result<RunReport, WallfetchError> {
    let FetchParams { fetch_config } = params;

    tracing::info!("Output dir: {}", fetch_config.output_dir.display());
    let coordinator = Coordinator::new(fetch_config, build_client()?);
    let report = coordinator.run().await?;

    if report.has_failures() {
        tracing::warn!(
            downloaded = report.variants_downloaded,
            skipped = report.variants_skipped,
            failed = report.variants_failed,
            unresolved = report.variants_unresolved,
            failed_sources = report.sources_failed,
            "Finished with failures; missing files can be fetched by running again"
        );
    } else {
        tracing::info!(
            downloaded = report.variants_downloaded,
            skipped = report.variants_skipped,
            bytes = report.bytes_downloaded,
            "Finished"
        );
    }
    Ok(report)
}
