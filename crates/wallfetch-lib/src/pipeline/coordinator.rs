use super::report::RunReport;
use crate::config::FetchConfig;
use crate::download::{DownloadOutcome, DownloadTask, fetch_and_store};
use crate::error::WallfetchError;
use crate::manifest::{MediaItem, fetch_manifest};
use crate::metadata::write_metadata_index;
use crate::variant::VariantResolver;
use futures::stream::{FuturesUnordered, StreamExt};
use reqwest::Client;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Fans out over manifest sources, their items and each item's variants.
///
/// Every level spawns its children as independent tokio tasks and joins all of them
/// before returning; a failed or panicking child never cancels its siblings.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<Inner>,
}

struct Inner {
    config: FetchConfig,
    client: Client,
    resolver: VariantResolver,
}

impl Coordinator {
    pub fn new(config: FetchConfig, client: Client) -> Self {
        let resolver = VariantResolver::from_config(&config);
        Self {
            inner: Arc::new(Inner {
                config,
                client,
                resolver,
            }),
        }
    }

    /// Runs the whole pipeline to completion.
    ///
    /// Only a failure to create the output directory is returned as an error; everything
    /// else is logged and counted in the [`RunReport`].
    pub async fn run(&self) -> Result<RunReport, WallfetchError> {
        let output_dir = self.inner.config.output_dir();
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|e| WallfetchError::OutputDirectoryCreation {
                path: output_dir.to_path_buf(),
                reason: e.to_string(),
            })?;
        info!(output = %output_dir.display(), "Output directory ready");

        info!(
            "Fetching {} manifest sources...",
            self.inner.config.sources.len()
        );
        let mut sources: FuturesUnordered<JoinHandle<(RunReport, Vec<MediaItem>)>> = self
            .inner
            .config
            .sources
            .iter()
            .map(|source| tokio::spawn(Arc::clone(&self.inner).run_source(source.clone())))
            .collect();

        let mut report = RunReport::default();
        let mut items = Vec::new();
        while let Some(joined) = sources.next().await {
            match joined {
                Ok((source_report, source_items)) => {
                    report += source_report;
                    items.extend(source_items);
                }
                Err(err) => {
                    warn!("Source task did not finish: {}", err);
                    report.tasks_panicked += 1;
                }
            }
        }

        if self.inner.config.save_metadata && !items.is_empty() {
            match write_metadata_index(output_dir, &items).await {
                Ok(paths) => info!("Updated {} metadata index files", paths.len()),
                Err(err) => {
                    warn!("Failed to update metadata index: {:#}", err);
                    report.metadata_failed = true;
                }
            }
        }

        Ok(report)
    }
}

impl Inner {
    async fn run_source(self: Arc<Self>, source: String) -> (RunReport, Vec<MediaItem>) {
        let items = match fetch_manifest(&self.client, &source).await {
            Ok(items) => items,
            Err(err) => {
                warn!(url = %source, "Manifest source failed: {}", err);
                let report = RunReport {
                    sources_failed: 1,
                    ..RunReport::default()
                };
                return (report, Vec::new());
            }
        };
        info!(url = %source, items = items.len(), "Fetched manifest");

        let tasks: FuturesUnordered<JoinHandle<RunReport>> = items
            .iter()
            .map(|item| tokio::spawn(Arc::clone(&self).run_item(item.clone())))
            .collect();

        let mut report = join_reports(tasks, "Item").await;
        report.sources_fetched += 1;
        report.items += items.len();
        (report, items)
    }

    async fn run_item(self: Arc<Self>, item: MediaItem) -> RunReport {
        let mut report = RunReport::default();
        let tasks: FuturesUnordered<JoinHandle<RunReport>> = FuturesUnordered::new();

        for resolved in self.resolver.resolve(&item) {
            match resolved {
                Ok(variant) => {
                    let task = DownloadTask::new(variant, self.config.output_dir());
                    tasks.push(tokio::spawn(Arc::clone(&self).run_variant(task)));
                }
                Err(err) => {
                    warn!(base = %item.urlbase, "Skipping variant: {}", err);
                    report.variants_unresolved += 1;
                }
            }
        }

        report += join_reports(tasks, "Variant").await;
        report
    }

    async fn run_variant(self: Arc<Self>, task: DownloadTask) -> RunReport {
        let DownloadTask {
            variant,
            destination,
        } = task;
        let begin = Instant::now();

        match fetch_and_store(&self.client, variant.url.as_str(), &destination).await {
            Ok(outcome) => {
                if let DownloadOutcome::Downloaded { bytes } = outcome {
                    info!(
                        tag = %variant.tag,
                        path = %destination.display(),
                        bytes,
                        elapsed = ?begin.elapsed(),
                        "Saved"
                    );
                }
                RunReport::from_outcome(&outcome)
            }
            Err(err) => {
                warn!(
                    tag = %variant.tag,
                    url = %variant.url,
                    path = %destination.display(),
                    "Variant download failed: {}",
                    err
                );
                RunReport::variant_failed()
            }
        }
    }
}

async fn join_reports(
    mut tasks: FuturesUnordered<JoinHandle<RunReport>>,
    level: &str,
) -> RunReport {
    let mut report = RunReport::default();
    while let Some(joined) = tasks.next().await {
        match joined {
            Ok(child) => report += child,
            Err(err) => {
                warn!("{} task did not finish: {}", level, err);
                report.tasks_panicked += 1;
            }
        }
    }
    report
}
