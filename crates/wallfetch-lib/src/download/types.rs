use crate::variant::VariantSpec;
use std::path::PathBuf;

/// One variant bound to its place in the output directory.
#[derive(Clone, Debug)]
pub struct DownloadTask {
    pub variant: VariantSpec,
    pub destination: PathBuf,
}

impl DownloadTask {
    pub fn new(variant: VariantSpec, output_dir: &std::path::Path) -> Self {
        let destination = output_dir.join(&variant.filename);
        Self {
            variant,
            destination,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded { bytes: u64 },
    Skipped,
}
