use crate::download::DownloadOutcome;
use std::ops::AddAssign;

/// Counters summed up the task tree as each fan-out level joins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub sources_fetched: usize,
    pub sources_failed: usize,
    pub items: usize,
    pub variants_downloaded: usize,
    pub variants_skipped: usize,
    pub variants_failed: usize,
    pub variants_unresolved: usize,
    pub bytes_downloaded: u64,
    pub tasks_panicked: usize,
    pub metadata_failed: bool,
}

impl RunReport {
    pub fn from_outcome(outcome: &DownloadOutcome) -> Self {
        match outcome {
            DownloadOutcome::Downloaded { bytes } => Self {
                variants_downloaded: 1,
                bytes_downloaded: *bytes,
                ..Self::default()
            },
            DownloadOutcome::Skipped => Self {
                variants_skipped: 1,
                ..Self::default()
            },
        }
    }

    pub fn variant_failed() -> Self {
        Self {
            variants_failed: 1,
            ..Self::default()
        }
    }

    /// Every variant that reached a terminal state, whatever the state.
    pub fn variants_finished(&self) -> usize {
        self.variants_downloaded + self.variants_skipped + self.variants_failed
    }

    pub fn has_failures(&self) -> bool {
        self.sources_failed > 0
            || self.variants_failed > 0
            || self.variants_unresolved > 0
            || self.tasks_panicked > 0
            || self.metadata_failed
    }
}

impl AddAssign for RunReport {
    fn add_assign(&mut self, other: Self) {
        self.sources_fetched += other.sources_fetched;
        self.sources_failed += other.sources_failed;
        self.items += other.items;
        self.variants_downloaded += other.variants_downloaded;
        self.variants_skipped += other.variants_skipped;
        self.variants_failed += other.variants_failed;
        self.variants_unresolved += other.variants_unresolved;
        self.bytes_downloaded += other.bytes_downloaded;
        self.tasks_panicked += other.tasks_panicked;
        self.metadata_failed |= other.metadata_failed;
    }
}
