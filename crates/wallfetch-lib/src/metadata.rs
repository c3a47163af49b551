use crate::error::WallfetchError;
use crate::manifest::MediaItem;
use itertools::Itertools;
use std::path::{Path, PathBuf};

pub const METADATA_DIR: &str = "metadata";
const UNKNOWN_YEAR: &str = "unknown";

/// Year bucket of an item, taken from the leading digits of `startdate`.
pub fn year_of(item: &MediaItem) -> &str {
    match item.startdate.get(..4) {
        Some(year) if year.bytes().all(|b| b.is_ascii_digit()) => year,
        _ => UNKNOWN_YEAR,
    }
}

/// Merges `items` into `<output_dir>/metadata/<year>.json`, one file per year.
///
/// Entries are keyed by (`startdate`, `urlbase`); newer records replace older ones.
/// Returns the files that were written.
pub async fn write_metadata_index(
    output_dir: &Path,
    items: &[MediaItem],
) -> Result<Vec<PathBuf>, WallfetchError> {
    let metadata_dir = output_dir.join(METADATA_DIR);
    tokio::fs::create_dir_all(&metadata_dir)
        .await
        .map_err(|e| WallfetchError::Write {
            path: metadata_dir.clone(),
            source: e,
        })?;

    let by_year = items
        .iter()
        .cloned()
        .into_group_map_by(|item| year_of(item).to_string());

    let mut written = Vec::with_capacity(by_year.len());
    for (year, fresh) in by_year.into_iter().sorted_by(|a, b| a.0.cmp(&b.0)) {
        let path = metadata_dir.join(format!("{year}.json"));
        let existing = read_index(&path).await?;
        let merged = merge_entries(existing, fresh);

        let json = serde_json::to_vec_pretty(&merged)?;
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(|e| WallfetchError::Write {
                path: tmp_path.clone(),
                source: e,
            })?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| WallfetchError::Write {
                path: path.clone(),
                source: e,
            })?;

        tracing::debug!(path = %path.display(), entries = merged.len(), "Wrote metadata index");
        written.push(path);
    }

    Ok(written)
}

async fn read_index(path: &Path) -> Result<Vec<MediaItem>, WallfetchError> {
    match tokio::fs::read(path).await {
        Ok(content) => serde_json::from_slice(&content).map_err(|e| WallfetchError::Parse {
            url: path.display().to_string(),
            source: e,
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(WallfetchError::Io(e)),
    }
}

fn merge_entries(existing: Vec<MediaItem>, fresh: Vec<MediaItem>) -> Vec<MediaItem> {
    fresh
        .into_iter()
        .chain(existing)
        .unique_by(|item| (item.startdate.clone(), item.urlbase.clone()))
        .sorted_by(|a, b| {
            b.startdate
                .cmp(&a.startdate)
                .then_with(|| a.urlbase.cmp(&b.urlbase))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(startdate: &str, urlbase: &str, title: &str) -> MediaItem {
        MediaItem {
            startdate: startdate.to_string(),
            title: title.to_string(),
            ..MediaItem::with_base_path(urlbase)
        }
    }

    #[test]
    fn test_year_of() {
        assert_eq!(year_of(&item("20250910", "/a", "")), "2025");
        assert_eq!(year_of(&item("", "/a", "")), "unknown");
        assert_eq!(year_of(&item("yesterday", "/a", "")), "unknown");
    }

    #[test]
    fn test_merge_prefers_fresh_and_sorts_newest_first() {
        let existing = vec![item("20250101", "/a", "old"), item("20250301", "/c", "kept")];
        let fresh = vec![item("20250101", "/a", "new"), item("20250201", "/b", "added")];

        let merged = merge_entries(existing, fresh);

        let dates: Vec<&str> = merged.iter().map(|i| i.startdate.as_str()).collect();
        assert_eq!(dates, vec!["20250301", "20250201", "20250101"]);
        assert_eq!(merged[2].title, "new");
    }

    #[tokio::test]
    async fn test_write_metadata_index_groups_by_year_and_merges() {
        let temp_dir = tempfile::tempdir().unwrap();

        let first = vec![item("20241231", "/x", "x"), item("20250101", "/y", "y")];
        let written = write_metadata_index(temp_dir.path(), &first).await.unwrap();
        assert_eq!(
            written,
            vec![
                temp_dir.path().join("metadata/2024.json"),
                temp_dir.path().join("metadata/2025.json"),
            ]
        );

        let second = vec![item("20250102", "/z", "z")];
        write_metadata_index(temp_dir.path(), &second).await.unwrap();

        let content = std::fs::read(temp_dir.path().join("metadata/2025.json")).unwrap();
        let entries: Vec<MediaItem> = serde_json::from_slice(&content).unwrap();
        let bases: Vec<&str> = entries.iter().map(|i| i.urlbase.as_str()).collect();
        assert_eq!(bases, vec!["/z", "/y"]);
    }

    #[tokio::test]
    async fn test_corrupt_index_is_reported() {
        let temp_dir = tempfile::tempdir().unwrap();
        let metadata_dir = temp_dir.path().join(METADATA_DIR);
        std::fs::create_dir_all(&metadata_dir).unwrap();
        std::fs::write(metadata_dir.join("2025.json"), b"not json").unwrap();

        let result = write_metadata_index(temp_dir.path(), &[item("20250101", "/a", "a")]).await;

        assert!(matches!(result, Err(WallfetchError::Parse { .. })));
    }
}
