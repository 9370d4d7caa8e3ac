//! Per-resource completion tracking.
//!
//! The progress record lives in a single slot of the [`SlotStore`]. Every
//! query decodes the slot afresh and every mutation writes it back, so the
//! slot is the only source of truth. Callers holding the store lock get an
//! atomic read-modify-write for free.

use crate::catalog::Platform;
use crate::storage::SlotStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

const PROGRESS_SLOT: &str = "ase_tech_progress";

/// Identifies one resource's completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionKey {
    pub platform_id: String,
    pub resource_title: String,
}

impl CompletionKey {
    pub fn new(platform_id: impl Into<String>, resource_title: impl Into<String>) -> Self {
        Self {
            platform_id: platform_id.into(),
            resource_title: resource_title.into(),
        }
    }

    /// Older records stored `"<platform>-<title>"`. Platform ids never contain
    /// a hyphen, so the first one is the separator.
    fn from_legacy(raw: &str) -> Option<Self> {
        let (platform_id, resource_title) = raw.split_once('-')?;
        if platform_id.is_empty() {
            return None;
        }
        Some(Self::new(platform_id, resource_title))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredProgress")]
pub struct ProgressRecord {
    pub completed_resources: BTreeSet<CompletionKey>,
}

impl ProgressRecord {
    pub fn contains(&self, key: &CompletionKey) -> bool {
        self.completed_resources.contains(key)
    }

    /// Flips membership of `key` and returns the new state.
    pub fn toggle(&mut self, key: CompletionKey) -> bool {
        if self.completed_resources.remove(&key) {
            false
        } else {
            self.completed_resources.insert(key);
            true
        }
    }

    pub fn completed_for(&self, platform_id: &str) -> usize {
        self.completed_resources
            .iter()
            .filter(|key| key.platform_id == platform_id)
            .count()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredProgress {
    #[serde(default)]
    completed_resources: Vec<StoredKey>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredKey {
    Structured(CompletionKey),
    Legacy(String),
}

impl From<StoredProgress> for ProgressRecord {
    fn from(stored: StoredProgress) -> Self {
        let completed_resources = stored
            .completed_resources
            .into_iter()
            .filter_map(|key| match key {
                StoredKey::Structured(key) => Some(key),
                StoredKey::Legacy(raw) => CompletionKey::from_legacy(&raw),
            })
            .collect();
        Self {
            completed_resources,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlatformProgress {
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
}

/// Reads the record. Absent and undecodable slots both yield the empty record.
pub fn load(store: &SlotStore) -> ProgressRecord {
    let Some(raw) = store.get(PROGRESS_SLOT) else {
        return ProgressRecord::default();
    };
    match serde_json::from_str(raw) {
        Ok(record) => record,
        Err(err) => {
            warn!("discarding malformed progress record: {err}");
            ProgressRecord::default()
        }
    }
}

pub fn save(store: &mut SlotStore, record: &ProgressRecord) -> Result<(), serde_json::Error> {
    let encoded = serde_json::to_string(record)?;
    store.set(PROGRESS_SLOT, encoded);
    Ok(())
}

pub fn is_completed(store: &SlotStore, platform_id: &str, resource_title: &str) -> bool {
    load(store).contains(&CompletionKey::new(platform_id, resource_title))
}

/// Returns whether the resource is complete after the toggle.
pub fn toggle_completion(
    store: &mut SlotStore,
    platform_id: &str,
    resource_title: &str,
) -> Result<bool, serde_json::Error> {
    let mut record = load(store);
    let completed = record.toggle(CompletionKey::new(platform_id, resource_title));
    save(store, &record)?;
    Ok(completed)
}

pub fn percent_complete(store: &SlotStore, platform_id: &str, total_resources: usize) -> u8 {
    percent_of(load(store).completed_for(platform_id), total_resources)
}

pub fn platform_progress(store: &SlotStore, platform: &Platform) -> PlatformProgress {
    let record = load(store);
    let total = platform.total_resources();
    let completed = platform
        .resources
        .iter()
        .filter(|resource| record.contains(&CompletionKey::new(platform.id, resource.title)))
        .count();
    PlatformProgress {
        completed,
        total,
        percent: percent_of(record.completed_for(platform.id), total),
    }
}

/// Round-half-up percentage, zero for an empty platform, capped at 100.
fn percent_of(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    ((200 * completed + total) / (2 * total)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_platform;
    use proptest::prelude::*;

    #[test]
    fn fresh_store_has_nothing_completed() {
        let store = SlotStore::default();
        assert_eq!(load(&store), ProgressRecord::default());
        assert!(!is_completed(&store, "react", "Understanding JSX"));
        assert_eq!(percent_complete(&store, "react", 4), 0);
        assert_eq!(percent_complete(&store, "mongodb", 4), 0);
    }

    #[test]
    fn one_of_four_react_resources_is_25_percent() {
        let mut store = SlotStore::default();
        assert!(toggle_completion(&mut store, "react", "Getting Started with React").unwrap());

        assert!(is_completed(&store, "react", "Getting Started with React"));
        assert_eq!(percent_complete(&store, "react", 4), 25);
        assert_eq!(percent_complete(&store, "python", 4), 0);
    }

    #[test]
    fn toggling_twice_restores_completed_set() {
        let mut store = SlotStore::default();
        toggle_completion(&mut store, "docker", "Docker Images").unwrap();
        let initial = load(&store);

        assert!(toggle_completion(&mut store, "react", "Understanding JSX").unwrap());
        assert!(!toggle_completion(&mut store, "react", "Understanding JSX").unwrap());

        assert_eq!(load(&store), initial);
    }

    #[test]
    fn zero_total_resources_is_zero_percent() {
        let mut store = SlotStore::default();
        toggle_completion(&mut store, "ghost", "Anything").unwrap();
        assert_eq!(percent_complete(&store, "ghost", 0), 0);
    }

    #[test]
    fn percent_rounds_half_up_and_caps_at_100() {
        assert_eq!(percent_of(1, 3), 33);
        assert_eq!(percent_of(2, 3), 67);
        assert_eq!(percent_of(1, 8), 13);
        assert_eq!(percent_of(1, 200), 1);
        assert_eq!(percent_of(5, 4), 100);
    }

    #[test]
    fn hyphenated_titles_do_not_collide_across_platforms() {
        let mut store = SlotStore::default();
        toggle_completion(&mut store, "react", "native-Basics").unwrap();

        assert!(!is_completed(&store, "react-native", "Basics"));
        assert_eq!(percent_complete(&store, "react-native", 1), 0);
        assert_eq!(percent_complete(&store, "react", 4), 25);
    }

    #[test]
    fn malformed_slot_reads_as_empty() {
        let mut store = SlotStore::default();
        store.set(PROGRESS_SLOT, "[not, a, record");
        assert_eq!(load(&store), ProgressRecord::default());

        store.set(PROGRESS_SLOT, "{}");
        assert_eq!(load(&store), ProgressRecord::default());
    }

    #[test]
    fn legacy_string_keys_are_decoded() {
        let mut store = SlotStore::default();
        store.set(
            PROGRESS_SLOT,
            r#"{"completedResources":["react-Getting Started with React","nodejs-Authentication & JWT","nohyphen"]}"#,
        );

        let record = load(&store);
        assert_eq!(record.completed_resources.len(), 2);
        assert!(is_completed(&store, "react", "Getting Started with React"));
        assert!(is_completed(&store, "nodejs", "Authentication & JWT"));
    }

    #[test]
    fn saved_record_uses_structured_keys() {
        let mut store = SlotStore::default();
        toggle_completion(&mut store, "python", "Control Flow").unwrap();

        let raw: serde_json::Value = serde_json::from_str(store.get(PROGRESS_SLOT).unwrap()).unwrap();
        assert_eq!(
            raw,
            serde_json::json!({
                "completedResources": [
                    { "platformId": "python", "resourceTitle": "Control Flow" }
                ]
            })
        );
    }

    #[test]
    fn platform_progress_counts_only_catalog_resources() {
        let platform = find_platform("python").unwrap();
        let mut store = SlotStore::default();
        toggle_completion(&mut store, "python", "Control Flow").unwrap();
        toggle_completion(&mut store, "python", "Data Structures").unwrap();
        toggle_completion(&mut store, "python", "Removed Lesson").unwrap();

        let progress = platform_progress(&store, platform);
        assert_eq!(progress.completed, 2);
        assert_eq!(progress.total, 4);
        assert_eq!(progress.percent, 75);
    }

    proptest! {
        #[test]
        fn prop_toggle_is_its_own_inverse(
            platform_id in "[a-z]{1,8}",
            title in "[A-Za-z &-]{1,24}",
            seeded in proptest::collection::vec(("[a-z]{1,8}", "[A-Za-z ]{1,12}"), 0..6),
        ) {
            let mut store = SlotStore::default();
            for (seed_platform, seed_title) in &seeded {
                toggle_completion(&mut store, seed_platform, seed_title).unwrap();
            }
            let before = load(&store);
            let was_completed = is_completed(&store, &platform_id, &title);

            toggle_completion(&mut store, &platform_id, &title).unwrap();
            prop_assert_ne!(is_completed(&store, &platform_id, &title), was_completed);
            toggle_completion(&mut store, &platform_id, &title).unwrap();

            prop_assert_eq!(is_completed(&store, &platform_id, &title), was_completed);
            prop_assert_eq!(load(&store), before);
        }

        #[test]
        fn prop_percent_matches_rounded_ratio(total in 1usize..40, marked in 0usize..40) {
            let completed = marked.min(total);
            let mut store = SlotStore::default();
            for index in 0..completed {
                toggle_completion(&mut store, "p", &format!("Resource {index}")).unwrap();
            }

            let expected = (100.0 * completed as f64 / total as f64 + 0.5).floor() as u8;
            prop_assert_eq!(percent_complete(&store, "p", total), expected);
            if completed == 0 {
                prop_assert_eq!(percent_complete(&store, "p", total), 0);
            }
        }

        #[test]
        fn prop_saved_record_reloads_as_same_set(
            keys in proptest::collection::btree_set(("[a-z]{1,6}", "[A-Za-z -]{1,16}"), 0..10),
        ) {
            let record = ProgressRecord {
                completed_resources: keys
                    .iter()
                    .map(|(platform_id, title)| CompletionKey::new(platform_id.as_str(), title.as_str()))
                    .collect(),
            };
            let mut store = SlotStore::default();
            save(&mut store, &record).unwrap();
            prop_assert_eq!(load(&store), record);
        }
    }
}
