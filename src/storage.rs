use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};
use tokio::fs;
use tracing::{debug, error};

/// String-keyed slots persisted as one JSON object, the way a browser keeps
/// `localStorage`. Values are opaque strings; each owning module decides
/// how to encode its own slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotStore {
    slots: BTreeMap<String, String>,
}

impl SlotStore {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.slots.insert(key.to_owned(), value.into());
    }

    /// Returns whether the slot existed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.slots.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

pub async fn load_data(path: &Path) -> SlotStore {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<SlotStore>(&bytes) {
            Ok(store) => {
                debug!(slots = store.len(), "loaded slot store from {}", path.display());
                store
            }
            Err(err) => {
                error!("failed to parse data file: {err}");
                SlotStore::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => SlotStore::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            SlotStore::default()
        }
    }
}

pub async fn persist_data(path: &Path, store: &SlotStore) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let payload = serde_json::to_vec_pretty(store)?;
    fs::write(path, payload).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, path::PathBuf};

    fn temp_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = env::temp_dir();
        path.push(format!("tech_catalog_{name}_{}_{nanos}", std::process::id()));
        path.push("state.json");
        path
    }

    #[test]
    fn slot_store_set_get_remove() {
        let mut store = SlotStore::default();
        assert!(store.is_empty());

        store.set("darkMode", "light");
        assert_eq!(store.get("darkMode"), Some("light"));

        store.set("darkMode", "dark");
        assert_eq!(store.get("darkMode"), Some("dark"));
        assert_eq!(store.len(), 1);

        assert!(store.remove("darkMode"));
        assert!(!store.remove("darkMode"));
        assert_eq!(store.get("darkMode"), None);
    }

    #[tokio::test]
    async fn missing_file_loads_empty_store() {
        let path = temp_path("missing");
        assert_eq!(load_data(&path).await, SlotStore::default());
    }

    #[tokio::test]
    async fn malformed_file_loads_empty_store() {
        let path = temp_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, b"{ not json").await.unwrap();

        assert_eq!(load_data(&path).await, SlotStore::default());
    }

    #[tokio::test]
    async fn persisted_store_reloads_identically() {
        let path = temp_path("roundtrip");
        let mut store = SlotStore::default();
        store.set("darkMode", "light");
        store.set("currentUser", r#"{"name":"Ada","email":"ada@tech.com"}"#);

        persist_data(&path, &store).await.unwrap();
        let loaded = load_data(&path).await;

        assert_eq!(loaded, store);
        let _ = fs::remove_dir_all(path.parent().unwrap()).await;
    }
}
