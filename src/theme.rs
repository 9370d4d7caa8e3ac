use crate::storage::SlotStore;
use serde::{Deserialize, Serialize};

const THEME_SLOT: &str = "darkMode";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon shown on the toggle button.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☀️",
            Self::Dark => "🌙",
        }
    }
}

/// Anything other than `"light"` reads as dark.
pub fn current_theme(store: &SlotStore) -> ThemeMode {
    match store.get(THEME_SLOT) {
        Some("light") => ThemeMode::Light,
        _ => ThemeMode::Dark,
    }
}

pub fn toggle_theme(store: &mut SlotStore) -> ThemeMode {
    let next = current_theme(store).toggled();
    store.set(THEME_SLOT, next.as_str());
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_dark() {
        let mut store = SlotStore::default();
        assert_eq!(current_theme(&store), ThemeMode::Dark);
        store.set(THEME_SLOT, "sepia");
        assert_eq!(current_theme(&store), ThemeMode::Dark);
    }

    #[test]
    fn toggle_alternates_and_persists_raw_value() {
        let mut store = SlotStore::default();
        assert_eq!(toggle_theme(&mut store), ThemeMode::Light);
        assert_eq!(store.get(THEME_SLOT), Some("light"));
        assert_eq!(toggle_theme(&mut store), ThemeMode::Dark);
        assert_eq!(store.get(THEME_SLOT), Some("dark"));
    }
}
