//! Demo sign-in. There is no credential, no check and no expiry: a display
//! name is stored locally and an email is made up from it. Do not use this
//! to protect anything.

use crate::storage::SlotStore;
use serde::{Deserialize, Serialize};
use tracing::warn;

const USER_SLOT: &str = "currentUser";
const EMAIL_DOMAIN: &str = "tech.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

impl UserProfile {
    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

/// Lower-cases the name and swaps only its first space for a dot.
pub fn derive_email(name: &str) -> String {
    let local = name.to_lowercase().replacen(' ', ".", 1);
    format!("{local}@{EMAIL_DOMAIN}")
}

pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .collect::<String>()
        .to_uppercase()
}

/// An empty name means the prompt was dismissed; nothing is stored.
pub fn sign_in(store: &mut SlotStore, name: &str) -> Result<Option<UserProfile>, serde_json::Error> {
    if name.is_empty() {
        return Ok(None);
    }
    let profile = UserProfile {
        name: name.to_owned(),
        email: derive_email(name),
    };
    store.set(USER_SLOT, serde_json::to_string(&profile)?);
    Ok(Some(profile))
}

pub fn current_user(store: &SlotStore) -> Option<UserProfile> {
    let raw = store.get(USER_SLOT)?;
    match serde_json::from_str(raw) {
        Ok(profile) => Some(profile),
        Err(err) => {
            warn!("ignoring malformed user record: {err}");
            None
        }
    }
}

/// Returns whether someone was signed in.
pub fn sign_out(store: &mut SlotStore) -> bool {
    store.remove(USER_SLOT)
}
