/*
[INPUT]:  Data directory and JSON values keyed by string
[OUTPUT]: Durable local flags, preferences and the saved session
[POS]:    State layer - local key/value persistence
[UPDATE]: When adding persisted keys or changing the file format
*/

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tasksmart_client::SessionData;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::summary::TaskFilter;
use crate::theme::Theme;

const STATE_FILE: &str = "local_state.json";

/// Keys understood by the local store
pub mod keys {
    pub const GUEST_BANNER_DISMISSED: &str = "guestBannerDismissed";
    pub const CONVERSION_BANNER_DISMISSED: &str = "conversionBannerDismissed";
    pub const GUEST_PREFERENCES: &str = "guestPreferences";
    pub const THEME: &str = "theme";
    pub const SESSION: &str = "session";
    pub const PENDING_GUEST_TRANSFER: &str = "pendingGuestTransfer";

    /// Flags tied to a guest session; dropped once the guest registers.
    pub const GUEST_FLAGS: [&str; 3] = [
        GUEST_BANNER_DISMISSED,
        CONVERSION_BANNER_DISMISSED,
        GUEST_PREFERENCES,
    ];
}

/// Preferences captured while using a guest session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<TaskFilter>,
}

/// JSON-file backed key/value store
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, Value>>,
}

impl LocalStore {
    /// Open (or create) the store inside `data_dir`
    pub async fn open(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)
            .await
            .with_context(|| format!("create data dir {}", data_dir.display()))?;

        let path = data_dir.join(STATE_FILE);
        let entries = Self::load_entries(&path).await?;
        debug!(path = %path.display(), keys = entries.len(), "local store opened");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load_entries(path: &Path) -> Result<BTreeMap<String, Value>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path).await?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let entries = serde_json::from_str(&content)
            .with_context(|| format!("parse local state {}", path.display()))?;
        Ok(entries)
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.entries.lock().await.contains_key(key)
    }

    /// Typed read; `None` when the key is absent
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let entries = self.entries.lock().await;
        match entries.get(key) {
            Some(value) => {
                let parsed = serde_json::from_value(value.clone())
                    .with_context(|| format!("decode local key '{key}'"))?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value);
        self.save(&entries).await
    }

    /// Boolean flag; missing or non-boolean values read as `false`
    pub async fn get_flag(&self, key: &str) -> bool {
        self.entries
            .lock()
            .await
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub async fn set_flag(&self, key: &str, value: bool) -> Result<()> {
        self.set_json(key, &value).await
    }

    /// Returns whether the key was present
    pub async fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.lock().await;
        let existed = entries.remove(key).is_some();
        if existed {
            self.save(&entries).await?;
        }
        Ok(existed)
    }

    /// Drop several keys with a single write.
    ///
    /// Keys leave the in-memory view before the file is written, so they
    /// read as absent even if the write fails.
    pub async fn remove_many(&self, keys: &[&str]) -> Result<()> {
        let mut entries = self.entries.lock().await;
        let mut changed = false;
        for key in keys {
            changed |= entries.remove(*key).is_some();
        }
        if changed {
            self.save(&entries).await?;
        }
        Ok(())
    }

    pub async fn clear_guest_flags(&self) -> Result<()> {
        self.remove_many(&keys::GUEST_FLAGS).await
    }

    pub async fn guest_preferences(&self) -> Result<GuestPreferences> {
        Ok(self
            .get_json(keys::GUEST_PREFERENCES)
            .await?
            .unwrap_or_default())
    }

    pub async fn update_guest_preferences(
        &self,
        f: impl FnOnce(&mut GuestPreferences),
    ) -> Result<()> {
        let mut prefs = match self.guest_preferences().await {
            Ok(prefs) => prefs,
            Err(err) => {
                warn!(error = %err, "discarding unreadable guest preferences");
                GuestPreferences::default()
            }
        };
        f(&mut prefs);
        self.set_json(keys::GUEST_PREFERENCES, &prefs).await
    }

    /// Saved session, ignoring one that has already expired
    pub async fn load_session(&self) -> Result<Option<SessionData>> {
        let session: Option<SessionData> = self.get_json(keys::SESSION).await?;
        Ok(session.filter(|session| !session.is_expired()))
    }

    pub async fn save_session(&self, session: &SessionData) -> Result<()> {
        self.set_json(keys::SESSION, session).await
    }

    pub async fn clear_session(&self) -> Result<()> {
        self.remove(keys::SESSION).await.map(|_| ())
    }

    async fn save(&self, entries: &BTreeMap<String, Value>) -> Result<()> {
        let content = serde_json::to_string_pretty(entries)?;

        // Atomic write: write to temp file then rename
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, content).await?;
        fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}
