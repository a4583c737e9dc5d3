/*
[INPUT]:  Persisted theme key and the current session kind
[OUTPUT]: Light/dark theme selection with persistence helpers
[POS]:    Presentation preference shared by the TUI and CLI
[UPDATE]: When adding themes
*/

use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::{LocalStore, keys};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Stored theme, falling back to the default on a missing or bad value
    pub async fn load(store: &LocalStore) -> Theme {
        match store.get_json::<Theme>(keys::THEME).await {
            Ok(theme) => theme.unwrap_or_default(),
            Err(err) => {
                warn!(error = %err, "ignoring unreadable theme");
                Theme::default()
            }
        }
    }

    /// Persist the theme; guests also get it in their preference snapshot.
    pub async fn save(self, store: &LocalStore, is_guest: bool) -> Result<()> {
        store.set_json(keys::THEME, &self).await?;
        if is_guest {
            store
                .update_guest_preferences(|prefs| prefs.theme = Some(self))
                .await?;
        }
        Ok(())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_between_variants() {
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Light.toggle().toggle(), Theme::Light);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        let parsed: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(parsed, Theme::Light);
    }

    #[tokio::test]
    async fn guest_save_updates_preferences() {
        let dir = std::env::temp_dir().join(format!("tasksmart-theme-{}", uuid::Uuid::new_v4()));
        let store = LocalStore::open(&dir).await.unwrap();

        Theme::Dark.save(&store, true).await.unwrap();
        assert_eq!(Theme::load(&store).await, Theme::Dark);
        assert_eq!(
            store.guest_preferences().await.unwrap().theme,
            Some(Theme::Dark)
        );

        Theme::Light.save(&store, false).await.unwrap();
        assert_eq!(Theme::load(&store).await, Theme::Light);
        assert_eq!(
            store.guest_preferences().await.unwrap().theme,
            Some(Theme::Dark)
        );

        let _ = std::fs::remove_dir_all(dir);
    }
}
