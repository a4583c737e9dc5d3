/*
[INPUT]:  Session kind, guest task count, dismissal flags
[OUTPUT]: Which guest banners to show and their dismissal
[POS]:    Presentation logic for guest prompts
[UPDATE]: When adding banners or changing visibility rules
*/

use anyhow::Result;

use crate::state::{LocalStore, keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    /// "You are using a guest session"
    Guest,
    /// "Create an account to keep your tasks"
    Conversion,
}

impl Banner {
    pub fn key(self) -> &'static str {
        match self {
            Banner::Guest => keys::GUEST_BANNER_DISMISSED,
            Banner::Conversion => keys::CONVERSION_BANNER_DISMISSED,
        }
    }

    pub fn message(self, task_count: usize) -> String {
        match self {
            Banner::Guest => {
                "You're using TaskSmart as a guest. Tasks are kept for this guest session only."
                    .to_string()
            }
            Banner::Conversion => format!(
                "You have {task_count} tasks. Register to keep them; they can move to your new account."
            ),
        }
    }

    pub async fn dismiss(self, store: &LocalStore) -> Result<()> {
        store.set_flag(self.key(), true).await
    }
}

/// Banners visible for the current session, in display order
pub async fn visible_banners(
    store: &LocalStore,
    is_guest: bool,
    guest_task_count: usize,
    conversion_threshold: usize,
) -> Vec<Banner> {
    if !is_guest {
        return Vec::new();
    }
    let mut banners = Vec::new();
    if !store.get_flag(Banner::Guest.key()).await {
        banners.push(Banner::Guest);
    }
    if guest_task_count >= conversion_threshold && !store.get_flag(Banner::Conversion.key()).await
    {
        banners.push(Banner::Conversion);
    }
    banners
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> (LocalStore, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!("tasksmart-banner-{}", uuid::Uuid::new_v4()));
        (LocalStore::open(&dir).await.unwrap(), dir)
    }

    #[tokio::test]
    async fn registered_users_see_no_banners() {
        let (store, dir) = store().await;
        assert!(visible_banners(&store, false, 10, 3).await.is_empty());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn conversion_banner_needs_threshold() {
        let (store, dir) = store().await;
        assert_eq!(visible_banners(&store, true, 2, 3).await, [Banner::Guest]);
        assert_eq!(
            visible_banners(&store, true, 3, 3).await,
            [Banner::Guest, Banner::Conversion]
        );
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn dismissed_banner_stays_hidden() {
        let (store, dir) = store().await;
        Banner::Guest.dismiss(&store).await.unwrap();
        assert_eq!(visible_banners(&store, true, 5, 3).await, [Banner::Conversion]);
        let _ = std::fs::remove_dir_all(dir);
    }
}
