//! Onboarding flags.
//!
//! `hasSeenOnboarding` is durable, so the welcome tour runs once per
//! install. `hasLoadedInSession` only exists to skip the splash animation
//! on in-session navigation, so it is deliberately process-local and resets
//! on restart.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::kv::{load_or_default, save, KvStore, StoreError};

const ONBOARDING_KEY: &str = "hasSeenOnboarding";

#[derive(Clone)]
pub struct FlagStore {
    kv: Arc<dyn KvStore>,
    session_loaded: Arc<AtomicBool>,
}

impl FlagStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv, session_loaded: Arc::new(AtomicBool::new(false)) }
    }

    pub async fn has_seen_onboarding(&self) -> Result<bool, StoreError> {
        load_or_default(self.kv.as_ref(), ONBOARDING_KEY).await
    }

    pub async fn mark_onboarding_seen(&self) -> Result<(), StoreError> {
        save(self.kv.as_ref(), ONBOARDING_KEY, &true).await
    }

    /// True once per process: the first call returns false and arms the
    /// flag, every later call returns true.
    pub fn check_and_mark_session_loaded(&self) -> bool {
        self.session_loaded.swap(true, Ordering::SeqCst)
    }

    pub fn has_loaded_in_session(&self) -> bool {
        self.session_loaded.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKvStore;

    #[tokio::test]
    async fn onboarding_flag_defaults_to_unseen_and_sticks() {
        let flags = FlagStore::new(Arc::new(MemoryKvStore::new()));
        assert!(!flags.has_seen_onboarding().await.expect("read"));

        flags.mark_onboarding_seen().await.expect("mark");
        assert!(flags.has_seen_onboarding().await.expect("read"));
    }

    #[tokio::test]
    async fn session_flag_arms_on_first_check_only() {
        let flags = FlagStore::new(Arc::new(MemoryKvStore::new()));
        assert!(!flags.check_and_mark_session_loaded());
        assert!(flags.check_and_mark_session_loaded());
        assert!(flags.has_loaded_in_session());
    }

    #[tokio::test]
    async fn session_flag_does_not_touch_storage() {
        let kv = Arc::new(MemoryKvStore::new());
        let flags = FlagStore::new(kv.clone());
        flags.check_and_mark_session_loaded();
        assert_eq!(kv.get("hasLoadedInSession").await.expect("get"), None);
    }

    #[tokio::test]
    async fn clones_share_the_session_flag() {
        let flags = FlagStore::new(Arc::new(MemoryKvStore::new()));
        let twin = flags.clone();
        flags.check_and_mark_session_loaded();
        assert!(twin.has_loaded_in_session());
    }
}
