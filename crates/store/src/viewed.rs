//! Viewing history under the `viewedBikes` key.
//!
//! Recording is set-semantic: a bike enters the list once, on first view,
//! and keeps its first-view position. Every accepted view publishes the new
//! list on a watch channel so the achievement tracker reacts to changes
//! rather than polling.

use std::sync::Arc;

use bigbike_core::BikeId;
use serde::Serialize;
use tokio::sync::{watch, Mutex};

use crate::kv::{load_or_default, save, KvStore, StoreError};

const KEY: &str = "viewedBikes";

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewedChanged {
    pub new_viewed_list: Vec<BikeId>,
}

#[derive(Clone)]
pub struct ViewedStore {
    kv: Arc<dyn KvStore>,
    changes: watch::Sender<ViewedChanged>,
    /// Serializes read-modify-write cycles so no accepted view is lost.
    write_guard: Arc<Mutex<()>>,
}

impl ViewedStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        let (changes, _) = watch::channel(ViewedChanged::default());
        Self { kv, changes, write_guard: Arc::new(Mutex::new(())) }
    }

    /// Restores the channel's current value from storage. Call once at
    /// startup so subscribers see persisted history, not an empty list.
    pub async fn hydrate(&self) -> Result<(), StoreError> {
        let list = self.list().await?;
        self.changes.send_replace(ViewedChanged { new_viewed_list: list });
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<BikeId>, StoreError> {
        load_or_default(self.kv.as_ref(), KEY).await
    }

    /// Returns `true` when this was a first view. Repeat views do not
    /// rewrite storage and do not publish a change.
    pub async fn record(&self, slug: &BikeId) -> Result<bool, StoreError> {
        let _write = self.write_guard.lock().await;
        let mut entries = self.list().await?;
        if entries.iter().any(|entry| entry == slug) {
            return Ok(false);
        }
        entries.push(slug.clone());
        save(self.kv.as_ref(), KEY, &entries).await?;
        self.changes.send_replace(ViewedChanged { new_viewed_list: entries });
        Ok(true)
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewedChanged> {
        self.changes.subscribe()
    }
}
