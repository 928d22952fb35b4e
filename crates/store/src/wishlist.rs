//! Saved-bikes collection under the `wishlist` key.

use std::sync::Arc;

use bigbike_core::BikeId;
use tokio::sync::Mutex;

use crate::kv::{load_or_default, save, KvStore, StoreError};

const KEY: &str = "wishlist";

/// Wishlist membership is toggled, not added/removed separately, so the
/// caller never has to know the current state first.
#[derive(Clone)]
pub struct WishlistStore {
    kv: Arc<dyn KvStore>,
    /// Serializes read-modify-write cycles; overlapping toggles must not
    /// overwrite each other's list.
    write_guard: Arc<Mutex<()>>,
}

impl WishlistStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv, write_guard: Arc::new(Mutex::new(())) }
    }

    /// Slugs in insertion order.
    pub async fn list(&self) -> Result<Vec<BikeId>, StoreError> {
        load_or_default(self.kv.as_ref(), KEY).await
    }

    pub async fn contains(&self, slug: &BikeId) -> Result<bool, StoreError> {
        Ok(self.list().await?.iter().any(|entry| entry == slug))
    }

    /// Returns `true` when the bike is on the wishlist after the toggle.
    pub async fn toggle(&self, slug: &BikeId) -> Result<bool, StoreError> {
        let _write = self.write_guard.lock().await;
        let mut entries = self.list().await?;
        let present = if let Some(index) = entries.iter().position(|entry| entry == slug) {
            entries.remove(index);
            false
        } else {
            entries.push(slug.clone());
            true
        };
        save(self.kv.as_ref(), KEY, &entries).await?;
        Ok(present)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKvStore;

    fn store() -> WishlistStore {
        WishlistStore::new(Arc::new(MemoryKvStore::new()))
    }

    #[tokio::test]
    async fn toggle_adds_then_removes() {
        let wishlist = store();
        let slug = BikeId("yamaha-r1".to_string());

        assert!(wishlist.toggle(&slug).await.expect("toggle on"));
        assert!(wishlist.contains(&slug).await.expect("contains"));

        assert!(!wishlist.toggle(&slug).await.expect("toggle off"));
        assert!(wishlist.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let wishlist = store();
        for slug in ["ducati-panigale-v4", "yamaha-r1", "kawasaki-h2"] {
            wishlist
                .toggle(&BikeId(slug.to_string()))
                .await
                .expect("toggle");
        }
        let listed: Vec<String> = wishlist
            .list()
            .await
            .expect("list")
            .into_iter()
            .map(|id| id.0)
            .collect();
        assert_eq!(listed, ["ducati-panigale-v4", "yamaha-r1", "kawasaki-h2"]);
    }

    #[tokio::test]
    async fn overlapping_toggles_all_land() {
        let wishlist = WishlistStore::new(Arc::new(crate::kv::testing::SlowReadKv::new()));
        let slugs = [
            "yamaha-r1",
            "yamaha-r15M",
            "kawasaki-zx10r",
            "kawasaki-ninja-400",
            "kawasaki-h2",
            "bmw-s1000rr",
            "honda-cbr650r",
            "honda-cbr1000rr",
            "ducati-panigale-v4",
            "ducati-panigale-v2",
        ];

        let mut tasks = Vec::new();
        for slug in slugs {
            let wishlist = wishlist.clone();
            tasks.push(tokio::spawn(async move {
                wishlist.toggle(&BikeId(slug.to_string())).await
            }));
        }
        for task in tasks {
            assert!(task.await.expect("join").expect("toggle"));
        }

        assert_eq!(wishlist.list().await.expect("list").len(), slugs.len());
    }

    #[tokio::test]
    async fn corrupt_wishlist_starts_over_empty() {
        let kv = Arc::new(MemoryKvStore::new());
        kv.put(KEY, "\"oops".to_string()).await.expect("seed");
        let wishlist = WishlistStore::new(kv);
        assert!(wishlist.list().await.expect("list").is_empty());
    }
}
