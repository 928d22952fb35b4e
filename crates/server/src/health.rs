use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use bigbike_store::KvStore;
use chrono::Utc;
use serde::Serialize;

const PROBE_KEY: &str = "healthProbe";

#[derive(Clone)]
pub struct HealthState {
    kv: Arc<dyn KvStore>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub storage: HealthCheck,
    pub checked_at: String,
}

pub fn router(kv: Arc<dyn KvStore>) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { kv })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = storage_check(state.kv.as_ref()).await;
    let ready = storage.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "bigbike-server runtime initialized".to_string(),
        },
        storage,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

/// Round-trips a probe document so the check fails on read-only or missing
/// storage, not just on unreachable storage.
async fn storage_check(kv: &dyn KvStore) -> HealthCheck {
    let written = Utc::now().timestamp_millis().to_string();
    let probe = async {
        kv.put(PROBE_KEY, written.clone()).await?;
        kv.get(PROBE_KEY).await
    };
    match probe.await {
        Ok(Some(read)) if read == written => {
            HealthCheck { status: "ready", detail: "storage round-trip succeeded".to_string() }
        }
        Ok(_) => HealthCheck {
            status: "degraded",
            detail: "storage probe read back a stale value".to_string(),
        },
        Err(error) => {
            HealthCheck { status: "degraded", detail: format!("storage probe failed: {error}") }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{extract::State, http::StatusCode, Json};
    use bigbike_store::{KvStore, MemoryKvStore, StoreError};

    use super::{health, HealthState};

    struct BrokenKv;

    #[async_trait]
    impl KvStore for BrokenKv {
        async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }

        async fn put(&self, _key: &str, _value: String) -> Result<(), StoreError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }

        async fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    #[tokio::test]
    async fn health_returns_ready_when_storage_round_trips() {
        let state = HealthState { kv: Arc::new(MemoryKvStore::new()) };
        let (status, Json(payload)) = health(State(state)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "ready");
        assert_eq!(payload.storage.status, "ready");
        assert_eq!(payload.service.status, "ready");
    }

    #[tokio::test]
    async fn health_degrades_when_storage_rejects_writes() {
        let state = HealthState { kv: Arc::new(BrokenKv) };
        let (status, Json(payload)) = health(State(state)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(payload.status, "degraded");
        assert_eq!(payload.storage.status, "degraded");
        assert_eq!(payload.service.status, "ready");
    }
}
