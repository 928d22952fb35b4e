use std::sync::Arc;

use bigbike_assistant::Assistant;
use bigbike_core::config::{AppConfig, ConfigError, LoadOptions};
use bigbike_core::Catalog;
use bigbike_store::{FileKvStore, KvStore, StoreError};
use thiserror::Error;
use tracing::info;

use crate::api::ApiState;

pub struct Application {
    pub config: AppConfig,
    pub kv: Arc<dyn KvStore>,
    pub state: ApiState,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("storage initialization failed: {0}")]
    Storage(#[from] StoreError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let file_store = FileKvStore::new(&config.storage.data_dir);
    file_store.ensure_dir().await?;
    let kv: Arc<dyn KvStore> = Arc::new(file_store);
    info!(
        event_name = "system.bootstrap.storage_ready",
        correlation_id = "bootstrap",
        data_dir = %config.storage.data_dir.display(),
        "storage directory ready"
    );

    let catalog = Catalog::builtin();
    let assistant = Assistant::new(catalog.clone(), &config.assistant.locale);
    let state = ApiState::new(catalog, assistant, kv.clone());
    state.restore().await?;

    info!(
        event_name = "system.bootstrap.complete",
        correlation_id = "bootstrap",
        bikes = state.catalog().len(),
        "application bootstrap complete"
    );

    Ok(Application { config, kv, state })
}

#[cfg(test)]
mod tests {
    use bigbike_core::config::{ConfigOverrides, LoadOptions};

    use super::bootstrap;

    fn options_for(dir: &std::path::Path) -> LoadOptions {
        LoadOptions {
            overrides: ConfigOverrides {
                data_dir: Some(dir.to_path_buf()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        }
    }

    #[tokio::test]
    async fn bootstrap_seeds_the_builtin_catalog() {
        let dir = tempfile::tempdir().expect("tempdir");
        let app = bootstrap(options_for(dir.path())).await.expect("bootstrap");

        assert_eq!(app.state.catalog().len(), 10);
        assert!(dir.path().is_dir());
    }

    #[tokio::test]
    async fn bootstrap_restores_persisted_viewing_history() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("viewedBikes.json"),
            "[\"yamaha-r1\",\"kawasaki-h2\"]",
        )
        .expect("seed history");

        let app = bootstrap(options_for(dir.path())).await.expect("bootstrap");
        let viewed = app.state.viewed().list().await.expect("list");
        assert_eq!(viewed.len(), 2);
    }
}
