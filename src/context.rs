use crate::api::{AuthService, LgpdService};
use crate::config::Config;
use crate::error::{Result, StorageError};
use crate::http::{ApiClient, Endpoints};
use crate::storage::{FileStorage, KeyValueStorage};
use crate::store::{AuthStore, LgpdStore, UiStore};
use std::sync::Arc;

/// Everything a session needs, wired once and passed down explicitly.
///
/// The HTTP client reads its bearer token from the [`AuthStore`] held here, so
/// a login through [`AppContext::auth_service`] authenticates every later
/// request made through the same context.
#[derive(Clone)]
pub struct AppContext {
    config: Arc<Config>,
    storage: Arc<dyn KeyValueStorage>,
    client: Arc<ApiClient>,
    auth: AuthStore,
    ui: UiStore,
    lgpd: LgpdStore,
}

impl AppContext {
    /// Validates `config` and persists state under `config.storage_dir`,
    /// creating the directory if needed.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let dir = config.storage_path();
        std::fs::create_dir_all(&dir).map_err(StorageError::from)?;
        let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::new(dir));
        Ok(Self::with_storage(config, storage))
    }

    pub fn with_storage(config: Config, storage: Arc<dyn KeyValueStorage>) -> Self {
        let auth = AuthStore::new(Arc::clone(&storage));
        let ui = UiStore::new(Arc::clone(&storage));
        let client =
            Arc::new(ApiClient::from_config(&config).with_token_source(Arc::new(auth.clone())));
        tracing::debug!(api_url = %client.base_url(), "application context ready");

        Self {
            config: Arc::new(config),
            storage,
            client,
            auth,
            ui,
            lgpd: LgpdStore::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage(&self) -> &Arc<dyn KeyValueStorage> {
        &self.storage
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    pub fn ui(&self) -> &UiStore {
        &self.ui
    }

    pub fn lgpd(&self) -> &LgpdStore {
        &self.lgpd
    }

    pub fn auth_service(&self) -> AuthService {
        AuthService::new(Arc::clone(&self.client), self.auth.clone())
    }

    pub fn lgpd_service(&self) -> LgpdService {
        LgpdService::new(Arc::clone(&self.client), self.lgpd.clone())
    }

    pub fn endpoints(&self) -> Endpoints<'_> {
        Endpoints::new(&self.client)
    }
}
