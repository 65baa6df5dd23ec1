#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};
use wiremock::MockServer;

use datawise::models::{User, UserRole};
use datawise::storage::MemoryStorage;
use datawise::{AppContext, Config};

/// A mock DataWise backend plus a context pointed at it.
pub struct ApiHarness {
    pub server: MockServer,
    pub storage: Arc<MemoryStorage>,
    pub ctx: AppContext,
}

impl ApiHarness {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let storage = Arc::new(MemoryStorage::new());
        let ctx = AppContext::with_storage(config_for(&server.uri()), storage.clone());
        Self {
            server,
            storage,
            ctx,
        }
    }

    /// A second context over the same storage, as after a restart.
    pub fn reopen(&self) -> AppContext {
        AppContext::with_storage(config_for(&self.server.uri()), self.storage.clone())
    }
}

pub fn config_for(api_url: &str) -> Config {
    Config {
        api_url: api_url.to_string(),
        ..Config::default()
    }
}

pub fn user_json() -> Value {
    json!({
        "id": "u-1",
        "email": "dpo@datawise.io",
        "name": "Marina Costa",
        "role": "admin",
        "created_at": "2024-03-01T12:00:00Z"
    })
}

pub fn sample_user() -> User {
    User {
        id: "u-1".into(),
        email: "dpo@datawise.io".into(),
        name: "Marina Costa".into(),
        role: UserRole::Admin,
        created_at: None,
        last_login: None,
    }
}

pub fn personal_data_json(id: &str, name: &str, sensitivity: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "category": "identificação",
        "source": "crm",
        "sensitivity": sensitivity
    })
}
