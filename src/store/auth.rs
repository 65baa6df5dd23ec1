use super::Store;
use crate::http::TokenSource;
use crate::models::User;
use crate::storage::{KeyValueStorage, load_state, save_state};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const AUTH_STORAGE_KEY: &str = "auth-storage";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    user: Option<User>,
    token: Option<String>,
}

/// Session state. `user` and `token` are persisted on login and cleared on logout.
#[derive(Clone)]
pub struct AuthStore {
    store: Store<AuthState>,
    storage: Arc<dyn KeyValueStorage>,
}

impl AuthStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        let mut initial = AuthState::default();
        match load_state::<PersistedSession>(storage.as_ref(), AUTH_STORAGE_KEY) {
            Ok(Some(session)) => {
                initial.user = session.user;
                initial.token = session.token;
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to restore session: {e}"),
        }

        Self {
            store: Store::new(initial),
            storage,
        }
    }

    pub fn state(&self) -> Arc<AuthState> {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<u64> {
        self.store.subscribe()
    }

    pub fn login(&self, user: User, token: String) {
        self.store.update_then(
            |_| AuthState {
                user: Some(user.clone()),
                token: Some(token.clone()),
                is_loading: false,
                error: None,
            },
            |_, committed| self.persist(committed),
        );
    }

    pub fn logout(&self) {
        self.store
            .update_then(|_| AuthState::default(), |_, committed| self.persist(committed));
    }

    /// Writes the session in `state`, or clears it when there is no token.
    fn persist(&self, state: &AuthState) {
        let result = if state.token.is_some() {
            save_state(
                self.storage.as_ref(),
                AUTH_STORAGE_KEY,
                &PersistedSession {
                    user: state.user.clone(),
                    token: state.token.clone(),
                },
            )
        } else {
            self.storage.remove_item(AUTH_STORAGE_KEY)
        };
        if let Err(e) = result {
            tracing::warn!("Failed to persist session: {e}");
        }
    }

    pub fn set_loading(&self, is_loading: bool) {
        self.store.update(|s| AuthState {
            is_loading,
            ..s.clone()
        });
    }

    pub fn set_error(&self, error: Option<String>) {
        self.store.update(|s| AuthState {
            error: error.clone(),
            ..s.clone()
        });
    }
}

impl TokenSource for AuthStore {
    fn bearer_token(&self) -> Option<String> {
        self.store.snapshot().token.clone()
    }
}
