use super::Store;
use crate::alert::AlertKind;
use crate::storage::{KeyValueStorage, load_state, save_state};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use strum::{Display, EnumString};

pub const UI_STORAGE_KEY: &str = "ui-storage";

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AlertId(pub u64);

impl std::fmt::Display for AlertId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    pub id: AlertId,
    pub kind: AlertKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    pub is_open: bool,
    pub title: String,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub theme: Theme,
    pub sidebar_collapsed: bool,
    pub alerts: Vec<AlertMessage>,
    pub modal: ModalState,
}

/// The only part of [`UiState`] that survives a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedUi {
    theme: Theme,
    sidebar_collapsed: bool,
}

impl From<&UiState> for PersistedUi {
    fn from(state: &UiState) -> Self {
        Self {
            theme: state.theme,
            sidebar_collapsed: state.sidebar_collapsed,
        }
    }
}

/// Theme, sidebar, transient alerts and the modal.
///
/// Alert ids come from a per-store counter, so two alerts added in the same
/// instant still get distinct ids.
#[derive(Clone)]
pub struct UiStore {
    store: Store<UiState>,
    storage: Arc<dyn KeyValueStorage>,
    next_alert_id: Arc<AtomicU64>,
}

impl UiStore {
    /// Builds the store, rehydrating `theme` and `sidebar_collapsed` from `storage`.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        let mut initial = UiState::default();
        match load_state::<PersistedUi>(storage.as_ref(), UI_STORAGE_KEY) {
            Ok(Some(persisted)) => {
                initial.theme = persisted.theme;
                initial.sidebar_collapsed = persisted.sidebar_collapsed;
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to restore UI preferences: {e}"),
        }

        Self {
            store: Store::new(initial),
            storage,
            next_alert_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn state(&self) -> Arc<UiState> {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<u64> {
        self.store.subscribe()
    }

    fn apply<F>(&self, action: F)
    where
        F: Fn(&UiState) -> UiState,
    {
        self.store.update_then(action, |previous, committed| {
            let after = PersistedUi::from(committed);
            if PersistedUi::from(previous) != after
                && let Err(e) = save_state(self.storage.as_ref(), UI_STORAGE_KEY, &after)
            {
                tracing::warn!("Failed to persist UI preferences: {e}");
            }
        });
    }

    pub fn set_theme(&self, theme: Theme) {
        self.apply(|s| UiState {
            theme,
            ..s.clone()
        });
    }

    pub fn toggle_sidebar(&self) {
        self.apply(|s| UiState {
            sidebar_collapsed: !s.sidebar_collapsed,
            ..s.clone()
        });
    }

    pub fn set_sidebar_collapsed(&self, collapsed: bool) {
        self.apply(|s| UiState {
            sidebar_collapsed: collapsed,
            ..s.clone()
        });
    }

    pub fn add_alert(&self, kind: AlertKind, message: impl Into<String>) -> AlertId {
        let id = AlertId(self.next_alert_id.fetch_add(1, Ordering::Relaxed));
        let message = message.into();
        self.apply(|s| {
            let mut alerts = s.alerts.clone();
            alerts.push(AlertMessage {
                id,
                kind,
                message: message.clone(),
            });
            UiState {
                alerts,
                ..s.clone()
            }
        });
        id
    }

    pub fn remove_alert(&self, id: AlertId) {
        self.apply(|s| UiState {
            alerts: s.alerts.iter().filter(|a| a.id != id).cloned().collect(),
            ..s.clone()
        });
    }

    pub fn open_modal(&self, title: impl Into<String>, content: impl Into<String>) {
        let modal = ModalState {
            is_open: true,
            title: title.into(),
            content: Some(content.into()),
        };
        self.apply(|s| UiState {
            modal: modal.clone(),
            ..s.clone()
        });
    }

    pub fn close_modal(&self) {
        self.apply(|s| UiState {
            modal: ModalState::default(),
            ..s.clone()
        });
    }
}
