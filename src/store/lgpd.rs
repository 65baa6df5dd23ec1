use super::Store;
use crate::models::{PersonalData, PersonalDataPatch, Template};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LgpdState {
    pub personal_data: Vec<PersonalData>,
    pub templates: Vec<Template>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Client-side mirror of the LGPD catalogue. Not persisted.
///
/// No uniqueness check is made on `id`; callers own referential integrity.
#[derive(Clone)]
pub struct LgpdStore {
    store: Store<LgpdState>,
}

impl Default for LgpdStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LgpdStore {
    pub fn new() -> Self {
        Self {
            store: Store::new(LgpdState::default()),
        }
    }

    pub fn state(&self) -> Arc<LgpdState> {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<u64> {
        self.store.subscribe()
    }

    pub fn set_personal_data(&self, data: Vec<PersonalData>) {
        self.store.update(|s| LgpdState {
            personal_data: data.clone(),
            ..s.clone()
        });
    }

    pub fn add_personal_data(&self, item: PersonalData) {
        self.store.update(|s| {
            let mut personal_data = s.personal_data.clone();
            personal_data.push(item.clone());
            LgpdState {
                personal_data,
                ..s.clone()
            }
        });
    }

    pub fn remove_personal_data(&self, id: &str) {
        self.store.update(|s| LgpdState {
            personal_data: s
                .personal_data
                .iter()
                .filter(|item| item.id != id)
                .cloned()
                .collect(),
            ..s.clone()
        });
    }

    pub fn update_personal_data(&self, id: &str, patch: &PersonalDataPatch) {
        self.store.update(|s| LgpdState {
            personal_data: s
                .personal_data
                .iter()
                .map(|item| {
                    if item.id == id {
                        item.patched(patch)
                    } else {
                        item.clone()
                    }
                })
                .collect(),
            ..s.clone()
        });
    }

    pub fn set_templates(&self, templates: Vec<Template>) {
        self.store.update(|s| LgpdState {
            templates: templates.clone(),
            ..s.clone()
        });
    }

    pub fn set_loading(&self, is_loading: bool) {
        self.store.update(|s| LgpdState {
            is_loading,
            ..s.clone()
        });
    }

    pub fn set_error(&self, error: Option<String>) {
        self.store.update(|s| LgpdState {
            error: error.clone(),
            ..s.clone()
        });
    }
}
