use crate::error::ApiError;
use crate::http::{ApiClient, encode_path_segment};
use crate::models::lgpd::StartAnalysisRequest;
use crate::models::{
    AnalysisConfig, AnalysisResult, AnalysisTicket, NewPersonalData, PersonalData,
    PersonalDataPatch, Template,
};
use crate::store::LgpdStore;
use serde_json::Value;
use std::sync::Arc;

const PERSONAL_DATA: &str = "/lgpd/personal-data";

fn personal_data_path(id: &str) -> String {
    format!("{PERSONAL_DATA}/{}", encode_path_segment(id))
}

#[derive(Clone)]
pub struct LgpdService {
    client: Arc<ApiClient>,
    store: LgpdStore,
}

impl LgpdService {
    pub fn new(client: Arc<ApiClient>, store: LgpdStore) -> Self {
        Self { client, store }
    }

    pub fn store(&self) -> &LgpdStore {
        &self.store
    }

    pub async fn get_all_personal_data(&self) -> Result<Vec<PersonalData>, ApiError> {
        let items: Vec<PersonalData> = self.client.get(PERSONAL_DATA).await?;
        self.store.set_personal_data(items.clone());
        Ok(items)
    }

    pub async fn get_personal_data_by_id(&self, id: &str) -> Result<PersonalData, ApiError> {
        self.client.get(&personal_data_path(id)).await
    }

    pub async fn create_personal_data(
        &self,
        data: &NewPersonalData,
    ) -> Result<PersonalData, ApiError> {
        let created: PersonalData = self.client.post(PERSONAL_DATA, data).await?;
        self.store.add_personal_data(created.clone());
        Ok(created)
    }

    /// Sends `patch` and applies the same patch to the local record.
    pub async fn update_personal_data(
        &self,
        id: &str,
        patch: &PersonalDataPatch,
    ) -> Result<PersonalData, ApiError> {
        let updated: PersonalData = self
            .client
            .put(&personal_data_path(id), patch)
            .await?;
        self.store.update_personal_data(id, patch);
        Ok(updated)
    }

    pub async fn delete_personal_data(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete::<Value>(&personal_data_path(id)).await?;
        self.store.remove_personal_data(id);
        Ok(())
    }

    pub async fn get_templates(&self) -> Result<Vec<Template>, ApiError> {
        let templates: Vec<Template> = self.client.get("/lgpd/templates").await?;
        self.store.set_templates(templates.clone());
        Ok(templates)
    }

    pub async fn start_analysis(&self, config: &AnalysisConfig) -> Result<AnalysisTicket, ApiError> {
        self.client
            .post("/lgpd/analysis", &StartAnalysisRequest { config })
            .await
    }

    pub async fn get_analysis_result(&self, analysis_id: &str) -> Result<AnalysisResult, ApiError> {
        self.client
            .get(&format!("/lgpd/analysis/{}", encode_path_segment(analysis_id)))
            .await
    }
}
