//! Dashboard statistics endpoints under `/api/...`.
//!
//! These responses have no fixed schema on the server side yet, so they are
//! surfaced as untyped JSON.

use super::ApiClient;
use crate::error::ApiError;
use serde_json::Value;

pub struct Endpoints<'a> {
    client: &'a ApiClient,
}

impl<'a> Endpoints<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn queries_stats(&self) -> Result<Value, ApiError> {
        self.client.get("/api/queries/stats").await
    }

    pub async fn queries_distribution(&self) -> Result<Value, ApiError> {
        self.client.get("/api/queries/distribution").await
    }

    pub async fn queries_trends(&self) -> Result<Value, ApiError> {
        self.client.get("/api/queries/trends").await
    }

    pub async fn databases_connected(&self) -> Result<Value, ApiError> {
        self.client.get("/api/databases/connected").await
    }

    pub async fn databases_status(&self) -> Result<Value, ApiError> {
        self.client.get("/api/databases/status").await
    }

    pub async fn users_current(&self) -> Result<Value, ApiError> {
        self.client.get("/api/users/me").await
    }

    pub async fn users_all(&self) -> Result<Value, ApiError> {
        self.client.get("/api/users").await
    }
}
