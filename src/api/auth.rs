use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::auth::{ForgotPasswordRequest, ResetPasswordRequest};
use crate::models::{
    LoginCredentials, LoginResponse, MessageResponse, RegisterData, TokenValidation,
};
use crate::store::AuthStore;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthService {
    client: Arc<ApiClient>,
    store: AuthStore,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>, store: AuthStore) -> Self {
        Self { client, store }
    }

    pub fn store(&self) -> &AuthStore {
        &self.store
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, ApiError> {
        let response: LoginResponse = self.client.post("/auth/login", credentials).await?;
        self.store.login(response.user.clone(), response.token.clone());
        tracing::info!(user = %response.user.email, "logged in");
        Ok(response)
    }

    /// Ends the session remotely. The local session is cleared whether or not
    /// the remote call succeeds; the remote error, if any, is still returned.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.client.post_empty::<Value>("/auth/logout").await;
        self.store.logout();
        match result {
            Ok(_) => {
                tracing::info!("logged out");
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Remote logout failed, local session cleared anyway: {e}");
                Err(e)
            }
        }
    }

    pub async fn register(&self, data: &RegisterData) -> Result<MessageResponse, ApiError> {
        self.client.post("/auth/register", data).await
    }

    /// `true` only when the server confirms the token. Any failure (transport,
    /// non-2xx, undecodable body) or `valid: false` logs the session out and
    /// yields `false` instead of an error.
    pub async fn validate_token(&self) -> bool {
        match self
            .client
            .get::<TokenValidation>("/auth/validate-token")
            .await
        {
            Ok(TokenValidation { valid: true }) => true,
            Ok(TokenValidation { valid: false }) => {
                tracing::info!("token rejected by server; logging out");
                self.store.logout();
                false
            }
            Err(e) => {
                tracing::warn!("Token validation failed, logging out: {e}");
                self.store.logout();
                false
            }
        }
    }

    pub async fn forgot_password(&self, email: &str) -> Result<MessageResponse, ApiError> {
        self.client
            .post("/auth/forgot-password", &ForgotPasswordRequest { email })
            .await
    }

    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<MessageResponse, ApiError> {
        self.client
            .post(
                "/auth/reset-password",
                &ResetPasswordRequest {
                    token,
                    new_password,
                },
            )
            .await
    }
}
