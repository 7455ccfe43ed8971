//! Identity Toolkit REST client.
//!
//! Every call is a `POST {base}/accounts:{method}?key={api_key}` with a JSON
//! body. Failures come back as `{"error": {"message": "EMAIL_EXISTS"}}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use edubuddy_types::IdentitySettings;

use crate::error::{AuthError, AuthErrorCode};
use crate::identity::{IdentityService, IdentityUser};

/// Configuration for the identity client.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// API base URL (e.g., "https://identitytoolkit.googleapis.com/v1")
    pub base_url: String,

    /// Web API key
    pub api_key: SecretString,

    /// Request timeout
    pub timeout: Duration,
}

impl IdentityConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: SecretString::from(api_key.into()),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn from_settings(settings: &IdentitySettings) -> Result<Self, AuthError> {
        let api_key = settings
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AuthError::Config(
                    "identity.api_key is not set (EDUBUDDY_IDENTITY__API_KEY)".to_string(),
                )
            })?;
        Ok(Self::new(settings.base_url.clone(), api_key))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    id_token: String,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateResponse {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Identity Toolkit client.
pub struct FirebaseIdentity {
    client: Client,
    config: IdentityConfig,
}

impl FirebaseIdentity {
    pub fn new(config: IdentityConfig) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AuthError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, method: &str) -> String {
        format!(
            "{}/accounts:{}",
            self.config.base_url.trim_end_matches('/'),
            method
        )
    }

    async fn call<R: DeserializeOwned>(&self, method: &str, body: Value) -> Result<R, AuthError> {
        debug!(method, "Calling identity service");

        let response = self
            .client
            .post(self.endpoint(method))
            .query(&[("key", self.config.api_key.expose_secret())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<ErrorEnvelope>(&text) {
                Ok(envelope) => {
                    let code = AuthErrorCode::parse(&envelope.error.message);
                    warn!(method, code = %code, "Identity request rejected");
                    AuthError::rejected(code, envelope.error.message)
                }
                Err(_) => AuthError::Decode(format!("HTTP {}: {}", status.as_u16(), text)),
            });
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::Decode(e.to_string()))
    }

    fn user_from_token(&self, response: TokenResponse, fallback_email: &str) -> IdentityUser {
        IdentityUser {
            uid: response.local_id,
            email: non_empty(response.email).unwrap_or_else(|| fallback_email.to_string()),
            display_name: non_empty(response.display_name),
            email_verified: false,
            id_token: SecretString::from(response.id_token),
        }
    }
}

#[async_trait]
impl IdentityService for FirebaseIdentity {
    async fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentityUser, AuthError> {
        let response: TokenResponse = self
            .call(
                "signUp",
                json!({"email": email, "password": password, "returnSecureToken": true}),
            )
            .await?;
        Ok(self.user_from_token(response, email))
    }

    async fn update_display_name(
        &self,
        user: &IdentityUser,
        display_name: &str,
    ) -> Result<IdentityUser, AuthError> {
        let response: UpdateResponse = self
            .call(
                "update",
                json!({
                    "idToken": user.id_token.expose_secret(),
                    "displayName": display_name,
                    "returnSecureToken": true,
                }),
            )
            .await?;

        let mut updated = user.clone();
        updated.display_name =
            non_empty(response.display_name).or_else(|| Some(display_name.to_string()));
        if let Some(token) = response.id_token {
            updated.id_token = SecretString::from(token);
        }
        Ok(updated)
    }

    async fn send_verification_email(&self, user: &IdentityUser) -> Result<(), AuthError> {
        let _: Value = self
            .call(
                "sendOobCode",
                json!({"requestType": "VERIFY_EMAIL", "idToken": user.id_token.expose_secret()}),
            )
            .await?;
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityUser, AuthError> {
        let response: TokenResponse = self
            .call(
                "signInWithPassword",
                json!({"email": email, "password": password, "returnSecureToken": true}),
            )
            .await?;
        Ok(self.user_from_token(response, email))
    }

    async fn lookup(&self, user: &IdentityUser) -> Result<IdentityUser, AuthError> {
        let response: LookupResponse = self
            .call("lookup", json!({"idToken": user.id_token.expose_secret()}))
            .await?;

        let found = response
            .users
            .into_iter()
            .find(|u| u.local_id == user.uid)
            .ok_or_else(|| AuthError::rejected(AuthErrorCode::UserNotFound, "USER_NOT_FOUND"))?;

        Ok(IdentityUser {
            uid: found.local_id,
            email: non_empty(found.email).unwrap_or_else(|| user.email.clone()),
            display_name: non_empty(found.display_name),
            email_verified: found.email_verified,
            id_token: user.id_token.clone(),
        })
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let _: Value = self
            .call(
                "sendOobCode",
                json!({"requestType": "PASSWORD_RESET", "email": email}),
            )
            .await?;
        Ok(())
    }
}
