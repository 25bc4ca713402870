// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firebase Authentication (Identity Toolkit v1) REST client.
//!
//! Handles:
//! - Email/password sign-in and sign-up
//! - Password reset emails
//! - Account lookup by ID token
//!
//! Provider error codes (`EMAIL_EXISTS`, `INVALID_LOGIN_CREDENTIALS`, ...)
//! are passed through verbatim as `AppError::Auth`.

use std::time::Duration;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::config::Config;
use crate::error::AppError;
use crate::models::ProfileInfo;

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Identity Toolkit REST client.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Successful sign-in or sign-up response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub id_token: String,
    pub local_id: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OobCodeRequest<'a> {
    request_type: &'static str,
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<ProfileInfo>,
}

/// `{"error": {"code": 400, "message": "EMAIL_EXISTS", ...}}`
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl IdentityClient {
    /// Create a client for the configured project.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: config.identity_base_url.trim_end_matches('/').to_string(),
            api_key: config.firebase_api_key.clone(),
        })
    }

    /// Verify an email/password pair.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignInResponse, AppError> {
        self.post(
            "signInWithPassword",
            &PasswordRequest {
                email,
                password,
                return_secure_token: true,
            },
        )
        .await
    }

    /// Create a new email/password account.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignInResponse, AppError> {
        self.post(
            "signUp",
            &PasswordRequest {
                email,
                password,
                return_secure_token: true,
            },
        )
        .await
    }

    /// Ask the provider to email a password reset link.
    pub async fn send_password_reset_email(&self, email: &str) -> Result<(), AppError> {
        let _: serde_json::Value = self
            .post(
                "sendOobCode",
                &OobCodeRequest {
                    request_type: "PASSWORD_RESET",
                    email,
                },
            )
            .await?;
        Ok(())
    }

    /// Look up the account an ID token belongs to.
    pub async fn get_account_info(&self, id_token: &str) -> Result<ProfileInfo, AppError> {
        let response: LookupResponse = self
            .post("lookup", &LookupRequest { id_token })
            .await?;

        response
            .users
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Auth("USER_NOT_FOUND".to_string()))
    }

    /// POST to `accounts:{method}` and decode the JSON reply.
    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let url = format!("{}/accounts:{}", self.base_url, method);

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(method, error = %e, "Identity provider request failed");
                AppError::Auth(format!("Identity provider unreachable: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = provider_error_message(&body)
                .unwrap_or_else(|| format!("HTTP {}: {}", status, body));
            tracing::info!(method, status = status.as_u16(), %message, "Identity provider rejected request");
            return Err(AppError::Auth(message));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("Unexpected identity provider response: {}", e)))
    }
}

/// Extract `error.message` from a provider error body.
fn provider_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_message() {
        let body = r#"{"error":{"code":400,"message":"EMAIL_EXISTS","errors":[{"message":"EMAIL_EXISTS","domain":"global","reason":"invalid"}]}}"#;
        assert_eq!(provider_error_message(body), Some("EMAIL_EXISTS".to_string()));
    }

    #[test]
    fn test_provider_error_message_not_json() {
        assert_eq!(provider_error_message("<html>bad gateway</html>"), None);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let mut config = Config::test_default();
        config.identity_base_url = "http://localhost:9099/identitytoolkit.googleapis.com/v1/".to_string();
        let client = IdentityClient::new(&config).unwrap();
        assert_eq!(
            client.base_url,
            "http://localhost:9099/identitytoolkit.googleapis.com/v1"
        );
    }

    #[test]
    fn test_sign_in_response_decodes() {
        let json = r#"{"kind":"identitytoolkit#VerifyPasswordResponse","localId":"uid-1","email":"a@example.com","idToken":"tok","registered":true,"refreshToken":"ref","expiresIn":"3600"}"#;
        let parsed: SignInResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.local_id, "uid-1");
        assert_eq!(parsed.id_token, "tok");
        assert_eq!(parsed.email, "a@example.com");
    }
}
