// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session/auth gateway: the identity provider plus the session store.
//!
//! Credential checks are always delegated to the provider. The only local
//! check is the sign-up password confirmation, which runs before any
//! network call.

use validator::{Validate, ValidationErrors};

use crate::error::AppError;
use crate::models::ProfileInfo;
use crate::services::identity::IdentityClient;
use crate::services::session::{Session, SessionStore};

#[derive(Validate)]
struct SignUpRequest {
    password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match."))]
    confirm_password: String,
}

/// Auth operations shared by all requests.
#[derive(Clone)]
pub struct AuthGateway {
    identity: IdentityClient,
    sessions: SessionStore,
}

impl AuthGateway {
    pub fn new(identity: IdentityClient, sessions: SessionStore) -> Self {
        Self { identity, sessions }
    }

    /// Verify credentials and open a session.
    ///
    /// Returns the new session id with the session. Nothing is stored unless
    /// the provider accepts the credentials.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(String, Session), AppError> {
        let response = self.identity.sign_in_with_password(email, password).await?;

        let session = Session {
            id_token: response.id_token,
            uid: response.local_id,
            email: if response.email.is_empty() {
                email.to_string()
            } else {
                response.email
            },
        };
        let session_id = self.sessions.insert(session.clone())?;

        tracing::info!(uid = %session.uid, "User signed in");
        Ok((session_id, session))
    }

    /// Create an account. Does not sign the user in.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), AppError> {
        SignUpRequest {
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        }
        .validate()
        .map_err(|errors| AppError::Validation(first_message(&errors)))?;

        let response = self.identity.sign_up(email, password).await?;
        tracing::info!(uid = %response.local_id, "Account created");
        Ok(())
    }

    /// Have the provider email a password reset link.
    pub async fn send_password_reset(&self, email: &str) -> Result<(), AppError> {
        self.identity.send_password_reset_email(email).await?;
        tracing::info!("Password reset email requested");
        Ok(())
    }

    /// Fetch the provider's account record for an ID token.
    pub async fn get_account_info(&self, id_token: &str) -> Result<ProfileInfo, AppError> {
        self.identity.get_account_info(id_token).await
    }

    /// Drop a session. Never contacts the provider.
    pub fn sign_out(&self, session_id: &str) {
        self.sessions.remove(session_id);
        tracing::info!("User signed out");
    }

    /// Resolve a session id to its live session, if any.
    pub fn session(&self, session_id: &str) -> Option<Session> {
        self.sessions.get(session_id)
    }
}

fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|msg| msg.to_string()))
        .unwrap_or_else(|| errors.to_string())
}
