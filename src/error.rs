// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types and their user-visible rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::views::Notice;

/// Application error type.
///
/// Page handlers turn these into notices on the page the user is already
/// on. The `IntoResponse` impl covers failures that happen before a page
/// exists to show them on: it attaches a [`Notice`] to the response, and
/// `middleware::error_page` replaces the plain-text body with the HTML
/// error page.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Rejected locally, before any network call.
    #[error("{0}")]
    Validation(String),

    /// Rejected by the identity provider (message is the provider's own).
    #[error("{0}")]
    Auth(String),

    #[error("Database error: {0}")]
    Store(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message shown to the user for this error.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Auth(msg) => msg.clone(),
            AppError::Store(msg) => format!("Could not reach the to-do store: {}", msg),
            AppError::Template(_) | AppError::Internal(_) => "Something went wrong. Please try again.".to_string(),
        }
    }

    /// HTTP status used when the error escapes a page handler.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Store(_) => StatusCode::BAD_GATEWAY,
            AppError::Template(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Store(msg) => tracing::error!(error = %msg, "Database error"),
            AppError::Template(err) => tracing::error!(error = %err, "Template error"),
            AppError::Internal(err) => tracing::error!(error = %err, "Internal server error"),
            _ => {}
        }

        let notice = Notice::from(&self);
        let mut response = (self.status(), notice.message().to_string()).into_response();
        response.extensions_mut().insert(notice);
        response
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_message_is_verbatim() {
        let err = AppError::Auth("EMAIL_EXISTS".to_string());
        assert_eq!(err.user_message(), "EMAIL_EXISTS");
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internal_message_hides_details() {
        let err = AppError::Internal(anyhow::anyhow!("rng failure"));
        assert!(!err.user_message().contains("rng"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::Store("unavailable".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = AppError::Validation("Passwords do not match.".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_into_response_carries_notice() {
        let response = AppError::Internal(anyhow::anyhow!("token signing failed")).into_response();
        assert_eq!(
            response.extensions().get::<Notice>(),
            Some(&Notice::Error(
                "Something went wrong. Please try again.".to_string()
            ))
        );
    }
}
