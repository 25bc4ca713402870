// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Which backend the to-do data access layer talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Cloud Firestore (or the emulator when `FIRESTORE_EMULATOR_HOST` is set)
    Firestore,
    /// Process-local store, lost on restart
    Memory,
}

impl std::str::FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(StoreKind::Firestore),
            "memory" => Ok(StoreKind::Memory),
            _ => Err(ConfigError::Invalid("TODO_STORE", s.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Firebase web API key (public, identifies the project to Identity Toolkit)
    pub firebase_api_key: String,
    /// Identity Toolkit base URL (overridden for the auth emulator)
    pub identity_base_url: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Public URL the app is served from; https enables Secure cookies
    pub app_url: String,
    /// Server port
    pub port: u16,
    /// To-do storage backend
    pub store: StoreKind,
    /// Session lifetime in seconds
    pub session_ttl_secs: u64,

    // --- Secrets ---
    /// JWT signing key for session cookies (raw bytes)
    pub session_signing_key: Vec<u8>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let identity_base_url = match env::var("FIREBASE_AUTH_EMULATOR_HOST") {
            Ok(host) => format!("http://{}/identitytoolkit.googleapis.com/v1", host.trim()),
            Err(_) => env::var("IDENTITY_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_IDENTITY_BASE_URL.to_string()),
        };

        Ok(Self {
            firebase_api_key: env::var("FIREBASE_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("FIREBASE_API_KEY"))?,
            identity_base_url,
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:8080".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            store: match env::var("TODO_STORE") {
                Ok(raw) => raw.parse()?,
                Err(_) => StoreKind::Firestore,
            },
            session_ttl_secs: env::var("SESSION_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),

            session_signing_key: env::var("SESSION_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("SESSION_SIGNING_KEY"))?
                .into_bytes(),
        })
    }

    /// Fixed configuration for tests.
    pub fn test_default() -> Self {
        Self {
            firebase_api_key: "test-api-key".to_string(),
            identity_base_url: "http://127.0.0.1:9099/identitytoolkit.googleapis.com/v1"
                .to_string(),
            gcp_project_id: "test-project".to_string(),
            app_url: "http://localhost:8080".to_string(),
            port: 8080,
            store: StoreKind::Memory,
            session_ttl_secs: 3600,
            session_signing_key: b"test_session_key_32_bytes_min!!".to_vec(),
        }
    }

    /// Whether cookies should carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.app_url.starts_with("https://")
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
