//! Account details reported by the identity provider.

use serde::{Deserialize, Serialize};

/// Profile of the signed-in account, as returned by `accounts:lookup`.
///
/// Timestamps are kept as the provider sends them (epoch milliseconds as
/// strings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInfo {
    pub local_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_updated_at: Option<u64>,
    #[serde(default)]
    pub disabled: bool,
}
