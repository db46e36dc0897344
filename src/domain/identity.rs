// src/domain/identity.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub username: String,
    pub user_id: String,
    #[serde(default)]
    pub sign_in_details: Option<SignInDetails>,
}

/// How the session was established
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInDetails {
    #[serde(default)]
    pub login_id: Option<String>,
    #[serde(default)]
    pub auth_flow_type: Option<String>,
}
