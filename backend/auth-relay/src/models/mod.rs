use serde::{Deserialize, Serialize};
use tribes_privy_shared::{LinkedAccount, PrivyUser};

/// POST /send-login-code and POST /create-user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailRequest {
    #[serde(default)]
    pub email: Option<String>,
}

/// POST /verify-code
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyCodeRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendLoginCodeResponse {
    pub message: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeResponse {
    pub message: String,
    pub user_id: String,
    pub user: PrivyUser,
    pub wallet: LinkedAccount,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateUserResponse {
    pub message: String,
    pub user: PrivyUser,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub message: String,
    pub privy_configured: bool,
    pub timestamp: String,
    pub environment: String,
}

/// Non-secret view of the running configuration
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugConfigResponse {
    pub environment: String,
    pub port: u16,
    pub privy_app_id_configured: bool,
    pub privy_app_secret_configured: bool,
    pub privy_api_url: String,
    pub wallet_chain_type: String,
}
