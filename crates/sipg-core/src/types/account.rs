use serde::{Deserialize, Serialize};

/// API plan information from /api-info
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiInfo {
    /// Plan name
    #[serde(default)]
    pub plan: Option<String>,

    /// Available query credits
    #[serde(default)]
    pub query_credits: i64,

    /// Available scan credits
    #[serde(default)]
    pub scan_credits: i64,

    /// Number of IPs under network monitoring
    #[serde(default)]
    pub monitored_ips: Option<i64>,

    /// Monthly usage limits
    #[serde(default)]
    pub usage_limits: Option<UsageLimits>,

    /// Every other field returned by the API
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Monthly API usage limits
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageLimits {
    /// Query credit limit
    #[serde(default)]
    pub query_credits: Option<i64>,

    /// Scan credit limit
    #[serde(default)]
    pub scan_credits: Option<i64>,

    /// Monitored IPs limit
    #[serde(default)]
    pub monitored_ips: Option<i64>,
}
