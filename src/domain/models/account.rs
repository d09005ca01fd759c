use serde::{Deserialize, Serialize};

/// Usage and subscription details for the API key in use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInformation {
    pub info: serde_json::Map<String, serde_json::Value>,
    pub minute: u64,
    pub hour: u64,
    pub today: u64,
    pub yesterday: u64,
    pub week: u64,
    pub month: u64,
    pub package: String,
    #[serde(rename = "subscriptionstart")]
    pub subscription_start: String,
    #[serde(rename = "subscriptionuntil")]
    pub subscription_end: String,
    #[serde(rename = "steamwebapistatus")]
    pub steamwebapi_status: serde_json::Value,
    #[serde(rename = "last100")]
    pub last_100: Vec<serde_json::Value>,
}
