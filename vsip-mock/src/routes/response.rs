use serde::Serialize;
use serde_json::Value;

/// The `status` of all created resources.
pub const STATUS_ACTIVE: &'static str = "active";

#[derive(Serialize)]
pub struct PostTrunk {
    pub sid: String,
    pub trunk_name: String,
    pub nso_code: Value,
    pub domain_name: Value,
    pub status: &'static str,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize)]
pub struct PostPhoneNumber {
    pub sid: String,
    pub phone_number: String,
    pub trunk_sid: String,
    pub status: &'static str,
    pub created_at: String,
}

#[derive(Serialize)]
pub struct PostWhitelistedIp {
    pub sid: String,
    pub ip: String,
    pub mask: Value,
    pub trunk_sid: String,
    pub status: &'static str,
    pub created_at: String,
}

#[derive(Serialize)]
pub struct PostDestinationUri {
    pub sid: String,
    pub destinations: Vec<Value>,
    pub trunk_sid: String,
    pub status: &'static str,
    pub created_at: String,
}

#[derive(Serialize)]
pub struct PostSetting {
    pub sid: String,
    pub settings: Vec<Value>,
    pub trunk_sid: String,
    pub status: &'static str,
    pub created_at: String,
}
