use reqwest::Method;
use serde_json::{Value, json};

use super::http::{Client, Error};

/// The default network mask of a whitelisted IP.
pub const DEF_MASK: u8 = 32;

/// `POST /trunks/{trunk_sid}/whitelisted-ips`
pub async fn add(client: &Client, trunk_sid: &str, ip: &str, mask: u8) -> Result<Value, Error> {
    let path = format!("/trunks/{}/whitelisted-ips", trunk_sid);
    let body = json!({ "ip": ip, "mask": mask });
    client.request_json(Method::POST, path.as_str(), Some(&body)).await
}

/// `GET /trunks/{trunk_sid}/whitelisted-ips`
pub async fn list(client: &Client, trunk_sid: &str) -> Result<Value, Error> {
    let path = format!("/trunks/{}/whitelisted-ips", trunk_sid);
    client.request_json(Method::GET, path.as_str(), None).await
}
