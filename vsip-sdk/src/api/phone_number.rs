use reqwest::Method;
use serde_json::{Value, json};

use super::http::{Client, Error};

/// `POST /trunks/{trunk_sid}/phone-numbers`
///
/// The phone number should be in E.164 format such as `+919876543210`.
pub async fn map(client: &Client, trunk_sid: &str, phone_number: &str) -> Result<Value, Error> {
    let path = format!("/trunks/{}/phone-numbers", trunk_sid);
    let body = json!({ "phone_number": phone_number });
    client.request_json(Method::POST, path.as_str(), Some(&body)).await
}

/// `GET /trunks/{trunk_sid}/phone-numbers`
pub async fn list(client: &Client, trunk_sid: &str) -> Result<Value, Error> {
    let path = format!("/trunks/{}/phone-numbers", trunk_sid);
    client.request_json(Method::GET, path.as_str(), None).await
}
