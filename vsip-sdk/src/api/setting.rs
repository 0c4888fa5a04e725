use reqwest::Method;
use serde_json::{Value, json};

use super::http::{Client, Error};

/// The setting name of the external caller ID of a trunk.
pub const TRUNK_EXTERNAL_ALIAS: &'static str = "trunk_external_alias";

/// `POST /trunks/{trunk_sid}/settings`
///
/// To set the exophone as the external alias of the trunk.
pub async fn set_alias(client: &Client, trunk_sid: &str, exophone: &str) -> Result<Value, Error> {
    let path = format!("/trunks/{}/settings", trunk_sid);
    let body = json!({
        "settings": [{ "name": TRUNK_EXTERNAL_ALIAS, "value": exophone }],
    });
    client.request_json(Method::POST, path.as_str(), Some(&body)).await
}
