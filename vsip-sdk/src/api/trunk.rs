use reqwest::Method;
use serde::Serialize;
use serde_json::{Value, json};

use super::http::{Client, Error};

#[derive(Serialize)]
struct DeleteQuery<'a> {
    trunk_sid: &'a str,
}

/// The default domain name of trunks of the account.
pub fn default_domain_name(account_sid: &str) -> String {
    format!("{}.pstn.exotel.com", account_sid)
}

/// `POST /trunks`
pub async fn create(
    client: &Client,
    trunk_name: &str,
    nso_code: &str,
    domain_name: &str,
) -> Result<Value, Error> {
    let body = json!({
        "trunk_name": trunk_name,
        "nso_code": nso_code,
        "domain_name": domain_name,
    });
    client.request_json(Method::POST, "/trunks", Some(&body)).await
}

/// `DELETE /trunks?trunk_sid={trunk_sid}`
pub async fn delete(client: &Client, trunk_sid: &str) -> Result<Value, Error> {
    let query = match serde_urlencoded::to_string(&DeleteQuery { trunk_sid }) {
        Err(e) => return Err(Error::Std(Box::new(e))),
        Ok(query) => query,
    };
    let path = format!("/trunks?{}", query);
    client.request_json(Method::DELETE, path.as_str(), None).await
}

/// `GET /trunks/{trunk_sid}/credentials`
pub async fn get_credentials(client: &Client, trunk_sid: &str) -> Result<Value, Error> {
    let path = format!("/trunks/{}/credentials", trunk_sid);
    client.request_json(Method::GET, path.as_str(), None).await
}
