use std::{fmt, str::FromStr};

use reqwest::Method;
use serde_json::{Value, json};

use super::http::{Client, Error};

/// SIP transport of a destination.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transport {
    Udp,
    Tcp,
    Tls,
}

impl Transport {
    pub const UDP: &'static str = "udp";
    pub const TCP: &'static str = "tcp";
    pub const TLS: &'static str = "tls";

    pub fn as_str(&self) -> &'static str {
        match *self {
            Transport::Udp => Transport::UDP,
            Transport::Tcp => Transport::TCP,
            Transport::Tls => Transport::TLS,
        }
    }

    /// To format a destination. UDP is the default transport and has no parameter.
    ///
    /// - UDP: `ip:port`
    /// - TCP: `ip:port;transport=tcp`
    /// - TLS: `ip:port;transport=tls`
    pub fn destination(&self, ip: &str, port: u16) -> String {
        match *self {
            Transport::Udp => format!("{}:{}", ip, port),
            _ => format!("{}:{};transport={}", ip, port, self.as_str()),
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Transport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            Transport::UDP => Ok(Transport::Udp),
            Transport::TCP => Ok(Transport::Tcp),
            Transport::TLS => Ok(Transport::Tls),
            _ => Err(format!("unknown transport: {}", s)),
        }
    }
}

/// `POST /trunks/{trunk_sid}/destination-uris`
pub async fn add(
    client: &Client,
    trunk_sid: &str,
    ip: &str,
    port: u16,
    transport: Transport,
) -> Result<Value, Error> {
    let path = format!("/trunks/{}/destination-uris", trunk_sid);
    let body = json!({
        "destinations": [{ "destination": transport.destination(ip, port) }],
    });
    client.request_json(Method::POST, path.as_str(), Some(&body)).await
}

/// `GET /trunks/{trunk_sid}/destination-uris`
pub async fn list(client: &Client, trunk_sid: &str) -> Result<Value, Error> {
    let path = format!("/trunks/{}/destination-uris", trunk_sid);
    client.request_json(Method::GET, path.as_str(), None).await
}
