//! Connection configurations of the provisioning API.

use std::{env, time::Duration};

use clap::{Arg, ArgMatches, Command, builder::RangedU64ValueParser};
use serde::Deserialize;

use vsip_sdk::api::http::ClientOptions;

/// Connection configuration object.
#[derive(Default, Deserialize)]
pub struct Config {
    /// API key.
    #[serde(rename = "authKey")]
    pub auth_key: Option<String>,
    /// API token.
    #[serde(rename = "authToken")]
    pub auth_token: Option<String>,
    /// API host (with optional port). For example `api.in.exotel.com`.
    pub domain: Option<String>,
    #[serde(rename = "accountSid")]
    pub account_sid: Option<String>,
    /// `https` or `http`.
    ///
    /// Default is `https`.
    pub scheme: Option<String>,
    /// Request timeout in seconds.
    ///
    /// Default is `30`.
    pub timeout: Option<u64>,
}

pub const DEF_SCHEME: &'static str = "https";
pub const DEF_TIMEOUT: u64 = 30;

/// To register Clap arguments. All arguments are global to sub-commands.
pub fn reg_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("exo.auth-key")
            .long("exo.auth-key")
            .help("API key")
            .num_args(1)
            .global(true),
    )
    .arg(
        Arg::new("exo.auth-token")
            .long("exo.auth-token")
            .help("API token")
            .num_args(1)
            .global(true),
    )
    .arg(
        Arg::new("exo.domain")
            .long("exo.domain")
            .help("API host")
            .num_args(1)
            .global(true),
    )
    .arg(
        Arg::new("exo.account-sid")
            .long("exo.account-sid")
            .help("account SID")
            .num_args(1)
            .global(true),
    )
    .arg(
        Arg::new("exo.scheme")
            .long("exo.scheme")
            .help("API scheme")
            .num_args(1)
            .value_parser(["http", "https"])
            .global(true),
    )
    .arg(
        Arg::new("exo.timeout")
            .long("exo.timeout")
            .help("request timeout in seconds")
            .num_args(1)
            .value_parser(RangedU64ValueParser::<u64>::new().range(1..))
            .global(true),
    )
}

/// To read input arguments from command-line arguments and environment variables.
///
/// This function will call [`apply_default()`] to fill missing values so you do not need call it
/// again.
pub fn read_args(args: &ArgMatches) -> Config {
    apply_default(&Config {
        auth_key: read_str(args, "exo.auth-key", "EXO_AUTH_KEY"),
        auth_token: read_str(args, "exo.auth-token", "EXO_AUTH_TOKEN"),
        domain: read_str(args, "exo.domain", "EXO_SUBSCRIBIX_DOMAIN"),
        account_sid: read_str(args, "exo.account-sid", "EXO_ACCOUNT_SID"),
        scheme: read_str(args, "exo.scheme", "EXO_SCHEME"),
        timeout: match args.get_one::<u64>("exo.timeout") {
            None => match env::var("EXO_TIMEOUT") {
                Err(_) => None,
                Ok(v) => match v.parse::<u64>() {
                    Err(_) => None,
                    Ok(v) => Some(v),
                },
            },
            Some(v) => Some(*v),
        },
    })
}

/// Fill missing configuration with default values. Credentials have no default values.
pub fn apply_default(config: &Config) -> Config {
    Config {
        auth_key: config.auth_key.clone(),
        auth_token: config.auth_token.clone(),
        domain: config.domain.clone(),
        account_sid: config.account_sid.clone(),
        scheme: match config.scheme.as_ref() {
            None => Some(DEF_SCHEME.to_string()),
            Some(v) => match v.as_str() {
                "http" | "https" => Some(v.clone()),
                _ => Some(DEF_SCHEME.to_string()),
            },
        },
        timeout: match config.timeout {
            None | Some(0) => Some(DEF_TIMEOUT),
            Some(v) => Some(v),
        },
    }
}

/// To build SDK client options. Missing fields become empty strings and will be rejected by
/// [`vsip_sdk::api::http::Client::new`].
pub fn client_options(config: &Config) -> ClientOptions {
    let domain = config.domain.as_deref().unwrap_or("");
    ClientOptions {
        base_url: match domain.len() {
            0 => "".to_string(),
            _ => format!(
                "{}://{}",
                config.scheme.as_deref().unwrap_or(DEF_SCHEME),
                domain
            ),
        },
        account_sid: config.account_sid.clone().unwrap_or_default(),
        auth_key: config.auth_key.clone().unwrap_or_default(),
        auth_token: config.auth_token.clone().unwrap_or_default(),
        timeout: Some(Duration::from_secs(config.timeout.unwrap_or(DEF_TIMEOUT))),
    }
}

fn read_str(args: &ArgMatches, id: &str, env_key: &str) -> Option<String> {
    match args.get_one::<String>(id) {
        None => match env::var(env_key) {
            Err(_) => None,
            Ok(v) => Some(v),
        },
        Some(v) => Some(v.clone()),
    }
}
