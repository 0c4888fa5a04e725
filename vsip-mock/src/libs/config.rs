//! Program configurations.

use std::env;

use clap::{Arg, ArgMatches, Command};
use serde::{Deserialize, Serialize};

/// Configuration file object.
#[derive(Clone, Default, Deserialize)]
pub struct Config {
    /// Simulated failures. The default list is used when missing and an empty list disables all
    /// simulated failures.
    pub triggers: Option<Vec<Trigger>>,
}

/// A simulated failure. When the string `field` of a `resource` request contains `contains`
/// (case-insensitive), the mock responds `status` with `message`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Trigger {
    /// The last path segment of the route. For example `trunks` or `phone-numbers`.
    pub resource: String,
    pub field: String,
    pub contains: String,
    pub status: u16,
    pub message: String,
}

/// To register Clap arguments.
pub fn reg_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("mock.triggers")
            .long("mock.triggers")
            .help("simulated failures in JSON array format")
            .num_args(1)
            .value_parser(validate_triggers),
    )
}

/// To read input arguments from command-line arguments and environment variables.
///
/// This function will call [`apply_default()`] to fill missing values so you do not need call it
/// again.
pub fn read_args(args: &ArgMatches) -> Config {
    apply_default(&Config {
        triggers: match args.get_one::<Vec<Trigger>>("mock.triggers") {
            None => match env::var("MOCK_TRIGGERS") {
                Err(_) => None,
                Ok(v) => match validate_triggers(v.as_str()) {
                    Err(_) => None,
                    Ok(v) => Some(v),
                },
            },
            Some(v) => Some(v.clone()),
        },
    })
}

/// Fill missing configuration with default values.
///
/// Triggers with status codes out of 400~599 or with empty `field`/`contains` are dropped.
pub fn apply_default(config: &Config) -> Config {
    Config {
        triggers: match config.triggers.as_ref() {
            None => Some(default_triggers()),
            Some(triggers) => Some(
                triggers
                    .iter()
                    .filter(|t| {
                        t.status >= 400 && t.status <= 599 && t.field.len() > 0 && t.contains.len() > 0
                    })
                    .map(|t| t.clone())
                    .collect(),
            ),
        },
    }
}

/// The built-in simulated failures.
pub fn default_triggers() -> Vec<Trigger> {
    vec![
        new_trigger("trunks", "trunk_name", "error", 400, "Invalid trunk name"),
        new_trigger("trunks", "trunk_name", "conflict", 409, "Trunk name already exists"),
        new_trigger("trunks", "trunk_name", "forbidden", 403, "Access denied"),
        new_trigger("phone-numbers", "phone_number", "invalid", 400, "Invalid phone number format"),
        new_trigger("phone-numbers", "phone_number", "unavailable", 422, "Phone number not available"),
    ]
}

fn new_trigger(resource: &str, field: &str, contains: &str, status: u16, message: &str) -> Trigger {
    Trigger {
        resource: resource.to_string(),
        field: field.to_string(),
        contains: contains.to_string(),
        status,
        message: message.to_string(),
    }
}

fn validate_triggers(json_str: &str) -> Result<Vec<Trigger>, String> {
    match serde_json::from_str::<Vec<Trigger>>(json_str) {
        Err(e) => Err(e.to_string()),
        Ok(v) => Ok(v),
    }
}
