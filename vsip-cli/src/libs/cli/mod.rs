use std::{
    env,
    error::Error as StdError,
    io::{Error as IoError, ErrorKind},
};

use clap::{ArgMatches, Command};
use serde::Serialize;

use vsip_sdk::api::http::Client;

mod alias;
pub mod config;
mod destination;
mod did;
mod trunk;
mod whitelist;
pub mod workflow;

pub use config::Config;

/// To register Clap arguments.
pub fn reg_args(cmd: Command) -> Command {
    config::reg_args(cmd)
        .subcommand(trunk::reg_args(Command::new("trunk")))
        .subcommand(did::reg_args(Command::new("did")))
        .subcommand(whitelist::reg_args(Command::new("whitelist")))
        .subcommand(destination::reg_args(Command::new("destination")))
        .subcommand(alias::reg_args(Command::new("alias")))
        .subcommand(workflow::reg_args(Command::new("workflow")))
}

pub async fn run(conf: &Config, args: &ArgMatches) -> Result<Option<()>, Box<dyn StdError>> {
    match args.subcommand() {
        Some(("trunk", args)) => trunk::run(conf, args).await,
        Some(("did", args)) => did::run(conf, args).await,
        Some(("whitelist", args)) => whitelist::run(conf, args).await,
        Some(("destination", args)) => destination::run(conf, args).await,
        Some(("alias", args)) => alias::run(conf, args).await,
        Some(("workflow", args)) => workflow::run(conf, args).await,
        _ => Ok(None),
    }
}

/// To get a parameter from the argument, then the first existing environment variable, then the
/// default value. Empty values are ignored.
pub fn get_param(
    args: &ArgMatches,
    id: &str,
    env_keys: &[&str],
    default: Option<&str>,
) -> Option<String> {
    if let Some(v) = args.get_one::<String>(id) {
        if v.len() > 0 {
            return Some(v.clone());
        }
    }
    for key in env_keys.iter() {
        if let Ok(v) = env::var(key) {
            if v.len() > 0 {
                return Some(v);
            }
        }
    }
    match default {
        None => None,
        Some(v) => Some(v.to_string()),
    }
}

/// Like [`get_param`] but the parameter must exist.
pub fn require_param(
    args: &ArgMatches,
    id: &str,
    env_keys: &[&str],
) -> Result<String, Box<dyn StdError>> {
    match get_param(args, id, env_keys, None) {
        Some(v) => Ok(v),
        None => {
            let msg = format!("{} is required (--{})", env_keys.join(" or "), id);
            Err(Box::new(IoError::new(ErrorKind::InvalidInput, msg)))
        }
    }
}

/// To get a numeric parameter from the argument, then the environment variable, then the default
/// value.
fn get_num_param(
    args: &ArgMatches,
    id: &str,
    env_key: &str,
    default: Option<u64>,
) -> Result<Option<u64>, Box<dyn StdError>> {
    if let Some(v) = args.get_one::<u64>(id) {
        return Ok(Some(*v));
    }
    match env::var(env_key) {
        Err(_) => Ok(default),
        Ok(v) => match v.parse::<u64>() {
            Err(e) => {
                let msg = format!("invalid {}: {}", env_key, e);
                Err(Box::new(IoError::new(ErrorKind::InvalidInput, msg)))
            }
            Ok(v) => Ok(Some(v)),
        },
    }
}

/// To create the API client. Missing credentials fail before any request.
fn new_client(conf: &Config) -> Result<Client, Box<dyn StdError>> {
    Ok(Client::new(config::client_options(conf))?)
}

fn print_json<T: Serialize>(data: &T) -> Result<(), Box<dyn StdError>> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}
