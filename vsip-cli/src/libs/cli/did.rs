use std::error::Error as StdError;

use clap::{Arg, ArgMatches, Command};
use log::error;

use vsip_sdk::api::phone_number;

use super::{Config, new_client, print_json, require_param};

pub fn reg_args(cmd: Command) -> Command {
    cmd.about("DID (phone number) management")
        .subcommand(
            Command::new("map")
                .about("Map a DID to a trunk")
                .arg(sid_arg())
                .arg(
                    Arg::new("number")
                        .short('n')
                        .long("number")
                        .help("Phone number in E.164 format (DID_NUMBER)")
                        .num_args(1),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("Get DIDs of a trunk")
                .arg(sid_arg()),
        )
}

pub async fn run(conf: &Config, args: &ArgMatches) -> Result<Option<()>, Box<dyn StdError>> {
    match args.subcommand() {
        Some(("map", args)) => {
            map(conf, args).await?;
            Ok(Some(()))
        }
        Some(("list", args)) => {
            list(conf, args).await?;
            Ok(Some(()))
        }
        _ => Ok(None),
    }
}

fn sid_arg() -> Arg {
    Arg::new("sid")
        .short('s')
        .long("sid")
        .help("Trunk SID (TRUNK_SID)")
        .num_args(1)
}

async fn map(conf: &Config, args: &ArgMatches) -> Result<(), Box<dyn StdError>> {
    const FN_NAME: &'static str = "map";

    let client = new_client(conf)?;
    let trunk_sid = require_param(args, "sid", &["TRUNK_SID"])?;
    let number = require_param(args, "number", &["DID_NUMBER"])?;

    println!("Mapping DID {} to trunk {}...", number, trunk_sid);
    let result = phone_number::map(&client, trunk_sid.as_str(), number.as_str()).await;
    let data = match result {
        Err(e) => {
            error!("[{}] map {} to {} error: {}", FN_NAME, number, trunk_sid, e);
            return Err(Box::new(e));
        }
        Ok(data) => data,
    };
    print_json(&data)?;
    println!("DID mapped successfully!");
    Ok(())
}

async fn list(conf: &Config, args: &ArgMatches) -> Result<(), Box<dyn StdError>> {
    const FN_NAME: &'static str = "list";

    let client = new_client(conf)?;
    let trunk_sid = require_param(args, "sid", &["TRUNK_SID"])?;

    println!("Getting phone numbers for trunk {}...", trunk_sid);
    let data = match phone_number::list(&client, trunk_sid.as_str()).await {
        Err(e) => {
            error!("[{}] list DIDs of {} error: {}", FN_NAME, trunk_sid, e);
            return Err(Box::new(e));
        }
        Ok(data) => data,
    };
    print_json(&data)?;
    println!("Phone numbers retrieved successfully!");
    Ok(())
}
