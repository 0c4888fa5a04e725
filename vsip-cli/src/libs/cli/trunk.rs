use std::error::Error as StdError;

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::error;
use tokio::io::{self, AsyncBufReadExt, BufReader};

use vsip_sdk::api::trunk as trunk_api;

use super::{Config, get_param, new_client, print_json, require_param};

const DEF_TRUNK_NAME: &'static str = "my_ai_trunk";
const DEF_NSO_CODE: &'static str = "ANY-ANY";
const DELETE_CONFIRM: &'static str = "DELETE";

pub fn reg_args(cmd: Command) -> Command {
    cmd.about("Trunk management")
        .subcommand(
            Command::new("create")
                .about("Create a trunk")
                .arg(
                    Arg::new("name")
                        .short('n')
                        .long("name")
                        .help("Trunk name (TRUNK_NAME)")
                        .num_args(1),
                )
                .arg(
                    Arg::new("nso-code")
                        .long("nso-code")
                        .help("NSO code (NSO_CODE)")
                        .num_args(1),
                )
                .arg(
                    Arg::new("domain-name")
                        .long("domain-name")
                        .help("Domain name. Default is {account_sid}.pstn.exotel.com")
                        .num_args(1),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a trunk permanently")
                .arg(
                    Arg::new("sid")
                        .short('s')
                        .long("sid")
                        .help("Trunk SID (TRUNK_SID_TO_DELETE or TRUNK_SID)")
                        .num_args(1),
                )
                .arg(
                    Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .help("Delete without confirmation")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("credentials")
                .about("Get credentials of a trunk")
                .arg(
                    Arg::new("sid")
                        .short('s')
                        .long("sid")
                        .help("Trunk SID (TRUNK_SID)")
                        .num_args(1),
                ),
        )
}

pub async fn run(conf: &Config, args: &ArgMatches) -> Result<Option<()>, Box<dyn StdError>> {
    match args.subcommand() {
        Some(("create", args)) => {
            create(conf, args).await?;
            Ok(Some(()))
        }
        Some(("delete", args)) => {
            delete(conf, args).await?;
            Ok(Some(()))
        }
        Some(("credentials", args)) => {
            credentials(conf, args).await?;
            Ok(Some(()))
        }
        _ => Ok(None),
    }
}

async fn create(conf: &Config, args: &ArgMatches) -> Result<(), Box<dyn StdError>> {
    const FN_NAME: &'static str = "create";

    let client = new_client(conf)?;
    let trunk_name = get_param(args, "name", &["TRUNK_NAME"], Some(DEF_TRUNK_NAME))
        .unwrap_or(DEF_TRUNK_NAME.to_string());
    let nso_code = get_param(args, "nso-code", &["NSO_CODE"], Some(DEF_NSO_CODE))
        .unwrap_or(DEF_NSO_CODE.to_string());
    let domain_name = match get_param(args, "domain-name", &[], None) {
        None => trunk_api::default_domain_name(conf.account_sid.as_deref().unwrap_or("")),
        Some(v) => v,
    };

    println!("Creating trunk...");
    let result = trunk_api::create(
        &client,
        trunk_name.as_str(),
        nso_code.as_str(),
        domain_name.as_str(),
    )
    .await;
    let data = match result {
        Err(e) => {
            error!("[{}] create trunk {} error: {}", FN_NAME, trunk_name, e);
            return Err(Box::new(e));
        }
        Ok(data) => data,
    };
    print_json(&data)?;
    println!("Trunk created successfully!");
    Ok(())
}

async fn delete(conf: &Config, args: &ArgMatches) -> Result<(), Box<dyn StdError>> {
    const FN_NAME: &'static str = "delete";

    let client = new_client(conf)?;
    let trunk_sid = require_param(args, "sid", &["TRUNK_SID_TO_DELETE", "TRUNK_SID"])?;

    println!("WARNING: This will delete trunk {} permanently!", trunk_sid);
    if !args.get_flag("yes") {
        println!("Type '{}' to confirm: ", DELETE_CONFIRM);
        let mut line = String::new();
        BufReader::new(io::stdin()).read_line(&mut line).await?;
        if line.trim() != DELETE_CONFIRM {
            println!("Delete cancelled");
            return Ok(());
        }
    }

    println!("Deleting trunk {}...", trunk_sid);
    let data = match trunk_api::delete(&client, trunk_sid.as_str()).await {
        Err(e) => {
            error!("[{}] delete trunk {} error: {}", FN_NAME, trunk_sid, e);
            return Err(Box::new(e));
        }
        Ok(data) => data,
    };
    print_json(&data)?;
    println!("Trunk deleted successfully!");
    Ok(())
}

async fn credentials(conf: &Config, args: &ArgMatches) -> Result<(), Box<dyn StdError>> {
    const FN_NAME: &'static str = "credentials";

    let client = new_client(conf)?;
    let trunk_sid = require_param(args, "sid", &["TRUNK_SID"])?;

    println!("Getting credentials for trunk {}...", trunk_sid);
    let data = match trunk_api::get_credentials(&client, trunk_sid.as_str()).await {
        Err(e) => {
            error!("[{}] get credentials of {} error: {}", FN_NAME, trunk_sid, e);
            return Err(Box::new(e));
        }
        Ok(data) => data,
    };
    print_json(&data)?;
    println!("Credentials retrieved successfully!");
    Ok(())
}
