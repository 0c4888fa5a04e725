use std::error::Error as StdError;

use clap::{Arg, ArgMatches, Command};
use log::{error, warn};

use vsip_sdk::api::setting;

use super::{Config, get_param, new_client, print_json, require_param};

pub fn reg_args(cmd: Command) -> Command {
    cmd.about("Trunk external alias").subcommand(
        Command::new("set")
            .about("Set the exophone as the external alias of a trunk")
            .arg(
                Arg::new("sid")
                    .short('s')
                    .long("sid")
                    .help("Trunk SID (TRUNK_SID)")
                    .num_args(1),
            )
            .arg(
                Arg::new("exophone")
                    .short('e')
                    .long("exophone")
                    .help("Exophone number (EXOPHONE). Skip when missing")
                    .num_args(1),
            ),
    )
}

pub async fn run(conf: &Config, args: &ArgMatches) -> Result<Option<()>, Box<dyn StdError>> {
    match args.subcommand() {
        Some(("set", args)) => {
            set(conf, args).await?;
            Ok(Some(()))
        }
        _ => Ok(None),
    }
}

async fn set(conf: &Config, args: &ArgMatches) -> Result<(), Box<dyn StdError>> {
    const FN_NAME: &'static str = "set";

    let client = new_client(conf)?;
    let trunk_sid = require_param(args, "sid", &["TRUNK_SID"])?;
    let exophone = match get_param(args, "exophone", &["EXOPHONE"], None) {
        None => {
            warn!("[{}] no exophone for {}", FN_NAME, trunk_sid);
            println!("Warning: EXOPHONE is not set. Skipping trunk alias configuration.");
            return Ok(());
        }
        Some(v) => v,
    };

    println!("Setting trunk alias {} for trunk {}...", exophone, trunk_sid);
    let result = setting::set_alias(&client, trunk_sid.as_str(), exophone.as_str()).await;
    let data = match result {
        Err(e) => {
            error!("[{}] set alias of {} error: {}", FN_NAME, trunk_sid, e);
            return Err(Box::new(e));
        }
        Ok(data) => data,
    };
    print_json(&data)?;
    println!("Trunk alias set successfully!");
    Ok(())
}
