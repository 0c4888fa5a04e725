use std::error::Error as StdError;

use clap::{Arg, ArgMatches, Command, builder::RangedU64ValueParser};
use log::error;

use vsip_sdk::api::whitelisted_ip;

use super::{Config, get_num_param, new_client, print_json, require_param};

pub fn reg_args(cmd: Command) -> Command {
    cmd.about("IP whitelist management")
        .subcommand(
            Command::new("add")
                .about("Whitelist an IP address for a trunk")
                .arg(sid_arg())
                .arg(
                    Arg::new("ip")
                        .short('i')
                        .long("ip")
                        .help("IPv4 address (WHITELIST_IP)")
                        .num_args(1),
                )
                .arg(
                    Arg::new("mask")
                        .short('m')
                        .long("mask")
                        .help("Network mask bits (WHITELIST_MASK). Default is 32")
                        .num_args(1)
                        .value_parser(RangedU64ValueParser::<u64>::new().range(0..=32)),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("Get whitelisted IP addresses of a trunk")
                .arg(sid_arg()),
        )
}

pub async fn run(conf: &Config, args: &ArgMatches) -> Result<Option<()>, Box<dyn StdError>> {
    match args.subcommand() {
        Some(("add", args)) => {
            add(conf, args).await?;
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

async fn add(conf: &Config, args: &ArgMatches) -> Result<(), Box<dyn StdError>> {
    const FN_NAME: &'static str = "add";

    let client = new_client(conf)?;
    let trunk_sid = require_param(args, "sid", &["TRUNK_SID"])?;
    let ip = require_param(args, "ip", &["WHITELIST_IP"])?;
    let mask = get_num_param(
        args,
        "mask",
        "WHITELIST_MASK",
        Some(whitelisted_ip::DEF_MASK as u64),
    )?
    .unwrap_or(whitelisted_ip::DEF_MASK as u64);
    let mask = match mask {
        0..=32 => mask as u8,
        _ => return Err(format!("invalid mask {}", mask).into()),
    };

    println!("Whitelisting IP {}/{} for trunk {}...", ip, mask, trunk_sid);
    let result = whitelisted_ip::add(&client, trunk_sid.as_str(), ip.as_str(), mask).await;
    let data = match result {
        Err(e) => {
            error!("[{}] whitelist {} for {} error: {}", FN_NAME, ip, trunk_sid, e);
            return Err(Box::new(e));
        }
        Ok(data) => data,
    };
    print_json(&data)?;
    println!("IP whitelisted successfully!");
    Ok(())
}

async fn list(conf: &Config, args: &ArgMatches) -> Result<(), Box<dyn StdError>> {
    const FN_NAME: &'static str = "list";

    let client = new_client(conf)?;
    let trunk_sid = require_param(args, "sid", &["TRUNK_SID"])?;

    println!("Getting whitelisted IPs for trunk {}...", trunk_sid);
    let data = match whitelisted_ip::list(&client, trunk_sid.as_str()).await {
        Err(e) => {
            error!("[{}] list whitelisted IPs of {} error: {}", FN_NAME, trunk_sid, e);
            return Err(Box::new(e));
        }
        Ok(data) => data,
    };
    print_json(&data)?;
    println!("Whitelisted IPs retrieved successfully!");
    Ok(())
}
