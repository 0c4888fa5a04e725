use std::error::Error as StdError;

use clap::{Arg, ArgMatches, Command, builder::RangedU64ValueParser};
use log::error;

use vsip_sdk::api::destination_uri::{self, Transport};

use super::{Config, get_num_param, new_client, print_json, require_param};

pub fn reg_args(cmd: Command) -> Command {
    cmd.about("Destination URI management")
        .subcommand(
            Command::new("add")
                .about("Add a destination URI to a trunk")
                .arg(sid_arg())
                .arg(
                    Arg::new("ip")
                        .short('i')
                        .long("ip")
                        .help("Destination IP address (TRUNK_DEST_IP)")
                        .num_args(1),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .help("Destination port (TRUNK_DEST_PORT)")
                        .num_args(1)
                        .value_parser(RangedU64ValueParser::<u64>::new().range(1..=65535)),
                )
                .arg(
                    Arg::new("transport")
                        .short('t')
                        .long("transport")
                        .help("SIP transport")
                        .num_args(1)
                        .value_parser([Transport::UDP, Transport::TCP, Transport::TLS])
                        .default_value(Transport::UDP),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("Get destination URIs of a trunk")
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
    let ip = require_param(args, "ip", &["TRUNK_DEST_IP"])?;
    let port = match get_num_param(args, "port", "TRUNK_DEST_PORT", None)? {
        Some(port @ 1..=65535) => port as u16,
        Some(port) => return Err(format!("invalid port {}", port).into()),
        None => return Err("TRUNK_DEST_PORT is required (--port)".into()),
    };
    let transport = match args.get_one::<String>("transport") {
        None => Transport::Udp,
        Some(v) => v.parse::<Transport>()?,
    };
    let destination = transport.destination(ip.as_str(), port);

    println!(
        "Adding {} destination {} to trunk {}...",
        transport, destination, trunk_sid
    );
    let result = destination_uri::add(&client, trunk_sid.as_str(), ip.as_str(), port, transport);
    let data = match result.await {
        Err(e) => {
            error!("[{}] add {} to {} error: {}", FN_NAME, destination, trunk_sid, e);
            return Err(Box::new(e));
        }
        Ok(data) => data,
    };
    print_json(&data)?;
    println!("Destination added successfully!");
    Ok(())
}

async fn list(conf: &Config, args: &ArgMatches) -> Result<(), Box<dyn StdError>> {
    const FN_NAME: &'static str = "list";

    let client = new_client(conf)?;
    let trunk_sid = require_param(args, "sid", &["TRUNK_SID"])?;

    println!("Getting destination URIs for trunk {}...", trunk_sid);
    let data = match destination_uri::list(&client, trunk_sid.as_str()).await {
        Err(e) => {
            error!("[{}] list destinations of {} error: {}", FN_NAME, trunk_sid, e);
            return Err(Box::new(e));
        }
        Ok(data) => data,
    };
    print_json(&data)?;
    println!("Destination URIs retrieved successfully!");
    Ok(())
}
