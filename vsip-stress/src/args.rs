//! Command-line arguments of the load tester.

use std::time::Duration;

use clap::{Arg, ArgAction, ArgMatches, Command, builder::RangedU64ValueParser};

use vsip_cli::libs::cli::config as exo_config;
use vsip_corelib::logger;
use vsip_sdk::api::{http::ClientOptions, trunk};

use crate::runner::Options;

pub const DEF_CONCURRENT: usize = 10;
pub const DEF_REQUESTS: usize = 50;
pub const DEF_DURATION: u64 = 60;

pub const MOCK_BASE_URL: &'static str = "http://localhost:8080";
pub const MOCK_ACCOUNT_SID: &'static str = "test_account";
pub const MOCK_AUTH_KEY: &'static str = "test_key";
pub const MOCK_AUTH_TOKEN: &'static str = "test_token";

/// To register Clap arguments, including the logger and the `--exo.*` connection arguments.
pub fn reg_args(cmd: Command) -> Command {
    let cmd = cmd
        .arg(
            Arg::new("concurrent")
                .short('c')
                .long("concurrent")
                .help("maximum concurrent requests")
                .num_args(1)
                .default_value("10")
                .value_parser(RangedU64ValueParser::<usize>::new().range(1..)),
        )
        .arg(
            Arg::new("requests")
                .short('r')
                .long("requests")
                .help("number of trunk creation requests")
                .num_args(1)
                .default_value("50")
                .value_parser(RangedU64ValueParser::<usize>::new()),
        )
        .arg(
            Arg::new("rate-limit")
                .long("rate-limit")
                .help("requests per second for the rate limit test, 0 to skip")
                .num_args(1)
                .default_value("0")
                .value_parser(RangedU64ValueParser::<usize>::new()),
        )
        .arg(
            Arg::new("duration")
                .short('d')
                .long("duration")
                .help("duration in seconds of the rate limit test")
                .num_args(1)
                .default_value("60")
                .value_parser(RangedU64ValueParser::<u64>::new()),
        )
        .arg(
            Arg::new("mock")
                .short('m')
                .long("mock")
                .help("use the local mock server")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .help("request timeout in seconds. Default is --exo.timeout, EXO_TIMEOUT or 30")
                .num_args(1)
                .value_parser(RangedU64ValueParser::<u64>::new().range(1..)),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .help("results file")
                .num_args(1),
        );
    let cmd = logger::reg_args(cmd);
    exo_config::reg_args(cmd)
}

/// To build client options. `--mock` uses the local mock and its test credentials.
///
/// The request timeout is `--timeout`, then `--exo.timeout`/`EXO_TIMEOUT`, then the default.
pub fn client_options(args: &ArgMatches) -> ClientOptions {
    let exo = exo_config::read_args(args);
    let timeout = match args.get_one::<u64>("timeout") {
        None => exo.timeout.unwrap_or(exo_config::DEF_TIMEOUT),
        Some(v) => *v,
    };
    let timeout = Some(Duration::from_secs(timeout));
    if args.get_flag("mock") {
        return ClientOptions {
            base_url: MOCK_BASE_URL.to_string(),
            account_sid: MOCK_ACCOUNT_SID.to_string(),
            auth_key: MOCK_AUTH_KEY.to_string(),
            auth_token: MOCK_AUTH_TOKEN.to_string(),
            timeout,
        };
    }
    let mut opts = exo_config::client_options(&exo);
    opts.timeout = timeout;
    opts
}

/// To read phase options. Trunks are created in the default domain of the account.
pub fn options(args: &ArgMatches, account_sid: &str) -> Options {
    Options {
        concurrent: *args
            .get_one::<usize>("concurrent")
            .unwrap_or(&DEF_CONCURRENT),
        requests: *args.get_one::<usize>("requests").unwrap_or(&DEF_REQUESTS),
        rate_limit: *args.get_one::<usize>("rate-limit").unwrap_or(&0),
        duration: *args.get_one::<u64>("duration").unwrap_or(&DEF_DURATION),
        domain_name: trunk::default_domain_name(account_sid),
    }
}
