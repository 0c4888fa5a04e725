use std::error::Error as StdError;

use chrono::Utc;
use clap::{ArgMatches, Command};
use log::info;
use tokio;

use vsip_corelib::{logger, strings};
use vsip_sdk::api::http::Client;
use vsip_stress::{
    analysis::{self, Report, TestConfig},
    args as stress_args, runner,
};

const PROJ_NAME: &'static str = env!("CARGO_BIN_NAME");
const PROJ_VER: &'static str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<(), Box<dyn StdError>> {
    let args = stress_args::reg_args(Command::new(PROJ_NAME).version(PROJ_VER)).get_matches();
    logger::init(PROJ_NAME, &logger::read_args(&args));

    let start = Utc::now().timestamp_millis();
    match run(&args).await {
        Err(e) => {
            let diff = Utc::now().timestamp_millis() - start;
            println!("Error ({} ms): {}", diff, e);
            Err(e)
        }
        Ok(_) => {
            println!("OK ({} ms)", Utc::now().timestamp_millis() - start);
            Ok(())
        }
    }
}

async fn run(args: &ArgMatches) -> Result<(), Box<dyn StdError>> {
    let client_opts = stress_args::client_options(args);
    let base_url = client_opts.base_url.clone();
    let opts = stress_args::options(args, client_opts.account_sid.as_str());
    let client = Client::new(client_opts)?;
    info!("load test start: {} {:?}", base_url, opts);

    let now = Utc::now();
    let results = runner::run(&client, &opts).await;
    let report = Report {
        test_config: TestConfig {
            base_url,
            max_concurrent: opts.concurrent,
            timestamp: strings::time_str(&now),
        },
        results: &results,
        analysis: analysis::analyze(&results),
    };
    let path = match args.get_one::<String>("output") {
        None => analysis::default_path(&now),
        Some(path) => path.clone(),
    };
    analysis::save(&report, path.as_str())?;

    match report.analysis.as_ref() {
        None => println!("No results to analyze"),
        Some(analysis) => {
            let summary = &analysis.summary;
            println!("Total requests: {}", summary.total_requests);
            println!("Success rate: {:.2}%", summary.success_rate);
            println!("Avg response time: {:.3}s", summary.avg_response_time);
            println!("95th percentile: {:.3}s", summary.p95_response_time);
            for (code, count) in analysis.status_codes.iter() {
                println!("Status {}: {}", code, count);
            }
        }
    }
    println!("Results saved to: {}", path);
    Ok(())
}
