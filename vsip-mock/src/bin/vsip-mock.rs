use std::{error::Error as StdError, fs, net::SocketAddr};

use clap::{Arg as ClapArg, Command};
use json5;
use log::{self, error, info};
use serde::Deserialize;
use tokio::{self, net::TcpListener};

use vsip_corelib::{
    logger::{self, LoggerLayer},
    server_config,
};
use vsip_mock::{libs, routes};

#[derive(Default, Deserialize)]
#[serde(default)]
struct AppConfig {
    log: logger::Config,
    server: server_config::Config,
    mock: libs::config::Config,
}

const PROJ_NAME: &'static str = env!("CARGO_BIN_NAME");
const PROJ_VER: &'static str = env!("CARGO_PKG_VERSION");
const BASE_PATH: &'static str = "/v2/accounts/{account_sid}/trunks";

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::io::Result<()> {
    const FN_NAME: &'static str = "main";

    let conf = match init_config() {
        Err(e) => {
            let conf = &logger::Config {
                ..Default::default()
            };
            logger::init(PROJ_NAME, &conf);
            error!("[{}] read config error: {}", FN_NAME, e);
            return Ok(());
        }
        Ok(conf) => conf,
    };

    logger::init(PROJ_NAME, &conf.log);

    let state = match routes::new_state(&conf.mock).await {
        Err(e) => {
            error!("[{}] new routes state error: {}", FN_NAME, e);
            return Ok(());
        }
        Ok(state) => state,
    };
    let app = routes::new_service(&state).layer(LoggerLayer::new());

    let host = conf
        .server
        .host
        .unwrap_or(server_config::DEF_HOST.to_string());
    let port = conf.server.http_port.unwrap_or(server_config::DEF_HTTP_PORT);
    let listener = match TcpListener::bind((host.as_str(), port)).await {
        Err(e) => {
            error!("[{}] bind addr {}:{} error: {}", FN_NAME, host, port, e);
            return Ok(());
        }
        Ok(listener) => listener,
    };
    info!(
        "[{}] running {} service (v{}) on http://{}:{}",
        FN_NAME, PROJ_NAME, PROJ_VER, host, port
    );
    info!("[{}] POST {}", FN_NAME, BASE_PATH);
    for suffix in ["phone-numbers", "whitelisted-ips", "destination-uris", "settings"] {
        info!("[{}] POST {}/{{trunk_sid}}/{}", FN_NAME, BASE_PATH, suffix);
    }
    for trigger in state.triggers.iter() {
        info!(
            "[{}] simulated failure: {} with {} containing '{}' responds {}",
            FN_NAME, trigger.resource, trigger.field, trigger.contains, trigger.status
        );
    }
    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    {
        error!("[{}] launch server error: {}", FN_NAME, e);
        return Ok(());
    }
    info!("[{}] {} stopped", FN_NAME, PROJ_NAME);
    Ok(())
}

fn init_config() -> Result<AppConfig, Box<dyn StdError>> {
    let mut args = Command::new(PROJ_NAME).version(PROJ_VER).arg(
        ClapArg::new("file")
            .short('f')
            .long("file")
            .help("config file")
            .num_args(1),
    );
    args = logger::reg_args(args);
    args = server_config::reg_args(args);
    args = libs::config::reg_args(args);
    let args = args.get_matches();

    if let Some(v) = args.get_one::<String>("file") {
        let conf_str = fs::read_to_string(v)?;
        let conf: AppConfig = json5::from_str(conf_str.as_str())?;
        return Ok(AppConfig {
            log: logger::apply_default(&conf.log),
            server: server_config::apply_default(&conf.server),
            mock: libs::config::apply_default(&conf.mock),
        });
    }

    Ok(AppConfig {
        log: logger::read_args(&args),
        server: server_config::read_args(&args),
        mock: libs::config::read_args(&args),
    })
}

async fn shutdown_signal() {
    const FN_NAME: &'static str = "shutdown_signal";

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("[{}] listen ctrl-c error: {}", FN_NAME, e);
        return;
    }
    info!("[{}] received ctrl-c", FN_NAME);
}
