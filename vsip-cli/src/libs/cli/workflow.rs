//! The provisioning lifecycle check: create a trunk, configure it with all sub-resources, verify
//! and clean up.

use std::{collections::BTreeMap, env, error::Error as StdError, fs, path::Path};

use chrono::Utc;
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{error, info, warn};
use serde::Serialize;
use serde_json::Value;

use vsip_corelib::strings;
use vsip_sdk::api::{
    destination_uri::{self, Transport},
    http::{Client, Error},
    phone_number, setting, trunk, whitelisted_ip,
};

use super::{Config, new_client, print_json};

/// Parameters of the workflow.
pub struct Params {
    pub trunk_name: String,
    pub nso_code: String,
    pub domain_name: String,
    pub did_number: String,
    pub whitelist_ip: String,
    pub whitelist_mask: u8,
    pub dest_ip: String,
    pub dest_port: u16,
    /// The alias step is skipped when `None`.
    pub exophone: Option<String>,
}

#[derive(Default, Serialize)]
pub struct Steps {
    pub create_trunk: bool,
    /// `None` means that the step did not run.
    pub map_did: Option<bool>,
    pub whitelist_ip: Option<bool>,
    /// Results of each transport.
    pub destinations: BTreeMap<String, bool>,
    pub set_alias: Option<bool>,
    pub verify_config: Option<bool>,
}

#[derive(Serialize)]
pub struct Summary {
    pub test_name: &'static str,
    pub start_time: String,
    pub end_time: String,
    pub steps: Steps,
    pub overall_success: bool,
    /// In seconds.
    pub duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trunk_sid: Option<String>,
    /// `type:sid` of created resources in creation order.
    pub created_resources: Vec<String>,
    /// `None` when cleanup is disabled.
    pub cleanup: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A created resource and the trunk SID it reported.
struct Created {
    kind: &'static str,
    sid: String,
    trunk_sid: Option<String>,
}

const TEST_NAME: &'static str = "vsip_integration";
const DEF_NSO_CODE: &'static str = "ANY-ANY";
const DEF_DID_NUMBER: &'static str = "+1234567890";
const DEF_WHITELIST_IP: &'static str = "192.168.1.100";
const DEF_DEST_IP: &'static str = "192.168.1.200";
const DEF_DEST_PORT: u16 = 5060;
const RESULTS_DIR: &'static str = "logs";

pub fn reg_args(cmd: Command) -> Command {
    cmd.about("Run the trunk lifecycle: create, configure, verify and clean up")
        .arg(
            Arg::new("no-cleanup")
                .long("no-cleanup")
                .help("Keep the created trunk")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Results file. Default is logs/integration_test_results_{time}.json")
                .num_args(1),
        )
}

pub async fn run(conf: &Config, args: &ArgMatches) -> Result<Option<()>, Box<dyn StdError>> {
    const FN_NAME: &'static str = "run";

    let client = new_client(conf)?;
    let params = Params::from_env(conf.account_sid.as_deref().unwrap_or(""))?;
    let cleanup = !args.get_flag("no-cleanup");

    let summary = execute(&client, &params, cleanup).await;
    print_json(&summary)?;

    let path = match args.get_one::<String>("output") {
        None => format!(
            "{}/integration_test_results_{}.json",
            RESULTS_DIR,
            strings::file_time_str(&Utc::now())
        ),
        Some(v) => v.clone(),
    };
    save(&summary, path.as_str())?;
    println!("Test results saved to: {}", path);

    if !summary.overall_success {
        error!("[{}] workflow failed", FN_NAME);
        return Err("integration test failed".into());
    }
    println!("Integration test PASSED");
    Ok(Some(()))
}

impl Params {
    /// To read parameters from environment variables with default values.
    pub fn from_env(account_sid: &str) -> Result<Self, Box<dyn StdError>> {
        let whitelist_mask = match env::var("WHITELIST_MASK") {
            Err(_) => whitelisted_ip::DEF_MASK,
            Ok(v) => match v.parse::<u8>() {
                Ok(mask) if mask <= 32 => mask,
                _ => return Err(format!("invalid WHITELIST_MASK {}", v).into()),
            },
        };
        let dest_port = match env::var("TRUNK_DEST_PORT") {
            Err(_) => DEF_DEST_PORT,
            Ok(v) => match v.parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => return Err(format!("invalid TRUNK_DEST_PORT {}", v).into()),
            },
        };
        Ok(Params {
            trunk_name: format!(
                "integration_test_{}",
                strings::file_time_str(&Utc::now())
            ),
            nso_code: env_or("NSO_CODE", DEF_NSO_CODE),
            domain_name: trunk::default_domain_name(account_sid),
            did_number: env_or("DID_NUMBER", DEF_DID_NUMBER),
            whitelist_ip: env_or("WHITELIST_IP", DEF_WHITELIST_IP),
            whitelist_mask,
            dest_ip: env_or("TRUNK_DEST_IP", DEF_DEST_IP),
            dest_port,
            exophone: match env::var("EXOPHONE") {
                Ok(v) if v.len() > 0 => Some(v),
                _ => None,
            },
        })
    }
}

/// To run all steps. Failures of configuration steps do not stop the following steps.
pub async fn execute(client: &Client, params: &Params, cleanup: bool) -> Summary {
    const FN_NAME: &'static str = "execute";

    let start = Utc::now();
    let mut steps = Steps::default();
    let mut created: Vec<Created> = vec![];
    info!("[{}] start with trunk {}", FN_NAME, params.trunk_name);

    let result = trunk::create(
        client,
        params.trunk_name.as_str(),
        params.nso_code.as_str(),
        params.domain_name.as_str(),
    )
    .await;
    let trunk_sid = match step_result("trunk", result, &mut created) {
        Some(sid) => sid,
        None => {
            return finish(start, steps, None, &created, None, Some("Failed to create trunk"));
        }
    };
    steps.create_trunk = true;
    let sid = trunk_sid.as_str();

    let result = phone_number::map(client, sid, params.did_number.as_str()).await;
    steps.map_did = Some(step_result("phone_number", result, &mut created).is_some());

    let result = whitelisted_ip::add(
        client,
        sid,
        params.whitelist_ip.as_str(),
        params.whitelist_mask,
    )
    .await;
    steps.whitelist_ip = Some(step_result("whitelist", result, &mut created).is_some());

    for transport in [Transport::Udp, Transport::Tcp, Transport::Tls] {
        let result = destination_uri::add(
            client,
            sid,
            params.dest_ip.as_str(),
            params.dest_port,
            transport,
        )
        .await;
        let ok = step_result("destination", result, &mut created).is_some();
        steps
            .destinations
            .insert(transport.as_str().to_uppercase(), ok);
    }

    steps.set_alias = match params.exophone.as_ref() {
        None => {
            info!("[{}] skip trunk alias without exophone", FN_NAME);
            Some(true)
        }
        Some(exophone) => {
            let result = setting::set_alias(client, sid, exophone.as_str()).await;
            Some(step_result("settings", result, &mut created).is_some())
        }
    };

    steps.verify_config = Some(verify(sid, &created));

    let cleanup = match cleanup {
        false => {
            info!("[{}] cleanup disabled, keep trunk {}", FN_NAME, sid);
            None
        }
        true => match trunk::delete(client, sid).await {
            Err(e) => {
                warn!("[{}] delete trunk {} error: {}", FN_NAME, sid, e);
                Some(false)
            }
            Ok(_) => Some(true),
        },
    };

    finish(start, steps, Some(trunk_sid.clone()), &created, cleanup, None)
}

/// To write the summary as pretty JSON. Parent directories are created.
pub fn save(summary: &Summary, path: &str) -> Result<(), Box<dyn StdError>> {
    if let Some(dir) = Path::new(path).parent() {
        if dir.as_os_str().len() > 0 {
            fs::create_dir_all(dir)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(summary)?)?;
    Ok(())
}

/// To record a created resource and return its SID.
fn step_result(
    kind: &'static str,
    result: Result<Value, Error>,
    created: &mut Vec<Created>,
) -> Option<String> {
    const FN_NAME: &'static str = "step_result";

    let data = match result {
        Err(e) => {
            error!("[{}] create {} error: {}", FN_NAME, kind, e);
            return None;
        }
        Ok(data) => data,
    };
    let sid = match data.get("sid").and_then(|v| v.as_str()) {
        None => {
            error!("[{}] create {} without SID", FN_NAME, kind);
            return None;
        }
        Some(sid) => sid.to_string(),
    };
    info!("[{}] created {} {}", FN_NAME, kind, sid);
    created.push(Created {
        kind,
        sid: sid.clone(),
        trunk_sid: data
            .get("trunk_sid")
            .and_then(|v| v.as_str())
            .map(|v| v.to_string()),
    });
    Some(sid)
}

/// All sub-resources must belong to the trunk.
fn verify(trunk_sid: &str, created: &[Created]) -> bool {
    const FN_NAME: &'static str = "verify";

    let mut ok = true;
    for item in created.iter().filter(|item| item.sid != trunk_sid) {
        if item.trunk_sid.as_deref() != Some(trunk_sid) {
            warn!(
                "[{}] {} {} belongs to {:?}",
                FN_NAME, item.kind, item.sid, item.trunk_sid
            );
            ok = false;
        }
    }
    ok
}

fn finish(
    start: chrono::DateTime<Utc>,
    steps: Steps,
    trunk_sid: Option<String>,
    created: &[Created],
    cleanup: Option<bool>,
    error: Option<&str>,
) -> Summary {
    let end = Utc::now();
    let overall_success = steps.create_trunk
        && steps.map_did == Some(true)
        && steps.whitelist_ip == Some(true)
        && steps.destinations.len() > 0
        && steps.destinations.values().all(|v| *v)
        && steps.set_alias == Some(true)
        && steps.verify_config == Some(true);
    Summary {
        test_name: TEST_NAME,
        start_time: strings::time_str(&start),
        end_time: strings::time_str(&end),
        steps,
        overall_success,
        duration: (end - start).num_milliseconds() as f64 / 1000.0,
        trunk_sid,
        created_resources: created
            .iter()
            .map(|item| format!("{}:{}", item.kind, item.sid))
            .collect(),
        cleanup,
        error: error.map(|e| e.to_string()),
    }
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(v) if v.len() > 0 => v,
        _ => default.to_string(),
    }
}
