//! Request phases of the load test.

use std::{
    error::Error as StdError,
    time::{Duration, Instant},
};

use chrono::Utc;
use futures::{StreamExt, future, stream};
use log::info;
use reqwest::Method;
use serde::Serialize;
use serde_json::{Value, json};
use tokio::time;

use vsip_corelib::strings;
use vsip_sdk::api::http::{Client, Error};

/// The record of one request.
#[derive(Clone, Debug, Serialize)]
pub struct TestResult {
    pub endpoint: String,
    pub method: String,
    /// `0` for transport failures and timeouts.
    pub status_code: u16,
    /// In seconds.
    pub response_time: f64,
    pub success: bool,
    pub error_message: Option<String>,
    pub timestamp: String,
}

/// Options of all phases.
#[derive(Clone, Debug)]
pub struct Options {
    /// Maximum in-flight requests of the trunk creation phase and the request count of the
    /// concurrent phase.
    pub concurrent: usize,
    /// Request count of the trunk creation phase.
    pub requests: usize,
    /// Requests per second of the rate limit phase. `0` disables the phase.
    pub rate_limit: usize,
    /// Duration in seconds of the rate limit phase.
    pub duration: u64,
    /// The `domain_name` of created trunks.
    pub domain_name: String,
}

const ENDPOINT_TRUNKS: &'static str = "/trunks";
const NSO_CODE: &'static str = "ANY-ANY";

/// The prefix of error messages of timed out requests.
pub const TIMED_OUT: &'static str = "timed out";

/// Send one request and measure it. Any 2xx status is a success. Error bodies are kept as the
/// error message.
pub async fn send(client: &Client, method: Method, endpoint: &str, body: &Value) -> TestResult {
    let method_str = method.as_str().to_string();
    let start = Instant::now();
    let result = client.request(method, endpoint, Some(body)).await;
    let response_time = start.elapsed().as_secs_f64();
    let (status_code, success, error_message) = match result {
        Err(e) => (0, false, Some(error_text(&e))),
        Ok((status, text)) => {
            let code = status.as_u16();
            let message = match code >= 400 {
                false => None,
                true => Some(text),
            };
            (code, status.is_success(), message)
        }
    };
    TestResult {
        endpoint: endpoint.to_string(),
        method: method_str,
        status_code,
        response_time,
        success,
        error_message,
        timestamp: strings::time_str(&Utc::now()),
    }
}

/// The error with its source chain. Timeouts are prefixed with [`TIMED_OUT`].
pub fn error_text(err: &Error) -> String {
    let inner: &(dyn StdError + Send + Sync + 'static) = match err {
        Error::Std(e) => e.as_ref(),
        _ => return err.to_string(),
    };
    let mut text = inner.to_string();
    let mut source = inner.source();
    while let Some(e) = source {
        text = format!("{}: {}", text, e);
        source = e.source();
    }
    match inner.downcast_ref::<reqwest::Error>() {
        Some(e) if e.is_timeout() => format!("{}: {}", TIMED_OUT, text),
        _ => text,
    }
}

/// The body of a trunk creation request.
pub fn trunk_body(trunk_name: &str, domain_name: &str) -> Value {
    json!({
        "trunk_name": trunk_name,
        "nso_code": NSO_CODE,
        "domain_name": domain_name,
    })
}

/// Create `requests` trunks with at most `concurrent` requests in flight.
pub async fn trunk_creation(
    client: &Client,
    domain_name: &str,
    requests: usize,
    concurrent: usize,
) -> Vec<TestResult> {
    info!(
        "trunk creation: {} requests, {} concurrent",
        requests, concurrent
    );
    let ts = Utc::now().timestamp();
    stream::iter(0..requests)
        .map(|i| {
            let body = trunk_body(format!("load_test_trunk_{}_{}", i, ts).as_str(), domain_name);
            async move { send(client, Method::POST, ENDPOINT_TRUNKS, &body).await }
        })
        .buffer_unordered(concurrent.max(1))
        .collect()
        .await
}

/// Send batches of `rps` requests once a second for `duration` seconds. A batch that takes longer
/// than a second delays the next one.
pub async fn rate_limit(
    client: &Client,
    domain_name: &str,
    rps: usize,
    duration: u64,
) -> Vec<TestResult> {
    info!("rate limit: {} requests/s for {} s", rps, duration);
    let mut results = vec![];
    if rps == 0 {
        return results;
    }
    let ts = Utc::now().timestamp();
    let start = Instant::now();
    let mut count = 0;
    while start.elapsed() < Duration::from_secs(duration) {
        let batch_start = Instant::now();
        let batch = (0..rps).map(|_| {
            count += 1;
            let body = trunk_body(format!("rate_test_{}_{}", count, ts).as_str(), domain_name);
            async move { send(client, Method::POST, ENDPOINT_TRUNKS, &body).await }
        });
        results.extend(future::join_all(batch.collect::<Vec<_>>()).await);

        let elapsed = batch_start.elapsed();
        if elapsed < Duration::from_secs(1) {
            time::sleep(Duration::from_secs(1) - elapsed).await;
        }
    }
    results
}

/// Fire `concurrent` requests at once.
pub async fn concurrent(client: &Client, domain_name: &str, concurrent: usize) -> Vec<TestResult> {
    info!("concurrent: {} requests", concurrent);
    let ts = Utc::now().timestamp();
    let reqs = (0..concurrent).map(|i| {
        let body = trunk_body(format!("concurrent_test_{}_{}", ts, i).as_str(), domain_name);
        async move { send(client, Method::POST, ENDPOINT_TRUNKS, &body).await }
    });
    future::join_all(reqs).await
}

/// Run all phases in order and collect their results.
pub async fn run(client: &Client, opts: &Options) -> Vec<TestResult> {
    let domain_name = opts.domain_name.as_str();
    let mut results = trunk_creation(client, domain_name, opts.requests, opts.concurrent).await;
    if opts.rate_limit > 0 {
        results.extend(rate_limit(client, domain_name, opts.rate_limit, opts.duration).await);
    }
    results.extend(concurrent(client, domain_name, opts.concurrent).await);
    results
}
