//! Statistics and the report file of a load test.

use std::{collections::BTreeMap, error::Error as StdError, fs, path::Path};

use chrono::{DateTime, Utc};
use serde::Serialize;

use vsip_corelib::strings;

use crate::runner::TestResult;

#[derive(Debug, Serialize)]
pub struct Analysis {
    pub summary: Summary,
    /// Request counts of each status code. Transport failures are counted as `"0"`.
    pub status_codes: BTreeMap<String, usize>,
    pub endpoint_stats: BTreeMap<String, EndpointStats>,
    /// The first [`MAX_ERRORS`] failed requests.
    pub errors: Vec<TestResult>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    /// In percent.
    pub success_rate: f64,
    pub avg_response_time: f64,
    pub min_response_time: f64,
    pub max_response_time: f64,
    pub p95_response_time: f64,
}

#[derive(Debug, Serialize)]
pub struct EndpointStats {
    pub total: usize,
    pub success: usize,
    pub avg_time: f64,
    pub min_time: f64,
    pub max_time: f64,
    pub p95_time: f64,
}

#[derive(Serialize)]
pub struct Report<'a> {
    pub test_config: TestConfig,
    pub results: &'a [TestResult],
    /// `null` when there are no results.
    pub analysis: Option<Analysis>,
}

#[derive(Serialize)]
pub struct TestConfig {
    pub base_url: String,
    pub max_concurrent: usize,
    pub timestamp: String,
}

pub const MAX_ERRORS: usize = 10;
/// The minimum sample count to report the 95th percentile.
pub const P95_MIN_SAMPLES: usize = 20;

/// Summarize results. Returns `None` for no results.
pub fn analyze(results: &[TestResult]) -> Option<Analysis> {
    if results.len() == 0 {
        return None;
    }

    let times: Vec<f64> = results.iter().map(|r| r.response_time).collect();
    let (avg, min, max, p95) = time_stats(&times);
    let successful = results.iter().filter(|r| r.success).count();
    let summary = Summary {
        total_requests: results.len(),
        successful_requests: successful,
        failed_requests: results.len() - successful,
        success_rate: successful as f64 / results.len() as f64 * 100.0,
        avg_response_time: avg,
        min_response_time: min,
        max_response_time: max,
        p95_response_time: p95,
    };

    let mut status_codes = BTreeMap::new();
    let mut endpoint_results: BTreeMap<String, Vec<&TestResult>> = BTreeMap::new();
    for r in results.iter() {
        *status_codes.entry(r.status_code.to_string()).or_insert(0) += 1;
        endpoint_results
            .entry(r.endpoint.clone())
            .or_insert(vec![])
            .push(r);
    }

    let mut endpoint_stats = BTreeMap::new();
    for (endpoint, list) in endpoint_results.into_iter() {
        let times: Vec<f64> = list.iter().map(|r| r.response_time).collect();
        let (avg, min, max, p95) = time_stats(&times);
        let stats = EndpointStats {
            total: list.len(),
            success: list.iter().filter(|r| r.success).count(),
            avg_time: avg,
            min_time: min,
            max_time: max,
            p95_time: p95,
        };
        endpoint_stats.insert(endpoint, stats);
    }

    let errors = results
        .iter()
        .filter(|r| !r.success)
        .take(MAX_ERRORS)
        .cloned()
        .collect();

    Some(Analysis {
        summary,
        status_codes,
        endpoint_stats,
        errors,
    })
}

/// The value at the `pct` percentile of sorted samples. Returns `0` when there are fewer than
/// [`P95_MIN_SAMPLES`] samples.
pub fn percentile(sorted: &[f64], pct: usize) -> f64 {
    if sorted.len() < P95_MIN_SAMPLES {
        return 0.0;
    }
    let index = (sorted.len() * pct / 100).min(sorted.len() - 1);
    sorted[index]
}

/// Returns (avg, min, max, p95). All are `0` for no samples.
fn time_stats(times: &[f64]) -> (f64, f64, f64, f64) {
    if times.len() == 0 {
        return (0.0, 0.0, 0.0, 0.0);
    }
    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let sum: f64 = sorted.iter().sum();
    (
        sum / sorted.len() as f64,
        sorted[0],
        sorted[sorted.len() - 1],
        percentile(&sorted, 95),
    )
}

/// The default report path `logs/load_test_results_<YYYYmmdd_HHMMSS>.json`.
pub fn default_path(time: &DateTime<Utc>) -> String {
    format!("logs/load_test_results_{}.json", strings::file_time_str(time))
}

/// Write the report as pretty JSON. Parent directories are created when needed.
pub fn save(report: &Report, path: &str) -> Result<(), Box<dyn StdError>> {
    if let Some(dir) = Path::new(path).parent() {
        if dir.as_os_str().len() > 0 {
            fs::create_dir_all(dir)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(report)?)?;
    Ok(())
}
