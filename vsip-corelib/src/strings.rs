//! String libraries.

use chrono::{DateTime, Local, SecondsFormat, Utc};
use rand::Rng;

const HEX_UPPER: &'static [u8] = b"0123456789ABCDEF";

/// The random part length of resource SIDs.
pub const SID_RAND_LEN: usize = 8;

/// To check if the string is an IPv4 address that all dot-separated parts are integers in 0~255.
pub fn is_ipv4_octets(ip: &str) -> bool {
    if ip.len() == 0 {
        return false;
    }
    for part in ip.split('.') {
        if part.len() == 0 || !part.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        if part.parse::<u8>().is_err() {
            return false;
        }
    }
    true
}

/// To generate uppercase hex string with the specified length.
pub fn random_hex(len: usize) -> String {
    let mut rng = rand::rng();
    std::iter::repeat(())
        .map(|()| HEX_UPPER[rng.random_range(0..HEX_UPPER.len())] as char)
        .take(len)
        .collect()
}

/// To generate resource SID in `[prefix][8-uppercase-hex]` format. For example `TR1A2B3C4D`.
pub fn random_sid(prefix: &str) -> String {
    format!("{}{}", prefix, random_hex(SID_RAND_LEN))
}

/// To convert time to ISO8601 format with milliseconds precision (`YYYY-MM-DDThh:mm:ss.SSSZ`).
pub fn time_str(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// To convert time to the local `YYYYmmdd_HHMMSS` format for naming files.
pub fn file_time_str(time: &DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%Y%m%d_%H%M%S").to_string()
}
