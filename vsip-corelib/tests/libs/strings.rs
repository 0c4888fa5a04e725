use chrono::{TimeZone, Utc};
use laboratory::{SpecContext, expect};

use vsip_corelib::strings;

use crate::TestState;

/// Test [`strings::is_ipv4_octets`].
pub fn is_ipv4_octets(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    expect(strings::is_ipv4_octets("192.168.1.100")).to_equal(true)?;
    expect(strings::is_ipv4_octets("0.0.0.0")).to_equal(true)?;
    expect(strings::is_ipv4_octets("255.255.255.255")).to_equal(true)?;
    expect(strings::is_ipv4_octets("256.1.1.1")).to_equal(false)?;
    expect(strings::is_ipv4_octets("1.-1.1.1")).to_equal(false)?;
    expect(strings::is_ipv4_octets("a.b.c.d")).to_equal(false)?;
    expect(strings::is_ipv4_octets("1..1.1")).to_equal(false)?;
    expect(strings::is_ipv4_octets("")).to_equal(false)
}

/// Test [`strings::random_hex`].
pub fn random_hex(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    let hex = strings::random_hex(8);
    expect(hex.len()).to_equal(8)?;
    expect(
        hex.chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)),
    )
    .to_equal(true)?;
    expect(strings::random_hex(0)).to_equal("".to_string())
}

/// Test [`strings::random_sid`].
pub fn random_sid(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    let sid = strings::random_sid("TR");
    expect(sid.starts_with("TR")).to_equal(true)?;
    expect(sid.len()).to_equal(2 + strings::SID_RAND_LEN)?;
    expect(strings::random_sid("PN")).to_not_equal(strings::random_sid("PN"))
}

/// Test [`strings::time_str`].
pub fn time_str(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    let timestamp = match Utc.timestamp_millis_opt(1704067200123).single() {
        None => return Err("invalid timestamp".to_string()),
        Some(timestamp) => timestamp,
    };
    expect(strings::time_str(&timestamp)).to_equal("2024-01-01T00:00:00.123Z".to_string())
}

/// Test [`strings::file_time_str`].
pub fn file_time_str(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    let str = strings::file_time_str(&Utc::now());
    expect(str.len()).to_equal(15)?;
    expect(str.chars().nth(8)).to_equal(Some('_'))
}
