use clap::Command;
use laboratory::{SpecContext, expect};

use vsip_mock::libs::config::{self, Config, Trigger};

use super::{remove_env_var, set_env_var};
use crate::TestState;

fn trigger(field: &str, contains: &str, status: u16) -> Trigger {
    Trigger {
        resource: "trunks".to_string(),
        field: field.to_string(),
        contains: contains.to_string(),
        status,
        message: "Simulated".to_string(),
    }
}

/// Test [`config::apply_default`].
pub fn apply_default(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    let conf = config::apply_default(&Config::default());
    expect(conf.triggers).to_equal(Some(config::default_triggers()))?;

    let conf = config::apply_default(&Config {
        triggers: Some(vec![]),
    });
    expect(conf.triggers).to_equal(Some(vec![]))?;

    let conf = config::apply_default(&Config {
        triggers: Some(vec![
            trigger("trunk_name", "busy", 503),
            trigger("trunk_name", "ok", 200),
            trigger("trunk_name", "big", 600),
            trigger("", "empty", 400),
            trigger("trunk_name", "", 400),
        ]),
    });
    expect(conf.triggers).to_equal(Some(vec![trigger("trunk_name", "busy", 503)]))
}

/// Test [`config::default_triggers`].
pub fn default_triggers(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    let triggers = config::default_triggers();
    expect(triggers.len()).to_equal(5)?;

    let found: Vec<(&str, &str, u16)> = triggers
        .iter()
        .map(|t| (t.resource.as_str(), t.contains.as_str(), t.status))
        .collect();
    expect(found).to_equal(vec![
        ("trunks", "error", 400),
        ("trunks", "conflict", 409),
        ("trunks", "forbidden", 403),
        ("phone-numbers", "invalid", 400),
        ("phone-numbers", "unavailable", 422),
    ])
}

/// Test [`config::reg_args`].
pub fn reg_args(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    config::reg_args(Command::new("test"));
    Ok(())
}

/// Test [`config::read_args`].
pub fn read_args(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    let cmd = config::reg_args(Command::new("test"));
    let args = match cmd.clone().try_get_matches_from(vec!["test"]) {
        Err(e) => return Err(format!("parse args error: {}", e)),
        Ok(args) => args,
    };

    remove_env_var("MOCK_TRIGGERS");
    let conf = config::read_args(&args);
    expect(conf.triggers).to_equal(Some(config::default_triggers()))?;

    set_env_var("MOCK_TRIGGERS", "[");
    let conf = config::read_args(&args);
    expect(conf.triggers).to_equal(Some(config::default_triggers()))?;

    set_env_var("MOCK_TRIGGERS", "[]");
    let conf = config::read_args(&args);
    expect(conf.triggers).to_equal(Some(vec![]))?;

    set_env_var(
        "MOCK_TRIGGERS",
        r#"[{"resource":"trunks","field":"trunk_name","contains":"busy","status":503,"message":"Simulated"}]"#,
    );
    let conf = config::read_args(&args);
    expect(conf.triggers).to_equal(Some(vec![trigger("trunk_name", "busy", 503)]))?;

    let args = match cmd.clone().try_get_matches_from(vec!["test", "--mock.triggers", "[]"]) {
        Err(e) => return Err(format!("parse args error: {}", e)),
        Ok(args) => args,
    };
    let conf = config::read_args(&args);
    remove_env_var("MOCK_TRIGGERS");
    expect(conf.triggers).to_equal(Some(vec![]))?;

    if cmd
        .try_get_matches_from(vec!["test", "--mock.triggers", "{}"])
        .is_ok()
    {
        return Err("triggers must be an array".to_string());
    }
    Ok(())
}
