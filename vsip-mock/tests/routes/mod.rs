use laboratory::{SpecContext, Suite, describe, expect};
use tokio::runtime::Runtime;

use vsip_mock::{
    libs::config::{self, Config},
    routes::{self, Resource},
};

use crate::TestState;

mod api;

pub const STATE: &'static str = "routes";

pub fn suite() -> Suite<TestState> {
    describe("routes", |context| {
        context.it("match_route", match_route);
        context.it("new_state", new_state);

        context.describe("api", |context| {
            context.it("POST trunks", api::post_trunk);
            context.it("POST trunks with missing fields", api::post_trunk_missing);
            context.it("POST trunks with simulated failures", api::post_trunk_triggers);
            context.it("POST phone-numbers", api::post_phone_number);
            context.it(
                "POST phone-numbers with invalid numbers",
                api::post_phone_number_invalid,
            );
            context.it("POST whitelisted-ips", api::post_whitelisted_ip);
            context.it(
                "POST whitelisted-ips with invalid addresses",
                api::post_whitelisted_ip_invalid,
            );
            context.it("POST destination-uris", api::post_destination_uri);
            context.it(
                "POST destination-uris with invalid destinations",
                api::post_destination_uri_invalid,
            );
            context.it("POST settings", api::post_setting);
            context.it("POST settings with invalid settings", api::post_setting_invalid);
            context.it("unknown endpoints", api::not_found);
            context.it("unsupported methods", api::not_implemented);
            context.it("invalid JSON", api::invalid_json);
            context.it("large bodies", api::large_body);
            context.it("custom triggers", api::custom_triggers);
            context.it("provisioning workflow", api::workflow);
        });

        context.before_all(|state| {
            let runtime = Runtime::new().unwrap();
            let routes_state = runtime
                .block_on(async { routes::new_state(&Config::default()).await })
                .unwrap();
            state.insert(
                STATE,
                TestState {
                    runtime: Some(runtime),
                    routes_state: Some(routes_state),
                },
            );
        });
    })
}

/// Test [`routes::match_route`].
fn match_route(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    let base = "v2/accounts/acc";
    let cases = vec![
        (format!("{}/trunks", base), Some((Resource::Trunks, None))),
        ("a/b/trunks".to_string(), Some((Resource::Trunks, None))),
        ("b/trunks".to_string(), None),
        (
            format!("{}/trunks/TR1/phone-numbers", base),
            Some((Resource::PhoneNumbers, Some("TR1"))),
        ),
        (
            format!("{}/trunks/TR2/whitelisted-ips", base),
            Some((Resource::WhitelistedIps, Some("TR2"))),
        ),
        (
            format!("{}/trunks/TR3/destination-uris", base),
            Some((Resource::DestinationUris, Some("TR3"))),
        ),
        (
            format!("{}/trunks/TR4/settings", base),
            Some((Resource::Settings, Some("TR4"))),
        ),
        ("a/b/c/settings".to_string(), None),
        (format!("{}/trunks/TR5/unknown", base), None),
        (String::new(), None),
    ];
    for (path, expected) in cases.iter() {
        let segments: Vec<&str> = path.split('/').filter(|s| s.len() > 0).collect();
        let route = routes::match_route(&segments);
        expect(route).to_equal(expected.clone())?;
    }
    Ok(())
}

/// Test [`routes::new_state`].
fn new_state(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    let runtime = Runtime::new().unwrap();

    let state = runtime
        .block_on(async { routes::new_state(&Config::default()).await })
        .unwrap();
    expect(state.triggers).to_equal(config::default_triggers())?;

    let state = runtime
        .block_on(async {
            routes::new_state(&Config {
                triggers: Some(vec![]),
            })
            .await
        })
        .unwrap();
    expect(state.triggers.len()).to_equal(0)
}
