use axum::http::StatusCode;
use axum_test::TestServer;
use laboratory::{SpecContext, expect};
use serde_json::{Value, json};
use tokio::runtime::Runtime;

use vsip_mock::{
    libs::config::{Config, Trigger},
    routes::{self, State},
};

use super::STATE;
use crate::TestState;

const BASE: &'static str = "/v2/accounts/test_account/trunks";

fn new_server(state: &State) -> TestServer {
    TestServer::new(routes::new_service(state)).expect("failed to create test server")
}

/// Sends a POST request and returns the status code and the JSON body.
fn post(
    runtime: &Runtime,
    server: &TestServer,
    path: &str,
    body: &Value,
) -> Result<(StatusCode, Value), String> {
    let resp = runtime.block_on(async { server.post(path).json(body).await });
    let status = resp.status_code();
    match serde_json::from_str::<Value>(resp.text().as_str()) {
        Err(e) => Err(format!("response body is not JSON: {}", e)),
        Ok(body) => Ok((status, body)),
    }
}

/// To check the error body format.
fn expect_error(
    result: (StatusCode, Value),
    status: StatusCode,
    message: &str,
) -> Result<(), String> {
    let (code, body) = result;
    expect(code).to_equal(status)?;
    expect(body["error"].as_str()).to_equal(Some("API Error"))?;
    expect(body["message"].as_str()).to_equal(Some(message))?;
    expect(body["status_code"].as_u64()).to_equal(Some(status.as_u16() as u64))?;
    expect(body["timestamp"].is_string()).to_equal(true)
}

fn expect_sid(body: &Value, prefix: &str) -> Result<(), String> {
    let sid = match body["sid"].as_str() {
        None => return Err("no sid".to_string()),
        Some(sid) => sid,
    };
    expect(sid.starts_with(prefix)).to_equal(true)?;
    expect(sid.len()).to_equal(prefix.len() + 8)
}

fn trunk_body(trunk_name: &str) -> Value {
    json!({
        "trunk_name": trunk_name,
        "nso_code": "ANY-ANY",
        "domain_name": "test_account.pstn.exotel.com",
    })
}

pub fn post_trunk(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let server = new_server(state.routes_state.as_ref().unwrap());

    let (status, body) = post(runtime, &server, BASE, &trunk_body("my_trunk"))?;
    expect(status).to_equal(StatusCode::CREATED)?;
    expect_sid(&body, "TR")?;
    expect(body["trunk_name"].as_str()).to_equal(Some("my_trunk"))?;
    expect(body["nso_code"].as_str()).to_equal(Some("ANY-ANY"))?;
    expect(body["domain_name"].as_str()).to_equal(Some("test_account.pstn.exotel.com"))?;
    expect(body["status"].as_str()).to_equal(Some("active"))?;
    expect(body["created_at"].is_string()).to_equal(true)?;
    expect(body["created_at"].clone()).to_equal(body["updated_at"].clone())?;

    let (_, body2) = post(runtime, &server, BASE, &trunk_body("my_trunk"))?;
    expect(body2["sid"].as_str() == body["sid"].as_str()).to_equal(false)?;

    // Trailing slashes and query strings are ignored.
    let path = format!("{}/?debug=1", BASE);
    let (status, _) = post(runtime, &server, path.as_str(), &trunk_body("my_trunk"))?;
    expect(status).to_equal(StatusCode::CREATED)
}

pub fn post_trunk_missing(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let server = new_server(state.routes_state.as_ref().unwrap());

    let result = post(runtime, &server, BASE, &json!({"trunk_name": "t"}))?;
    expect_error(
        result,
        StatusCode::BAD_REQUEST,
        "Missing required fields: nso_code, domain_name",
    )?;

    let result = post(runtime, &server, BASE, &json!({}))?;
    expect_error(
        result,
        StatusCode::BAD_REQUEST,
        "Missing required fields: trunk_name, nso_code, domain_name",
    )?;

    for field in ["trunk_name", "nso_code", "domain_name"] {
        let mut body = trunk_body("my_trunk");
        if let Some(map) = body.as_object_mut() {
            map.remove(field);
        }
        let result = post(runtime, &server, BASE, &body)?;
        let message = format!("Missing required fields: {}", field);
        expect_error(result, StatusCode::BAD_REQUEST, message.as_str())?;
    }

    let body = json!({"trunk_name": 1, "nso_code": "ANY-ANY", "domain_name": "d"});
    let result = post(runtime, &server, BASE, &body)?;
    expect_error(
        result,
        StatusCode::BAD_REQUEST,
        "Invalid field type: trunk_name must be a string",
    )
}

pub fn post_trunk_triggers(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let server = new_server(state.routes_state.as_ref().unwrap());

    let result = post(runtime, &server, BASE, &trunk_body("my_ERROR_trunk"))?;
    expect_error(result, StatusCode::BAD_REQUEST, "Invalid trunk name")?;
    let result = post(runtime, &server, BASE, &trunk_body("conflict_trunk"))?;
    expect_error(result, StatusCode::CONFLICT, "Trunk name already exists")?;
    let result = post(runtime, &server, BASE, &trunk_body("forbidden_trunk"))?;
    expect_error(result, StatusCode::FORBIDDEN, "Access denied")?;

    // The first matched trigger wins.
    let result = post(runtime, &server, BASE, &trunk_body("forbidden_conflict"))?;
    expect_error(result, StatusCode::CONFLICT, "Trunk name already exists")
}

pub fn post_phone_number(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let server = new_server(state.routes_state.as_ref().unwrap());

    let path = format!("{}/TRABCDEF12/phone-numbers", BASE);
    let body = json!({"phone_number": "+919876543210"});
    let (status, body) = post(runtime, &server, path.as_str(), &body)?;
    expect(status).to_equal(StatusCode::CREATED)?;
    expect_sid(&body, "PN")?;
    expect(body["phone_number"].as_str()).to_equal(Some("+919876543210"))?;
    expect(body["trunk_sid"].as_str()).to_equal(Some("TRABCDEF12"))?;
    expect(body["status"].as_str()).to_equal(Some("active"))
}

pub fn post_phone_number_invalid(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let server = new_server(state.routes_state.as_ref().unwrap());

    let path = format!("{}/TR1/phone-numbers", BASE);
    let path = path.as_str();
    let result = post(runtime, &server, path, &json!({}))?;
    expect_error(
        result,
        StatusCode::BAD_REQUEST,
        "Missing required field: phone_number",
    )?;
    let result = post(runtime, &server, path, &json!({"phone_number": "919876543210"}))?;
    expect_error(
        result,
        StatusCode::BAD_REQUEST,
        "Phone number must start with +",
    )?;
    let result = post(runtime, &server, path, &json!({"phone_number": 919876543210u64}))?;
    expect_error(
        result,
        StatusCode::BAD_REQUEST,
        "Phone number must start with +",
    )?;
    let result = post(runtime, &server, path, &json!({"phone_number": "+91invalid"}))?;
    expect_error(result, StatusCode::BAD_REQUEST, "Invalid phone number format")?;
    let result = post(runtime, &server, path, &json!({"phone_number": "+91UNAVAILABLE"}))?;
    expect_error(
        result,
        StatusCode::UNPROCESSABLE_ENTITY,
        "Phone number not available",
    )
}

pub fn post_whitelisted_ip(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let server = new_server(state.routes_state.as_ref().unwrap());

    let path = format!("{}/TR1/whitelisted-ips", BASE);
    let body = json!({"ip": "192.168.1.100", "mask": 32});
    let (status, body) = post(runtime, &server, path.as_str(), &body)?;
    expect(status).to_equal(StatusCode::CREATED)?;
    expect_sid(&body, "WL")?;
    expect(body["ip"].as_str()).to_equal(Some("192.168.1.100"))?;
    expect(body["mask"].as_u64()).to_equal(Some(32))?;
    expect(body["trunk_sid"].as_str()).to_equal(Some("TR1"))
}

pub fn post_whitelisted_ip_invalid(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let server = new_server(state.routes_state.as_ref().unwrap());

    let path = format!("{}/TR1/whitelisted-ips", BASE);
    let path = path.as_str();
    let result = post(runtime, &server, path, &json!({"ip": "1.2.3.4"}))?;
    expect_error(
        result,
        StatusCode::BAD_REQUEST,
        "Missing required fields: mask",
    )?;
    let result = post(runtime, &server, path, &json!({"mask": 32}))?;
    expect_error(result, StatusCode::BAD_REQUEST, "Missing required fields: ip")?;
    let result = post(runtime, &server, path, &json!({}))?;
    expect_error(
        result,
        StatusCode::BAD_REQUEST,
        "Missing required fields: ip, mask",
    )?;
    for ip in ["256.1.1.1", "a.b.c.d", "1.2..4", ""] {
        let result = post(runtime, &server, path, &json!({"ip": ip, "mask": 32}))?;
        expect_error(result, StatusCode::BAD_REQUEST, "Invalid IP address format")?;
    }
    Ok(())
}

pub fn post_destination_uri(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let server = new_server(state.routes_state.as_ref().unwrap());

    let path = format!("{}/TR1/destination-uris", BASE);
    let destinations = json!([
        {"destination": "1.2.3.4:5060"},
        {"destination": "1.2.3.4:5060;transport=tcp"},
        {"destination": "1.2.3.4:5061;transport=tls"},
    ]);
    let body = json!({"destinations": destinations.clone()});
    let (status, body) = post(runtime, &server, path.as_str(), &body)?;
    expect(status).to_equal(StatusCode::CREATED)?;
    expect_sid(&body, "DU")?;
    expect(body["destinations"].clone()).to_equal(destinations)?;
    expect(body["trunk_sid"].as_str()).to_equal(Some("TR1"))
}

pub fn post_destination_uri_invalid(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let server = new_server(state.routes_state.as_ref().unwrap());

    let path = format!("{}/TR1/destination-uris", BASE);
    let path = path.as_str();
    for body in [
        json!({}),
        json!({"destinations": []}),
        json!({"destinations": "1.2.3.4:5060"}),
    ] {
        let result = post(runtime, &server, path, &body)?;
        expect_error(
            result,
            StatusCode::BAD_REQUEST,
            "Missing required field: destinations",
        )?;
    }
    let body = json!({"destinations": [{"uri": "1.2.3.4:5060"}]});
    let result = post(runtime, &server, path, &body)?;
    expect_error(
        result,
        StatusCode::BAD_REQUEST,
        "Missing destination in destinations array",
    )?;
    let body = json!({"destinations": [{"destination": "1.2.3.4:5060"}, {"destination": "1.2.3.4"}]});
    let result = post(runtime, &server, path, &body)?;
    expect_error(result, StatusCode::BAD_REQUEST, "Invalid destination format")
}

pub fn post_setting(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let server = new_server(state.routes_state.as_ref().unwrap());

    let path = format!("{}/TR1/settings", BASE);
    let settings = json!([{"name": "trunk_external_alias", "value": "+918000000000"}]);
    let body = json!({"settings": settings.clone()});
    let (status, body) = post(runtime, &server, path.as_str(), &body)?;
    expect(status).to_equal(StatusCode::CREATED)?;
    expect_sid(&body, "TS")?;
    expect(body["settings"].clone()).to_equal(settings)?;
    expect(body["trunk_sid"].as_str()).to_equal(Some("TR1"))
}

pub fn post_setting_invalid(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let server = new_server(state.routes_state.as_ref().unwrap());

    let path = format!("{}/TR1/settings", BASE);
    let path = path.as_str();
    let result = post(runtime, &server, path, &json!({"settings": []}))?;
    expect_error(
        result,
        StatusCode::BAD_REQUEST,
        "Missing required field: settings",
    )?;
    let body = json!({"settings": [{"name": "trunk_external_alias"}]});
    let result = post(runtime, &server, path, &body)?;
    expect_error(result, StatusCode::BAD_REQUEST, "Invalid setting format")
}

pub fn not_found(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let server = new_server(state.routes_state.as_ref().unwrap());

    for path in ["/unknown", "/", "/trunks", "/a/trunks/TR1/settings"] {
        let result = post(runtime, &server, path, &json!({}))?;
        expect_error(result, StatusCode::NOT_FOUND, "Endpoint not found")?;
    }
    Ok(())
}

pub fn not_implemented(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let server = new_server(state.routes_state.as_ref().unwrap());

    let resp = runtime.block_on(async { server.get(BASE).await });
    expect(resp.status_code()).to_equal(StatusCode::NOT_IMPLEMENTED)?;
    let body: Value = resp.json();
    expect(body["message"].as_str()).to_equal(Some("Unsupported method ('GET')"))?;

    let path = format!("{}/TR1", BASE);
    let resp = runtime.block_on(async { server.delete(path.as_str()).await });
    expect(resp.status_code()).to_equal(StatusCode::NOT_IMPLEMENTED)
}

pub fn invalid_json(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let server = new_server(state.routes_state.as_ref().unwrap());

    for text in ["{", "[1, 2]", "\"trunk\""] {
        let resp = runtime.block_on(async { server.post(BASE).text(text).await });
        expect(resp.status_code()).to_equal(StatusCode::BAD_REQUEST)?;
        let body: Value = resp.json();
        expect(body["message"].as_str()).to_equal(Some("Invalid JSON"))?;
    }

    // An empty body is an empty object.
    let resp = runtime.block_on(async { server.post(BASE).await });
    expect(resp.status_code()).to_equal(StatusCode::BAD_REQUEST)?;
    let body: Value = resp.json();
    expect(body["message"].as_str())
        .to_equal(Some("Missing required fields: trunk_name, nso_code, domain_name"))
}

pub fn large_body(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let server = new_server(state.routes_state.as_ref().unwrap());

    let trunk_name = "t".repeat(3 * 1024 * 1024);
    let (status, body) = post(runtime, &server, BASE, &trunk_body(trunk_name.as_str()))?;
    expect(status).to_equal(StatusCode::CREATED)?;
    expect_sid(&body, "TR")?;
    expect(body["trunk_name"].as_str().map(|v| v.len())).to_equal(Some(trunk_name.len()))?;

    // Large bodies are parsed before validation.
    let body = json!({"trunk_name": trunk_name, "nso_code": "ANY-ANY"});
    let result = post(runtime, &server, BASE, &body)?;
    expect_error(
        result,
        StatusCode::BAD_REQUEST,
        "Missing required fields: domain_name",
    )
}

pub fn custom_triggers(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();

    let conf = Config {
        triggers: Some(vec![Trigger {
            resource: "whitelisted-ips".to_string(),
            field: "ip".to_string(),
            contains: "10.".to_string(),
            status: 503,
            message: "Service busy".to_string(),
        }]),
    };
    let routes_state = match runtime.block_on(async { routes::new_state(&conf).await }) {
        Err(e) => return Err(format!("new state error: {}", e)),
        Ok(state) => state,
    };
    let server = new_server(&routes_state);

    let path = format!("{}/TR1/whitelisted-ips", BASE);
    let body = json!({"ip": "10.0.0.1", "mask": 32});
    let result = post(runtime, &server, path.as_str(), &body)?;
    expect_error(result, StatusCode::SERVICE_UNAVAILABLE, "Service busy")?;

    // Default triggers are replaced.
    let (status, _) = post(runtime, &server, BASE, &trunk_body("conflict_trunk"))?;
    expect(status).to_equal(StatusCode::CREATED)?;

    let conf = Config {
        triggers: Some(vec![]),
    };
    let routes_state = match runtime.block_on(async { routes::new_state(&conf).await }) {
        Err(e) => return Err(format!("new state error: {}", e)),
        Ok(state) => state,
    };
    let server = new_server(&routes_state);
    let (status, _) = post(runtime, &server, BASE, &trunk_body("error_trunk"))?;
    expect(status).to_equal(StatusCode::CREATED)
}

/// Create a trunk and then configure it with all sub-resources.
pub fn workflow(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let server = new_server(state.routes_state.as_ref().unwrap());

    let (status, body) = post(runtime, &server, BASE, &trunk_body("demo_trunk"))?;
    expect(status).to_equal(StatusCode::CREATED)?;
    let trunk_sid = match body["sid"].as_str() {
        None => return Err("no trunk sid".to_string()),
        Some(sid) => sid.to_string(),
    };

    let steps = vec![
        ("phone-numbers", json!({"phone_number": "+919876543210"})),
        ("whitelisted-ips", json!({"ip": "192.168.1.100", "mask": 32})),
        (
            "destination-uris",
            json!({"destinations": [{"destination": "192.168.1.100:5060"}]}),
        ),
        (
            "settings",
            json!({"settings": [{"name": "trunk_external_alias", "value": "+918000000000"}]}),
        ),
    ];
    for (suffix, body) in steps.iter() {
        let path = format!("{}/{}/{}", BASE, trunk_sid, suffix);
        let (status, body) = post(runtime, &server, path.as_str(), body)?;
        expect(status).to_equal(StatusCode::CREATED)?;
        expect(body["trunk_sid"].as_str()).to_equal(Some(trunk_sid.as_str()))?;
    }
    Ok(())
}
