use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use log::{debug, info, warn};
use serde_json::{Map, Value};

use vsip_corelib::{err::ErrResp, http, strings};

use super::{Resource, State as AppState, match_route, request, response};

/// The entry of all requests.
///
/// - Methods other than `POST` are not implemented.
/// - The body must be a JSON object (or empty).
/// - The resource is resolved by the last path segment.
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    const FN_NAME: &'static str = "dispatch";

    info!("[{}] request: {} {}", FN_NAME, method, uri);

    let result = match method {
        Method::POST => route(&state, uri.path(), &body),
        _ => Err(ErrResp::ErrNotImplemented(Some(format!(
            "Unsupported method ('{}')",
            method
        )))),
    };
    match result {
        Err(e) => {
            warn!(
                "[{}] sent {} error: {}",
                FN_NAME,
                e.status_code().as_u16(),
                e.message()
            );
            e.into_response()
        }
        Ok((sid, resp)) => {
            info!("[{}] sent {} response: {}", FN_NAME, resp.status().as_u16(), sid);
            resp
        }
    }
}

/// Returns the SID and the response of the created resource.
fn route(state: &AppState, path: &str, body: &[u8]) -> Result<(String, Response), ErrResp> {
    const FN_NAME: &'static str = "route";

    let payload = http::parse_json_object(body)?;
    debug!(
        "[{}] payload: {}",
        FN_NAME,
        Value::Object(payload.clone()).to_string()
    );

    let segments = http::path_segments(path);
    let (resource, trunk_sid) = match match_route(&segments) {
        None => return Err(ErrResp::ErrNotFound(Some("Endpoint not found".to_string()))),
        Some(route) => route,
    };
    let trunk_sid = trunk_sid.unwrap_or("");

    match resource {
        Resource::Trunks => post_trunk(state, &payload),
        Resource::PhoneNumbers => post_phone_number(state, trunk_sid, &payload),
        Resource::WhitelistedIps => post_whitelisted_ip(state, trunk_sid, &payload),
        Resource::DestinationUris => post_destination_uri(state, trunk_sid, &payload),
        Resource::Settings => post_setting(state, trunk_sid, &payload),
    }
}

/// `POST /{base}/trunks`
fn post_trunk(state: &AppState, body: &Map<String, Value>) -> Result<(String, Response), ErrResp> {
    request::check_required(body, &request::TRUNK_FIELDS)?;
    let trunk_name = request::get_str(body, "trunk_name")?;
    request::check_triggers(&state.triggers, Resource::Trunks, body)?;

    let now = strings::time_str(&Utc::now());
    let data = response::PostTrunk {
        sid: strings::random_sid(Resource::Trunks.sid_prefix()),
        trunk_name: trunk_name.to_string(),
        nso_code: body.get("nso_code").cloned().unwrap_or(Value::Null),
        domain_name: body.get("domain_name").cloned().unwrap_or(Value::Null),
        status: response::STATUS_ACTIVE,
        created_at: now.clone(),
        updated_at: now,
    };
    Ok((data.sid.clone(), created(data)))
}

/// `POST /{base}/trunks/{trunkSid}/phone-numbers`
fn post_phone_number(
    state: &AppState,
    trunk_sid: &str,
    body: &Map<String, Value>,
) -> Result<(String, Response), ErrResp> {
    request::check_required(body, &request::PHONE_NUMBER_FIELDS)?;
    let phone_number = match body.get("phone_number") {
        Some(Value::String(v)) if v.starts_with('+') => v.as_str(),
        _ => {
            return Err(ErrResp::ErrParam(Some(
                "Phone number must start with +".to_string(),
            )));
        }
    };
    request::check_triggers(&state.triggers, Resource::PhoneNumbers, body)?;

    let data = response::PostPhoneNumber {
        sid: strings::random_sid(Resource::PhoneNumbers.sid_prefix()),
        phone_number: phone_number.to_string(),
        trunk_sid: trunk_sid.to_string(),
        status: response::STATUS_ACTIVE,
        created_at: strings::time_str(&Utc::now()),
    };
    Ok((data.sid.clone(), created(data)))
}

/// `POST /{base}/trunks/{trunkSid}/whitelisted-ips`
fn post_whitelisted_ip(
    state: &AppState,
    trunk_sid: &str,
    body: &Map<String, Value>,
) -> Result<(String, Response), ErrResp> {
    request::check_required(body, &request::WHITELISTED_IP_FIELDS)?;
    let ip = match body.get("ip") {
        Some(Value::String(v)) if strings::is_ipv4_octets(v.as_str()) => v.as_str(),
        _ => {
            return Err(ErrResp::ErrParam(Some(
                "Invalid IP address format".to_string(),
            )));
        }
    };
    request::check_triggers(&state.triggers, Resource::WhitelistedIps, body)?;

    let data = response::PostWhitelistedIp {
        sid: strings::random_sid(Resource::WhitelistedIps.sid_prefix()),
        ip: ip.to_string(),
        mask: body.get("mask").cloned().unwrap_or(Value::Null),
        trunk_sid: trunk_sid.to_string(),
        status: response::STATUS_ACTIVE,
        created_at: strings::time_str(&Utc::now()),
    };
    Ok((data.sid.clone(), created(data)))
}

/// `POST /{base}/trunks/{trunkSid}/destination-uris`
fn post_destination_uri(
    state: &AppState,
    trunk_sid: &str,
    body: &Map<String, Value>,
) -> Result<(String, Response), ErrResp> {
    request::check_required(body, &request::DESTINATION_URI_FIELDS)?;
    let destinations = request::get_non_empty_array(body, "destinations")?;
    for item in destinations.iter() {
        let destination = match item.get("destination") {
            None => {
                return Err(ErrResp::ErrParam(Some(
                    "Missing destination in destinations array".to_string(),
                )));
            }
            Some(destination) => destination,
        };
        match destination.as_str() {
            Some(v) if v.contains(':') => (),
            _ => {
                return Err(ErrResp::ErrParam(Some(
                    "Invalid destination format".to_string(),
                )));
            }
        }
    }
    request::check_triggers(&state.triggers, Resource::DestinationUris, body)?;

    let data = response::PostDestinationUri {
        sid: strings::random_sid(Resource::DestinationUris.sid_prefix()),
        destinations: destinations.clone(),
        trunk_sid: trunk_sid.to_string(),
        status: response::STATUS_ACTIVE,
        created_at: strings::time_str(&Utc::now()),
    };
    Ok((data.sid.clone(), created(data)))
}

/// `POST /{base}/trunks/{trunkSid}/settings`
fn post_setting(
    state: &AppState,
    trunk_sid: &str,
    body: &Map<String, Value>,
) -> Result<(String, Response), ErrResp> {
    request::check_required(body, &request::SETTING_FIELDS)?;
    let settings = request::get_non_empty_array(body, "settings")?;
    for item in settings.iter() {
        if item.get("name").is_none() || item.get("value").is_none() {
            return Err(ErrResp::ErrParam(Some(
                "Invalid setting format".to_string(),
            )));
        }
    }
    request::check_triggers(&state.triggers, Resource::Settings, body)?;

    let data = response::PostSetting {
        sid: strings::random_sid(Resource::Settings.sid_prefix()),
        settings: settings.clone(),
        trunk_sid: trunk_sid.to_string(),
        status: response::STATUS_ACTIVE,
        created_at: strings::time_str(&Utc::now()),
    };
    Ok((data.sid.clone(), created(data)))
}

fn created<T: serde::Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}
