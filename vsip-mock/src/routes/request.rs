//! Request body validation.

use serde_json::{Map, Value};

use vsip_corelib::err::ErrResp;

use super::Resource;
use crate::libs::config::Trigger;

pub const TRUNK_FIELDS: [&'static str; 3] = ["trunk_name", "nso_code", "domain_name"];
pub const PHONE_NUMBER_FIELDS: [&'static str; 1] = ["phone_number"];
pub const WHITELISTED_IP_FIELDS: [&'static str; 2] = ["ip", "mask"];
pub const DESTINATION_URI_FIELDS: [&'static str; 1] = ["destinations"];
pub const SETTING_FIELDS: [&'static str; 1] = ["settings"];

/// To check that all required top-level keys exist. The error message names all missing keys.
pub fn check_required(body: &Map<String, Value>, required: &[&str]) -> Result<(), ErrResp> {
    let missing: Vec<&str> = required
        .iter()
        .filter(|field| !body.contains_key(**field))
        .map(|field| *field)
        .collect();
    match missing.len() {
        0 => Ok(()),
        _ => match required.len() {
            1 => Err(ErrResp::ErrParam(Some(format!(
                "Missing required field: {}",
                missing[0]
            )))),
            _ => Err(ErrResp::ErrParam(Some(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))),
        },
    }
}

/// To get a non-empty array field. Missing, non-array and empty values are treated as a missing
/// field.
pub fn get_non_empty_array<'a>(
    body: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a Vec<Value>, ErrResp> {
    match body.get(field) {
        Some(Value::Array(items)) if items.len() > 0 => Ok(items),
        _ => Err(ErrResp::ErrParam(Some(format!(
            "Missing required field: {}",
            field
        )))),
    }
}

/// To get a string field that has been checked by [`check_required`].
pub fn get_str<'a>(body: &'a Map<String, Value>, field: &str) -> Result<&'a str, ErrResp> {
    match body.get(field) {
        Some(Value::String(v)) => Ok(v.as_str()),
        _ => Err(ErrResp::ErrParam(Some(format!(
            "Invalid field type: {} must be a string",
            field
        )))),
    }
}

/// To apply simulated failures of the resource in order. The first matched trigger wins.
pub fn check_triggers(
    triggers: &[Trigger],
    resource: Resource,
    body: &Map<String, Value>,
) -> Result<(), ErrResp> {
    for trigger in triggers.iter() {
        if trigger.resource.ne(resource.as_str()) {
            continue;
        }
        let value = match body.get(trigger.field.as_str()) {
            Some(Value::String(v)) => v.to_lowercase(),
            _ => continue,
        };
        if value.contains(trigger.contains.to_lowercase().as_str()) {
            return Err(ErrResp::from_status(
                trigger.status,
                Some(trigger.message.clone()),
            ));
        }
    }
    Ok(())
}
