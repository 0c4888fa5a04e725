//! A mock of the vSIP trunk provisioning API.
//!
//! The mock serves `POST` requests only and routes them by the last path segment:
//! - `POST /v2/accounts/{account_sid}/trunks`
//! - `POST /v2/accounts/{account_sid}/trunks/{trunk_sid}/phone-numbers`
//! - `POST /v2/accounts/{account_sid}/trunks/{trunk_sid}/whitelisted-ips`
//! - `POST /v2/accounts/{account_sid}/trunks/{trunk_sid}/destination-uris`
//! - `POST /v2/accounts/{account_sid}/trunks/{trunk_sid}/settings`
//!
//! Nothing is stored. Each created resource is synthesized with a fresh SID.

pub mod libs;
pub mod routes;
