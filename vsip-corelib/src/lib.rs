//! Common libraries of the vSIP provisioning toolkit.

pub mod err;
pub mod http;
pub mod logger;
pub mod server_config;
pub mod strings;
