//! Client of vSIP trunk provisioning APIs.
//!
//! - [`api::http`] is the underlying HTTP client that handles authentication and error bodies.
//! - Other modules of [`api`] provide one typed function for each provisioning operation.

pub mod api;
