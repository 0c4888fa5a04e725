use std::error::Error as StdError;

use axum::{Router, extract::DefaultBodyLimit};
use tower::limit::ConcurrencyLimitLayer;

use crate::libs::config::{self, Config, Trigger};

mod api;
mod request;
mod response;

pub use api::dispatch;

/// The resources used by this service.
#[derive(Clone)]
pub struct State {
    /// The simulated failures.
    pub triggers: Vec<Trigger>,
}

/// The provisioning resources that the mock accepts. The resource is determined by the last path
/// segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resource {
    Trunks,
    PhoneNumbers,
    WhitelistedIps,
    DestinationUris,
    Settings,
}

/// Routing rules. The first matching rule wins.
const ROUTES: [Resource; 5] = [
    Resource::Trunks,
    Resource::PhoneNumbers,
    Resource::WhitelistedIps,
    Resource::DestinationUris,
    Resource::Settings,
];

/// Requests are served one at a time.
const MAX_IN_FLIGHT: usize = 1;

impl Resource {
    /// The last path segment of the resource.
    pub fn as_str(&self) -> &'static str {
        match *self {
            Resource::Trunks => "trunks",
            Resource::PhoneNumbers => "phone-numbers",
            Resource::WhitelistedIps => "whitelisted-ips",
            Resource::DestinationUris => "destination-uris",
            Resource::Settings => "settings",
        }
    }

    /// The prefix of generated SIDs.
    pub fn sid_prefix(&self) -> &'static str {
        match *self {
            Resource::Trunks => "TR",
            Resource::PhoneNumbers => "PN",
            Resource::WhitelistedIps => "WL",
            Resource::DestinationUris => "DU",
            Resource::Settings => "TS",
        }
    }

    /// The minimum number of path segments. For example `v2/accounts/{account}/trunks` for trunks
    /// and `v2/accounts/{account}/trunks/{trunk}/settings` for trunk sub-resources.
    fn min_segments(&self) -> usize {
        match *self {
            Resource::Trunks => 3,
            _ => 5,
        }
    }
}

/// To resolve the resource and the trunk SID (the segment before the suffix for trunk
/// sub-resources) from path segments.
pub fn match_route<'a>(segments: &[&'a str]) -> Option<(Resource, Option<&'a str>)> {
    let last = segments.last()?;
    for resource in ROUTES {
        if segments.len() < resource.min_segments() || *last != resource.as_str() {
            continue;
        }
        let trunk_sid = match resource {
            Resource::Trunks => None,
            _ => Some(segments[segments.len() - 2]),
        };
        return Some((resource, trunk_sid));
    }
    None
}

/// To create resources for the service.
pub async fn new_state(conf: &Config) -> Result<State, Box<dyn StdError>> {
    let conf = config::apply_default(conf);
    Ok(State {
        triggers: match conf.triggers {
            None => vec![],
            Some(triggers) => triggers,
        },
    })
}

/// To register the service. All requests go to [`dispatch`] one by one. Request bodies have no
/// size limit.
pub fn new_service(state: &State) -> Router {
    Router::new()
        .fallback(api::dispatch)
        .with_state(state.clone())
        .layer(DefaultBodyLimit::disable())
        .layer(ConcurrencyLimitLayer::new(MAX_IN_FLIGHT))
}
