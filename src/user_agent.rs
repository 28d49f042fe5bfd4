//! User-Agent string for listing and download requests.

/// Project URL for User-Agent identification (RFC 9308 good citizenship).
const PROJECT_UA_URL: &str = "https://github.com/fierce/listing-harvester";

/// Default User-Agent for all harvester traffic (identifies the tool).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("listing-harvester/{version} (+{PROJECT_UA_URL})")
}
