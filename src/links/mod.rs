//! External map and navigation links.
//!
//! Builds Google Maps search and directions URLs for a mandal's address and
//! describes what the user sees when the platform cannot open them. Opening
//! the URL is fire-and-forget: the plugin shim runs the configured opener
//! command and reports back only success or failure.

use crate::domain::error::{MandalGuideError, Result};
use crate::domain::Mandal;
use std::fmt::Write as _;

const SEARCH_URL_PREFIX: &str = "https://www.google.com/maps/search/?api=1&query=";
const DIRECTIONS_URL_PREFIX: &str = "https://www.google.com/maps/dir/?api=1&destination=";

/// Which map action a link performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// Show the address on the map.
    Search,
    /// Start navigation to the address.
    Directions,
}

impl LinkKind {
    /// Stable tag used to route command results back to the right kind.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Search => "maps",
            Self::Directions => "directions",
        }
    }

    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "maps" => Some(Self::Search),
            "directions" => Some(Self::Directions),
            _ => None,
        }
    }
}

/// A URL ready to hand to the opener, plus what it is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapLink {
    pub kind: LinkKind,
    pub url: String,
    pub mandal_name: String,
}

impl MapLink {
    /// Map-search link for a mandal's address.
    #[must_use]
    pub fn search(mandal: &Mandal) -> Self {
        Self {
            kind: LinkKind::Search,
            url: map_search_url(&mandal.address),
            mandal_name: mandal.name.clone(),
        }
    }

    /// Directions link for a mandal's address.
    #[must_use]
    pub fn directions(mandal: &Mandal) -> Self {
        Self {
            kind: LinkKind::Directions,
            url: directions_url(&mandal.address),
            mandal_name: mandal.name.clone(),
        }
    }
}

/// How opening a link went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchFailure {
    /// The opener ran but declined the URL (non-zero exit).
    Unsupported,
    /// The opener could not be run at all.
    Errored,
}

/// Title and message of the alert raised for a failed launch.
#[must_use]
pub const fn failure_alert(kind: LinkKind, failure: LaunchFailure) -> (&'static str, &'static str) {
    match (kind, failure) {
        (LinkKind::Search, LaunchFailure::Unsupported) => {
            ("Maps Not Available", "Google Maps is not available on this device")
        }
        (LinkKind::Directions, LaunchFailure::Unsupported) => (
            "Navigation Not Available",
            "Google Maps navigation is not available on this device",
        ),
        (LinkKind::Search, LaunchFailure::Errored) => {
            ("Error", "Unable to open maps. Please try again.")
        }
        (LinkKind::Directions, LaunchFailure::Errored) => {
            ("Error", "Unable to open navigation. Please try again.")
        }
    }
}

/// Interprets the opener's exit status.
///
/// # Errors
///
/// Returns [`MandalGuideError::Launch`] when the opener exited non-zero or
/// never produced an exit code.
pub fn check_launch(exit_code: Option<i32>, stderr: &str) -> Result<()> {
    match exit_code {
        Some(0) => Ok(()),
        Some(code) => Err(MandalGuideError::Launch(format!(
            "opener exited with status {code}: {}",
            stderr.trim()
        ))),
        None => Err(MandalGuideError::Launch(format!(
            "opener did not run: {}",
            stderr.trim()
        ))),
    }
}

/// Maps a launch error onto the failure the user is told about.
#[must_use]
pub const fn classify_failure(exit_code: Option<i32>) -> LaunchFailure {
    match exit_code {
        Some(_) => LaunchFailure::Unsupported,
        None => LaunchFailure::Errored,
    }
}

/// `https://www.google.com/maps/search/?api=1&query=<address>`
#[must_use]
pub fn map_search_url(address: &str) -> String {
    format!("{SEARCH_URL_PREFIX}{}", encode_uri_component(address))
}

/// `https://www.google.com/maps/dir/?api=1&destination=<address>`
#[must_use]
pub fn directions_url(address: &str) -> String {
    format!("{DIRECTIONS_URL_PREFIX}{}", encode_uri_component(address))
}

/// Percent-encodes `input` like JavaScript's `encodeURIComponent`.
///
/// Leaves `A-Z a-z 0-9 - _ . ! ~ * ' ( )` alone and encodes every other UTF-8
/// byte as `%XX` with uppercase hex.
///
/// ```
/// use mandalguide::links::encode_uri_component;
///
/// assert_eq!(encode_uri_component("King's Circle, Mumbai"), "King's%20Circle%2C%20Mumbai");
/// ```
#[must_use]
pub fn encode_uri_component(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() || b"-_.!~*'()".contains(&byte) {
            encoded.push(char::from(byte));
        } else {
            let _ = write!(encoded, "%{byte:02X}");
        }
    }
    encoded
}
