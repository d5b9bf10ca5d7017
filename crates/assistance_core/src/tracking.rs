//! crates/assistance_core/src/tracking.rs
//!
//! Tracking codes: the public identifier printed on an applicant's receipt.
//! Format is `<PREFIX>-<unix millis>-<5 uppercase alphanumerics>`.

use chrono::{DateTime, Utc};
use rand::{distributions::Alphanumeric, Rng};

use crate::ports::TrackingCodeSource;

pub const DEFAULT_PREFIX: &str = "SA";
pub const SUFFIX_LENGTH: usize = 5;

/// Produces codes from the current time and a thread-local RNG.
#[derive(Debug, Clone)]
pub struct RandomTrackingCodes {
    prefix: String,
}

impl RandomTrackingCodes {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for RandomTrackingCodes {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl TrackingCodeSource for RandomTrackingCodes {
    fn next_code(&self, now: DateTime<Utc>) -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SUFFIX_LENGTH)
            .map(char::from)
            .collect::<String>()
            .to_uppercase();
        format!("{}-{}-{}", self.prefix, now.timestamp_millis(), suffix)
    }
}

/// The pieces of a well-formed tracking code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingCodeParts<'a> {
    pub prefix: &'a str,
    pub millis: i64,
    pub suffix: &'a str,
}

/// Splits a code into its parts, or returns `None` when it is malformed.
pub fn parse_tracking_code(code: &str) -> Option<TrackingCodeParts<'_>> {
    let mut parts = code.splitn(3, '-');
    let prefix = parts.next()?;
    let millis = parts.next()?;
    let suffix = parts.next()?;

    if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }
    if millis.is_empty() || !millis.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let suffix_ok = suffix.len() == SUFFIX_LENGTH
        && suffix
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
    if !suffix_ok {
        return None;
    }

    Some(TrackingCodeParts {
        prefix,
        millis: millis.parse().ok()?,
        suffix,
    })
}
