//! Core data types for the niconico Live client
//!
//! Contains the reservation records decoded from the embedded-data payload.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::url::build_watch_url;

/// Represents one timeshift reservation of the authenticated user
///
/// Decoded fresh on every fetch; a plain value object whose only identity
/// is its `program_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeshiftReservation {
    /// Opaque program identifier (e.g., "lv123456789"); non-empty in
    /// well-formed payloads
    pub program_id: String,

    /// The reserved broadcast program
    pub program: Program,

    /// Community/channel owning the broadcast
    pub social_group: SocialGroup,
}

/// Broadcast program metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Human-readable program title
    pub title: String,

    /// Broadcast schedule window
    pub schedule: Schedule,
}

/// Schedule window of a broadcast program
///
/// Timestamps carry the platform's UTC offset (`+0900`) and are kept in
/// that offset rather than converted to UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// When the broadcast begins
    #[serde(with = "timestamp")]
    pub begin_time: DateTime<FixedOffset>,

    /// When the broadcast ends
    #[serde(with = "timestamp")]
    pub end_time: DateTime<FixedOffset>,

    /// When the stream page opens, ahead of `begin_time`
    #[serde(with = "timestamp")]
    pub open_time: DateTime<FixedOffset>,

    /// Platform-defined schedule status, passed through verbatim
    pub status: String,
}

/// Community/channel owning a broadcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialGroup {
    /// Human-readable community/channel name
    pub name: String,
}

impl TimeshiftReservation {
    /// Returns the watch-page URL of the reserved program
    ///
    /// # Example
    /// ```
    /// # use nicolive_core::TimeshiftReservation;
    /// # fn demo(reservation: &TimeshiftReservation) {
    /// // For program_id "lv123456789":
    /// // https://live.nicovideo.jp/watch/lv123456789
    /// let url = reservation.watch_url();
    /// # }
    /// ```
    pub fn watch_url(&self) -> String {
        build_watch_url(&self.program_id)
    }
}

/// Timestamp format used by the embedded-data payload:
/// `2024-05-04T19:00:00+0900` (numeric UTC offset, no colon)
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

mod timestamp {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S>(value: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_str(&text, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
