//! URL helpers for niconico Live
//!
//! Provides the service base URL, the timeshift-reservations embed path,
//! and the watch-page URL builder.

/// Base URL of the niconico Live service
pub const LIVE_BASE_URL: &str = "https://live.nicovideo.jp";

/// Path of the embed page listing the user's timeshift reservations
pub const TIMESHIFT_RESERVATIONS_PATH: &str = "/embed/timeshift-reservations";

/// Builds the watch-page URL for a broadcast program
///
/// # Arguments
/// * `program_id` - Opaque program identifier (e.g., "lv123456789")
///
/// # Returns
/// Full URL to the watch page
///
/// # Example
/// ```
/// use nicolive_core::url::build_watch_url;
/// let url = build_watch_url("lv123456789");
/// assert_eq!(url, "https://live.nicovideo.jp/watch/lv123456789");
/// ```
pub fn build_watch_url(program_id: &str) -> String {
    format!("{}/watch/{}", LIVE_BASE_URL, program_id)
}
