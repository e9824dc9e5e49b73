//! niconico Live Client Core Library
//!
//! Provides an async API for reading the authenticated user's timeshift
//! reservations from live.nicovideo.jp.
//!
//! # Overview
//!
//! The reservation list is not served by a JSON API. The embed page at
//! `/embed/timeshift-reservations` ships it server-rendered, HTML-escaped
//! into the `data-props` attribute of a `<script id="embedded-data">` tag.
//! This crate provides:
//! - An HTTP client that attaches a pre-obtained `user_session` cookie
//! - A streaming extractor that scans the page token by token and stops
//!   reading as soon as the payload is found
//! - Typed reservation records with schedule timestamps parsed into
//!   `chrono` types
//!
//! Obtaining the `user_session` cookie (logging in) is out of scope; copy
//! it from a browser session or another tool.
//!
//! # Example
//!
//! ```no_run
//! use nicolive_core::{NicoliveScraper, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = NicoliveScraper::with_user_session("your-session-cookie")?;
//!
//!     for reservation in scraper.timeshift_reservations().await? {
//!         println!(
//!             "{} [{}] {}",
//!             reservation.program.schedule.begin_time,
//!             reservation.social_group.name,
//!             reservation.program.title,
//!         );
//!         println!("  {}", reservation.watch_url());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every failure stage has its own [`NicoliveError`] variant, so callers
//! can tell an expired session (`DataNotFound`, because the platform
//! renders a different page) from a schema change upstream (`Decode`).
//! Nothing is retried internally.

mod client;
mod error;
pub mod parser;
mod scraper;
mod types;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, NicoliveClient};

// Re-export error types
pub use error::{NicoliveError, Result};

// Re-export parser API
pub use parser::{EmbeddedDataScanner, extract_embedded_data};

// Re-export main scraper API
pub use scraper::NicoliveScraper;

// Re-export data types
pub use types::{Program, Schedule, SocialGroup, TimeshiftReservation};

// Re-export URL helpers for convenience
pub use url::{LIVE_BASE_URL, TIMESHIFT_RESERVATIONS_PATH, build_watch_url};
