//! Main API for niconico Live timeshift reservations
//!
//! Combines the HTTP client and the embedded-data extractor into a single
//! fetch-and-decode operation.

use futures::TryStreamExt;
use serde::Deserialize;
use tracing::debug;

use crate::client::{ClientConfig, NicoliveClient};
use crate::error::Result;
use crate::parser::EmbeddedDataScanner;
use crate::types::TimeshiftReservation;
use crate::url::TIMESHIFT_RESERVATIONS_PATH;

/// High-level client for niconico Live embed pages
///
/// Holds only an immutable HTTP client, so concurrent calls on one
/// instance are safe; each call opens and consumes its own response
/// stream independently.
pub struct NicoliveScraper {
    client: NicoliveClient,
}

impl NicoliveScraper {
    /// Create a new unauthenticated scraper with default configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        let client = NicoliveClient::new()?;
        Ok(Self { client })
    }

    /// Create a new scraper with custom configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails or the session
    /// token is not a valid cookie value
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = NicoliveClient::with_config(config)?;
        Ok(Self { client })
    }

    /// Create a new scraper authenticated with a `user_session` cookie value
    ///
    /// # Errors
    /// Returns error if the session token is not a valid cookie value
    pub fn with_user_session(user_session: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig {
            user_session: Some(user_session.into()),
            ..ClientConfig::default()
        })
    }

    /// Fetch the authenticated user's timeshift reservations
    ///
    /// Retrieves the embed page, scans the streamed body for the
    /// embedded-data payload (stopping the transfer as soon as it is
    /// found), and decodes it. Records are returned in document order.
    ///
    /// The operation is a single future: dropping it, or racing it against
    /// a caller-supplied timeout, aborts the request in flight. The
    /// response body is closed on every exit path.
    ///
    /// # Errors
    /// - `Http` - network-level failure
    /// - `UnexpectedStatus` - status other than 200
    /// - `DataNotFound` - page carries no embedded-data payload, which
    ///   also happens when the session is invalid or expired
    /// - `Decode` - payload JSON or timestamp format mismatch; no partial
    ///   list is returned
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> nicolive_core::Result<()> {
    /// use nicolive_core::NicoliveScraper;
    /// let scraper = NicoliveScraper::with_user_session("your-session-cookie")?;
    /// for reservation in scraper.timeshift_reservations().await? {
    ///     println!("{}: {}", reservation.program.title, reservation.watch_url());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn timeshift_reservations(&self) -> Result<Vec<TimeshiftReservation>> {
        let response = self.client.get(TIMESHIFT_RESERVATIONS_PATH).await?;

        let mut body = response.bytes_stream();
        let mut scanner = EmbeddedDataScanner::new();
        let mut props = None;
        while let Some(chunk) = body.try_next().await? {
            if let Some(value) = scanner.push(&chunk) {
                props = Some(value);
                break;
            }
        }
        let props = match props {
            Some(value) => value,
            None => scanner.finish()?,
        };
        // Dropping the stream here closes the connection even when the
        // payload was found mid-document.
        drop(body);

        let envelope: EmbeddedProps = serde_json::from_str(&props)?;
        let reservations = envelope.reservations.reservations;
        debug!(count = reservations.len(), "decoded timeshift reservations");
        Ok(reservations)
    }
}

/// Payload envelope: `{"reservations": {"reservations": [...]}}`
#[derive(Debug, Deserialize)]
struct EmbeddedProps {
    reservations: ReservationsSection,
}

#[derive(Debug, Deserialize)]
struct ReservationsSection {
    reservations: Vec<TimeshiftReservation>,
}
