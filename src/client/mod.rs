use rand::Rng;
use serde::Deserialize;
use serde_json::json;

use crate::models::{Booking, BookingStatus, CabType, CreateBooking};
use crate::services::booking as rules;
use crate::services::fare::{self, FareQuote};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Api(String),
}

#[derive(Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

/// API client holding the last-fetched bookings in memory, newest first.
///
/// Mutations update the cache optimistically from the record the API
/// returns; no re-fetch is needed for consistency with this client's own
/// writes. Concurrent writers are not reconciled (last writer wins at the
/// store) until the next `refresh`. A failed call leaves the cache as it
/// was.
pub struct BookingClient {
    http: reqwest::Client,
    base_url: String,
    bookings: Vec<Booking>,
}

impl BookingClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bookings: Vec::new(),
        }
    }

    /// Base URL from `SWIFTCAB_API_URL`, defaulting to the local server.
    pub fn from_env() -> Self {
        let base_url = std::env::var("SWIFTCAB_API_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_string());
        Self::new(base_url)
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Cache lookup by storage id; no network.
    pub fn get_cached(&self, id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    /// Replace the cache with the server's current list.
    pub async fn refresh(&mut self) -> Result<&[Booking], ClientError> {
        let resp = self
            .http
            .get(format!("{}/api/bookings", self.base_url))
            .send()
            .await?;

        self.bookings = unwrap_envelope(resp).await?;
        Ok(&self.bookings)
    }

    pub async fn create(&mut self, req: &CreateBooking) -> Result<Booking, ClientError> {
        // Same rules the server applies; a past date or unknown cab type
        // never reaches the network.
        rules::validate(req).map_err(|e| ClientError::Validation(e.to_string()))?;

        let resp = self
            .http
            .post(format!("{}/api/bookings", self.base_url))
            .json(req)
            .send()
            .await?;

        let booking: Booking = unwrap_envelope(resp).await?;
        self.bookings.insert(0, booking.clone());
        Ok(booking)
    }

    pub async fn cancel(&mut self, id: &str) -> Result<Booking, ClientError> {
        let resp = self
            .http
            .delete(format!("{}/api/bookings/{id}", self.base_url))
            .send()
            .await?;

        let booking: Booking = unwrap_envelope(resp).await?;
        self.apply_update(booking.clone());
        Ok(booking)
    }

    pub async fn set_status(
        &mut self,
        id: &str,
        status: BookingStatus,
    ) -> Result<Booking, ClientError> {
        let resp = self
            .http
            .patch(format!("{}/api/bookings/{id}/status", self.base_url))
            .json(&json!({ "status": status.as_str() }))
            .send()
            .await?;

        let booking: Booking = unwrap_envelope(resp).await?;
        self.apply_update(booking.clone());
        Ok(booking)
    }

    /// Local fare estimate mirroring the server's fare math. Without an
    /// explicit distance, a stand-in is drawn from the same 5 to 25 mile
    /// range the server uses.
    pub fn estimate_fare(&self, cab_type: CabType, distance: Option<f64>) -> FareQuote {
        let distance = distance.unwrap_or_else(|| rand::thread_rng().gen_range(5.0..=25.0));
        fare::quote(cab_type, distance)
    }

    fn apply_update(&mut self, booking: Booking) {
        if let Some(slot) = self.bookings.iter_mut().find(|b| b.id == booking.id) {
            *slot = booking;
        }
    }
}

async fn unwrap_envelope<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    let envelope: Envelope<T> = resp
        .json()
        .await
        .map_err(|e| ClientError::Api(format!("malformed response: {e}")))?;

    if !status.is_success() || !envelope.success {
        let message = envelope
            .message
            .unwrap_or_else(|| format!("request failed with status {status}"));
        return Err(ClientError::Api(message));
    }

    envelope
        .data
        .ok_or_else(|| ClientError::Api("response missing data".to_string()))
}
