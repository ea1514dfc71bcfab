//! HTTP client for the meetings service.
//!
//! Thin typed wrapper over the `/api/riunioni` REST resource: list,
//! fetch one, create, partial update (notes or transcript), delete.
//! All requests and responses are JSON.

pub mod error;

pub use error::ApiError;

use crate::meeting::{Meeting, MeetingSummary, MeetingUpdate, NewMeeting, Transcript};
use serde::Deserialize;
use std::time::Duration;

/// Client for the meetings service.
pub struct ReviewClient {
    client: reqwest::Client,
    base_url: String,
}

/// Error body shape the service uses (`{"error": true, "message": ...}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl ReviewClient {
    /// Create a client for the service at `base_url` (scheme + host +
    /// port, no path).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/api/riunioni", self.base_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/api/riunioni/{}", self.base_url, id)
    }

    /// `GET /api/riunioni`
    pub async fn list(&self) -> Result<Vec<MeetingSummary>, ApiError> {
        let response = self.client.get(self.collection_url()).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// `GET /api/riunioni/{id}`
    pub async fn fetch(&self, id: i64) -> Result<Meeting, ApiError> {
        let response = self.client.get(self.item_url(id)).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// `POST /api/riunioni`
    pub async fn create(&self, meeting: &NewMeeting) -> Result<Meeting, ApiError> {
        let response = self
            .client
            .post(self.collection_url())
            .json(meeting)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// `PUT /api/riunioni/{id}` with a partial body.
    pub async fn update(&self, id: i64, update: &MeetingUpdate) -> Result<Meeting, ApiError> {
        let response = self
            .client
            .put(self.item_url(id))
            .json(update)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// Update only the notes field of a meeting.
    pub async fn update_notes(&self, id: i64, notes: &str) -> Result<Meeting, ApiError> {
        self.update(id, &MeetingUpdate::notes(notes)).await
    }

    /// Update only the transcript of a meeting.
    pub async fn update_transcript(
        &self,
        id: i64,
        transcript: Transcript,
    ) -> Result<Meeting, ApiError> {
        self.update(id, &MeetingUpdate::transcript(transcript)).await
    }

    /// `DELETE /api/riunioni/{id}`
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let response = self.client.delete(self.item_url(id)).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

/// Map any non-2xx response to [`ApiError::Server`], pulling the
/// message out of the JSON error body when one is present. No status
/// code gets special treatment.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|parsed| parsed.message)
        .unwrap_or(body);
    let message = if message.trim().is_empty() {
        "unknown error".to_string()
    } else {
        message
    };

    Err(ApiError::Server {
        status: status.as_u16(),
        message,
    })
}
