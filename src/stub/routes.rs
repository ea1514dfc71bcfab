//! Route handlers for the demo stub.
//!
//! One resource, five operations:
//! - `GET    /api/riunioni`      - list summaries
//! - `POST   /api/riunioni`      - create, returns the stored record
//! - `GET    /api/riunioni/:id`  - full meeting including transcript
//! - `PUT    /api/riunioni/:id`  - partial update (notes, transcript)
//! - `DELETE /api/riunioni/:id`  - remove

use crate::meeting::{MeetingSummary, MeetingUpdate, NewMeeting};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tracing::info;

use super::error::StubError;
use super::store::{MeetingStore, StoredMeeting};

pub fn router(store: MeetingStore) -> Router {
    Router::new()
        .route("/api/riunioni", get(list_meetings).post(create_meeting))
        .route(
            "/api/riunioni/:id",
            get(get_meeting).put(update_meeting).delete(delete_meeting),
        )
        .with_state(store)
}

async fn list_meetings(State(store): State<MeetingStore>) -> Json<Vec<MeetingSummary>> {
    Json(store.list().await)
}

async fn get_meeting(
    Path(id): Path<i64>,
    State(store): State<MeetingStore>,
) -> Result<Json<StoredMeeting>, StubError> {
    match store.get(id).await {
        Some(stored) => Ok(Json(stored)),
        None => Err(StubError::not_found(format!("Meeting {} not found", id))),
    }
}

async fn create_meeting(
    State(store): State<MeetingStore>,
    Json(body): Json<NewMeeting>,
) -> Result<(StatusCode, Json<StoredMeeting>), StubError> {
    if body.title.trim().is_empty() || body.video_url.trim().is_empty() {
        return Err(StubError::bad_request(
            "titolo_chiamata and video_riunione are required",
        ));
    }

    let stored = store.insert(body).await;
    info!(
        "Created meeting {} ({})",
        stored.meeting.id, stored.meeting.title
    );
    Ok((StatusCode::CREATED, Json(stored)))
}

async fn update_meeting(
    Path(id): Path<i64>,
    State(store): State<MeetingStore>,
    Json(body): Json<MeetingUpdate>,
) -> Result<Json<StoredMeeting>, StubError> {
    match store.update(id, body).await {
        Some(stored) => Ok(Json(stored)),
        None => Err(StubError::not_found(format!("Meeting {} not found", id))),
    }
}

async fn delete_meeting(
    Path(id): Path<i64>,
    State(store): State<MeetingStore>,
) -> Result<Json<Value>, StubError> {
    if store.remove(id).await {
        info!("Deleted meeting {}", id);
        Ok(Json(json!({ "success": true })))
    } else {
        Err(StubError::not_found(format!("Meeting {} not found", id)))
    }
}
