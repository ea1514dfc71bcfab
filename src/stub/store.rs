//! In-memory meeting store backing the demo stub.

use crate::meeting::{Meeting, MeetingSummary, MeetingUpdate, NewMeeting};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A stored meeting: the wire fields plus the creation timestamp the
/// original service kept alongside them.
#[derive(Debug, Clone, Serialize)]
pub struct StoredMeeting {
    #[serde(flatten)]
    pub meeting: Meeting,
    pub created_at: String,
}

#[derive(Default)]
struct StoreInner {
    next_id: i64,
    meetings: BTreeMap<i64, StoredMeeting>,
}

/// Shared store; ids are assigned from a counter starting at 1 and
/// never reused within a run.
#[derive(Clone, Default)]
pub struct MeetingStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl MeetingStore {
    pub async fn list(&self) -> Vec<MeetingSummary> {
        let inner = self.inner.lock().await;
        inner
            .meetings
            .values()
            .map(|stored| MeetingSummary {
                id: stored.meeting.id,
                title: stored.meeting.title.clone(),
            })
            .collect()
    }

    pub async fn get(&self, id: i64) -> Option<StoredMeeting> {
        let inner = self.inner.lock().await;
        inner.meetings.get(&id).cloned()
    }

    pub async fn insert(&self, new: NewMeeting) -> StoredMeeting {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let id = inner.next_id;
        let stored = StoredMeeting {
            meeting: Meeting {
                id,
                title: new.title,
                video_url: new.video_url,
                notes: Some(new.notes),
                transcript: None,
            },
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        inner.meetings.insert(id, stored.clone());
        stored
    }

    /// Merge a partial update into a stored meeting. Only the fields
    /// present in the body change.
    pub async fn update(&self, id: i64, update: MeetingUpdate) -> Option<StoredMeeting> {
        let mut inner = self.inner.lock().await;
        let stored = inner.meetings.get_mut(&id)?;
        if let Some(notes) = update.notes {
            stored.meeting.notes = Some(notes);
        }
        if let Some(transcript) = update.transcript {
            stored.meeting.transcript = Some(transcript);
        }
        Some(stored.clone())
    }

    pub async fn remove(&self, id: i64) -> bool {
        let mut inner = self.inner.lock().await;
        inner.meetings.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.meetings.len()
    }

    /// Install the sample fixtures: motivational titles, YouTube watch
    /// URLs, an initial note, and a one-segment transcript apiece.
    pub async fn seed(&self) {
        for (title, video_url) in SEED_MEETINGS {
            let stored = self
                .insert(NewMeeting {
                    title: title.to_string(),
                    video_url: video_url.to_string(),
                    notes: format!("Initial note: Remember \"{}\"", title),
                })
                .await;

            let index = stored.meeting.id;
            self.update(
                index,
                MeetingUpdate::transcript(crate::meeting::Transcript {
                    full_text: Some(title.to_string()),
                    description: Some(format!("Sample transcript for meeting {}.", index)),
                    segments: vec![crate::meeting::Segment {
                        start: 0.0,
                        end: 5.0,
                        text: title.to_string(),
                    }],
                }),
            )
            .await;
        }
    }
}

const SEED_MEETINGS: [(&str, &str); 6] = [
    (
        "Success is not final, failure is not fatal: it is the courage to continue that counts.",
        "https://www.youtube.com/watch?v=ZXsQAXx_ao0",
    ),
    (
        "The way to get started is to quit talking and begin doing.",
        "https://www.youtube.com/watch?v=UF8uR6Z6KLc",
    ),
    (
        "Don't watch the clock; do what it does. Keep going.",
        "https://www.youtube.com/watch?v=HAnw168huqA",
    ),
    (
        "The secret of getting ahead is getting started.",
        "https://www.youtube.com/watch?v=6s-hIylOTJk",
    ),
    (
        "It always seems impossible until it's done.",
        "https://www.youtube.com/watch?v=AR7MmO0wrw4",
    ),
    (
        "Opportunities don't happen. You create them.",
        "https://www.youtube.com/watch?v=p6PjzV_1BFs",
    ),
];
