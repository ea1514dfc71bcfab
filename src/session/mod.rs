//! Review session state and operations.
//!
//! Owns what the review screen shows: the meeting list, the active
//! selection, the inline list error, and the pending-deletion slot.
//! Terminal-free, so the flows can be exercised directly in tests;
//! the interactive front-end in `app` drives it and prints the views.

use crate::api::ReviewClient;
use crate::meeting::{Meeting, MeetingSummary, NewMeeting};
use crate::render;
use crate::transcribe::TranscriptionService;
use crate::video::{EmbedResolver, VideoEmbed};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

/// Events produced by background work the session spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotice {
    /// The simulated transcription finished and was stored.
    TranscriptReady { meeting_id: i64 },
    /// Transcription or the follow-up store failed.
    TranscriptFailed { meeting_id: i64 },
}

/// Outcome of an add-meeting attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Created; the transcript will arrive in the background.
    Created { meeting_id: i64 },
    /// Title or URL missing; nothing was sent to the server.
    MissingFields,
}

/// The selected meeting plus its resolved video embed.
pub struct ActiveMeeting {
    pub meeting: Meeting,
    pub embed: VideoEmbed,
}

pub struct ReviewSession {
    client: Arc<ReviewClient>,
    transcriber: Arc<dyn TranscriptionService>,
    resolver: EmbedResolver,
    notice_tx: mpsc::UnboundedSender<SessionNotice>,
    meetings: Vec<MeetingSummary>,
    list_error: Option<String>,
    active: Option<ActiveMeeting>,
    pending_delete: Option<i64>,
}

impl ReviewSession {
    /// Create a session; the receiver carries notices from background
    /// transcription tasks.
    pub fn new(
        client: Arc<ReviewClient>,
        transcriber: Arc<dyn TranscriptionService>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<SessionNotice>)> {
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();
        let session = Self {
            client,
            transcriber,
            resolver: EmbedResolver::new()?,
            notice_tx,
            meetings: Vec::new(),
            list_error: None,
            active: None,
            pending_delete: None,
        };
        Ok((session, notice_rx))
    }

    pub fn meetings(&self) -> &[MeetingSummary] {
        &self.meetings
    }

    pub fn active(&self) -> Option<&ActiveMeeting> {
        self.active.as_ref()
    }

    pub fn active_id(&self) -> Option<i64> {
        self.active.as_ref().map(|active| active.meeting.id)
    }

    pub fn list_error(&self) -> Option<&str> {
        self.list_error.as_deref()
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    /// The sidebar as text: rows with the active marker, or the inline
    /// error row after a failed load.
    pub fn list_view(&self) -> String {
        render::list_view(&self.meetings, self.active_id(), self.list_error())
    }

    /// The detail panels as text.
    pub fn detail_view(&self) -> String {
        match &self.active {
            Some(active) => render::detail_view(&active.meeting, &active.embed),
            None => render::NO_SELECTION_MESSAGE.to_string(),
        }
    }

    /// Reload the meeting list. Failure leaves the inline error row in
    /// place of the entries; it is logged and not retried.
    pub async fn refresh_list(&mut self) {
        match self.client.list().await {
            Ok(meetings) => {
                info!("Loaded {} meetings", meetings.len());
                self.meetings = meetings;
                self.list_error = None;
            }
            Err(err) => {
                error!("Failed to load meetings: {:#}", err);
                self.meetings.clear();
                self.list_error = Some(render::LIST_ERROR_ROW.to_string());
            }
        }
    }

    /// Load the list and select its first entry, as on startup.
    pub async fn load_initial(&mut self) -> Result<()> {
        self.refresh_list().await;
        self.select_first().await
    }

    /// Select the first list entry, if any.
    pub async fn select_first(&mut self) -> Result<()> {
        if let Some(first_id) = self.meetings.first().map(|meeting| meeting.id) {
            self.select(first_id).await?;
        }
        Ok(())
    }

    /// Fetch a meeting and make it the active selection. Always goes to
    /// the server, even when the id is already selected.
    pub async fn select(&mut self, id: i64) -> Result<()> {
        let meeting = self
            .client
            .fetch(id)
            .await
            .with_context(|| format!("Failed to load meeting {}", id))?;
        let embed = self.resolver.resolve(&meeting.video_url);
        self.active = Some(ActiveMeeting { meeting, embed });
        Ok(())
    }

    /// Re-fetch the active meeting, if there is one.
    pub async fn reload_active(&mut self) -> Result<()> {
        if let Some(id) = self.active_id() {
            self.select(id).await?;
        }
        Ok(())
    }

    /// Keep the cached copy of the active meeting's notes in step with
    /// what the user typed. The save itself goes through the autosave
    /// engine.
    pub fn set_active_notes(&mut self, text: String) {
        if let Some(active) = self.active.as_mut() {
            active.meeting.notes = Some(text);
        }
    }

    /// Validate and create a meeting, then hand the transcript work to
    /// a background task. Empty title or URL stops before any request.
    pub async fn submit_meeting(
        &mut self,
        title: &str,
        video_url: &str,
        notes: &str,
    ) -> Result<AddOutcome> {
        let title = title.trim();
        let video_url = video_url.trim();
        if title.is_empty() || video_url.is_empty() {
            return Ok(AddOutcome::MissingFields);
        }

        let created = self
            .client
            .create(&NewMeeting {
                title: title.to_string(),
                video_url: video_url.to_string(),
                notes: notes.trim().to_string(),
            })
            .await
            .context("Failed to create meeting")?;
        info!("Created meeting {} ({})", created.id, created.title);

        self.spawn_transcription(created.clone());

        self.refresh_list().await;
        if let Err(err) = self.select(created.id).await {
            error!("Failed to load new meeting {}: {:#}", created.id, err);
        }

        Ok(AddOutcome::Created {
            meeting_id: created.id,
        })
    }

    /// Put a meeting into the pending-deletion slot (the confirm step).
    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    /// Empty the pending-deletion slot without deleting.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete whatever is in the pending-deletion slot. The slot is
    /// emptied either way. Removes the list entry on success and, only
    /// if it was the active selection, clears the detail panels.
    pub async fn confirm_delete(&mut self) -> Result<Option<i64>> {
        let id = match self.pending_delete.take() {
            Some(id) => id,
            None => return Ok(None),
        };

        self.client
            .delete(id)
            .await
            .with_context(|| format!("Failed to delete meeting {}", id))?;
        info!("Deleted meeting {}", id);

        self.meetings.retain(|meeting| meeting.id != id);
        if self.active_id() == Some(id) {
            self.active = None;
        }
        Ok(Some(id))
    }

    /// Not cancelled if the user navigates elsewhere; completion is
    /// reported through the notice channel.
    fn spawn_transcription(&self, meeting: Meeting) {
        let client = self.client.clone();
        let transcriber = self.transcriber.clone();
        let notices = self.notice_tx.clone();

        tokio::spawn(async move {
            let meeting_id = meeting.id;
            match generate_and_store(client, transcriber, meeting).await {
                Ok(()) => {
                    info!("Transcript stored for meeting {}", meeting_id);
                    let _ = notices.send(SessionNotice::TranscriptReady { meeting_id });
                }
                Err(err) => {
                    error!(
                        "Transcript generation failed for meeting {}: {:#}",
                        meeting_id, err
                    );
                    let _ = notices.send(SessionNotice::TranscriptFailed { meeting_id });
                }
            }
        });
    }
}

async fn generate_and_store(
    client: Arc<ReviewClient>,
    transcriber: Arc<dyn TranscriptionService>,
    meeting: Meeting,
) -> Result<()> {
    let transcript = transcriber.transcribe(&meeting).await?;
    client.update_transcript(meeting.id, transcript).await?;
    Ok(())
}
