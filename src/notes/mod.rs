//! Debounced notes autosave.
//!
//! Edits are collapsed behind a quiet period: each new edit replaces
//! the pending one and restarts the timer, so only the final value of
//! a burst is persisted. The saved notice is emitted when the timer
//! fires, before the save request completes. Saves run one at a time
//! in arrival order; failures are logged and reported once, never
//! retried.

use crate::api::ReviewClient;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

/// Default quiet period between the last edit and the save.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(1500);

/// Destination for debounced note saves.
#[async_trait]
pub trait NotesSink: Send + Sync {
    async fn save_notes(&self, meeting_id: i64, text: &str) -> Result<()>;
}

#[async_trait]
impl NotesSink for ReviewClient {
    async fn save_notes(&self, meeting_id: i64, text: &str) -> Result<()> {
        self.update_notes(meeting_id, text).await?;
        Ok(())
    }
}

/// User-visible autosave events, drained by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutosaveNotice {
    /// The quiet period elapsed and a save was issued.
    Saved { meeting_id: i64 },
    /// A save request came back with an error.
    SaveFailed { meeting_id: i64 },
}

/// A single notes edit, bound to the meeting it belongs to.
#[derive(Debug, Clone)]
struct NoteEdit {
    meeting_id: i64,
    text: String,
}

enum Command {
    Edit(NoteEdit),
    Flush(oneshot::Sender<()>),
}

/// Handle to the autosave task.
pub struct AutosaveEngine {
    tx: mpsc::Sender<Command>,
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

impl AutosaveEngine {
    /// Spawn the autosave task. Notices are delivered on `notices`.
    pub fn spawn(
        sink: Arc<dyn NotesSink>,
        quiet_period: Duration,
        notices: mpsc::UnboundedSender<AutosaveNotice>,
    ) -> Self {
        let (tx, rx) = mpsc::channel(32);
        let shutdown = CancellationToken::new();
        let task = tokio::spawn(run(rx, sink, quiet_period, notices, shutdown.clone()));
        Self { tx, shutdown, task }
    }

    /// Record an edit; the save happens once the quiet period elapses
    /// with no further edits.
    pub async fn submit(&self, meeting_id: i64, text: impl Into<String>) -> Result<()> {
        self.tx
            .send(Command::Edit(NoteEdit {
                meeting_id,
                text: text.into(),
            }))
            .await
            .map_err(|_| anyhow::anyhow!("autosave engine is not running"))
    }

    /// Save any pending edit immediately and wait for the attempt to
    /// finish. Used when the notes editor closes.
    pub async fn flush(&self) -> Result<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx
            .send(Command::Flush(ack_tx))
            .await
            .map_err(|_| anyhow::anyhow!("autosave engine is not running"))?;
        ack_rx
            .await
            .map_err(|_| anyhow::anyhow!("autosave engine stopped during flush"))?;
        Ok(())
    }

    /// Stop the task. A pending edit that has not reached its deadline
    /// is dropped; call [`flush`](Self::flush) first to keep it.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        let _ = self.task.await;
    }
}

async fn run(
    mut rx: mpsc::Receiver<Command>,
    sink: Arc<dyn NotesSink>,
    quiet_period: Duration,
    notices: mpsc::UnboundedSender<AutosaveNotice>,
    shutdown: CancellationToken,
) {
    let mut pending: Option<NoteEdit> = None;
    let mut deadline = Instant::now();

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,

            command = rx.recv() => match command {
                Some(Command::Edit(edit)) => {
                    debug!("Note edit for meeting {} ({} chars)", edit.meeting_id, edit.text.len());
                    pending = Some(edit);
                    deadline = Instant::now() + quiet_period;
                }
                Some(Command::Flush(ack)) => {
                    if let Some(edit) = pending.take() {
                        save_one(sink.as_ref(), edit, &notices).await;
                    }
                    let _ = ack.send(());
                }
                None => {
                    if let Some(edit) = pending.take() {
                        save_one(sink.as_ref(), edit, &notices).await;
                    }
                    break;
                }
            },

            _ = sleep_until(deadline), if pending.is_some() => {
                if let Some(edit) = pending.take() {
                    save_one(sink.as_ref(), edit, &notices).await;
                }
            }
        }
    }
}

/// The notice goes out first; the save is awaited afterwards, so a
/// slow request never delays the notice and saves stay ordered.
async fn save_one(
    sink: &dyn NotesSink,
    edit: NoteEdit,
    notices: &mpsc::UnboundedSender<AutosaveNotice>,
) {
    let _ = notices.send(AutosaveNotice::Saved {
        meeting_id: edit.meeting_id,
    });

    match sink.save_notes(edit.meeting_id, &edit.text).await {
        Ok(()) => debug!("Saved notes for meeting {}", edit.meeting_id),
        Err(err) => {
            error!("Failed to save notes for meeting {}: {:#}", edit.meeting_id, err);
            let _ = notices.send(AutosaveNotice::SaveFailed {
                meeting_id: edit.meeting_id,
            });
        }
    }
}
