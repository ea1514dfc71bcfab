//! Interactive review session.
//!
//! This module handles terminal presentation and user interaction.
//! State and flow logic live in the `session` module; saving notes is
//! delegated to the autosave engine in `notes`.

use crate::api::ReviewClient;
use crate::config::Config;
use crate::notes::{AutosaveEngine, AutosaveNotice, NotesSink};
use crate::preview;
use crate::render;
use crate::session::{AddOutcome, ReviewSession, SessionNotice};
use crate::transcribe::SimulatedTranscription;
use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};

#[derive(Debug, Clone, Copy)]
enum MenuAction {
    WatchVideo,
    EditNotes,
    SwitchMeeting,
    AddMeeting,
    DeleteMeeting,
    RefreshList,
    Quit,
}

pub async fn run(server_override: Option<String>) -> Result<()> {
    if !io::stdin().is_terminal() {
        info!("Non-interactive session. Use 'rivedi list' and friends for scripted access.");
        return Ok(());
    }

    let config = Config::load()?;
    let base_url = server_override.unwrap_or_else(|| config.server.base_url.clone());
    let client = Arc::new(
        ReviewClient::new(&base_url, Duration::from_secs(config.server.timeout_seconds))
            .context("Failed to build API client")?,
    );

    let transcriber = Arc::new(SimulatedTranscription::default());
    let (mut session, mut session_notices) = ReviewSession::new(client.clone(), transcriber)?;

    let (autosave_tx, mut autosave_notices) = mpsc::unbounded_channel();
    let engine = AutosaveEngine::spawn(
        client as Arc<dyn NotesSink>,
        Duration::from_millis(config.notes.autosave_quiet_ms),
        autosave_tx,
    );

    let theme = ColorfulTheme::default();

    println!();
    println!("Rivedi Meeting Review");
    println!("=====================");
    println!("Server: {}", base_url);

    if let Err(err) = session.load_initial().await {
        error!("Initial load failed: {:#}", err);
        println!("Could not load the first meeting.");
    }

    loop {
        drain_notices(&mut session, &mut session_notices, &mut autosave_notices).await;

        println!();
        println!("{}", session.list_view());
        println!();
        println!("{}", session.detail_view());
        println!();

        let mut actions: Vec<(&str, MenuAction)> = Vec::new();
        if session.active().is_some() {
            actions.push(("Watch video (export preview)", MenuAction::WatchVideo));
            actions.push(("Edit notes", MenuAction::EditNotes));
            actions.push(("Delete this meeting", MenuAction::DeleteMeeting));
        }
        if !session.meetings().is_empty() {
            actions.push(("Switch meeting", MenuAction::SwitchMeeting));
        }
        actions.push(("Add meeting", MenuAction::AddMeeting));
        actions.push(("Refresh list", MenuAction::RefreshList));
        actions.push(("Quit", MenuAction::Quit));

        let labels: Vec<&str> = actions.iter().map(|(label, _)| *label).collect();
        let choice = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[choice].1 {
            MenuAction::WatchVideo => export_preview(&session),
            MenuAction::EditNotes => edit_notes(&theme, &mut session, &engine).await?,
            MenuAction::SwitchMeeting => switch_meeting(&theme, &mut session).await?,
            MenuAction::AddMeeting => add_meeting(&theme, &mut session).await?,
            MenuAction::DeleteMeeting => delete_active(&theme, &mut session).await?,
            MenuAction::RefreshList => session.refresh_list().await,
            MenuAction::Quit => break,
        }
    }

    // Persist whatever the editor left pending before the task goes away.
    if let Err(err) = engine.flush().await {
        error!("Final flush failed: {:#}", err);
    }
    engine.shutdown().await;
    println!("Bye.");
    Ok(())
}

/// Print queued background events. Transcript completion refreshes the
/// list and, only when that meeting is still selected, the panels.
async fn drain_notices(
    session: &mut ReviewSession,
    session_notices: &mut mpsc::UnboundedReceiver<SessionNotice>,
    autosave_notices: &mut mpsc::UnboundedReceiver<AutosaveNotice>,
) {
    while let Ok(notice) = autosave_notices.try_recv() {
        match notice {
            AutosaveNotice::Saved { .. } => println!("Saved."),
            AutosaveNotice::SaveFailed { meeting_id } => {
                println!("Could not save notes for meeting #{}.", meeting_id);
            }
        }
    }

    while let Ok(notice) = session_notices.try_recv() {
        match notice {
            SessionNotice::TranscriptReady { meeting_id } => {
                println!("Transcript ready for meeting #{}.", meeting_id);
                session.refresh_list().await;
                if session.active_id() == Some(meeting_id) {
                    if let Err(err) = session.reload_active().await {
                        error!("Failed to reload meeting {}: {:#}", meeting_id, err);
                    }
                }
            }
            SessionNotice::TranscriptFailed { meeting_id } => {
                println!("Transcript generation failed for meeting #{}.", meeting_id);
            }
        }
    }
}

fn export_preview(session: &ReviewSession) {
    let active = match session.active() {
        Some(active) => active,
        None => return,
    };

    match preview::write_preview(&active.meeting, &active.embed) {
        Ok(path) => {
            println!("Preview written to {}", path.display());
            match preview::open_in_browser(&path) {
                Ok(true) => println!("Opening in your browser."),
                Ok(false) => println!("No browser opener found; open the file yourself."),
                Err(err) => {
                    error!("Failed to launch browser: {:#}", err);
                    println!("Could not open the preview.");
                }
            }
        }
        Err(err) => {
            error!("Failed to write preview: {:#}", err);
            println!("Could not export the preview.");
        }
    }
}

/// Line-based notes editor. Every change is handed to the autosave
/// engine; closing the editor flushes whatever is still pending.
async fn edit_notes(
    theme: &ColorfulTheme,
    session: &mut ReviewSession,
    engine: &AutosaveEngine,
) -> Result<()> {
    let (meeting_id, mut buffer) = match session.active() {
        Some(active) => (
            active.meeting.id,
            active.meeting.notes.clone().unwrap_or_default(),
        ),
        None => return Ok(()),
    };

    println!();
    println!("Notes for meeting #{}", meeting_id);
    println!("----------------------");
    if buffer.trim().is_empty() {
        println!("(empty)");
    } else {
        println!("{}", buffer);
    }
    println!();
    println!("Type lines to append. '-' removes the last line, '.' finishes.");

    loop {
        let line: String = Input::with_theme(theme)
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()?;

        match line.as_str() {
            "." => break,
            "-" => {
                let mut lines: Vec<&str> = buffer.lines().collect();
                lines.pop();
                buffer = lines.join("\n");
            }
            _ => {
                if !buffer.is_empty() {
                    buffer.push('\n');
                }
                buffer.push_str(&line);
            }
        }

        session.set_active_notes(buffer.clone());
        engine.submit(meeting_id, buffer.clone()).await?;
    }

    engine.flush().await?;
    Ok(())
}

async fn switch_meeting(theme: &ColorfulTheme, session: &mut ReviewSession) -> Result<()> {
    if session.meetings().is_empty() {
        return Ok(());
    }

    let rows = render::meeting_rows(session.meetings(), session.active_id());
    let ids: Vec<i64> = session.meetings().iter().map(|meeting| meeting.id).collect();

    let choice = Select::with_theme(theme)
        .with_prompt("Switch to")
        .items(&rows)
        .default(0)
        .interact()?;

    if let Err(err) = session.select(ids[choice]).await {
        error!("Select failed: {:#}", err);
        println!("Could not load meeting #{}.", ids[choice]);
    }
    Ok(())
}

async fn add_meeting(theme: &ColorfulTheme, session: &mut ReviewSession) -> Result<()> {
    println!();
    println!("New meeting");
    println!("-----------");

    let title: String = Input::with_theme(theme)
        .with_prompt("Title")
        .allow_empty(true)
        .interact_text()?;
    let video_url: String = Input::with_theme(theme)
        .with_prompt("Video URL")
        .allow_empty(true)
        .interact_text()?;
    let notes: String = Input::with_theme(theme)
        .with_prompt("Initial notes (optional)")
        .allow_empty(true)
        .interact_text()?;

    match session.submit_meeting(&title, &video_url, &notes).await {
        Ok(AddOutcome::Created { meeting_id }) => {
            println!(
                "Meeting #{} created. The transcript is being generated.",
                meeting_id
            );
        }
        Ok(AddOutcome::MissingFields) => {
            println!("Title and video URL are required. Nothing was sent.");
        }
        Err(err) => {
            error!("Add meeting failed: {:#}", err);
            println!("Could not add the meeting.");
        }
    }
    Ok(())
}

async fn delete_active(theme: &ColorfulTheme, session: &mut ReviewSession) -> Result<()> {
    let (id, title) = match session.active() {
        Some(active) => (active.meeting.id, active.meeting.title.clone()),
        None => return Ok(()),
    };

    session.request_delete(id);
    let confirmed = Confirm::with_theme(theme)
        .with_prompt(format!("Delete meeting #{} \"{}\"?", id, title))
        .default(false)
        .interact()?;

    if !confirmed {
        session.cancel_delete();
        println!("Deletion cancelled.");
        return Ok(());
    }

    match session.confirm_delete().await {
        Ok(Some(deleted)) => println!("Meeting #{} deleted.", deleted),
        Ok(None) => {}
        Err(err) => {
            error!("Delete failed: {:#}", err);
            println!("Could not delete the meeting.");
        }
    }
    Ok(())
}
