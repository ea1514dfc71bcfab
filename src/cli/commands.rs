//! One-shot CLI command handlers.
//!
//! Each command talks to the meetings server over HTTP and prints to
//! stdout. The interactive session in `app` covers the same flows
//! behind a menu.

use crate::api::ReviewClient;
use crate::config::Config;
use crate::meeting::{Meeting, NewMeeting};
use crate::preview;
use crate::render;
use crate::stub::StubServer;
use crate::transcribe::{SimulatedTranscription, TranscriptionService};
use crate::video::EmbedResolver;
use anyhow::{anyhow, bail, Context, Result};
use arboard::Clipboard;
use dialoguer::{theme::ColorfulTheme, Confirm};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, IsTerminal};
use std::process::Command;
use std::time::Duration;
use tracing::info;

fn build_client(config: &Config, server_override: Option<&str>) -> Result<ReviewClient> {
    let base_url = server_override.unwrap_or(&config.server.base_url);
    ReviewClient::new(base_url, Duration::from_secs(config.server.timeout_seconds))
        .context("Failed to build API client")
}

pub async fn handle_list(server: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let client = build_client(&config, server.as_deref())?;

    let meetings = client.list().await.context("Failed to load meetings")?;
    if meetings.is_empty() {
        println!("{}", render::EMPTY_LIST_MESSAGE);
        return Ok(());
    }

    for meeting in &meetings {
        println!("#{} {}", meeting.id, meeting.title);
    }
    Ok(())
}

pub async fn handle_show(server: Option<String>, id: i64, copy: bool) -> Result<()> {
    let config = Config::load()?;
    let client = build_client(&config, server.as_deref())?;
    let resolver = EmbedResolver::new()?;

    let meeting = client
        .fetch(id)
        .await
        .with_context(|| format!("Failed to load meeting {}", id))?;
    let embed = resolver.resolve(&meeting.video_url);

    println!("{}", render::detail_view(&meeting, &embed));

    if copy {
        copy_transcript(&meeting)?;
    }
    Ok(())
}

fn copy_transcript(meeting: &Meeting) -> Result<()> {
    let text = meeting
        .transcript()
        .and_then(|transcript| transcript.full_text.as_deref())
        .ok_or_else(|| anyhow!("Meeting #{} has no transcript text to copy", meeting.id))?;

    let mut clipboard =
        Clipboard::new().map_err(|e| anyhow!("Failed to initialize clipboard: {}", e))?;
    clipboard
        .set_text(text)
        .map_err(|e| anyhow!("Failed to copy to clipboard: {}", e))?;

    println!(
        "Copied transcript of meeting #{} to clipboard ({} chars)",
        meeting.id,
        text.len()
    );
    Ok(())
}

pub async fn handle_add(
    server: Option<String>,
    title: String,
    url: String,
    notes: String,
) -> Result<()> {
    if title.trim().is_empty() || url.trim().is_empty() {
        bail!("Title and video URL are required");
    }

    let config = Config::load()?;
    let client = build_client(&config, server.as_deref())?;

    let created = client
        .create(&NewMeeting {
            title: title.trim().to_string(),
            video_url: url.trim().to_string(),
            notes: notes.trim().to_string(),
        })
        .await
        .context("Failed to create meeting")?;
    println!("Meeting #{} created.", created.id);

    let pb = create_spinner("Generating transcript...");
    let transcriber = SimulatedTranscription::default();
    let transcript = transcriber
        .transcribe(&created)
        .await
        .context("Transcript generation failed")?;
    client
        .update_transcript(created.id, transcript)
        .await
        .context("Failed to store the transcript")?;
    pb.finish_with_message("Transcript stored.");

    Ok(())
}

/// Create a styled spinner.
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub async fn handle_delete(server: Option<String>, id: i64, yes: bool) -> Result<()> {
    let config = Config::load()?;
    let client = build_client(&config, server.as_deref())?;

    if !yes {
        if !io::stdin().is_terminal() {
            bail!("Non-interactive session. Pass --yes to delete without confirmation");
        }
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete meeting #{}?", id))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    client
        .delete(id)
        .await
        .with_context(|| format!("Failed to delete meeting {}", id))?;
    println!("Meeting #{} deleted.", id);
    Ok(())
}

pub async fn handle_notes(
    server: Option<String>,
    id: i64,
    set: Option<String>,
    edit: bool,
) -> Result<()> {
    let config = Config::load()?;
    let client = build_client(&config, server.as_deref())?;

    if let Some(text) = set {
        client
            .update_notes(id, &text)
            .await
            .with_context(|| format!("Failed to save notes for meeting {}", id))?;
        println!("Notes saved for meeting #{}.", id);
        return Ok(());
    }

    let meeting = client
        .fetch(id)
        .await
        .with_context(|| format!("Failed to load meeting {}", id))?;

    if edit {
        let edited = edit_in_editor(&config, &meeting)?;
        if edited == meeting.notes.clone().unwrap_or_default() {
            println!("Notes unchanged.");
            return Ok(());
        }
        client
            .update_notes(id, &edited)
            .await
            .with_context(|| format!("Failed to save notes for meeting {}", id))?;
        println!("Notes saved for meeting #{}.", id);
        return Ok(());
    }

    println!("{}", meeting.notes_or_placeholder());
    Ok(())
}

/// Write the current notes to a scratch file, run the editor on it and
/// read the result back.
fn edit_in_editor(config: &Config, meeting: &Meeting) -> Result<String> {
    let editor = config
        .notes
        .editor
        .clone()
        .or_else(|| std::env::var("EDITOR").ok())
        .ok_or_else(|| {
            anyhow!("No editor configured. Set $EDITOR or notes.editor in the config")
        })?;

    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| anyhow!("Editor command is empty"))?;
    let args: Vec<&str> = parts.collect();

    let file = tempfile::Builder::new()
        .prefix(&format!("rivedi-notes-{}-", meeting.id))
        .suffix(".md")
        .tempfile()
        .context("Failed to create scratch file")?;
    std::fs::write(file.path(), meeting.notes.as_deref().unwrap_or_default())
        .context("Failed to write scratch file")?;

    let status = Command::new(program)
        .args(&args)
        .arg(file.path())
        .status()
        .with_context(|| format!("Failed to run editor '{}'", editor))?;
    if !status.success() {
        bail!("Editor exited with {}", status);
    }

    let edited = std::fs::read_to_string(file.path()).context("Failed to read scratch file")?;
    Ok(edited.trim_end().to_string())
}

pub async fn handle_open(server: Option<String>, id: i64) -> Result<()> {
    let config = Config::load()?;
    let client = build_client(&config, server.as_deref())?;
    let resolver = EmbedResolver::new()?;

    let meeting = client
        .fetch(id)
        .await
        .with_context(|| format!("Failed to load meeting {}", id))?;
    let embed = resolver.resolve(&meeting.video_url);

    let path = preview::write_preview(&meeting, &embed)?;
    println!("Preview written to {}", path.display());

    if preview::open_in_browser(&path)? {
        println!("Opening in your browser.");
    } else {
        println!("No browser opener found; open the file yourself.");
    }
    Ok(())
}

pub async fn handle_demo(port: Option<u16>, no_seed: bool) -> Result<()> {
    let config = Config::load()?;
    let port = port.unwrap_or(config.demo.port);

    let server = StubServer::new(port);
    if config.demo.seed && !no_seed {
        server.seed().await;
        info!("Seeded the demo store with sample meetings");
    }
    server.start().await
}
