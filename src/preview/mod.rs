//! Static HTML preview of a meeting.
//!
//! Materializes the review panels as a standalone page: the video
//! embed (YouTube iframe or native `<video>` element), the notes
//! panel, and the transcript section. Pages land under the data
//! directory and are handed to the platform opener when one exists.

use crate::global;
use crate::meeting::Meeting;
use crate::render;
use crate::video::VideoEmbed;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

/// Render the full preview page.
pub fn render_page(meeting: &Meeting, embed: &VideoEmbed) -> String {
    let mut body = String::new();
    body.push_str(&format!("<h1>{}</h1>\n", escape_text(&meeting.title)));
    body.push_str(&format!(
        "<div class=\"video\">{}</div>\n",
        embed.embed_html()
    ));

    body.push_str("<h2>Notes</h2>\n");
    body.push_str(&format!(
        "<p class=\"notes\">{}</p>\n",
        escape_text(meeting.notes_or_placeholder())
    ));

    body.push_str("<h2>Transcript</h2>\n");
    match meeting.transcript() {
        Some(transcript) => {
            if let Some(full_text) = transcript.full_text.as_deref() {
                if !full_text.trim().is_empty() {
                    body.push_str(&format!(
                        "<p class=\"transcript\">{}</p>\n",
                        escape_text(full_text)
                    ));
                }
            }
            if !transcript.segments.is_empty() {
                body.push_str("<ul class=\"segments\">\n");
                for segment in &transcript.segments {
                    body.push_str(&format!(
                        "<li>[{} - {}] {}</li>\n",
                        render::format_seconds(segment.start),
                        render::format_seconds(segment.end),
                        escape_text(&segment.text)
                    ));
                }
                body.push_str("</ul>\n");
            }
        }
        None => {
            body.push_str(&format!(
                "<p class=\"empty\">{}</p>\n",
                render::NO_TRANSCRIPT_MESSAGE
            ));
        }
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_text(&meeting.title),
        PAGE_STYLE,
        body
    )
}

/// Write the preview under the data directory, stamped so repeated
/// exports of the same meeting do not overwrite each other.
pub fn write_preview(meeting: &Meeting, embed: &VideoEmbed) -> Result<PathBuf> {
    write_preview_to(&global::previews_dir()?, meeting, embed)
}

pub fn write_preview_to(dir: &Path, meeting: &Meeting, embed: &VideoEmbed) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).context("Failed to create previews directory")?;

    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let path = dir.join(format!("meeting-{}-{}.html", meeting.id, stamp));
    std::fs::write(&path, render_page(meeting, embed)).context("Failed to write preview file")?;

    info!("Wrote preview to {:?}", path);
    Ok(path)
}

/// Hand the page to the platform opener. Returns false when no opener
/// binary is available; the caller prints the path instead.
pub fn open_in_browser(path: &Path) -> Result<bool> {
    for opener in ["xdg-open", "open"] {
        if let Ok(binary) = which::which(opener) {
            Command::new(binary)
                .arg(path)
                .spawn()
                .with_context(|| format!("Failed to launch {}", opener))?;
            return Ok(true);
        }
    }
    Ok(false)
}

const PAGE_STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto;\
padding:0 1rem;color:#222}iframe,video{width:100%;aspect-ratio:16/9;border:0}\
.notes{white-space:pre-wrap;background:#f6f6f6;padding:1rem}.segments{list-style:none;\
padding:0}.segments li{margin:.25rem 0}.empty{color:#777}";

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::{Segment, Transcript, NOTES_PLACEHOLDER};
    use crate::video::EmbedResolver;

    fn meeting_with(video_url: &str, transcript: Option<Transcript>) -> Meeting {
        Meeting {
            id: 3,
            title: "Quarterly review <draft>".to_string(),
            video_url: video_url.to_string(),
            notes: None,
            transcript,
        }
    }

    fn embed_for(meeting: &Meeting) -> VideoEmbed {
        EmbedResolver::new().unwrap().resolve(&meeting.video_url)
    }

    #[test]
    fn test_page_embeds_youtube_iframe() {
        let meeting = meeting_with("https://www.youtube.com/watch?v=ZXsQAXx_ao0", None);
        let page = render_page(&meeting, &embed_for(&meeting));

        assert!(page.contains("https://www.youtube.com/embed/ZXsQAXx_ao0"));
        assert!(!page.contains("<video"));
    }

    #[test]
    fn test_page_uses_native_element_for_direct_urls() {
        let meeting = meeting_with("https://cdn.example.com/rec.mp4", None);
        let page = render_page(&meeting, &embed_for(&meeting));

        assert!(page.contains("<video controls src=\"https://cdn.example.com/rec.mp4\""));
        assert!(!page.contains("<iframe"));
    }

    #[test]
    fn test_page_escapes_title_and_falls_back_on_notes() {
        let meeting = meeting_with("https://cdn.example.com/rec.mp4", None);
        let page = render_page(&meeting, &embed_for(&meeting));

        assert!(page.contains("Quarterly review &lt;draft&gt;"));
        assert!(page.contains(NOTES_PLACEHOLDER));
        assert!(page.contains(render::NO_TRANSCRIPT_MESSAGE));
    }

    #[test]
    fn test_page_lists_transcript_segments() {
        let transcript = Transcript {
            full_text: Some("Hello. Bye.".to_string()),
            description: None,
            segments: vec![
                Segment {
                    start: 0.0,
                    end: 5.0,
                    text: "Hello.".to_string(),
                },
                Segment {
                    start: 5.0,
                    end: 8.0,
                    text: "Bye.".to_string(),
                },
            ],
        };
        let meeting = meeting_with("https://cdn.example.com/rec.mp4", Some(transcript));
        let page = render_page(&meeting, &embed_for(&meeting));

        assert!(page.contains("<li>[00:00 - 00:05] Hello.</li>"));
        assert!(page.contains("<li>[00:05 - 00:08] Bye.</li>"));
        assert!(page.contains("Hello. Bye."));
    }

    #[test]
    fn test_write_preview_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let meeting = meeting_with("https://cdn.example.com/rec.mp4", None);
        let path = write_preview_to(dir.path(), &meeting, &embed_for(&meeting)).unwrap();

        assert!(path.exists());
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("<!DOCTYPE html>"));
    }
}
