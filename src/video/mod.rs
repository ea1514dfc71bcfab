//! Video embed dispatch.
//!
//! Decides how a meeting's video URL is presented: a URL matching one
//! of the YouTube shapes becomes an iframe embed keyed by the
//! 11-character video id; anything else is handed to a native
//! `<video>` element as-is.

use anyhow::Result;
use regex::Regex;

/// Embed strategy for a meeting's video URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoEmbed {
    /// YouTube video, identified by its 11-character id.
    YouTube { id: String },
    /// Any other URL, played by a native video element.
    Direct { url: String },
}

/// Resolves raw video URLs to an embed strategy.
pub struct EmbedResolver {
    youtube_id: Regex,
}

impl EmbedResolver {
    pub fn new() -> Result<Self> {
        // Accepts watch, share (youtu.be), embed, and shorts shapes.
        // The id is always exactly 11 characters of [A-Za-z0-9_-].
        let youtube_id = Regex::new(
            r"^(?:https?://)?(?:www\.|m\.)?(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|embed/|shorts/)|youtu\.be/)([A-Za-z0-9_-]{11})(?:[?&#/].*)?$",
        )?;
        Ok(Self { youtube_id })
    }

    /// Pick the embed strategy for a raw video URL.
    pub fn resolve(&self, url: &str) -> VideoEmbed {
        let trimmed = url.trim();
        if let Some(id) = self
            .youtube_id
            .captures(trimmed)
            .and_then(|captures| captures.get(1))
        {
            return VideoEmbed::YouTube {
                id: id.as_str().to_string(),
            };
        }
        VideoEmbed::Direct {
            url: trimmed.to_string(),
        }
    }
}

impl VideoEmbed {
    /// HTML fragment for the video panel.
    pub fn embed_html(&self) -> String {
        match self {
            Self::YouTube { id } => format!(
                "<iframe src=\"https://www.youtube.com/embed/{}\" \
                 title=\"Meeting video\" frameborder=\"0\" allowfullscreen></iframe>",
                escape_attr(id)
            ),
            Self::Direct { url } => {
                format!("<video controls src=\"{}\"></video>", escape_attr(url))
            }
        }
    }

    /// One-line description for terminal output.
    pub fn describe(&self) -> String {
        match self {
            Self::YouTube { id } => format!("YouTube video ({})", id),
            Self::Direct { url } => format!("Video file ({})", url),
        }
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
