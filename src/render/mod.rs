//! Terminal views of the review screen.
//!
//! Pure string builders for the meeting list, the detail panels, and
//! the transcript section. No I/O here; callers print the result.

use crate::meeting::{Meeting, MeetingSummary, Transcript};
use crate::video::VideoEmbed;

/// Shown in the transcript section when a meeting has no usable transcript.
pub const NO_TRANSCRIPT_MESSAGE: &str = "No transcript available for this meeting.";

/// Inline row shown when the meeting list could not be loaded.
pub const LIST_ERROR_ROW: &str = "Could not load meetings.";

/// Shown in place of the detail panels when nothing is selected.
pub const NO_SELECTION_MESSAGE: &str = "No meeting selected.";

/// Shown when the service has no meetings at all.
pub const EMPTY_LIST_MESSAGE: &str = "No meetings recorded yet.";

/// Marker prefix for the active list entry.
const ACTIVE_PREFIX: &str = "> ";
const INACTIVE_PREFIX: &str = "  ";

/// One row per meeting; exactly the entry matching `active_id` carries
/// the active marker.
pub fn meeting_rows(meetings: &[MeetingSummary], active_id: Option<i64>) -> Vec<String> {
    meetings
        .iter()
        .map(|meeting| {
            let prefix = if Some(meeting.id) == active_id {
                ACTIVE_PREFIX
            } else {
                INACTIVE_PREFIX
            };
            format!("{}#{} {}", prefix, meeting.id, meeting.title)
        })
        .collect()
}

/// The sidebar: rows, the empty message, or the inline error row.
pub fn list_view(
    meetings: &[MeetingSummary],
    active_id: Option<i64>,
    error: Option<&str>,
) -> String {
    if let Some(message) = error {
        return format!("! {}", message);
    }
    if meetings.is_empty() {
        return EMPTY_LIST_MESSAGE.to_string();
    }
    meeting_rows(meetings, active_id).join("\n")
}

/// The detail panels for the selected meeting: title, video strategy,
/// notes (placeholder when absent), transcript.
pub fn detail_view(meeting: &Meeting, embed: &VideoEmbed) -> String {
    let mut out = String::new();
    out.push_str(&format!("Meeting #{}: {}\n", meeting.id, meeting.title));
    out.push_str(&format!("Video: {}\n", embed.describe()));
    out.push_str("\n--- Notes ---\n");
    out.push_str(meeting.notes_or_placeholder());
    out.push('\n');
    out.push_str(&transcript_view(meeting.transcript()));
    out
}

/// The transcript section: header, then full text if present, then the
/// time-bracketed segments if present; otherwise the no-transcript
/// message.
pub fn transcript_view(transcript: Option<&Transcript>) -> String {
    let mut out = String::from("\n--- Transcript ---\n");

    let transcript = match transcript.filter(|t| !t.is_empty()) {
        Some(t) => t,
        None => {
            out.push_str(NO_TRANSCRIPT_MESSAGE);
            out.push('\n');
            return out;
        }
    };

    if let Some(full_text) = transcript.full_text.as_deref() {
        if !full_text.trim().is_empty() {
            out.push_str(full_text.trim_end());
            out.push('\n');
        }
    }

    if !transcript.segments.is_empty() {
        if transcript.has_full_text() {
            out.push('\n');
        }
        for segment in &transcript.segments {
            out.push_str(&format!(
                "[{} - {}] {}\n",
                format_seconds(segment.start),
                format_seconds(segment.end),
                segment.text
            ));
        }
    }

    out
}

/// Seconds to `mm:ss`, minutes not wrapped.
pub fn format_seconds(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::Segment;
    use crate::video::EmbedResolver;

    fn summaries() -> Vec<MeetingSummary> {
        vec![
            MeetingSummary {
                id: 1,
                title: "Kickoff".to_string(),
            },
            MeetingSummary {
                id: 2,
                title: "Retro".to_string(),
            },
            MeetingSummary {
                id: 3,
                title: "Planning".to_string(),
            },
        ]
    }

    #[test]
    fn test_exactly_one_row_carries_the_active_marker() {
        let rows = meeting_rows(&summaries(), Some(2));
        let marked: Vec<&String> = rows.iter().filter(|r| r.starts_with("> ")).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0], "> #2 Retro");
    }

    #[test]
    fn test_no_marker_without_selection() {
        let rows = meeting_rows(&summaries(), None);
        assert!(rows.iter().all(|r| r.starts_with("  ")));
    }

    #[test]
    fn test_error_row_replaces_entries() {
        let view = list_view(&summaries(), Some(1), Some(LIST_ERROR_ROW));
        assert_eq!(view, "! Could not load meetings.");
    }

    #[test]
    fn test_empty_list_message() {
        assert_eq!(list_view(&[], None, None), EMPTY_LIST_MESSAGE);
    }

    #[test]
    fn test_transcript_with_text_and_segments() {
        let transcript = Transcript {
            full_text: Some("Hello everyone. Quick sync.".to_string()),
            description: None,
            segments: vec![
                Segment {
                    start: 0.0,
                    end: 5.0,
                    text: "Hello everyone.".to_string(),
                },
                Segment {
                    start: 5.0,
                    end: 9.5,
                    text: "Quick sync.".to_string(),
                },
            ],
        };

        let view = transcript_view(Some(&transcript));
        assert!(view.contains("--- Transcript ---"));
        assert!(view.contains("Hello everyone. Quick sync."));
        assert!(view.contains("[00:00 - 00:05] Hello everyone."));
        assert!(view.contains("[00:05 - 00:09] Quick sync."));
    }

    #[test]
    fn test_transcript_with_empty_segments_renders_full_text_only() {
        let transcript = Transcript {
            full_text: Some("Only the text survived.".to_string()),
            description: None,
            segments: vec![],
        };

        let view = transcript_view(Some(&transcript));
        assert!(view.contains("Only the text survived."));
        assert!(!view.contains('['));
        assert!(!view.contains(NO_TRANSCRIPT_MESSAGE));
    }

    #[test]
    fn test_missing_or_empty_transcript_renders_message() {
        let view = transcript_view(None);
        assert!(view.contains(NO_TRANSCRIPT_MESSAGE));

        let empty = Transcript::default();
        let view = transcript_view(Some(&empty));
        assert!(view.contains(NO_TRANSCRIPT_MESSAGE));
    }

    #[test]
    fn test_detail_view_falls_back_to_notes_placeholder() {
        let meeting = Meeting {
            id: 8,
            title: "Budget review".to_string(),
            video_url: "https://www.youtube.com/watch?v=ZXsQAXx_ao0".to_string(),
            notes: None,
            transcript: None,
        };
        let resolver = EmbedResolver::new().unwrap();
        let embed = resolver.resolve(&meeting.video_url);

        let view = detail_view(&meeting, &embed);
        assert!(view.contains("Meeting #8: Budget review"));
        assert!(view.contains("YouTube video (ZXsQAXx_ao0)"));
        assert!(view.contains(crate::meeting::NOTES_PLACEHOLDER));
        assert!(view.contains(NO_TRANSCRIPT_MESSAGE));
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0.0), "00:00");
        assert_eq!(format_seconds(5.0), "00:05");
        assert_eq!(format_seconds(65.4), "01:05");
        assert_eq!(format_seconds(3605.0), "60:05");
    }
}
