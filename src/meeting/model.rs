//! Wire types for the meetings service.
//!
//! Field names follow the service's JSON contract (`id_chiamata`,
//! `titolo_chiamata`, ...); the Rust side uses plain English names.
//! Unknown fields in responses are ignored.

use serde::{Deserialize, Serialize};

/// Shown in place of notes the service has not stored yet.
pub const NOTES_PLACEHOLDER: &str = "No notes for this meeting yet.";

/// A recorded meeting as returned by `GET /api/riunioni/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    #[serde(rename = "id_chiamata")]
    pub id: i64,
    #[serde(rename = "titolo_chiamata")]
    pub title: String,
    #[serde(rename = "video_riunione")]
    pub video_url: String,
    #[serde(rename = "note_riunione", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "trascrizione", default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Transcript>,
}

/// One row of `GET /api/riunioni`. Extra fields a server may include
/// beyond id and title are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingSummary {
    #[serde(rename = "id_chiamata")]
    pub id: i64,
    #[serde(rename = "titolo_chiamata")]
    pub title: String,
}

/// Transcript of a meeting: full text plus time-coded segments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(rename = "testo_completo", default, skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
    #[serde(rename = "descrizione", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "segmenti", default)]
    pub segments: Vec<Segment>,
}

/// A time-bounded span of transcript text. Times are seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "start_time")]
    pub start: f64,
    #[serde(rename = "end_time")]
    pub end: f64,
    #[serde(rename = "testo")]
    pub text: String,
}

/// Body of `POST /api/riunioni`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMeeting {
    #[serde(rename = "titolo_chiamata")]
    pub title: String,
    #[serde(rename = "video_riunione")]
    pub video_url: String,
    #[serde(rename = "note_riunione")]
    pub notes: String,
}

/// Partial body of `PUT /api/riunioni/{id}`. Only the fields being
/// changed are serialized; the service keeps the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeetingUpdate {
    #[serde(rename = "note_riunione", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "trascrizione", default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Transcript>,
}

impl Meeting {
    /// Notes text for display, falling back to the placeholder when the
    /// service has none (or only whitespace) stored.
    pub fn notes_or_placeholder(&self) -> &str {
        match self.notes.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => NOTES_PLACEHOLDER,
        }
    }

    /// Transcript, if one is present and non-empty.
    pub fn transcript(&self) -> Option<&Transcript> {
        self.transcript.as_ref().filter(|t| !t.is_empty())
    }
}

impl Transcript {
    /// True when there is neither full text nor any segment to render.
    pub fn is_empty(&self) -> bool {
        !self.has_full_text() && self.segments.is_empty()
    }

    /// True when `testo_completo` carries non-whitespace text.
    pub fn has_full_text(&self) -> bool {
        self.full_text
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false)
    }
}

impl MeetingUpdate {
    pub fn notes(text: impl Into<String>) -> Self {
        Self {
            notes: Some(text.into()),
            transcript: None,
        }
    }

    pub fn transcript(transcript: Transcript) -> Self {
        Self {
            notes: None,
            transcript: Some(transcript),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_meeting_uses_wire_field_names() {
        let meeting: Meeting = serde_json::from_value(json!({
            "id_chiamata": 7,
            "titolo_chiamata": "Weekly sync",
            "video_riunione": "https://www.youtube.com/watch?v=ZXsQAXx_ao0",
            "note_riunione": "Agenda in the shared doc",
        }))
        .unwrap();

        assert_eq!(meeting.id, 7);
        assert_eq!(meeting.title, "Weekly sync");
        assert_eq!(meeting.notes.as_deref(), Some("Agenda in the shared doc"));
        assert!(meeting.transcript.is_none());
    }

    #[test]
    fn test_meeting_ignores_unknown_fields() {
        let meeting: Meeting = serde_json::from_value(json!({
            "id_chiamata": 1,
            "titolo_chiamata": "Kickoff",
            "video_riunione": "https://example.com/kickoff.mp4",
            "created_at": "2024-05-01T09:00:00Z",
            "_id": "abcdef",
        }))
        .unwrap();

        assert_eq!(meeting.id, 1);
    }

    #[test]
    fn test_summary_accepts_full_meeting_objects() {
        let summary: MeetingSummary = serde_json::from_value(json!({
            "id_chiamata": 3,
            "titolo_chiamata": "Retro",
            "video_riunione": "https://example.com/retro.mp4",
            "note_riunione": null,
        }))
        .unwrap();

        assert_eq!(summary.id, 3);
        assert_eq!(summary.title, "Retro");
    }

    #[test]
    fn test_notes_placeholder_fallback() {
        let mut meeting = Meeting {
            id: 1,
            title: "Kickoff".to_string(),
            video_url: "https://example.com/v.mp4".to_string(),
            notes: None,
            transcript: None,
        };
        assert_eq!(meeting.notes_or_placeholder(), NOTES_PLACEHOLDER);

        meeting.notes = Some("   ".to_string());
        assert_eq!(meeting.notes_or_placeholder(), NOTES_PLACEHOLDER);

        meeting.notes = Some("Follow up with Dana".to_string());
        assert_eq!(meeting.notes_or_placeholder(), "Follow up with Dana");
    }

    #[test]
    fn test_transcript_segment_wire_names() {
        let transcript: Transcript = serde_json::from_value(json!({
            "testo_completo": "Hello everyone.",
            "descrizione": "Sample transcript for meeting 1.",
            "segmenti": [
                { "start_time": 0, "end_time": 5, "testo": "Hello everyone." }
            ],
        }))
        .unwrap();

        assert_eq!(transcript.full_text.as_deref(), Some("Hello everyone."));
        assert_eq!(transcript.segments.len(), 1);
        assert_eq!(transcript.segments[0].start, 0.0);
        assert_eq!(transcript.segments[0].end, 5.0);
        assert_eq!(transcript.segments[0].text, "Hello everyone.");
    }

    #[test]
    fn test_transcript_emptiness() {
        let empty = Transcript::default();
        assert!(empty.is_empty());

        let text_only = Transcript {
            full_text: Some("Just text".to_string()),
            ..Default::default()
        };
        assert!(!text_only.is_empty());
        assert!(text_only.has_full_text());

        let whitespace_text = Transcript {
            full_text: Some("  \n ".to_string()),
            ..Default::default()
        };
        assert!(whitespace_text.is_empty());

        let segments_only = Transcript {
            segments: vec![Segment {
                start: 0.0,
                end: 2.5,
                text: "Hi".to_string(),
            }],
            ..Default::default()
        };
        assert!(!segments_only.is_empty());
        assert!(!segments_only.has_full_text());
    }

    #[test]
    fn test_meeting_transcript_accessor_skips_empty() {
        let meeting = Meeting {
            id: 2,
            title: "Planning".to_string(),
            video_url: "https://example.com/p.mp4".to_string(),
            notes: None,
            transcript: Some(Transcript::default()),
        };
        assert!(meeting.transcript().is_none());
    }

    #[test]
    fn test_update_serializes_only_changed_fields() {
        let update = MeetingUpdate::notes("new text");
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, json!({ "note_riunione": "new text" }));

        let update = MeetingUpdate::transcript(Transcript {
            full_text: Some("All of it".to_string()),
            description: None,
            segments: vec![],
        });
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(
            value,
            json!({ "trascrizione": { "testo_completo": "All of it", "segmenti": [] } })
        );
    }

    #[test]
    fn test_new_meeting_body_shape() {
        let body = NewMeeting {
            title: "Demo day".to_string(),
            video_url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
            notes: String::new(),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "titolo_chiamata": "Demo day",
                "video_riunione": "https://youtu.be/dQw4w9WgXcQ",
                "note_riunione": "",
            })
        );
    }
}
