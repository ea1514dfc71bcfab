//! Transcript generation behind a service seam.
//!
//! The add-meeting flow needs a transcript from somewhere. The only
//! implementation shipped here is a stand-in: it waits a fixed delay
//! and returns a canned four-segment transcript. A real provider
//! (job submission, polling) can implement the same trait without the
//! callers changing.

use crate::meeting::{Meeting, Segment, Transcript};
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

/// Delay the simulation waits before producing its transcript.
pub const SIMULATED_DELAY: Duration = Duration::from_secs(2);

/// Produces a transcript for a stored meeting.
#[async_trait]
pub trait TranscriptionService: Send + Sync {
    async fn transcribe(&self, meeting: &Meeting) -> Result<Transcript>;
}

/// Stand-in transcription provider.
pub struct SimulatedTranscription {
    delay: Duration,
}

impl SimulatedTranscription {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedTranscription {
    fn default() -> Self {
        Self::new(SIMULATED_DELAY)
    }
}

#[async_trait]
impl TranscriptionService for SimulatedTranscription {
    async fn transcribe(&self, meeting: &Meeting) -> Result<Transcript> {
        info!(
            "Simulating transcription for meeting {} ({:?} delay)",
            meeting.id, self.delay
        );
        sleep(self.delay).await;
        Ok(simulated_transcript(&meeting.title))
    }
}

/// The canned transcript: four contiguous five-second segments, with
/// the full text being their concatenation.
pub fn simulated_transcript(title: &str) -> Transcript {
    let segments = vec![
        Segment {
            start: 0.0,
            end: 5.0,
            text: format!("Welcome to \"{}\".", title),
        },
        Segment {
            start: 5.0,
            end: 10.0,
            text: "Today we walk through the agenda and the open items.".to_string(),
        },
        Segment {
            start: 10.0,
            end: 15.0,
            text: "The team discusses progress, blockers, and decisions.".to_string(),
        },
        Segment {
            start: 15.0,
            end: 20.0,
            text: "Action items are assigned and the meeting wraps up.".to_string(),
        },
    ];

    let full_text = segments
        .iter()
        .map(|segment| segment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    Transcript {
        full_text: Some(full_text),
        description: Some("Automatically generated transcript (simulated).".to_string()),
        segments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meeting(title: &str) -> Meeting {
        Meeting {
            id: 11,
            title: title.to_string(),
            video_url: "https://example.com/v.mp4".to_string(),
            notes: None,
            transcript: None,
        }
    }

    #[test]
    fn test_simulated_transcript_has_four_contiguous_segments() {
        let transcript = simulated_transcript("Sprint review");
        assert_eq!(transcript.segments.len(), 4);

        for window in transcript.segments.windows(2) {
            assert_eq!(window[0].end, window[1].start);
        }
        assert_eq!(transcript.segments[0].start, 0.0);
        assert_eq!(transcript.segments[3].end, 20.0);
        assert!(transcript.segments[0].text.contains("Sprint review"));
    }

    #[test]
    fn test_full_text_is_the_segment_concatenation() {
        let transcript = simulated_transcript("Kickoff");
        let expected = transcript
            .segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(transcript.full_text.as_deref(), Some(expected.as_str()));
        assert!(!transcript.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_transcribe_waits_the_configured_delay() {
        let service = SimulatedTranscription::new(Duration::from_secs(2));
        let started = tokio::time::Instant::now();

        let transcript = service.transcribe(&meeting("Standup")).await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(transcript.segments.len(), 4);
    }

    #[test]
    fn test_default_delay_is_two_seconds() {
        let service = SimulatedTranscription::default();
        assert_eq!(service.delay, Duration::from_secs(2));
    }
}
