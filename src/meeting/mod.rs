//! Meeting domain module.
//!
//! Holds the wire types shared by the API client, the renderers, and
//! the demo stub, plus the display fallbacks for absent fields.

pub mod model;

pub use model::{
    Meeting, MeetingSummary, MeetingUpdate, NewMeeting, Segment, Transcript, NOTES_PLACEHOLDER,
};
