//! Terminal review tool for recorded meetings: video link, freeform
//! notes with debounced autosave, and a generated transcript.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod global;
pub mod meeting;
pub mod notes;
pub mod preview;
pub mod render;
pub mod session;
pub mod stub;
pub mod transcribe;
pub mod video;
