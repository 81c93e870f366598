//! LingoTalks Library
//!
//! Translation, speech synthesis and playback for the LingoTalks language
//! practice app.

pub mod audio;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod gui;
pub mod languages;
pub mod logging;
pub mod notes;
pub mod playback;
pub mod translate;
pub mod tts;
