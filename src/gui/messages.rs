//! Message types for the LingoTalks GUI
//!
//! Async completions carry the request id they were started with so the
//! update loop can drop results a newer request has superseded.

use crate::audio::AudioAsset;
use crate::languages::Language;
use crate::playback::GenerationTicket;
use iced::widget::text_editor;
use std::path::PathBuf;

/// Messages that drive the application
#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    TabSelected(super::state::Tab),
    LanguageSelected(Language),
    DismissNotice,

    // Practice & Audio
    ContextAction(text_editor::Action),
    UseSample(usize),
    GeneratePressed,
    Translated {
        id: u64,
        result: Result<String, String>,
    },
    Synthesized {
        id: u64,
        ticket: GenerationTicket,
        result: Result<AudioAsset, String>,
    },
    PlayPressed,
    PausePressed,
    ReplayPressed,
    StopPressed,
    Tick,

    // Word Meaning
    WordInputChanged(String),
    SearchWord,
    LookupFinished {
        id: u64,
        result: Result<String, String>,
    },

    // Notes
    NotesAction(text_editor::Action),
    TranslateNotes,
    NotesTranslated(Result<String, String>),
    SaveNotes,
    NotesSavePicked(Option<PathBuf>),
    LoadNotes,
    NotesLoadPicked(Option<PathBuf>),
    ClearNotes,

    // Window
    WindowCloseRequested(iced::window::Id),
}
