//! GUI module using iced
//!
//! Provides the LingoTalks desktop app: practice audio, word meanings and
//! notes, all sharing one target language.

use iced::widget::{button, column, container, pick_list, row, text, text_editor, Space};
use iced::{Alignment, Element, Length, Subscription, Task};
use rand::seq::SliceRandom;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::audio::AudioAsset;
use crate::dictionary::DictionaryClient;
use crate::error::SynthesisError;
use crate::languages::SUPPORTED;
use crate::notes;
use crate::playback::PlayState;
use crate::translate::TranslationClient;
use crate::tts::SpeechSynthesizer;

// Sub-modules
pub mod app;
pub mod messages;
pub mod state;
pub mod tabs;

// Re-exports for convenience
pub use app::LingoApp;
pub use messages::Message;
pub use state::Tab;

use state::{Notice, NoticeKind, PracticeState};

/// How often the transport state is reconciled with the device
const TICK: Duration = Duration::from_millis(250);

async fn translate_text(
    translator: Arc<dyn TranslationClient>,
    text: String,
    target: &'static str,
) -> Result<String, String> {
    translator
        .translate(&text, "auto", target)
        .await
        .map_err(|e| format!("Translation failed: {}", e))
}

async fn synthesize(
    synthesizer: Arc<SpeechSynthesizer>,
    text: String,
    language: &'static str,
) -> Result<AudioAsset, String> {
    synthesizer
        .generate(&text, language)
        .await
        .map_err(|e| e.to_string())
}

async fn describe_word(
    dictionary: DictionaryClient,
    translator: Arc<dyn TranslationClient>,
    word: String,
    target: &'static str,
) -> Result<String, String> {
    dictionary
        .describe(&word, target, translator.as_ref())
        .await
        .map_err(|e| format!("Error fetching meaning: {}", e))
}

async fn translate_notes(
    translator: Arc<dyn TranslationClient>,
    text: String,
    target: &'static str,
) -> Result<String, String> {
    notes::translate(translator.as_ref(), &text, target)
        .await
        .map_err(|e| e.to_string())
}

async fn pick_save_path() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Save notes")
        .set_directory(notes::default_dir())
        .set_file_name(notes::default_file_name())
        .add_filter("Text", &["txt"])
        .save_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

async fn pick_open_path() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Load notes")
        .set_directory(notes::default_dir())
        .add_filter("Text", &["txt"])
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

impl LingoApp {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.current_tab = tab;
            }
            Message::LanguageSelected(language) => {
                info!("🌍 Target language: {}", language);
                self.language = language;
                self.config.default_language = language.code.to_string();
                if let Some(path) = &self.config_file {
                    if let Err(e) = self.config.save_to(path) {
                        warn!("⚠️ Could not save language choice: {:#}", e);
                    }
                }
            }
            Message::DismissNotice => {
                self.notice = None;
            }

            // Practice & Audio
            Message::ContextAction(action) => {
                self.context.perform(action);
            }
            Message::UseSample(index) => {
                if let Some(sample) = self.config.sample_contexts.get(index) {
                    self.context = text_editor::Content::with_text(sample);
                }
            }
            Message::GeneratePressed => {
                if self.practice.generating {
                    return Task::none();
                }

                let mut context = self.context.text().trim().to_string();
                if context.is_empty() {
                    let Some(sample) = self
                        .config
                        .sample_contexts
                        .choose(&mut rand::thread_rng())
                        .cloned()
                    else {
                        self.notice = Some(Notice::info(
                            "Input required",
                            "Please type some English text to practice with.",
                        ));
                        return Task::none();
                    };
                    self.context = text_editor::Content::with_text(&sample);
                    context = sample;
                }

                self.request_id += 1;
                let id = self.request_id;
                self.practice = PracticeState {
                    generating: true,
                    playback_enabled: false,
                };
                self.translated.clear();
                self.status = "Translating...".to_string();
                if matches!(
                    self.controller.state(),
                    PlayState::Playing | PlayState::Paused
                ) {
                    self.controller.stop();
                }

                return Task::perform(
                    translate_text(self.translator.clone(), context, self.language.code),
                    move |result| Message::Translated { id, result },
                );
            }
            Message::Translated { id, result } => {
                if id != self.request_id {
                    debug!("Dropping stale translation #{}", id);
                    return Task::none();
                }
                match result {
                    Ok(translated) => {
                        self.translated = translated.clone();
                        self.status = "Generating audio...".to_string();

                        let ticket = self.controller.begin_generation();
                        return Task::perform(
                            synthesize(
                                self.controller.synthesizer(),
                                translated,
                                self.language.code,
                            ),
                            move |result| Message::Synthesized { id, ticket, result },
                        );
                    }
                    Err(e) => self.generation_failed("TTS Error", e),
                }
            }
            Message::Synthesized { id, ticket, result } => match result {
                Ok(asset) => match self.controller.install(ticket, asset) {
                    Ok(_) if id == self.request_id => {
                        self.practice.generating = false;
                        self.start_playback();
                    }
                    Ok(_) => {}
                    Err(SynthesisError::Superseded) => {
                        debug!("Dropping superseded audio #{}", ticket.id());
                    }
                    Err(e) => self.generation_failed("TTS Error", e.to_string()),
                },
                Err(e) if id == self.request_id => self.generation_failed("TTS Error", e),
                Err(e) => debug!("Ignoring stale synthesis failure: {}", e),
            },
            Message::PlayPressed => match self.controller.state() {
                PlayState::Paused => {
                    self.controller.resume();
                    self.status = "Playing".to_string();
                }
                PlayState::Playing => {}
                _ => match self.controller.play() {
                    Ok(()) => self.status = "Playing".to_string(),
                    Err(e) => self.notice = Some(Notice::error("Play Error", e.to_string())),
                },
            },
            Message::PausePressed => match self.controller.toggle_pause() {
                PlayState::Paused => self.status = "Paused".to_string(),
                PlayState::Playing => self.status = "Playing".to_string(),
                _ => {}
            },
            Message::ReplayPressed => match self.controller.replay() {
                Ok(()) => {
                    self.practice.playback_enabled = true;
                    self.status = "Playing".to_string();
                }
                Err(e) => self.notice = Some(Notice::error("Replay Error", e.to_string())),
            },
            Message::StopPressed => {
                self.controller.stop();
                self.status = "Stopped".to_string();
            }
            Message::Tick => {
                let state = self.controller.state();
                if self.play_state == PlayState::Playing
                    && state == PlayState::Stopped
                    && !self.practice.generating
                    && self.status == "Playing"
                {
                    self.status = "Ready".to_string();
                }
                self.play_state = state;
            }

            // Word Meaning
            Message::WordInputChanged(word) => {
                self.word_input = word;
            }
            Message::SearchWord => {
                let word = self.word_input.trim().to_string();
                if word.is_empty() {
                    self.notice = Some(Notice::info(
                        "Input required",
                        "Please type a word to search for meaning.",
                    ));
                    return Task::none();
                }

                self.lookup_id += 1;
                let id = self.lookup_id;
                self.meaning = format!("Searching meaning for \"{}\"...", word);
                return Task::perform(
                    describe_word(
                        self.dictionary.clone(),
                        self.translator.clone(),
                        word,
                        self.language.code,
                    ),
                    move |result| Message::LookupFinished { id, result },
                );
            }
            Message::LookupFinished { id, result } => {
                if id == self.lookup_id {
                    self.meaning = result.unwrap_or_else(|e| e);
                }
            }

            // Notes
            Message::NotesAction(action) => {
                self.notes.perform(action);
            }
            Message::TranslateNotes => {
                let text = self.notes.text().trim().to_string();
                if text.is_empty() {
                    self.notice = Some(Notice::info("No Notes", "There is nothing to translate."));
                    return Task::none();
                }
                self.notes_busy = true;
                return Task::perform(
                    translate_notes(self.translator.clone(), text, self.language.code),
                    Message::NotesTranslated,
                );
            }
            Message::NotesTranslated(result) => {
                self.notes_busy = false;
                match result {
                    Ok(translated) => self.notes = text_editor::Content::with_text(&translated),
                    Err(e) => self.notice = Some(Notice::error("Translation Error", e)),
                }
            }
            Message::SaveNotes => {
                if self.notes.text().trim().is_empty() {
                    self.notice = Some(Notice::info("No Notes", "There is nothing to save."));
                    return Task::none();
                }
                return Task::perform(pick_save_path(), Message::NotesSavePicked);
            }
            Message::NotesSavePicked(Some(path)) => match notes::save(&path, &self.notes.text()) {
                Ok(()) => {
                    self.notice = Some(Notice::info(
                        "Saved",
                        format!("Notes successfully saved to:\n{}", path.display()),
                    ));
                    self.notes_path = Some(path);
                }
                Err(e) => self.notice = Some(Notice::error("Save Error", e.to_string())),
            },
            Message::LoadNotes => {
                return Task::perform(pick_open_path(), Message::NotesLoadPicked);
            }
            Message::NotesLoadPicked(Some(path)) => match notes::load(&path) {
                Ok(text) => {
                    self.notes = text_editor::Content::with_text(&text);
                    self.notice = Some(Notice::info(
                        "Loaded",
                        format!("Notes loaded from:\n{}", path.display()),
                    ));
                    self.notes_path = Some(path);
                }
                Err(e) => self.notice = Some(Notice::error("Load Error", e.to_string())),
            },
            Message::NotesSavePicked(None) | Message::NotesLoadPicked(None) => {}
            Message::ClearNotes => {
                self.notes = text_editor::Content::new();
                self.notes_path = None;
            }

            // Window
            Message::WindowCloseRequested(id) => {
                info!("👋 Closing, cleaning up audio");
                self.request_id += 1;
                self.controller.cleanup();
                return iced::window::close(id);
            }
        }

        Task::none()
    }

    /// Play a freshly installed asset and unlock the transport buttons
    fn start_playback(&mut self) {
        match self.controller.play() {
            Ok(()) => {
                self.practice.playback_enabled = true;
                self.status = "Playing".to_string();
            }
            Err(e) => {
                warn!("⚠️ Playback failed: {}", e);
                self.practice.playback_enabled = false;
                self.notice = Some(Notice::error("Playback Error", e.to_string()));
                self.status = "Error".to_string();
            }
        }
    }

    fn generation_failed(&mut self, title: &str, message: String) {
        warn!("⚠️ {}: {}", title, message);
        self.practice = PracticeState::default();
        self.status = "Error".to_string();
        self.notice = Some(Notice::error(title, message));
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            iced::time::every(TICK).map(|_| Message::Tick),
            iced::window::close_requests().map(Message::WindowCloseRequested),
        ])
    }

    pub fn view(&self) -> Element<'_, Message> {
        let sidebar = tabs::sidebar::view(self);

        let content = match self.current_tab {
            Tab::Practice => tabs::practice::view(self),
            Tab::Dictionary => tabs::dictionary::view(self),
            Tab::Notes => tabs::notes::view(self),
        };

        let header = row![
            text("Target language:").size(16),
            pick_list(SUPPORTED, Some(self.language), Message::LanguageSelected)
                .width(Length::Fixed(220.0)),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let mut main = column![header].spacing(15);
        if let Some(notice) = &self.notice {
            main = main.push(notice_banner(notice));
        }
        main = main.push(content);

        row![sidebar, container(main).width(Length::Fill).padding(20)].into()
    }
}

fn notice_banner(notice: &Notice) -> Element<'_, Message> {
    let title = match notice.kind {
        NoticeKind::Info => text(&notice.title).size(18),
        NoticeKind::Error => text(&notice.title).size(18).style(text::danger),
    };

    container(
        row![
            column![title, text(&notice.message)].spacing(4),
            Space::with_width(Length::Fill),
            button("Dismiss")
                .style(button::secondary)
                .on_press(Message::DismissNotice),
        ]
        .align_y(Alignment::Center),
    )
    .padding(12)
    .width(Length::Fill)
    .style(container::rounded_box)
    .into()
}
