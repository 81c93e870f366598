//! Main application state for the LingoTalks GUI
//!
//! Contains the LingoApp struct and initialization logic.

use iced::widget::text_editor;
use iced::Task;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::audio::RodioDevice;
use crate::config::{self, Config};
use crate::dictionary::DictionaryClient;
use crate::languages::Language;
use crate::playback::{PlayState, PlaybackController};
use crate::translate::{GoogleTranslator, TranslationClient};
use crate::tts;

use super::messages::Message;
use super::state::{Notice, PracticeState, Tab};

/// Main application state
pub struct LingoApp {
    /// Current view/tab
    pub(crate) current_tab: Tab,
    /// Configuration
    pub(crate) config: Config,
    /// Where settings changed in the app are written; `None` keeps them in memory
    pub(crate) config_file: Option<PathBuf>,
    /// Target language shared by every tab
    pub(crate) language: Language,
    /// Status line under the transport buttons
    pub(crate) status: String,
    pub(crate) notice: Option<Notice>,

    /// English context typed by the user
    pub(crate) context: text_editor::Content,
    /// Last translation of the context
    pub(crate) translated: String,
    pub(crate) practice: PracticeState,
    /// Last state seen by the tick
    pub(crate) play_state: PlayState,
    /// Id of the newest generate request; older completions are ignored
    pub(crate) request_id: u64,

    pub(crate) word_input: String,
    pub(crate) meaning: String,
    pub(crate) lookup_id: u64,

    pub(crate) notes: text_editor::Content,
    pub(crate) notes_path: Option<PathBuf>,
    pub(crate) notes_busy: bool,

    pub(crate) controller: Arc<PlaybackController>,
    pub(crate) translator: Arc<dyn TranslationClient>,
    pub(crate) dictionary: DictionaryClient,
}

impl LingoApp {
    /// Create a new LingoApp instance
    pub fn new() -> (Self, Task<Message>) {
        let config = Config::load().unwrap_or_default();
        let synthesizer = tts::build_synthesizer(&config);
        info!(
            "🎙️ Speech backends: {:?} (wav conversion: {})",
            synthesizer.backend_names(),
            synthesizer.has_converter()
        );

        let controller = Arc::new(PlaybackController::new(
            Arc::new(synthesizer),
            Arc::new(RodioDevice::new()),
        ));
        let translator: Arc<dyn TranslationClient> =
            Arc::new(GoogleTranslator::from_config(&config));
        let dictionary = DictionaryClient::from_config(&config);

        let app = Self::with_services(config, controller, translator, dictionary)
            .with_config_file(config::config_path());
        (app, Task::none())
    }

    /// Build the app around already constructed services
    pub fn with_services(
        config: Config,
        controller: Arc<PlaybackController>,
        translator: Arc<dyn TranslationClient>,
        dictionary: DictionaryClient,
    ) -> Self {
        Self {
            current_tab: Tab::default(),
            language: Language::from_code_or_default(&config.default_language),
            status: "Ready".to_string(),
            notice: None,
            context: text_editor::Content::new(),
            translated: String::new(),
            practice: PracticeState::default(),
            play_state: PlayState::Idle,
            request_id: 0,
            word_input: String::new(),
            meaning: String::new(),
            lookup_id: 0,
            notes: text_editor::Content::new(),
            notes_path: None,
            notes_busy: false,
            controller,
            translator,
            dictionary,
            config,
            config_file: None,
        }
    }

    /// Persist settings changed in the app to `path`
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Application title
    pub fn title(&self) -> String {
        format!("LingoTalks - {}", self.language.name)
    }

    /// Application theme
    pub fn theme(&self) -> iced::Theme {
        iced::Theme::Dark
    }
}
