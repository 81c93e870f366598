//! TTS (Text-to-Speech) Module
//!
//! Speech is produced by an ordered chain of backends. The first backend that
//! accepts the language and succeeds wins; compressed output is converted to
//! WAV when a converter is available.

use crate::audio::{AssetOrigin, AudioAsset, AudioFormat, TempStore};
use crate::config::Config;
use crate::error::SynthesisError;
use crate::languages::Language;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub mod convert;
pub mod google;
pub mod system;

pub use convert::{FfmpegConverter, FormatConverter};
pub use google::GoogleTtsBackend;
pub use system::SystemBackend;

/// Trait for speech synthesis backends
#[async_trait]
pub trait SynthesisBackend: Send + Sync + std::fmt::Debug {
    /// Write speech for `text` in `language` to `dest`
    async fn synthesize(&self, text: &str, language: &str, dest: &Path) -> anyhow::Result<()>;

    /// Whether this backend can speak `language`
    fn accepts(&self, language: &str) -> bool;

    /// Format of the files this backend writes
    fn output_format(&self) -> AudioFormat;

    fn origin(&self) -> AssetOrigin;

    /// Sequential requests needed to speak `text`; the synthesis timeout
    /// applies to each of them
    fn request_count(&self, _text: &str) -> u32 {
        1
    }

    /// Get the backend name
    fn name(&self) -> &str;
}

/// Turns text into a playable [`AudioAsset`]
#[derive(Debug)]
pub struct SpeechSynthesizer {
    backends: Vec<Arc<dyn SynthesisBackend>>,
    converter: Option<Arc<dyn FormatConverter>>,
    store: TempStore,
    timeout: Duration,
}

impl SpeechSynthesizer {
    pub fn new(store: TempStore, timeout: Duration) -> Self {
        Self {
            backends: Vec::new(),
            converter: None,
            store,
            timeout,
        }
    }

    /// Append a backend to the end of the chain
    pub fn with_backend(mut self, backend: Arc<dyn SynthesisBackend>) -> Self {
        self.backends.push(backend);
        self
    }

    pub fn with_converter(mut self, converter: Arc<dyn FormatConverter>) -> Self {
        self.converter = Some(converter);
        self
    }

    pub fn backend_names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    pub fn has_converter(&self) -> bool {
        self.converter.is_some()
    }

    /// Generate speech for `text` in `language`.
    ///
    /// Every file created by a failed attempt is removed before the error is
    /// returned.
    pub async fn generate(&self, text: &str, language: &str) -> Result<AudioAsset, SynthesisError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SynthesisError::EmptyText);
        }
        let lang = Language::from_code(language)
            .ok_or_else(|| SynthesisError::UnsupportedLanguage(language.to_string()))?;

        let mut last_error = None;
        for backend in self.backends.iter().filter(|b| b.accepts(lang.code)) {
            match self.attempt(backend.as_ref(), text, lang.code).await {
                Ok(raw) => return Ok(self.finish(raw).await),
                Err(e) => {
                    warn!("⚠️ {} failed, trying next backend: {}", backend.name(), e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(SynthesisError::BackendUnavailable))
    }

    async fn attempt(
        &self,
        backend: &dyn SynthesisBackend,
        text: &str,
        language: &str,
    ) -> Result<AudioAsset, SynthesisError> {
        let format = backend.output_format();
        let path = self.store.allocate(format)?;
        debug!("🎙️ {} → {:?}", backend.name(), path);

        let budget = self.timeout.saturating_mul(backend.request_count(text).max(1));
        let outcome = tokio::time::timeout(budget, backend.synthesize(text, language, &path))
            .await
            .map_err(|_| SynthesisError::Timeout {
                backend: backend.name().to_string(),
                secs: budget.as_secs(),
            })
            .and_then(|r| r.map_err(|e| SynthesisError::backend(backend.name(), e)))
            .and_then(|()| ensure_non_empty(&path, backend.name()));

        match outcome {
            Ok(()) => {
                info!("✅ {} produced {} audio", backend.name(), format);
                Ok(AudioAsset::new(path, format, backend.origin()))
            }
            Err(e) => {
                discard_path(&path);
                Err(e)
            }
        }
    }

    /// Convert a raw compressed asset to WAV if possible, else keep it
    async fn finish(&self, raw: AudioAsset) -> AudioAsset {
        if raw.format() == AudioFormat::Wav {
            return raw;
        }
        let Some(converter) = &self.converter else {
            return raw;
        };

        let wav_path = match self.store.allocate(AudioFormat::Wav) {
            Ok(p) => p,
            Err(e) => {
                warn!("⚠️ Could not allocate WAV file, keeping {}: {}", raw.format(), e);
                return raw;
            }
        };

        let converted = tokio::time::timeout(self.timeout, converter.convert(raw.path(), &wav_path))
            .await
            .map_err(|_| anyhow::anyhow!("timed out after {}s", self.timeout.as_secs()))
            .and_then(|r| r)
            .and_then(|()| {
                ensure_non_empty(&wav_path, converter.name()).map_err(anyhow::Error::from)
            });

        match converted {
            Ok(()) => {
                raw.discard();
                AudioAsset::new(wav_path, AudioFormat::Wav, raw.origin())
            }
            Err(e) => {
                warn!(
                    "⚠️ {} conversion failed, will play {} instead: {}",
                    converter.name(),
                    raw.format(),
                    e
                );
                discard_path(&wav_path);
                raw
            }
        }
    }
}

fn ensure_non_empty(path: &Path, backend: &str) -> Result<(), SynthesisError> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.len() > 0 => Ok(()),
        Ok(_) => Err(SynthesisError::backend(backend, "produced an empty file")),
        Err(e) => Err(SynthesisError::backend(backend, format!("output missing: {}", e))),
    }
}

fn discard_path(path: &Path) {
    if let Err(e) = crate::audio::remove_quietly(path) {
        warn!("⚠️ Could not delete {:?}: {}", path, e);
    }
}

/// Factory to build the synthesizer described by the configuration
pub fn build_synthesizer(config: &Config) -> SpeechSynthesizer {
    info!("🛠️ Creating speech synthesizer");
    let mut synth = SpeechSynthesizer::new(
        TempStore::new(&config.temp_dir),
        config.synthesis_timeout(),
    );

    let network: Arc<dyn SynthesisBackend> = Arc::new(GoogleTtsBackend::new(
        &config.tts_url,
        config.network_timeout(),
    ));

    let offline: Option<Arc<dyn SynthesisBackend>> = if config.offline_tts_enabled {
        match SystemBackend::detect(&config.offline_tts_command, &config.home_language) {
            Some(backend) => Some(Arc::new(backend)),
            None => {
                info!(
                    "  - Offline TTS '{}' not found on PATH",
                    config.offline_tts_command
                );
                None
            }
        }
    } else {
        None
    };

    let order: Vec<Arc<dyn SynthesisBackend>> = match (config.prefer_network_tts, offline) {
        (true, Some(offline)) => vec![network, offline],
        (false, Some(offline)) => vec![offline, network],
        (_, None) => vec![network],
    };
    for backend in order {
        info!("  - Backend: {}", backend.name());
        synth = synth.with_backend(backend);
    }

    if config.convert_to_wav {
        match FfmpegConverter::detect(&config.ffmpeg_command) {
            Some(converter) => {
                info!("  - Converter: {}", converter.name());
                synth = synth.with_converter(Arc::new(converter));
            }
            None => warn!(
                "⚠️ '{}' not found, MP3 output will be played unconverted",
                config.ffmpeg_command
            ),
        }
    }

    synth
}
