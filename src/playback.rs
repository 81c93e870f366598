//! Playback Controller
//!
//! Owns the one "current" speech asset and drives the audio device through
//! the lifecycle generate → play → pause/resume → replay → cleanup.
//!
//! All mutation of the session happens under a single mutex, and the mutex
//! is never held across an `.await`. Generation is split into
//! [`PlaybackController::begin_generation`] (stop, release and delete the old
//! asset), the synthesis itself, and [`PlaybackController::install`]. A newer
//! generation or a cleanup supersedes an older ticket, whose result is then
//! deleted instead of installed.

use crate::audio::{AudioAsset, AudioDevice};
use crate::error::{PlaybackError, SynthesisError};
use crate::tts::SpeechSynthesizer;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Transport state of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    /// Nothing generated
    #[default]
    Idle,
    /// An asset is held but not sounding
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Default)]
struct Session {
    asset: Option<AudioAsset>,
    state: PlayState,
    generation: u64,
}

/// Proof that a generation was started; hand it back to
/// [`PlaybackController::install`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct GenerationTicket(u64);

impl GenerationTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

pub struct PlaybackController {
    synthesizer: Arc<SpeechSynthesizer>,
    device: Arc<dyn AudioDevice>,
    session: Mutex<Session>,
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("device", &self.device.name())
            .finish()
    }
}

impl PlaybackController {
    pub fn new(synthesizer: Arc<SpeechSynthesizer>, device: Arc<dyn AudioDevice>) -> Self {
        Self {
            synthesizer,
            device,
            session: Mutex::new(Session::default()),
        }
    }

    pub fn synthesizer(&self) -> Arc<SpeechSynthesizer> {
        self.synthesizer.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        // The session holds no invariant a panic could break halfway
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current state, after noticing audio that finished on its own
    pub fn state(&self) -> PlayState {
        let mut session = self.lock();
        if session.state == PlayState::Playing && !self.device.is_busy() {
            debug!("⏹️ Playback reached the end");
            session.state = PlayState::Stopped;
        }
        session.state
    }

    pub fn current_asset(&self) -> Option<AudioAsset> {
        self.lock().asset.clone()
    }

    /// True when there is a file on disk that `play` could use
    pub fn has_audio(&self) -> bool {
        self.lock().asset.as_ref().is_some_and(AudioAsset::exists)
    }

    /// Stop, release and delete the current asset, then supersede any
    /// in-flight generation.
    pub fn begin_generation(&self) -> GenerationTicket {
        let mut session = self.lock();
        self.release_locked(&mut session);
        session.generation += 1;
        GenerationTicket(session.generation)
    }

    /// Make `asset` current if `ticket` is still the latest generation.
    ///
    /// A superseded ticket's asset is deleted and
    /// [`SynthesisError::Superseded`] returned.
    pub fn install(
        &self,
        ticket: GenerationTicket,
        asset: AudioAsset,
    ) -> Result<AudioAsset, SynthesisError> {
        let mut session = self.lock();
        if session.generation != ticket.0 {
            debug!(
                "🗑️ Discarding stale audio (ticket {}, current {})",
                ticket.0, session.generation
            );
            asset.discard();
            return Err(SynthesisError::Superseded);
        }

        // A ticket is only installed once; anything still held is released first
        if session.asset.is_some() {
            self.release_locked(&mut session);
        }
        info!("🎧 Audio ready: {:?} ({})", asset.path(), asset.format());
        session.asset = Some(asset.clone());
        session.state = PlayState::Stopped;
        Ok(asset)
    }

    /// Synthesize `text` and make it the current asset
    pub async fn generate(&self, text: &str, language: &str) -> Result<AudioAsset, SynthesisError> {
        let ticket = self.begin_generation();
        let asset = self.synthesizer.generate(text, language).await?;
        self.install(ticket, asset)
    }

    /// Load the current asset and start it from the beginning
    pub fn play(&self) -> Result<(), PlaybackError> {
        let mut session = self.lock();
        let path = match &session.asset {
            Some(asset) if asset.exists() => asset.path().to_path_buf(),
            _ => return Err(PlaybackError::NothingToPlay),
        };

        self.start_locked(&mut session, &path)?;
        info!("▶️ Playing {:?}", path.file_name().unwrap_or_default());
        Ok(())
    }

    /// Pause if playing; otherwise a no-op
    pub fn pause(&self) {
        let mut session = self.lock();
        if session.state != PlayState::Playing {
            return;
        }
        match self.device.pause() {
            Ok(()) => {
                session.state = PlayState::Paused;
                debug!("⏸️ Paused");
            }
            Err(e) => warn!("⚠️ Pause error: {}", e),
        }
    }

    /// Resume if paused; otherwise a no-op
    pub fn resume(&self) {
        let mut session = self.lock();
        if session.state != PlayState::Paused {
            return;
        }
        match self.device.unpause() {
            Ok(()) => {
                session.state = PlayState::Playing;
                debug!("▶️ Resumed");
            }
            Err(e) => warn!("⚠️ Resume error: {}", e),
        }
    }

    /// Pause when playing, resume when paused. Returns the resulting state.
    pub fn toggle_pause(&self) -> PlayState {
        match self.state() {
            PlayState::Playing => self.pause(),
            PlayState::Paused => self.resume(),
            PlayState::Idle | PlayState::Stopped => {}
        }
        self.state()
    }

    /// Halt playback from any state
    pub fn stop(&self) {
        let mut session = self.lock();
        if let Err(e) = self.device.stop() {
            warn!("⚠️ Stop error: {}", e);
        }
        session.state = if session.asset.is_some() {
            PlayState::Stopped
        } else {
            PlayState::Idle
        };
    }

    /// Reload the current asset from disk and play it from the start
    pub fn replay(&self) -> Result<(), PlaybackError> {
        let mut session = self.lock();
        let path = session
            .asset
            .as_ref()
            .map(|a| a.path().to_path_buf())
            .ok_or(PlaybackError::NothingToPlay)?;

        self.start_locked(&mut session, &path)?;
        info!("🔁 Replaying {:?}", path.file_name().unwrap_or_default());
        Ok(())
    }

    /// Stop whatever the device holds, then load and play `path`.
    ///
    /// Any failure after the stop leaves the session `Stopped`.
    fn start_locked(&self, session: &mut Session, path: &Path) -> Result<(), PlaybackError> {
        self.device.init()?;
        if let Err(e) = self.device.stop() {
            debug!("Stop before load failed: {}", e);
        }
        let started = self.device.load(path).and_then(|()| self.device.play());
        match started {
            Ok(()) => {
                session.state = PlayState::Playing;
                Ok(())
            }
            Err(e) => {
                warn!("⚠️ Playback start failed: {}", e);
                session.state = PlayState::Stopped;
                Err(e)
            }
        }
    }

    /// Stop, release the device, delete tracked files and return to Idle.
    ///
    /// Never fails and may be called any number of times.
    pub fn cleanup(&self) {
        let mut session = self.lock();
        self.release_locked(&mut session);
        // Anything still synthesizing now belongs to a dead session
        session.generation += 1;
    }

    fn release_locked(&self, session: &mut Session) {
        if session.state != PlayState::Idle || session.asset.is_some() {
            if let Err(e) = self.device.stop() {
                warn!("⚠️ Stop during cleanup failed: {}", e);
            }
            if let Err(e) = self.device.release() {
                warn!("⚠️ Device release failed: {}", e);
            }
        }
        if let Some(asset) = session.asset.take() {
            asset.discard();
        }
        session.state = PlayState::Idle;
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.cleanup();
    }
}
