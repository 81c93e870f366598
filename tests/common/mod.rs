//! Shared fixtures for the integration tests

#![allow(dead_code)]

pub mod mock_device;
pub mod mock_translate;
pub mod mock_tts;

use lingotalks::audio::{AudioDevice, TempStore};
use lingotalks::playback::PlaybackController;
use lingotalks::tts::SpeechSynthesizer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub use mock_device::{DeviceEvent, MockDevice};
pub use mock_translate::MockTranslator;
pub use mock_tts::{ChunkedBackend, FailingBackend, FileBackend, MockConverter, SlowBackend};

/// Minimal RIFF header; the mocks never decode it
pub const WAV_BYTES: &[u8] = b"RIFF\x24\x00\x00\x00WAVEfmt ";
/// An MPEG frame sync followed by padding
pub const MP3_BYTES: &[u8] = b"\xff\xfb\x90\x64\x00\x00\x00\x00";

/// A temp directory, a synthesizer writing into it and a mock device
pub struct TestContext {
    pub temp_dir: TempDir,
    pub device: Arc<MockDevice>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            temp_dir: tempfile::tempdir().expect("Failed to create temp dir"),
            device: Arc::new(MockDevice::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Synthesizer with an empty chain and a short timeout
    pub fn synthesizer(&self) -> SpeechSynthesizer {
        SpeechSynthesizer::new(TempStore::new(self.dir()), Duration::from_secs(2))
    }

    pub fn controller(&self, synthesizer: SpeechSynthesizer) -> PlaybackController {
        let device: Arc<dyn AudioDevice> = self.device.clone();
        PlaybackController::new(Arc::new(synthesizer), device)
    }

    /// Every file currently in the temp directory
    pub fn files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(self.dir())
            .expect("Failed to read temp dir")
            .map(|e| e.expect("Bad dir entry").path())
            .collect();
        files.sort();
        files
    }
}
