//! Mock speech backends and converter for testing
//!
//! Each mock records the calls it received so tests can check chain order.

use anyhow::Result;
use async_trait::async_trait;
use lingotalks::audio::{AssetOrigin, AudioFormat};
use lingotalks::tts::{FormatConverter, SynthesisBackend};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use super::{MP3_BYTES, WAV_BYTES};

/// Backend that writes a fixed payload to the destination
#[derive(Debug)]
pub struct FileBackend {
    name: &'static str,
    format: AudioFormat,
    origin: AssetOrigin,
    languages: Option<Vec<&'static str>>,
    /// (text, language) for every call
    pub calls: Mutex<Vec<(String, String)>>,
}

impl FileBackend {
    /// Offline-style backend writing WAV
    pub fn wav(name: &'static str) -> Self {
        Self {
            name,
            format: AudioFormat::Wav,
            origin: AssetOrigin::Offline,
            languages: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Network-style backend writing MP3
    pub fn mp3(name: &'static str) -> Self {
        Self {
            name,
            format: AudioFormat::Mp3,
            origin: AssetOrigin::Network,
            languages: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Restrict the languages this backend accepts
    pub fn only(mut self, languages: &[&'static str]) -> Self {
        self.languages = Some(languages.to_vec());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SynthesisBackend for FileBackend {
    async fn synthesize(&self, text: &str, language: &str, dest: &Path) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), language.to_string()));
        let bytes = match self.format {
            AudioFormat::Wav => WAV_BYTES,
            AudioFormat::Mp3 => MP3_BYTES,
        };
        tokio::fs::write(dest, bytes).await?;
        Ok(())
    }

    fn accepts(&self, language: &str) -> bool {
        self.languages
            .as_ref()
            .map_or(true, |langs| langs.contains(&language))
    }

    fn output_format(&self) -> AudioFormat {
        self.format
    }

    fn origin(&self) -> AssetOrigin {
        self.origin
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// Backend that leaves a partial file behind and then fails
#[derive(Debug)]
pub struct FailingBackend {
    pub name: &'static str,
    pub calls: Mutex<usize>,
}

impl FailingBackend {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            calls: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl SynthesisBackend for FailingBackend {
    async fn synthesize(&self, _text: &str, _language: &str, dest: &Path) -> Result<()> {
        *self.calls.lock().unwrap() += 1;
        tokio::fs::write(dest, b"partial").await?;
        Err(anyhow::anyhow!("network unreachable"))
    }

    fn accepts(&self, _language: &str) -> bool {
        true
    }

    fn output_format(&self) -> AudioFormat {
        AudioFormat::Mp3
    }

    fn origin(&self) -> AssetOrigin {
        AssetOrigin::Network
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// Backend that never finishes within any sane timeout
#[derive(Debug)]
pub struct SlowBackend {
    pub delay: Duration,
}

#[async_trait]
impl SynthesisBackend for SlowBackend {
    async fn synthesize(&self, _text: &str, _language: &str, dest: &Path) -> Result<()> {
        tokio::fs::write(dest, WAV_BYTES).await?;
        tokio::time::sleep(self.delay).await;
        Ok(())
    }

    fn accepts(&self, _language: &str) -> bool {
        true
    }

    fn output_format(&self) -> AudioFormat {
        AudioFormat::Wav
    }

    fn origin(&self) -> AssetOrigin {
        AssetOrigin::Offline
    }

    fn name(&self) -> &str {
        "slow"
    }
}

/// Backend that makes one slow request per word, like a chunking network backend
#[derive(Debug)]
pub struct ChunkedBackend {
    pub per_request: Duration,
}

#[async_trait]
impl SynthesisBackend for ChunkedBackend {
    async fn synthesize(&self, text: &str, _language: &str, dest: &Path) -> Result<()> {
        for _ in text.split_whitespace() {
            tokio::time::sleep(self.per_request).await;
        }
        tokio::fs::write(dest, MP3_BYTES).await?;
        Ok(())
    }

    fn accepts(&self, _language: &str) -> bool {
        true
    }

    fn output_format(&self) -> AudioFormat {
        AudioFormat::Mp3
    }

    fn origin(&self) -> AssetOrigin {
        AssetOrigin::Network
    }

    fn request_count(&self, text: &str) -> u32 {
        text.split_whitespace().count() as u32
    }

    fn name(&self) -> &str {
        "chunked"
    }
}

/// Converter that writes a WAV payload, or a partial file and an error
#[derive(Debug, Default)]
pub struct MockConverter {
    pub should_fail: bool,
    pub calls: Mutex<usize>,
}

impl MockConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl FormatConverter for MockConverter {
    async fn convert(&self, src: &Path, dest: &Path) -> Result<()> {
        *self.calls.lock().unwrap() += 1;
        anyhow::ensure!(src.exists(), "source {:?} missing", src);
        if self.should_fail {
            tokio::fs::write(dest, b"half a wav").await?;
            anyhow::bail!("Mock conversion failure");
        }
        tokio::fs::write(dest, WAV_BYTES).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "mock-converter"
    }
}
