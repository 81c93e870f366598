//! Offline TTS backend calling a local espeak-style binary

use super::SynthesisBackend;
use crate::audio::{AssetOrigin, AudioFormat};
use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct SystemBackend {
    command: PathBuf,
    language: String,
}

impl SystemBackend {
    pub fn new(command: impl Into<PathBuf>, language: &str) -> Self {
        Self {
            command: command.into(),
            language: language.to_lowercase(),
        }
    }

    /// Resolve `command` on PATH; `None` when it isn't installed
    pub fn detect(command: &str, language: &str) -> Option<Self> {
        which::which(command)
            .ok()
            .map(|path| Self::new(path, language))
    }
}

#[async_trait]
impl SynthesisBackend for SystemBackend {
    async fn synthesize(&self, text: &str, language: &str, dest: &Path) -> Result<()> {
        debug!("System speaking to {:?}: {}", dest, text);

        let output = tokio::process::Command::new(&self.command)
            .arg("-v")
            .arg(language)
            .arg("-w")
            .arg(dest)
            // Text such as "-5 degrees" must not be read as an option
            .arg("--")
            .arg(text)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn {:?}: {}", self.command, e))?;

        if !output.status.success() {
            return Err(anyhow::anyhow!(
                "{:?} failed with status {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }
        Ok(())
    }

    fn accepts(&self, language: &str) -> bool {
        language.eq_ignore_ascii_case(&self.language)
    }

    fn output_format(&self) -> AudioFormat {
        AudioFormat::Wav
    }

    fn origin(&self) -> AssetOrigin {
        AssetOrigin::Offline
    }

    fn name(&self) -> &str {
        "system"
    }
}
