//! Compressed → WAV conversion

use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Converts an audio file to WAV
#[async_trait]
pub trait FormatConverter: Send + Sync + std::fmt::Debug {
    async fn convert(&self, src: &Path, dest: &Path) -> Result<()>;

    fn name(&self) -> &str;
}

/// Converter shelling out to ffmpeg
#[derive(Debug)]
pub struct FfmpegConverter {
    command: PathBuf,
}

impl FfmpegConverter {
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn detect(command: &str) -> Option<Self> {
        which::which(command).ok().map(Self::new)
    }
}

#[async_trait]
impl FormatConverter for FfmpegConverter {
    async fn convert(&self, src: &Path, dest: &Path) -> Result<()> {
        debug!("🔄 Converting {:?} → {:?}", src, dest);

        let output = tokio::process::Command::new(&self.command)
            .args(["-y", "-loglevel", "error", "-i"])
            .arg(src)
            .arg(dest)
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            return Err(anyhow::anyhow!(
                "ffmpeg failed with status {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "ffmpeg"
    }
}
