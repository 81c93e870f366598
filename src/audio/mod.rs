//! Generated speech audio on disk and the device that plays it

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub mod device;
pub mod engine;

pub use device::AudioDevice;
pub use engine::RodioDevice;

/// Container format of a generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Mp3,
}

impl AudioFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
        }
    }

    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("wav") {
            Some(AudioFormat::Wav)
        } else if ext.eq_ignore_ascii_case("mp3") {
            Some(AudioFormat::Mp3)
        } else {
            None
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            AudioFormat::Wav => "WAV",
            AudioFormat::Mp3 => "MP3",
        })
    }
}

/// Which kind of backend produced an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetOrigin {
    Offline,
    Network,
}

/// One generated speech file.
///
/// Cloning copies the handle, not the file. Whoever holds the asset last
/// (normally the playback controller) is responsible for calling
/// [`AudioAsset::remove`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioAsset {
    path: PathBuf,
    format: AudioFormat,
    origin: AssetOrigin,
}

impl AudioAsset {
    pub fn new(path: impl Into<PathBuf>, format: AudioFormat, origin: AssetOrigin) -> Self {
        Self {
            path: path.into(),
            format,
            origin,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn origin(&self) -> AssetOrigin {
        self.origin
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Delete the backing file. A file that is already gone is not an error.
    pub fn remove(&self) -> io::Result<()> {
        remove_quietly(&self.path)
    }

    /// Best-effort [`AudioAsset::remove`] for cleanup paths
    pub fn discard(&self) {
        if let Err(e) = self.remove() {
            warn!("⚠️ Could not delete audio file {:?}: {}", self.path, e);
        }
    }
}

/// Remove a file, treating "not found" as success
pub fn remove_quietly(path: &Path) -> io::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!("🗑️ Removed {:?}", path);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Allocates uniquely named files for generated audio.
///
/// Every call creates a new file, so a leftover from an earlier session can
/// never be overwritten or played back by mistake.
#[derive(Debug, Clone)]
pub struct TempStore {
    dir: PathBuf,
    prefix: String,
}

impl TempStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "tts_".to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create an empty file named `tts_XXXXXX.<ext>` and return its path
    pub fn allocate(&self, format: AudioFormat) -> io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let suffix = format!(".{}", format.extension());
        let file = tempfile::Builder::new()
            .prefix(&self.prefix)
            .suffix(&suffix)
            .tempfile_in(&self.dir)?;
        let (_handle, path) = file.keep().map_err(|e| e.error)?;
        Ok(path)
    }
}

impl Default for TempStore {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}
