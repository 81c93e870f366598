//! Audio output abstraction used by the playback controller

use crate::error::PlaybackError;
use std::path::Path;

/// A single-stream audio output.
///
/// Implementations hold at most one loaded file. `load` replaces whatever was
/// loaded before and leaves the new audio paused at the beginning.
pub trait AudioDevice: Send + Sync + std::fmt::Debug {
    /// Bring up the output. Calling it again once it succeeded is a no-op.
    fn init(&self) -> Result<(), PlaybackError>;

    /// Load the file at `path`, replacing anything already loaded
    fn load(&self, path: &Path) -> Result<(), PlaybackError>;

    /// Start (or restart) output of the loaded audio
    fn play(&self) -> Result<(), PlaybackError>;

    fn pause(&self) -> Result<(), PlaybackError>;

    fn unpause(&self) -> Result<(), PlaybackError>;

    /// Halt output. The loaded audio must be loaded again before the next play.
    fn stop(&self) -> Result<(), PlaybackError>;

    /// Drop every reference the device holds to the loaded file
    fn release(&self) -> Result<(), PlaybackError>;

    /// True while the loaded audio is audibly playing
    fn is_busy(&self) -> bool;

    /// Get the device name
    fn name(&self) -> &str;
}
