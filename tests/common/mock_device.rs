//! Mock audio device for testing
//!
//! Records every call and keeps a fake "busy" flag so tests can simulate
//! audio that is still sounding or has reached its end.

use lingotalks::audio::AudioDevice;
use lingotalks::error::PlaybackError;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceEvent {
    Init,
    Load(PathBuf),
    Play,
    Pause,
    Unpause,
    Stop,
    Release,
}

#[derive(Debug, Default)]
pub struct MockDevice {
    events: Mutex<Vec<DeviceEvent>>,
    loaded: Mutex<Option<PathBuf>>,
    busy: AtomicBool,
    /// Make `init` fail like a machine without an output device
    pub fail_init: AtomicBool,
    pub fail_load: AtomicBool,
    pub fail_pause: AtomicBool,
    pub fail_unpause: AtomicBool,
    pub fail_stop: AtomicBool,
    pub fail_release: AtomicBool,
}

impl MockDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let device = Self::default();
        device.fail_init.store(true, Ordering::SeqCst);
        device
    }

    pub fn events(&self) -> Vec<DeviceEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear_events(&self) {
        self.events.lock().unwrap().clear();
    }

    /// File the device currently holds, if any
    pub fn loaded(&self) -> Option<PathBuf> {
        self.loaded.lock().unwrap().clone()
    }

    pub fn load_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, DeviceEvent::Load(_)))
            .count()
    }

    /// Simulate the loaded audio playing to its end
    pub fn finish(&self) {
        self.busy.store(false, Ordering::SeqCst);
    }

    fn record(&self, event: DeviceEvent) {
        self.events.lock().unwrap().push(event);
    }

    fn check(switch: &AtomicBool, call: &str) -> Result<(), PlaybackError> {
        if switch.load(Ordering::SeqCst) {
            return Err(PlaybackError::Device(format!("{call} rejected")));
        }
        Ok(())
    }
}

impl AudioDevice for MockDevice {
    fn init(&self) -> Result<(), PlaybackError> {
        self.record(DeviceEvent::Init);
        if self.fail_init.load(Ordering::SeqCst) {
            return Err(PlaybackError::DeviceUnavailable(
                "no output device".to_string(),
            ));
        }
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<(), PlaybackError> {
        self.record(DeviceEvent::Load(path.to_path_buf()));
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(PlaybackError::Load {
                path: path.to_path_buf(),
                message: "unsupported data".to_string(),
            });
        }
        if !path.exists() {
            return Err(PlaybackError::Load {
                path: path.to_path_buf(),
                message: "file not found".to_string(),
            });
        }
        *self.loaded.lock().unwrap() = Some(path.to_path_buf());
        self.busy.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn play(&self) -> Result<(), PlaybackError> {
        self.record(DeviceEvent::Play);
        if self.loaded.lock().unwrap().is_none() {
            return Err(PlaybackError::Device("nothing loaded".to_string()));
        }
        self.busy.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn pause(&self) -> Result<(), PlaybackError> {
        self.record(DeviceEvent::Pause);
        Self::check(&self.fail_pause, "pause")?;
        self.busy.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn unpause(&self) -> Result<(), PlaybackError> {
        self.record(DeviceEvent::Unpause);
        Self::check(&self.fail_unpause, "unpause")?;
        self.busy.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) -> Result<(), PlaybackError> {
        self.record(DeviceEvent::Stop);
        Self::check(&self.fail_stop, "stop")?;
        self.busy.store(false, Ordering::SeqCst);
        *self.loaded.lock().unwrap() = None;
        Ok(())
    }

    fn release(&self) -> Result<(), PlaybackError> {
        self.record(DeviceEvent::Release);
        Self::check(&self.fail_release, "release")?;
        *self.loaded.lock().unwrap() = None;
        Ok(())
    }

    fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "mock"
    }
}
