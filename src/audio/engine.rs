//! Rodio audio device
//!
//! Uses a channel-based architecture to handle rodio's non-Send stream.
//! The device spawns a dedicated audio thread that owns the playback infrastructure.

use super::device::AudioDevice;
use crate::error::PlaybackError;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use tracing::{debug, error, info, warn};

type Reply = mpsc::Sender<Result<(), String>>;

/// Commands sent to the audio thread
enum AudioCommand {
    Load(PathBuf, Reply),
    Play(Reply),
    Pause(Reply),
    Unpause(Reply),
    Stop(Reply),
    Busy(mpsc::Sender<bool>),
    Shutdown,
}

/// Thread-safe handle to the audio output thread.
///
/// The thread is started lazily by [`AudioDevice::init`] and lives until the
/// device is dropped.
pub struct RodioDevice {
    sender: Mutex<Option<mpsc::Sender<AudioCommand>>>,
}

impl std::fmt::Debug for RodioDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioDevice").finish()
    }
}

impl Default for RodioDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl RodioDevice {
    pub fn new() -> Self {
        Self {
            sender: Mutex::new(None),
        }
    }

    fn audio_thread(receiver: mpsc::Receiver<AudioCommand>, ready: Reply) {
        use rodio::{OutputStream, Sink};

        // Initialize audio output on this thread
        let (stream, stream_handle) = match OutputStream::try_default() {
            Ok(s) => s,
            Err(e) => {
                warn!("🔇 Failed to initialize audio output: {}", e);
                let _ = ready.send(Err(e.to_string()));
                return;
            }
        };

        // Keep stream alive
        let _stream = stream;
        let mut sink: Option<Sink> = None;
        let _ = ready.send(Ok(()));

        info!("🔊 Audio thread started");

        while let Ok(cmd) = receiver.recv() {
            match cmd {
                AudioCommand::Load(path, resp) => {
                    if let Some(old) = sink.take() {
                        old.stop();
                    }
                    let result = Self::load_sink(&stream_handle, &path).map(|loaded| {
                        info!("🔊 Loaded: {:?}", path.file_name().unwrap_or_default());
                        sink = Some(loaded);
                    });
                    if let Err(ref e) = result {
                        error!("❌ Failed to load {:?}: {}", path, e);
                    }
                    let _ = resp.send(result);
                }
                AudioCommand::Play(resp) => {
                    let result = match &sink {
                        Some(s) => {
                            s.play();
                            Ok(())
                        }
                        None => Err("nothing is loaded".to_string()),
                    };
                    let _ = resp.send(result);
                }
                AudioCommand::Pause(resp) => {
                    if let Some(s) = &sink {
                        s.pause();
                    }
                    let _ = resp.send(Ok(()));
                }
                AudioCommand::Unpause(resp) => {
                    if let Some(s) = &sink {
                        s.play();
                    }
                    let _ = resp.send(Ok(()));
                }
                AudioCommand::Stop(resp) => {
                    if let Some(s) = sink.take() {
                        debug!("🛑 Stopping playback");
                        s.stop();
                    }
                    let _ = resp.send(Ok(()));
                }
                AudioCommand::Busy(resp) => {
                    let busy = sink
                        .as_ref()
                        .map(|s| !s.empty() && !s.is_paused())
                        .unwrap_or(false);
                    let _ = resp.send(busy);
                }
                AudioCommand::Shutdown => break,
            }
        }

        if let Some(s) = sink.take() {
            s.stop();
        }
        info!("🔇 Audio thread stopped");
    }

    fn load_sink(handle: &rodio::OutputStreamHandle, path: &Path) -> Result<rodio::Sink, String> {
        // Decoded from memory: the file is closed before load returns
        let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
        let source =
            rodio::Decoder::new(std::io::Cursor::new(bytes)).map_err(|e| e.to_string())?;
        let sink = rodio::Sink::try_new(handle).map_err(|e| e.to_string())?;
        sink.pause();
        sink.append(source);
        Ok(sink)
    }

    fn sender(&self) -> Result<mpsc::Sender<AudioCommand>, PlaybackError> {
        self.sender.lock()?.clone().ok_or_else(|| {
            PlaybackError::DeviceUnavailable("audio device is not initialized".to_string())
        })
    }

    /// Send a command and wait for the audio thread's answer
    fn call(
        &self,
        make: impl FnOnce(Reply) -> AudioCommand,
    ) -> Result<Result<(), String>, PlaybackError> {
        let sender = self.sender()?;
        let (tx, rx) = mpsc::channel();
        sender
            .send(make(tx))
            .map_err(|e| PlaybackError::Device(format!("Audio thread disconnected: {}", e)))?;
        rx.recv()
            .map_err(|e| PlaybackError::Device(format!("Audio thread disconnected: {}", e)))
    }

    fn simple(&self, make: impl FnOnce(Reply) -> AudioCommand) -> Result<(), PlaybackError> {
        self.call(make)?.map_err(PlaybackError::Device)
    }
}

impl AudioDevice for RodioDevice {
    fn init(&self) -> Result<(), PlaybackError> {
        let mut guard = self.sender.lock()?;
        if guard.is_some() {
            return Ok(());
        }

        let (sender, receiver) = mpsc::channel::<AudioCommand>();
        let (ready_tx, ready_rx) = mpsc::channel();

        // Spawn dedicated audio thread
        thread::Builder::new()
            .name("audio-playback".into())
            .spawn(move || Self::audio_thread(receiver, ready_tx))
            .map_err(|e| PlaybackError::DeviceUnavailable(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {
                *guard = Some(sender);
                Ok(())
            }
            Ok(Err(e)) => Err(PlaybackError::DeviceUnavailable(e)),
            Err(_) => Err(PlaybackError::DeviceUnavailable(
                "audio thread exited during startup".to_string(),
            )),
        }
    }

    fn load(&self, path: &Path) -> Result<(), PlaybackError> {
        let owned = path.to_path_buf();
        self.call(|tx| AudioCommand::Load(owned, tx))?
            .map_err(|message| PlaybackError::Load {
                path: path.to_path_buf(),
                message,
            })
    }

    fn play(&self) -> Result<(), PlaybackError> {
        self.simple(AudioCommand::Play)
    }

    fn pause(&self) -> Result<(), PlaybackError> {
        self.simple(AudioCommand::Pause)
    }

    fn unpause(&self) -> Result<(), PlaybackError> {
        self.simple(AudioCommand::Unpause)
    }

    fn stop(&self) -> Result<(), PlaybackError> {
        self.simple(AudioCommand::Stop)
    }

    fn release(&self) -> Result<(), PlaybackError> {
        // Audio is decoded from memory, so dropping the sink is all it takes
        self.stop()
    }

    fn is_busy(&self) -> bool {
        let Ok(sender) = self.sender() else {
            return false;
        };
        let (tx, rx) = mpsc::channel();
        if sender.send(AudioCommand::Busy(tx)).is_err() {
            return false;
        }
        rx.recv().unwrap_or(false)
    }

    fn name(&self) -> &str {
        "rodio"
    }
}

impl Drop for RodioDevice {
    fn drop(&mut self) {
        if let Ok(guard) = self.sender.lock() {
            if let Some(sender) = guard.as_ref() {
                let _ = sender.send(AudioCommand::Shutdown);
            }
        }
    }
}
