use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Languages
    pub default_language: String,
    pub home_language: String,

    // Services
    pub translate_url: String,
    pub tts_url: String,
    pub dictionary_url: String,
    pub network_timeout_secs: u64,

    // Speech
    pub prefer_network_tts: bool,
    pub offline_tts_enabled: bool,
    pub offline_tts_command: String,
    pub convert_to_wav: bool,
    pub ffmpeg_command: String,
    pub synthesis_timeout_secs: u64,
    pub temp_dir: String,

    // Meta
    pub log_level: String,

    // Practice
    pub sample_contexts: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            home_language: "en".to_string(),
            translate_url: "https://translate.googleapis.com".to_string(),
            tts_url: "https://translate.google.com".to_string(),
            dictionary_url: "https://api.dictionaryapi.dev".to_string(),
            network_timeout_secs: 8,
            prefer_network_tts: true,
            offline_tts_enabled: true,
            offline_tts_command: "espeak-ng".to_string(),
            convert_to_wav: true,
            ffmpeg_command: "ffmpeg".to_string(),
            synthesis_timeout_secs: 10,
            temp_dir: std::env::temp_dir().to_string_lossy().to_string(),
            log_level: "INFO".to_string(),
            sample_contexts: vec![
                "Introduce yourself and talk about your hobbies.".to_string(),
                "Describe your favorite book and why you like it.".to_string(),
                "Explain how to prepare your favorite vegetarian dish.".to_string(),
                "Talk about a memorable trip you took.".to_string(),
                "Describe a daily routine for a student preparing for exams.".to_string(),
            ],
        }
    }
}

impl Config {
    /// Load config from file, or fall back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                // Graceful degradation: log warning and use defaults
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                // Backup corrupt file for debugging
                let backup_path = config_path.with_extension("json.corrupt");
                let _ = std::fs::rename(config_path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    /// Save config to file
    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn network_timeout(&self) -> Duration {
        Duration::from_secs(self.network_timeout_secs.max(1))
    }

    pub fn synthesis_timeout(&self) -> Duration {
        Duration::from_secs(self.synthesis_timeout_secs.max(1))
    }
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("LINGOTALKS_CONFIG") {
        return PathBuf::from(path);
    }

    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lingotalks")
        .join("config.json")
}
