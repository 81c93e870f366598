//! Notes persistence: one plain UTF-8 text file per notes buffer

use crate::error::{LingoResult, PersistenceError, TranslationError};
use crate::translate::TranslationClient;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write `text` (trimmed) to `path`. Blank notes are refused.
pub fn save(path: &Path, text: &str) -> Result<(), PersistenceError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(PersistenceError::NothingToSave);
    }
    std::fs::write(path, text).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("📝 Notes saved to {:?}", path);
    Ok(())
}

pub fn load(path: &Path) -> Result<String, PersistenceError> {
    let text = std::fs::read_to_string(path).map_err(|source| PersistenceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    info!("📝 Notes loaded from {:?}", path);
    Ok(text)
}

/// Translate a notes buffer. Blank notes translate to an empty string.
pub async fn translate(
    translator: &dyn TranslationClient,
    text: &str,
    target: &str,
) -> Result<String, TranslationError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(String::new());
    }
    translator.translate(text, "auto", target).await
}

/// Translate the notes file at `path`, writing the result to `out` when given
pub async fn translate_file(
    translator: &dyn TranslationClient,
    path: &Path,
    target: &str,
    out: Option<&Path>,
) -> LingoResult<String> {
    let text = load(path)?;
    let translated = translate(translator, &text, target).await?;
    if let Some(out) = out {
        save(out, &translated)?;
    }
    Ok(translated)
}

/// Suggested file name for a new notes file, e.g. `notes-2026-10-19.txt`
pub fn default_file_name() -> String {
    format!("notes-{}.txt", chrono::Local::now().format("%Y-%m-%d"))
}

/// Suggested directory for notes files
pub fn default_dir() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
