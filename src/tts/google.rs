//! Network TTS backend using the Google Translate speech endpoint
//!
//! The endpoint only accepts short inputs, so text is split into chunks of at
//! most [`MAX_CHUNK_CHARS`] characters. The MP3 bodies of all chunks are
//! concatenated into one file, which plays back as one stream.

use super::SynthesisBackend;
use crate::audio::{AssetOrigin, AudioFormat};
use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, info};

pub const MAX_CHUNK_CHARS: usize = 100;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) lingotalks";

#[derive(Debug)]
pub struct GoogleTtsBackend {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl GoogleTtsBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        language: &str,
        idx: usize,
        total: usize,
    ) -> Result<Vec<u8>> {
        let idx = idx.to_string();
        let total = total.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(format!("{}/translate_tts", self.base_url))
            .query(&[
                ("ie", "UTF-8"),
                ("q", chunk),
                ("tl", language),
                ("client", "tw-ob"),
                ("idx", idx.as_str()),
                ("total", total.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("speech endpoint returned HTTP {}", status));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl SynthesisBackend for GoogleTtsBackend {
    async fn synthesize(&self, text: &str, language: &str, dest: &Path) -> Result<()> {
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(anyhow::anyhow!("no speakable text"));
        }
        info!("🌐 Requesting speech ({} chunk(s), lang {})", chunks.len(), language);

        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            debug!("  - chunk {}: '{}'", idx, chunk);
            let bytes = self.fetch_chunk(chunk, language, idx, chunks.len()).await?;
            audio.extend_from_slice(&bytes);
        }

        tokio::fs::write(dest, audio).await?;
        Ok(())
    }

    fn accepts(&self, language: &str) -> bool {
        crate::languages::Language::from_code(language).is_some()
    }

    fn output_format(&self) -> AudioFormat {
        AudioFormat::Mp3
    }

    fn origin(&self) -> AssetOrigin {
        AssetOrigin::Network
    }

    fn request_count(&self, text: &str) -> u32 {
        u32::try_from(split_text(text, MAX_CHUNK_CHARS).len()).unwrap_or(u32::MAX)
    }

    fn name(&self) -> &str {
        "google"
    }
}

fn sentence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[^.!?;:।。！？]+[.!?;:।。！？]*").expect("sentence pattern is valid")
    })
}

/// Split `text` into pieces of at most `max_chars` characters.
///
/// Prefers sentence punctuation, then whitespace, and only cuts inside a word
/// when a single word is longer than `max_chars`. Adjacent short pieces are
/// packed together.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in sentence_regex().find_iter(text) {
        let sentence = sentence.as_str().trim();
        if sentence.is_empty() {
            continue;
        }
        if sentence.chars().count() <= max_chars {
            pack(sentence, max_chars, &mut chunks, &mut current);
            continue;
        }
        for word in sentence.split_whitespace() {
            if word.chars().count() <= max_chars {
                pack(word, max_chars, &mut chunks, &mut current);
                continue;
            }
            let chars: Vec<char> = word.chars().collect();
            for part in chars.chunks(max_chars) {
                let part: String = part.iter().collect();
                pack(&part, max_chars, &mut chunks, &mut current);
            }
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn pack(piece: &str, max_chars: usize, chunks: &mut Vec<String>, current: &mut String) {
    let piece_len = piece.chars().count();
    let current_len = current.chars().count();
    if current.is_empty() {
        current.push_str(piece);
    } else if current_len + 1 + piece_len <= max_chars {
        current.push(' ');
        current.push_str(piece);
    } else {
        chunks.push(std::mem::take(current));
        current.push_str(piece);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(split_text("Hola, ¿qué tal?", 100), vec!["Hola, ¿qué tal?"]);
        assert!(split_text("  ...  ", 100).iter().all(|c| !c.trim().is_empty()));
        assert!(split_text("", 100).is_empty());
    }

    #[test]
    fn test_splits_on_sentences_first() {
        let text = "The first sentence is here. The second one follows! And a third?";
        let chunks = split_text(text, 30);
        assert_eq!(
            chunks,
            vec![
                "The first sentence is here.",
                "The second one follows!",
                "And a third?"
            ]
        );
    }

    #[test]
    fn test_request_count_follows_chunks() {
        let backend = GoogleTtsBackend::new("http://localhost", Duration::from_secs(1));
        assert_eq!(backend.request_count("Hola."), 1);
        let long = "palabra ".repeat(40);
        assert_eq!(
            backend.request_count(&long),
            split_text(&long, MAX_CHUNK_CHARS).len() as u32
        );
        assert!(backend.request_count(&long) >= 3);
    }

    #[test]
    fn test_long_sentence_splits_on_words() {
        let text = "one two three four five six seven eight nine ten";
        let chunks = split_text(text, 15);
        assert!(chunks.iter().all(|c| c.chars().count() <= 15));
        assert_eq!(chunks.join(" "), text);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "नमस्ते दुनिया। आप कैसे हैं।";
        let chunks = split_text(text, 100);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_hard_split_of_giant_word() {
        let word = "a".repeat(250);
        let chunks = split_text(&word, 100);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() <= 100));
    }
}
