//! Machine translation
//!
//! Talks to the public Google Translate `translate_a/single` endpoint, the
//! same one browser extensions use. Inputs above [`MAX_REQUEST_CHARS`] are
//! sent as several requests split on line boundaries, or between words for
//! a single very long line.

use crate::error::TranslationError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

pub const MAX_REQUEST_CHARS: usize = 5000;

/// Trait for translation services
#[async_trait]
pub trait TranslationClient: Send + Sync + std::fmt::Debug {
    /// Translate `text` from `source` ("auto" to detect) into `target`
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError>;

    /// Get the service name
    fn name(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl GoogleTranslator {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(&config.translate_url, config.network_timeout())
    }

    async fn translate_one(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        let response = self
            .client
            .get(format!("{}/translate_a/single", self.base_url))
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;

        if !status.is_success() {
            warn!("❌ Translation API Error ({}): {}", status, body_text);
            return Err(TranslationError::Status(status.as_u16()));
        }

        debug!("🌐 Translation raw body: {}", body_text);
        let body: Value = serde_json::from_str(&body_text)
            .map_err(|e| TranslationError::Malformed(e.to_string()))?;
        parse_translation(&body)
    }
}

#[async_trait]
impl TranslationClient for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let mut translated = String::new();
        for chunk in split_for_request(text, MAX_REQUEST_CHARS) {
            translated.push_str(chunk.separator);
            if chunk.text.trim().is_empty() {
                translated.push_str(&chunk.text);
            } else {
                translated.push_str(&self.translate_one(&chunk.text, source, target).await?);
            }
        }
        Ok(translated)
    }

    fn name(&self) -> &str {
        "google"
    }
}

/// Join the translated segments of a `translate_a/single` response.
///
/// The body looks like `[[["Hola","Hello",null,null,10], …], null, "en", …]`.
pub fn parse_translation(body: &Value) -> Result<String, TranslationError> {
    let segments = body
        .get(0)
        .ok_or_else(|| TranslationError::Malformed("response is not an array".into()))?;

    // Null segments come back for inputs that are only whitespace/punctuation
    if segments.is_null() {
        return Ok(String::new());
    }

    let segments = segments
        .as_array()
        .ok_or_else(|| TranslationError::Malformed("segment list is not an array".into()))?;

    Ok(segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect())
}

/// A request-sized piece of input text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestChunk {
    pub text: String,
    /// Goes between the previous piece's translation and this one's:
    /// `""` for the first piece, `"\n"` at a line break, `" "` where a long
    /// line was broken between words and `""` inside a giant word.
    pub separator: &'static str,
}

impl RequestChunk {
    fn new(text: impl Into<String>, separator: &'static str) -> Self {
        Self {
            text: text.into(),
            separator,
        }
    }
}

/// Split text into request-sized pieces.
///
/// Whole lines are packed together. A line longer than `max_chars` is
/// broken between words, and only a single word longer than `max_chars` is
/// cut mid-word.
pub fn split_for_request(text: &str, max_chars: usize) -> Vec<RequestChunk> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current: Option<RequestChunk> = None;

    for (i, line) in text.split('\n').enumerate() {
        let separator = if i == 0 { "" } else { "\n" };
        let line_len = line.chars().count();

        if line_len > max_chars {
            chunks.extend(current.take());
            chunks.extend(split_long_line(line, max_chars, separator));
            continue;
        }

        let fits = current
            .as_ref()
            .is_some_and(|c| c.text.chars().count() + 1 + line_len <= max_chars);
        match current.as_mut() {
            Some(chunk) if fits => {
                chunk.text.push('\n');
                chunk.text.push_str(line);
            }
            _ => {
                chunks.extend(current.replace(RequestChunk::new(line, separator)));
            }
        }
    }

    chunks.extend(current);
    chunks
}

fn split_long_line(line: &str, max_chars: usize, separator: &'static str) -> Vec<RequestChunk> {
    // Words, with over-long ones cut into max_chars pieces joined by ""
    let mut words: Vec<RequestChunk> = Vec::new();
    for word in line.split_whitespace() {
        let joiner = if words.is_empty() { separator } else { " " };
        let chars: Vec<char> = word.chars().collect();
        for (n, part) in chars.chunks(max_chars).enumerate() {
            let part: String = part.iter().collect();
            words.push(RequestChunk::new(part, if n == 0 { joiner } else { "" }));
        }
    }

    let mut pieces: Vec<RequestChunk> = Vec::new();
    for word in words {
        if let Some(last) = pieces.last_mut() {
            let len = last.text.chars().count() + 1 + word.text.chars().count();
            if word.separator == " " && len <= max_chars {
                last.text.push(' ');
                last.text.push_str(&word.text);
                continue;
            }
        }
        pieces.push(word);
    }
    pieces
}
