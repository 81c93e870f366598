//! Word meaning lookup against the free dictionaryapi.dev service

use crate::error::LookupError;
use crate::translate::TranslationClient;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// The first entry the dictionary knows for a word
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Definition {
    pub word: String,
    pub pronunciation: Option<String>,
    pub part_of_speech: Option<String>,
    pub definition: Option<String>,
    pub example: Option<String>,
    pub has_meanings: bool,
}

impl Definition {
    /// Multi-line, human readable summary
    pub fn summary(&self) -> String {
        let mut out = format!("Word: {}\n", self.word);
        if let Some(p) = &self.pronunciation {
            out.push_str(&format!("Pronunciation: {}\n", p));
        }
        if !self.has_meanings {
            out.push_str("No meanings found.\n");
            return out;
        }
        if let Some(d) = &self.definition {
            out.push_str(&format!(
                "Part of speech: {}\n",
                self.part_of_speech.as_deref().unwrap_or_default()
            ));
            out.push_str(&format!("Definition: {}\n", d));
            if let Some(e) = &self.example {
                out.push_str(&format!("Example: {}\n", e));
            }
        }
        out
    }
}

pub fn not_found_message(word: &str) -> String {
    format!("No definition found for \"{}\".\n", word)
}

// Wire format (only the fields we read)

#[derive(Debug, Deserialize)]
struct Entry {
    word: Option<String>,
    #[serde(default)]
    phonetics: Vec<Phonetic>,
    #[serde(default)]
    meanings: Vec<Meaning>,
}

#[derive(Debug, Deserialize)]
struct Phonetic {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Meaning {
    part_of_speech: Option<String>,
    #[serde(default)]
    definitions: Vec<Sense>,
}

#[derive(Debug, Deserialize)]
struct Sense {
    definition: Option<String>,
    example: Option<String>,
}

/// Reduce the API's entry list to the first [`Definition`]
pub fn parse_entries(word: &str, body: &str) -> Result<Option<Definition>, LookupError> {
    let entries: Vec<Entry> =
        serde_json::from_str(body).map_err(|e| LookupError::Malformed(e.to_string()))?;
    let Some(entry) = entries.into_iter().next() else {
        return Ok(None);
    };

    let mut def = Definition {
        word: entry.word.unwrap_or_else(|| word.to_string()),
        pronunciation: entry
            .phonetics
            .into_iter()
            .next()
            .and_then(|p| p.text)
            .filter(|t| !t.is_empty()),
        has_meanings: !entry.meanings.is_empty(),
        ..Definition::default()
    };

    if let Some(meaning) = entry.meanings.into_iter().next() {
        def.part_of_speech = meaning.part_of_speech;
        if let Some(sense) = meaning.definitions.into_iter().next() {
            def.definition = Some(sense.definition.unwrap_or_default());
            def.example = sense.example.filter(|e| !e.is_empty());
        }
    }
    Ok(Some(def))
}

#[derive(Debug, Clone)]
pub struct DictionaryClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl DictionaryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(&config.dictionary_url, config.network_timeout())
    }

    /// Look up an English word. `Ok(None)` means the dictionary has no entry.
    pub async fn lookup(&self, word: &str) -> Result<Option<Definition>, LookupError> {
        let word = word.trim();
        if word.is_empty() {
            return Ok(None);
        }

        let url = format!(
            "{}/api/v2/entries/en/{}",
            self.base_url,
            urlencoding::encode(word)
        );
        info!("📖 Looking up '{}'", word);

        let response = self.client.get(url).timeout(self.timeout).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!("No definition for '{}' (HTTP {})", word, status);
            return Ok(None);
        }

        let body = response.text().await?;
        parse_entries(word, &body)
    }

    /// Look up `word` and render it, adding a translated copy when `target`
    /// is not English.
    ///
    /// A failed translation is reported inline rather than as an error.
    pub async fn describe(
        &self,
        word: &str,
        target: &str,
        translator: &dyn TranslationClient,
    ) -> Result<String, LookupError> {
        let short_text = match self.lookup(word).await? {
            Some(def) => def.summary(),
            None => return Ok(not_found_message(word.trim())),
        };

        if target.eq_ignore_ascii_case("en") {
            return Ok(short_text);
        }

        match translator.translate(&short_text, "auto", target).await {
            Ok(translated) => Ok(format!(
                "--- Original (English) ---\n{}\n\n--- Translated ---\n{}",
                short_text, translated
            )),
            Err(e) => {
                warn!("⚠️ Definition translation failed: {}", e);
                Ok(format!("{}\n\n(Translation failed: {})", short_text, e))
            }
        }
    }
}
