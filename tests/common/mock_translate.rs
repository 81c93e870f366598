//! Mock translator for testing
//!
//! Returns canned translations and records every request.

use async_trait::async_trait;
use lingotalks::error::TranslationError;
use lingotalks::translate::TranslationClient;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MockTranslator {
    canned: HashMap<(String, String), String>,
    /// (text, target) for every call
    pub requests: Mutex<Vec<(String, String)>>,
    pub should_fail: bool,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `text` → `translation` for `target`
    pub fn with(mut self, text: &str, target: &str, translation: &str) -> Self {
        self.canned.insert(
            (text.to_string(), target.to_string()),
            translation.to_string(),
        );
        self
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl TranslationClient for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        _source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        self.requests
            .lock()
            .unwrap()
            .push((text.to_string(), target.to_string()));
        if self.should_fail {
            return Err(TranslationError::Status(503));
        }
        Ok(self
            .canned
            .get(&(text.to_string(), target.to_string()))
            .cloned()
            .unwrap_or_else(|| text.to_string()))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
