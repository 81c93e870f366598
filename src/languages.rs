//! Supported translation / speech languages

/// A language offered in the language picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    pub name: &'static str,
    pub code: &'static str,
}

pub const ENGLISH: Language = Language {
    name: "English",
    code: "en",
};

/// Every language the app can translate to and speak
pub const SUPPORTED: &[Language] = &[
    ENGLISH,
    Language { name: "Hindi", code: "hi" },
    Language { name: "Bengali", code: "bn" },
    Language { name: "Tamil", code: "ta" },
    Language { name: "Telugu", code: "te" },
    Language { name: "Kannada", code: "kn" },
    Language { name: "Malayalam", code: "ml" },
    Language { name: "Marathi", code: "mr" },
    Language { name: "Gujarati", code: "gu" },
    Language { name: "Punjabi", code: "pa" },
    Language { name: "Odia", code: "or" },
    Language { name: "Urdu", code: "ur" },
    Language { name: "Nepali", code: "ne" },
    Language { name: "Spanish", code: "es" },
    Language { name: "French", code: "fr" },
    Language { name: "German", code: "de" },
    Language { name: "Portuguese", code: "pt" },
    Language { name: "Japanese", code: "ja" },
    Language { name: "Korean", code: "ko" },
    Language { name: "Russian", code: "ru" },
    Language { name: "Italian", code: "it" },
];

impl Language {
    /// Find a supported language by its two-letter code (case-insensitive)
    pub fn from_code(code: &str) -> Option<Language> {
        let code = code.trim();
        SUPPORTED
            .iter()
            .copied()
            .find(|lang| lang.code.eq_ignore_ascii_case(code))
    }

    /// Like [`Language::from_code`], but falls back to English
    pub fn from_code_or_default(code: &str) -> Language {
        Self::from_code(code).unwrap_or(ENGLISH)
    }

    pub fn is_english(&self) -> bool {
        self.code == ENGLISH.code
    }
}

impl Default for Language {
    fn default() -> Self {
        ENGLISH
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s).ok_or_else(|| {
            let codes: Vec<&str> = SUPPORTED.iter().map(|l| l.code).collect();
            format!("Unknown language '{}'. Available: {}", s, codes.join(", "))
        })
    }
}
