//! State types for the LingoTalks GUI

/// Current tab/view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Practice,
    Dictionary,
    Notes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Banner shown above the active tab until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: &str, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn error(title: &str, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.to_string(),
            message: message.into(),
        }
    }
}

/// Practice tab flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PracticeState {
    /// A translate + synthesize request is in flight
    pub generating: bool,
    /// Play/Pause/Replay/Stop are usable
    pub playback_enabled: bool,
}
