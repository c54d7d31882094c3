//! User-visible, non-fatal messages.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryKind {
    Info,
    Warning,
    Error,
}

/// Message shown to the user alongside (not instead of) the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub title: String,
    pub message: String,
}

impl Advisory {
    pub fn info(title: &str, message: impl Into<String>) -> Self {
        Self::new(AdvisoryKind::Info, title, message)
    }

    pub fn warning(title: &str, message: impl Into<String>) -> Self {
        Self::new(AdvisoryKind::Warning, title, message)
    }

    pub fn error(title: &str, message: impl Into<String>) -> Self {
        Self::new(AdvisoryKind::Error, title, message)
    }

    fn new(kind: AdvisoryKind, title: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
