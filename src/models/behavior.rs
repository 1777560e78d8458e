//! Behavior Models
//!
//! Value types produced by the behavior services.

use serde::{Deserialize, Serialize};

/// Emotion detected in an incoming user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Frustrated,
    Excited,
    Confused,
    Worried,
    Happy,
    Angry,
    #[default]
    Neutral,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Frustrated => "frustrated",
            Emotion::Excited => "excited",
            Emotion::Confused => "confused",
            Emotion::Worried => "worried",
            Emotion::Happy => "happy",
            Emotion::Angry => "angry",
            Emotion::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A typing-indicator checkpoint, relative to the start of the delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingEvent {
    pub at_ms: u64,
    pub percent: u8,
}
