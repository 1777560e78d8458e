//! Generation Context
//!
//! Ephemeral per-turn context passed alongside a persona into the behavior
//! components. One `GenerationContext` is built per chat turn and dropped
//! afterwards.

use serde::{Deserialize, Serialize};

/// Coarse time-of-day bucket of the simulated conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    #[default]
    Day,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Bucket a 0-23 hour into a time of day.
    pub fn from_hour(hour: u32) -> Self {
        match hour % 24 {
            5..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Day,
            18..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }
}

/// Per-turn context for humanization and delay simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationContext {
    /// Number of turns already exchanged in this conversation
    pub conversation_length: u32,
    pub time_of_day: TimeOfDay,
    pub previous_message: Option<String>,
    /// Caller flagged the incoming message as confusing for the persona
    pub is_confused: bool,
}

impl GenerationContext {
    pub fn new(conversation_length: u32, time_of_day: TimeOfDay) -> Self {
        Self {
            conversation_length,
            time_of_day,
            ..Default::default()
        }
    }

    pub fn with_previous_message(mut self, message: impl Into<String>) -> Self {
        self.previous_message = Some(message.into());
        self
    }

    pub fn confused(mut self, is_confused: bool) -> Self {
        self.is_confused = is_confused;
        self
    }

    pub fn is_night(&self) -> bool {
        self.time_of_day == TimeOfDay::Night
    }
}
