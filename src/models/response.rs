//! Request and Response Types
//!
//! Shapes exchanged with the transport layer on the review and chat paths.

use chrono::{Local, Timelike};
use persona_panel_core::{GenerationContext, TimeOfDay};
use persona_panel_critique::DesignArtifact;
use persona_panel_llm::ChatMessage;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::behavior::{Emotion, TypingEvent};

/// Review path input: one artifact, the panel to ask, and free-form task context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub artifact: DesignArtifact,
    pub agent_ids: Vec<String>,
    #[serde(default)]
    pub task_context: Value,
}

/// Chat path input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurnRequest {
    pub persona_id: String,
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    #[serde(default)]
    pub context: GenerationContext,
}

impl ChatTurnRequest {
    /// Build a turn whose context is derived from the history and the local clock.
    pub fn new(
        persona_id: impl Into<String>,
        message: impl Into<String>,
        history: Vec<ChatMessage>,
    ) -> Self {
        let time_of_day = TimeOfDay::from_hour(Local::now().hour());
        let mut context = GenerationContext::new(history.len() as u32, time_of_day);
        if let Some(last) = history.last() {
            context = context.with_previous_message(last.content.clone());
        }
        Self {
            persona_id: persona_id.into(),
            message: message.into(),
            history,
            context,
        }
    }

    pub fn with_context(mut self, context: GenerationContext) -> Self {
        self.context = context;
        self
    }
}

/// One humanized persona reply. Persisting it is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanizedResponse {
    pub content: String,
    pub delay_ms: u64,
    pub emotion: Emotion,
    pub typing_events: Vec<TypingEvent>,
}
