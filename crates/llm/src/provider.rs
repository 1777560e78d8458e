//! Generator Trait
//!
//! Defines the interface of the upstream text generator. The workspace treats
//! every implementation as opaque and unreliable: calls may fail with a
//! transport or rate-limit error at any time.

use async_trait::async_trait;

use super::types::{ChatMessage, GenerationParams, LlmResult};

/// Trait that all text generators must implement.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Returns the generator name for identification in logs.
    fn name(&self) -> &str;

    /// Generate one completion for a system + user prompt pair.
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
    ) -> LlmResult<String>;

    /// Generate with prior conversation history.
    ///
    /// The default renders the history as a transcript ahead of the user
    /// prompt. Generators with native multi-message support should override it.
    async fn generate_with_history(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        user_prompt: &str,
        params: &GenerationParams,
    ) -> LlmResult<String> {
        if history.is_empty() {
            return self.generate(system_prompt, user_prompt, params).await;
        }
        let prompt = render_transcript(history, user_prompt);
        self.generate(system_prompt, &prompt, params).await
    }
}

/// Render history plus the new user message as a plain-text transcript.
pub fn render_transcript(history: &[ChatMessage], user_prompt: &str) -> String {
    let mut out = String::from("Conversation so far:\n");
    for message in history {
        out.push_str(&format!("{}: {}\n", message.role, message.content));
    }
    out.push_str(&format!("\nuser: {}", user_prompt));
    out
}
