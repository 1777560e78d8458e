//! Chat Turn Responder
//!
//! Produces one humanized persona reply for a chat turn:
//! generate (or fall back) -> humanize -> delay -> emotion -> typing progress.

use std::sync::Arc;
use std::time::Duration;

use persona_panel_core::{EmotionalBaseline, PersonaProfile, SentenceLength};
use persona_panel_llm::{GenerationParams, Generator, LlmError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use super::fallback::persona_fallback_reply;
use crate::models::response::{ChatTurnRequest, HumanizedResponse};
use crate::models::settings::{ChatSettings, PanelConfig};
use crate::services::behavior::{compute_delay, detect_emotion, generate_typing_progress, humanize};
use crate::services::persona::{build_chat_system_instruction, AgentStore};
use crate::utils::error::{AppError, AppResult};

const LONG_REPLY_MAX_TOKENS: u32 = 400;
const DEFAULT_REPLY_MAX_TOKENS: u32 = 280;

/// Answers chat turns in a persona's voice.
pub struct ChatResponder {
    generator: Arc<dyn Generator>,
    store: Arc<dyn AgentStore>,
    config: Arc<PanelConfig>,
}

impl ChatResponder {
    pub fn new(
        generator: Arc<dyn Generator>,
        store: Arc<dyn AgentStore>,
        config: Arc<PanelConfig>,
    ) -> Self {
        Self {
            generator,
            store,
            config,
        }
    }

    /// Answer a chat turn using an entropy-seeded RNG.
    pub async fn respond(&self, request: &ChatTurnRequest) -> AppResult<HumanizedResponse> {
        let mut rng = StdRng::from_entropy();
        self.respond_with_rng(request, &mut rng).await
    }

    /// Answer a chat turn with caller-supplied randomness.
    ///
    /// Fails only when the persona is unknown or inactive; generator
    /// failures fall back to a persona-based reply.
    pub async fn respond_with_rng<R: Rng + ?Sized>(
        &self,
        request: &ChatTurnRequest,
        rng: &mut R,
    ) -> AppResult<HumanizedResponse> {
        let persona = self
            .store
            .get_profile(&request.persona_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("persona '{}'", request.persona_id)))?;
        if !persona.is_active() {
            return Err(AppError::validation(format!(
                "persona '{}' is inactive",
                persona.id
            )));
        }

        let raw = match self.generate(&persona, request).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!(persona_id = %persona.id, "chat: empty generation, using fallback reply");
                persona_fallback_reply(&persona, &request.message, rng)
            }
            Err(e) => {
                warn!(persona_id = %persona.id, "chat: generation failed, using fallback reply: {}", e);
                persona_fallback_reply(&persona, &request.message, rng)
            }
        };

        let content = humanize(
            &persona,
            &raw,
            &request.context,
            &self.config.humanizer,
            rng,
        );
        let delay_ms = compute_delay(
            &persona,
            &request.message,
            &content,
            &request.context,
            &self.config.delay,
            rng,
        );
        let emotion = detect_emotion(&request.message, Some(&persona));
        let typing_events = generate_typing_progress(delay_ms, &persona);

        debug!(
            persona_id = %persona.id,
            delay_ms = delay_ms,
            emotion = %emotion,
            "chat: reply ready"
        );

        Ok(HumanizedResponse {
            content,
            delay_ms,
            emotion,
            typing_events,
        })
    }

    async fn generate(
        &self,
        persona: &PersonaProfile,
        request: &ChatTurnRequest,
    ) -> Result<String, LlmError> {
        let settings = &self.config.chat;
        let system_instruction = build_chat_system_instruction(persona);
        let history_start = request.history.len().saturating_sub(settings.history_window);
        let history = &request.history[history_start..];
        let params = chat_params(persona, settings);

        tokio::time::timeout(
            Duration::from_secs(settings.timeout_secs),
            self.generator.generate_with_history(
                &system_instruction,
                history,
                &request.message,
                &params,
            ),
        )
        .await
        .unwrap_or(Err(LlmError::Timeout {
            seconds: settings.timeout_secs,
        }))
    }
}

/// Sampling temperature by emotional baseline.
pub fn tune_temperature(persona: &PersonaProfile) -> f32 {
    match persona.baseline() {
        Some(EmotionalBaseline::Enthusiastic) => 0.8,
        Some(EmotionalBaseline::Positive) => 0.75,
        Some(EmotionalBaseline::Negative) => 0.65,
        Some(EmotionalBaseline::Anxious) => 0.6,
        _ => 0.7,
    }
}

fn chat_params(persona: &PersonaProfile, settings: &ChatSettings) -> GenerationParams {
    let max_tokens = if persona.sentence_length() == Some(SentenceLength::Long) {
        LONG_REPLY_MAX_TOKENS
    } else {
        DEFAULT_REPLY_MAX_TOKENS
    };

    GenerationParams::new(tune_temperature(persona), max_tokens)
        .with_top_p(settings.top_p)
        .with_penalties(settings.presence_penalty, settings.frequency_penalty)
}
