//! Chat Turn Integration Tests
//!
//! Drives `ChatResponder` end to end: persona resolution, generation
//! parameters, history windowing, fallback replies, and the humanized
//! response envelope.

use std::sync::Arc;
use std::time::Duration;

use persona_panel::{
    AppError, ChatResponder, ChatTurnRequest, Emotion, PanelConfig, MAX_DELAY_MS, MIN_DELAY_MS,
};
use persona_panel_core::{GenerationContext, TimeOfDay};
use persona_panel_llm::{ChatMessage, LlmError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::support::{store, Script, ScriptedGenerator};

fn responder(generator: Arc<ScriptedGenerator>) -> ChatResponder {
    ChatResponder::new(generator, store(), Arc::new(PanelConfig::default()))
}

fn turn(persona_id: &str, message: &str) -> ChatTurnRequest {
    ChatTurnRequest::new(persona_id, message, Vec::new())
        .with_context(GenerationContext::new(0, TimeOfDay::Day))
}

fn assert_well_formed(response: &persona_panel::HumanizedResponse) {
    assert!(!response.content.trim().is_empty());
    assert!((MIN_DELAY_MS..=MAX_DELAY_MS).contains(&response.delay_ms));
    assert!(!response.typing_events.is_empty());
    assert!(response
        .typing_events
        .windows(2)
        .all(|w| w[0].percent < w[1].percent && w[0].at_ms <= w[1].at_ms));
    assert!(response
        .typing_events
        .iter()
        .all(|e| e.at_ms <= response.delay_ms));
}

// ============================================================================
// Generated replies
// ============================================================================

#[tokio::test]
async fn test_plain_persona_reply_passes_through() {
    let generator = Arc::new(
        ScriptedGenerator::new()
            .with("Ravi", Script::Reply("The rates look fair to me. I would sign up.".to_string())),
    );
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let response = responder(generator)
        .respond_with_rng(&turn("ravi", "Would you use this?"), &mut rng)
        .await
        .unwrap();

    assert_eq!(response.content, "The rates look fair to me. I would sign up.");
    assert_eq!(response.emotion, Emotion::Neutral);
    assert_well_formed(&response);
}

#[tokio::test]
async fn test_boilerplate_is_stripped_from_generated_reply() {
    let generator = Arc::new(
        ScriptedGenerator::new()
            .with("Ravi", Script::Reply("Happy to share. How can I help you?".to_string())),
    );
    let response = responder(generator)
        .respond_with_rng(&turn("ravi", "Tell me more"), &mut ChaCha8Rng::seed_from_u64(2))
        .await
        .unwrap();

    assert_eq!(response.content, "Happy to share.");
}

#[tokio::test]
async fn test_generation_params_follow_persona() {
    let generator = Arc::new(ScriptedGenerator::new().otherwise(Script::Reply("Okay.".to_string())));
    let responder = responder(generator.clone());

    responder
        .respond_with_rng(&turn("asha", "Hi"), &mut ChaCha8Rng::seed_from_u64(3))
        .await
        .unwrap();
    responder
        .respond_with_rng(&turn("ravi", "Hi"), &mut ChaCha8Rng::seed_from_u64(3))
        .await
        .unwrap();

    let calls = generator.calls();
    // Asha is anxious, Ravi has no emotional baseline
    assert_eq!(calls[0].params.temperature, 0.6);
    assert_eq!(calls[1].params.temperature, 0.7);
    assert!(calls.iter().all(|c| c.params.max_tokens == 280));
    assert!(calls.iter().all(|c| c.params.top_p == Some(0.9)));

    assert!(calls[0].system_prompt.starts_with("You are Asha, a small business owner."));
    assert!(calls[0].system_prompt.contains("Current Mood: anxious"));
    assert!(calls[0].system_prompt.ends_with("Persona Status: active"));
    assert_eq!(calls[0].user_prompt, "Hi");
}

#[tokio::test]
async fn test_history_is_windowed_to_most_recent_messages() {
    let generator = Arc::new(ScriptedGenerator::new().otherwise(Script::Reply("Fine.".to_string())));
    let history: Vec<ChatMessage> = (0..14)
        .map(|i| {
            if i % 2 == 0 {
                ChatMessage::user(format!("question {}", i))
            } else {
                ChatMessage::assistant(format!("answer {}", i))
            }
        })
        .collect();
    let request = ChatTurnRequest::new("ravi", "and now?", history);
    assert_eq!(request.context.conversation_length, 14);

    responder(generator.clone())
        .respond_with_rng(&request, &mut ChaCha8Rng::seed_from_u64(4))
        .await
        .unwrap();

    assert_eq!(generator.calls()[0].history_len, 10);
}

// ============================================================================
// Fallback replies
// ============================================================================

#[tokio::test]
async fn test_generator_failure_falls_back_to_persona_reply() {
    let generator = Arc::new(ScriptedGenerator::new().otherwise(Script::Fail(
        LlmError::RateLimited {
            message: "quota exhausted".to_string(),
            retry_after: None,
        },
    )));

    let response = responder(generator)
        .respond_with_rng(
            &turn("asha", "This paperwork is so annoying"),
            &mut ChaCha8Rng::seed_from_u64(5),
        )
        .await
        .unwrap();

    assert!(!response.content.contains("quota exhausted"));
    assert_eq!(response.emotion, Emotion::Frustrated);
    assert_well_formed(&response);
}

#[tokio::test]
async fn test_blank_generation_falls_back() {
    let generator = Arc::new(ScriptedGenerator::new().otherwise(Script::Reply("   \n".to_string())));
    let response = responder(generator)
        .respond_with_rng(&turn("ravi", "hello"), &mut ChaCha8Rng::seed_from_u64(6))
        .await
        .unwrap();

    assert!(response.content.starts_with("Hi there!"));
    assert_well_formed(&response);
}

#[tokio::test(start_paused = true)]
async fn test_slow_generator_times_out_into_fallback() {
    let generator = Arc::new(
        ScriptedGenerator::new().otherwise(Script::Stall(Duration::from_secs(300))),
    );
    let response = responder(generator)
        .respond_with_rng(&turn("chen", "Why is the fee so high?"), &mut ChaCha8Rng::seed_from_u64(7))
        .await
        .unwrap();

    assert_ne!(response.content, "{}");
    assert!(response.content.contains("let me explain how I see this"));
    assert_well_formed(&response);
}

// ============================================================================
// Persona resolution
// ============================================================================

#[tokio::test]
async fn test_unknown_persona_is_not_found() {
    let generator = Arc::new(ScriptedGenerator::new());
    let err = responder(generator.clone())
        .respond(&turn("ghost", "hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert!(generator.calls().is_empty());
}

#[tokio::test]
async fn test_inactive_persona_is_rejected() {
    let generator = Arc::new(ScriptedGenerator::new());
    let err = responder(generator)
        .respond(&turn("dana", "hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_same_seed_gives_same_response() {
    let generator = Arc::new(
        ScriptedGenerator::new().otherwise(Script::Reply(
            "I think the upload step is slow. I would like a progress bar. Maybe a summary too."
                .to_string(),
        )),
    );
    let responder = responder(generator);
    let request = turn("asha", "What do you think of the upload step?");

    let a = responder
        .respond_with_rng(&request, &mut ChaCha8Rng::seed_from_u64(42))
        .await
        .unwrap();
    let b = responder
        .respond_with_rng(&request, &mut ChaCha8Rng::seed_from_u64(42))
        .await
        .unwrap();
    assert_eq!(a, b);
}
