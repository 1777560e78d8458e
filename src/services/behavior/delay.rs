//! Delay Model
//!
//! Simulated "thinking and typing" latency for a persona reply, built from
//! independent multiplicative factors so each can be tested on its own.
//! The typing-progress checkpoints are a derived value; scheduling them is
//! up to the caller.

use persona_panel_core::{ComprehensionSpeed, EmotionalBaseline, GenerationContext, PersonaProfile};
use rand::Rng;

use crate::models::behavior::TypingEvent;
use crate::models::settings::{DelayConfig, MAX_DELAY_MS, MIN_DELAY_MS};

const LATE_NIGHT_HABIT: &str = "late-night";

/// Relative positions of the typing checkpoints within the delay.
const TYPING_FRACTIONS: [f64; 5] = [0.15, 0.35, 0.55, 0.75, 0.90];

/// Compute the reply delay in milliseconds, always within the configured
/// bounds.
pub fn compute_delay<R: Rng + ?Sized>(
    persona: &PersonaProfile,
    input_text: &str,
    output_text: &str,
    context: &GenerationContext,
    config: &DelayConfig,
    rng: &mut R,
) -> u64 {
    let jitter = config.jitter_min + rng.gen::<f64>() * (config.jitter_max - config.jitter_min);

    let raw = config.base_delay_ms
        * comprehension_factor(persona)
        * patience_factor(persona, config)
        * complexity_factor(input_text, output_text, config)
        * emotional_factor(persona)
        * context_factor(persona, context, config)
        * jitter;

    clamp_delay(raw, config)
}

/// slow 1.8, medium 1.0, fast 0.6
pub fn comprehension_factor(persona: &PersonaProfile) -> f64 {
    match persona.comprehension_speed() {
        Some(ComprehensionSpeed::Slow) => 1.8,
        Some(ComprehensionSpeed::Fast) => 0.6,
        _ => 1.0,
    }
}

/// `max(floor, patience / 10)`, with a default rating when absent.
pub fn patience_factor(persona: &PersonaProfile, config: &DelayConfig) -> f64 {
    let patience = persona
        .patience()
        .map(f64::from)
        .unwrap_or(config.default_patience);
    (patience / 10.0).max(config.patience_floor)
}

/// Combined word count over the divisor, capped.
pub fn complexity_factor(input_text: &str, output_text: &str, config: &DelayConfig) -> f64 {
    let words = input_text.split_whitespace().count() + output_text.split_whitespace().count();
    (words as f64 / config.complexity_divisor).min(config.complexity_cap)
}

pub fn emotional_factor(persona: &PersonaProfile) -> f64 {
    match persona.baseline() {
        Some(EmotionalBaseline::Positive) => 0.7,
        Some(EmotionalBaseline::Negative) => 1.4,
        Some(EmotionalBaseline::Anxious) => 1.6,
        Some(EmotionalBaseline::Enthusiastic) => 0.5,
        _ => 1.0,
    }
}

/// Conversation fatigue, night shift and confusion, multiplied together.
pub fn context_factor(
    persona: &PersonaProfile,
    context: &GenerationContext,
    config: &DelayConfig,
) -> f64 {
    let conversation = (1.0 + context.conversation_length as f64 * config.conversation_step)
        .min(config.conversation_cap);
    let night = if context.is_night() && persona.has_habit(LATE_NIGHT_HABIT) {
        config.night_factor
    } else {
        1.0
    };
    let confusion = if context.is_confused {
        config.confusion_factor
    } else {
        1.0
    };
    conversation * night * confusion
}

fn clamp_delay(raw: f64, config: &DelayConfig) -> u64 {
    // Configured bounds only narrow the hard range, even when never validated
    let floor = config.min_delay_ms.clamp(MIN_DELAY_MS, MAX_DELAY_MS);
    let ceiling = config.max_delay_ms.clamp(floor, MAX_DELAY_MS);
    // NaN and negatives cast to 0 and land on the lower bound
    let rounded = raw.round().max(0.0) as u64;
    rounded.clamp(floor, ceiling)
}

/// Typing checkpoints for a delay, scaled by the persona's speed.
///
/// `percent` strictly increases and `at_ms` never decreases or passes
/// `delay_ms`.
pub fn generate_typing_progress(delay_ms: u64, persona: &PersonaProfile) -> Vec<TypingEvent> {
    let speed = match persona.comprehension_speed() {
        Some(ComprehensionSpeed::Slow) => 1.2,
        Some(ComprehensionSpeed::Fast) => 0.8,
        _ => 1.0,
    };

    TYPING_FRACTIONS
        .iter()
        .map(|fraction| TypingEvent {
            at_ms: ((delay_ms as f64 * fraction * speed).round() as u64).min(delay_ms),
            percent: (fraction * 100.0).round() as u8,
        })
        .collect()
}
