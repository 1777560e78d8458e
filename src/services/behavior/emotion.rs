//! Emotion Classifier
//!
//! Keyword-based emotion detection for incoming user messages.

use persona_panel_core::PersonaProfile;

use crate::models::behavior::Emotion;

/// Keyword table, checked in priority order. The first category with a
/// substring match wins.
const EMOTION_KEYWORDS: [(Emotion, &[&str]); 6] = [
    (
        Emotion::Frustrated,
        &[
            "frustrated",
            "annoying",
            "hate",
            "terrible",
            "awful",
            "stupid",
            "confusing",
            "complicated",
        ],
    ),
    (
        Emotion::Excited,
        &[
            "excited",
            "amazing",
            "love",
            "great",
            "awesome",
            "fantastic",
            "perfect",
            "wonderful",
        ],
    ),
    (
        Emotion::Confused,
        &[
            "confused",
            "don't understand",
            "unclear",
            "lost",
            "help",
            "explain",
            "what does",
        ],
    ),
    (
        Emotion::Worried,
        &["worried", "concerned", "scared", "nervous", "anxious", "afraid", "scary"],
    ),
    (
        Emotion::Happy,
        &["happy", "good", "nice", "pleased", "satisfied", "glad", "delighted"],
    ),
    (
        Emotion::Angry,
        &["angry", "mad", "furious", "rage", "pissed", "annoyed", "irritated"],
    ),
];

/// Detect the emotion of `message`.
///
/// Persona triggers are only consulted when no keyword matched; frustration
/// triggers take precedence over excitement triggers.
pub fn detect_emotion(message: &str, persona: Option<&PersonaProfile>) -> Emotion {
    let lower = message.to_lowercase();

    for (emotion, keywords) in EMOTION_KEYWORDS.iter() {
        if keywords.iter().any(|k| lower.contains(k)) {
            return *emotion;
        }
    }

    match persona {
        Some(p) if p.has_frustration_trigger(message) => Emotion::Frustrated,
        Some(p) if p.has_excitement_trigger(message) => Emotion::Excited,
        _ => Emotion::Neutral,
    }
}
