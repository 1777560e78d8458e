//! Persona Fallback Replies
//!
//! Canned, persona-flavoured replies used when the generator is unavailable.
//! Built only from the persona's own background fields.

use persona_panel_core::PersonaProfile;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::services::behavior::humanizer::chance;

/// Formality above this uses the formal openings and closings.
const FORMAL_THRESHOLD: f32 = 6.0;
const DEFAULT_FORMALITY: f32 = 5.0;

const FORMAL_CLOSINGS: [&str; 4] = [
    "I hope this perspective is helpful.",
    "Please let me know if you'd like to discuss this further.",
    "I'm happy to elaborate on any point.",
    "Feel free to ask if you have more questions.",
];

const CASUAL_CLOSINGS: [&str; 5] = [
    "Hope that helps!",
    "Let me know what you think.",
    "Does that make sense?",
    "What do you reckon?",
    "That's my take anyway.",
];

/// Topic of the user's message, checked in this priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Topic {
    Problem,
    Goal,
    App,
    Question,
    Greeting,
    Other,
}

impl Topic {
    fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();

        if contains_any(&lower, &["problem", "issue", "challenge", "difficult"]) {
            Topic::Problem
        } else if contains_any(&lower, &["goal", "want", "need"]) {
            Topic::Goal
        } else if contains_any(&lower, &["fintech", "digital"]) || has_word(&lower, &["app", "apps"]) {
            Topic::App
        } else if has_word(&lower, &["how", "what", "why"]) {
            Topic::Question
        } else if has_word(&lower, &["hi", "hello", "hey"]) {
            Topic::Greeting
        } else {
            Topic::Other
        }
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

fn has_word(text: &str, words: &[&str]) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|token| words.contains(&token))
}

fn has_trait(persona: &PersonaProfile, names: &[&str]) -> bool {
    persona
        .personality_traits
        .iter()
        .any(|t| names.contains(&t.trim().to_lowercase().as_str()))
}

/// Build a fallback reply in the persona's voice.
pub fn persona_fallback_reply<R: Rng + ?Sized>(
    persona: &PersonaProfile,
    message: &str,
    rng: &mut R,
) -> String {
    let topic = Topic::classify(message);
    if topic == Topic::Greeting {
        return greeting(persona, rng);
    }

    let formal = persona.formality().unwrap_or(DEFAULT_FORMALITY) > FORMAL_THRESHOLD;
    let occupation = persona.occupation.as_deref().unwrap_or("professional");
    let mut reply = String::new();

    let fillers = persona.filler_words();
    if !fillers.is_empty() && chance(rng, 0.3) {
        if let Some(filler) = fillers.choose(rng) {
            reply.push_str(filler.trim());
            reply.push(' ');
        }
    }

    let openings: Vec<String> = if formal {
        vec![
            format!("From my experience as a {}, ", occupation),
            "In my professional opinion, ".to_string(),
            "Based on my background, ".to_string(),
            "Allow me to share my perspective. ".to_string(),
        ]
    } else {
        vec![
            format!("You know, as a {}, ", occupation),
            "From my experience, ".to_string(),
            "Let me share my thoughts on this. ".to_string(),
            "Honestly, ".to_string(),
            "So basically, ".to_string(),
            "I think ".to_string(),
        ]
    };
    if let Some(opening) = openings.choose(rng) {
        reply.push_str(opening);
    }

    match topic {
        Topic::Problem => {
            if let Some(pain) = pick(&persona.pain_points, 0.5, rng) {
                reply.push_str(&format!("this reminds me of challenges I've faced with {}. ", pain));
            }
            reply.push_str("I think the key is to break it down and tackle it step by step. ");
        }
        Topic::Goal => {
            if let Some(goal) = pick(&persona.goals, 0.5, rng) {
                reply.push_str(&format!("this aligns with my goal around {}. ", goal));
            }
            reply.push_str("What I really need is a solution that actually works for my situation. ");
        }
        Topic::App => {
            if let Some(concern) = pick(&persona.apprehensions, 0.4, rng) {
                reply.push_str(&format!("I'm always concerned about {}. ", concern));
            }
            reply.push_str("I think apps like this can be really useful, but they have to be trustworthy and easy to use. ");
        }
        Topic::Question => reply.push_str("let me explain how I see this. "),
        Topic::Greeting | Topic::Other => reply.push_str("I have some thoughts on this. "),
    }

    if has_trait(persona, &["cautious", "risk-averse"]) {
        reply.push_str("I'd want to make sure we're considering all the risks here. ");
    } else if has_trait(persona, &["innovative", "tech-savvy"]) {
        reply.push_str("I'm thinking we could try a more innovative approach. ");
    } else if has_trait(persona, &["practical", "pragmatic"]) {
        reply.push_str("Let's focus on what actually works in practice. ");
    }

    if let Some(motivation) = pick(&persona.motivations, 0.4, rng) {
        reply.push_str(&format!("What drives me is {}. ", motivation));
    }

    let closings: &[&str] = if formal { &FORMAL_CLOSINGS } else { &CASUAL_CLOSINGS };
    if let Some(closing) = closings.choose(rng) {
        reply.push_str(closing);
    }

    reply.trim().to_string()
}

fn greeting<R: Rng + ?Sized>(persona: &PersonaProfile, rng: &mut R) -> String {
    let mut reply = String::from("Hi there! ");
    if let Some(phrase) = pick(persona.common_phrases(), 0.5, rng) {
        reply.push_str(&format!("{}. ", phrase));
    }
    reply.push_str("What did you want to talk about?");
    reply
}

/// With probability `p`, pick one non-blank entry.
fn pick<'a, R: Rng + ?Sized>(items: &'a [String], p: f64, rng: &mut R) -> Option<&'a str> {
    if items.is_empty() || !chance(rng, p) {
        return None;
    }
    items
        .choose(rng)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}
