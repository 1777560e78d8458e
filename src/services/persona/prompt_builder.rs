//! Persona Prompt Builder
//!
//! Builds the persona system instructions for the chat and review paths.

use persona_panel_core::PersonaProfile;
use persona_panel_critique::build_critique_system_prompt;

const RECENT_INTERACTION_STATE: &str = "normal";

/// The persona's base prompt.
///
/// Uses the stored master prompt when present, otherwise one is assembled
/// from the persona's background fields.
pub fn persona_base_prompt(persona: &PersonaProfile) -> String {
    if let Some(master) = persona
        .master_system_prompt
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
    {
        return master.to_string();
    }

    let mut parts = Vec::with_capacity(6);
    parts.push(match &persona.occupation {
        Some(occupation) => format!("You are {}, a {}.", persona.name, occupation),
        None => format!("You are {}.", persona.name),
    });

    let sections = [
        ("Personality", &persona.personality_traits),
        ("Goals", &persona.goals),
        ("Pain points", &persona.pain_points),
        ("Motivations", &persona.motivations),
        ("Concerns", &persona.apprehensions),
    ];
    for (label, items) in sections {
        if !items.is_empty() {
            parts.push(format!("{}: {}.", label, items.join(", ")));
        }
    }

    parts.push("Stay in character and speak as yourself, not as an assistant.".to_string());
    parts.join("\n")
}

/// System instruction for a chat turn: base prompt plus the current-state
/// appendix.
pub fn build_chat_system_instruction(persona: &PersonaProfile) -> String {
    let mood = persona
        .baseline()
        .map(|b| b.as_str())
        .unwrap_or("neutral");

    format!(
        "{}\n\nCurrent Mood: {}\nRecent Interaction State: {}\nPersona Status: {}",
        persona_base_prompt(persona),
        mood,
        RECENT_INTERACTION_STATE,
        persona.status
    )
}

/// System instruction for one panel critique.
pub fn build_panel_system_prompt(persona: &PersonaProfile) -> String {
    build_critique_system_prompt(Some(&persona_base_prompt(persona)))
}
