//! Response Humanizer
//!
//! Adds persona-specific conversational texture to generated text. The
//! steps run in a fixed order:
//!
//! 1. Strip assistant-style boilerplate
//! 2. Inject a filler word or a common phrase
//! 3. Prepend a self-correction marker to long or complex text
//! 4. Resegment sentences toward the persona's preferred length
//! 5. Replace avoided vocabulary
//! 6. Punctuation-based affect shaping
//!
//! Stripping runs before anything else, and resegmentation runs after
//! injection so injected words count toward the length policy. A missing
//! persona field turns its step into a no-op. All randomness comes from
//! the caller's RNG.

use std::sync::OnceLock;

use persona_panel_core::{
    EmotionalBaseline, GenerationContext, PersonaProfile, SelfCorrectionFrequency, SentenceLength,
};
use rand::seq::SliceRandom;
use rand::Rng;
use regex::{NoExpand, Regex};

use crate::models::settings::HumanizerConfig;

/// Comma-split pieces shorter than this are glued back to their neighbour.
const MIN_PIECE_WORDS: usize = 3;
const PHRASE_ANCHORS: [&str; 4] = ["I think", "I feel", "I need", "I want"];
const LATE_NIGHT_HABIT: &str = "late-night";

/// Humanize `raw_text` for `persona`.
pub fn humanize<R: Rng + ?Sized>(
    persona: &PersonaProfile,
    raw_text: &str,
    context: &GenerationContext,
    config: &HumanizerConfig,
    rng: &mut R,
) -> String {
    let text = strip_boilerplate(raw_text, &config.boilerplate_phrases);
    if text.is_empty() {
        return text;
    }

    let text = inject_phrases(&text, persona, context, config, rng);
    let text = add_self_correction(&text, persona, config, rng);
    let text = adjust_sentence_length(&text, persona, config);
    let text = simplify_vocabulary(&text, persona, config);
    shape_affect(&text, persona, context, config, rng)
}

// ============================================================================
// Steps
// ============================================================================

/// Remove boilerplate phrases (case-insensitive) and tidy the leftovers.
pub fn strip_boilerplate(text: &str, phrases: &[String]) -> String {
    let mut out = text.to_string();
    for phrase in phrases.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        if let Ok(re) = Regex::new(&format!("(?i){}", regex::escape(phrase))) {
            out = re.replace_all(&out, "").into_owned();
        }
    }

    let collapsed = out.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed = collapsed
        .trim_start_matches(|c: char| c == ',' || c == '.' || c.is_whitespace())
        .trim_end_matches(|c: char| c == ',' || c.is_whitespace());
    upper_first(trimmed)
}

fn inject_phrases<R: Rng + ?Sized>(
    text: &str,
    persona: &PersonaProfile,
    context: &GenerationContext,
    config: &HumanizerConfig,
    rng: &mut R,
) -> String {
    let mut out = text.to_string();

    let fillers: Vec<&str> = persona
        .filler_words()
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .collect();
    if !fillers.is_empty() {
        let lower = out.to_lowercase();
        let confused = context.is_confused
            || config
                .confusion_markers
                .iter()
                .any(|m| !m.is_empty() && lower.contains(&m.to_lowercase()));
        let sentences = split_sentences(&out);

        if confused {
            if chance(rng, config.confused_filler_probability) {
                if let Some(filler) = fillers.choose(rng) {
                    out = prepend_filler(filler, &out);
                }
            }
        } else if sentences.len() > 1 {
            if chance(rng, config.boundary_filler_probability) {
                let idx = rng.gen_range(0..sentences.len() - 1);
                if let Some(filler) = fillers.choose(rng) {
                    out = insert_filler_at_boundary(&sentences, idx, filler);
                }
            }
        } else if chance(rng, config.filler_probability) {
            if let Some(filler) = fillers.choose(rng) {
                out = prepend_filler(filler, &out);
            }
        }
    }

    let phrases = persona.common_phrases();
    if !phrases.is_empty() && chance(rng, config.common_phrase_probability) {
        if let Some(phrase) = phrases.choose(rng).map(|p| p.trim()).filter(|p| !p.is_empty()) {
            out = insert_before_anchor(&out, phrase);
        }
    }

    out
}

fn add_self_correction<R: Rng + ?Sized>(
    text: &str,
    persona: &PersonaProfile,
    config: &HumanizerConfig,
    rng: &mut R,
) -> String {
    let probability = match persona.self_correction_frequency() {
        Some(SelfCorrectionFrequency::Occasional) => config.occasional_correction_probability,
        Some(SelfCorrectionFrequency::Frequent) => config.frequent_correction_probability,
        _ => return text.to_string(),
    };

    let lower = text.to_lowercase();
    let complex = text.chars().count() > config.complex_text_chars
        || lower.contains("actually")
        || lower.contains("basically");
    if !complex || !chance(rng, probability) {
        return text.to_string();
    }

    match config.self_correction_markers.choose(rng) {
        Some(marker) => format!("{} {}", marker.trim(), lower_first(text)),
        None => text.to_string(),
    }
}

/// Resegment sentences toward the persona's preferred length.
///
/// Frustrated text is always shortened, whatever the persona prefers.
pub fn adjust_sentence_length(
    text: &str,
    persona: &PersonaProfile,
    config: &HumanizerConfig,
) -> String {
    let lower = text.to_lowercase();
    let frustrated = lower.contains("frustrating") || lower.contains("annoying");
    let policy = if frustrated {
        Some(SentenceLength::Short)
    } else {
        persona.sentence_length()
    };

    match policy {
        Some(SentenceLength::Short) => shorten_sentences(text, config.short_sentence_max_words),
        Some(SentenceLength::Long) => {
            lengthen_sentences(text, config.long_sentence_merge_below_words)
        }
        _ => text.to_string(),
    }
}

/// Replace every avoided term with its plain-language alternative.
pub fn simplify_vocabulary(
    text: &str,
    persona: &PersonaProfile,
    config: &HumanizerConfig,
) -> String {
    let mut out = text.to_string();
    for term in persona
        .avoided_words()
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
    {
        let Ok(re) = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term))) else {
            continue;
        };
        out = re
            .replace_all(&out, NoExpand(config.simplification_for(term)))
            .into_owned();
    }
    out
}

fn shape_affect<R: Rng + ?Sized>(
    text: &str,
    persona: &PersonaProfile,
    context: &GenerationContext,
    config: &HumanizerConfig,
    rng: &mut R,
) -> String {
    let mut out = text.to_string();

    if let Some(baseline) = persona.baseline() {
        if persona.has_frustration_trigger(&out) && baseline != EmotionalBaseline::Positive {
            if chance(rng, config.frustration_ellipsis_probability) {
                out = periods_to_ellipses(&out);
            }
        } else if persona.has_excitement_trigger(&out)
            && baseline == EmotionalBaseline::Positive
            && chance(rng, config.excitement_exclamation_probability)
        {
            out = double_exclamations(&out);
        }
    }

    if context.is_night()
        && persona.has_habit(LATE_NIGHT_HABIT)
        && chance(rng, config.late_night_ellipsis_probability)
    {
        out = periods_to_ellipses(&out);
    }

    out
}

// ============================================================================
// Sentence helpers
// ============================================================================

/// Split text into sentences, each keeping its terminal punctuation run.
///
/// A terminator only ends a sentence when followed by whitespace or the end
/// of the text, so decimals and abbreviations like "3.5" stay intact.
pub(crate) fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if !is_terminator(c) {
            continue;
        }
        while let Some(&next) = chars.peek() {
            if !is_terminator(next) {
                break;
            }
            current.push(next);
            chars.next();
        }
        if chars.peek().map_or(true, |n| n.is_whitespace()) {
            let sentence = current.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            current.clear();
        }
    }

    let rest = current.trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }
    sentences
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn split_terminator(sentence: &str) -> (&str, &str) {
    let body = sentence.trim_end_matches(is_terminator);
    (body, &sentence[body.len()..])
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn shorten_sentences(text: &str, max_words: usize) -> String {
    let mut out = Vec::new();

    for sentence in split_sentences(text) {
        if word_count(&sentence) <= max_words || !sentence.contains(',') {
            out.push(sentence);
            continue;
        }

        let (body, terminator) = split_terminator(&sentence);
        let terminator = if terminator.is_empty() { "." } else { terminator };

        let mut pieces: Vec<String> = Vec::new();
        for part in body.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match pieces.last_mut() {
                Some(last)
                    if word_count(last) < MIN_PIECE_WORDS || word_count(part) < MIN_PIECE_WORDS =>
                {
                    last.push_str(", ");
                    last.push_str(part);
                }
                _ => pieces.push(part.to_string()),
            }
        }

        let count = pieces.len();
        for (i, piece) in pieces.iter().enumerate() {
            let end = if i + 1 == count { terminator } else { "." };
            out.push(format!("{}{}", upper_first(piece), end));
        }
    }

    out.join(" ")
}

fn lengthen_sentences(text: &str, merge_below: usize) -> String {
    let mergeable =
        |s: &str| word_count(s) < merge_below && s.ends_with('.') && !s.ends_with("..");

    let mut out: Vec<String> = Vec::new();
    let mut pending: Option<String> = None;

    for sentence in split_sentences(text) {
        let next = match pending.take() {
            Some(prev) => {
                let (body, _) = split_terminator(&prev);
                format!("{}, {}", body, lower_first(&sentence))
            }
            None => sentence,
        };
        if mergeable(&next) {
            pending = Some(next);
        } else {
            out.push(next);
        }
    }
    if let Some(rest) = pending {
        out.push(rest);
    }

    out.join(" ")
}

fn prepend_filler(filler: &str, text: &str) -> String {
    format!("{}, {}", upper_first(filler), lower_first(text))
}

fn insert_filler_at_boundary(sentences: &[String], idx: usize, filler: &str) -> String {
    sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| {
            if i == idx {
                let (body, terminator) = split_terminator(sentence);
                format!("{}, {}{}", body, filler, terminator)
            } else {
                sentence.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn insert_before_anchor(text: &str, phrase: &str) -> String {
    let Some(pos) = PHRASE_ANCHORS.iter().filter_map(|a| text.find(a)).min() else {
        return text.to_string();
    };

    let before = text[..pos].trim_end();
    let sentence_start = before.is_empty() || before.ends_with(is_terminator);
    let phrase = if sentence_start {
        upper_first(phrase)
    } else {
        phrase.to_string()
    };
    format!("{}{}, {}", &text[..pos], phrase, &text[pos..])
}

fn periods_to_ellipses(text: &str) -> String {
    static SENTENCE_PERIOD: OnceLock<Option<Regex>> = OnceLock::new();
    match SENTENCE_PERIOD.get_or_init(|| Regex::new(r"(\w)\.(\s|$)").ok()) {
        Some(re) => re.replace_all(text, "${1}...${2}").into_owned(),
        None => text.to_string(),
    }
}

fn double_exclamations(text: &str) -> String {
    static EXCLAMATIONS: OnceLock<Option<Regex>> = OnceLock::new();
    match EXCLAMATIONS.get_or_init(|| Regex::new(r"!+").ok()) {
        Some(re) => re.replace_all(text, "!!").into_owned(),
        None => text.to_string(),
    }
}

/// Roll against `probability` without panicking on out-of-range values.
pub(crate) fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    probability > 0.0 && rng.gen::<f64>() < probability
}

pub(crate) fn upper_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Lower-case the first letter unless the first word is "I" or an acronym.
pub(crate) fn lower_first(text: &str) -> String {
    let first_word = text.split_whitespace().next().unwrap_or("");
    let letters: Vec<char> = first_word.chars().filter(|c| c.is_alphabetic()).collect();
    let keep = first_word == "I"
        || first_word.starts_with("I'")
        || (letters.len() > 1 && letters.iter().all(|c| c.is_uppercase()));
    if keep {
        return text.to_string();
    }

    let mut chars = text.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
