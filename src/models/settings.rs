//! Settings Models
//!
//! Panel configuration loaded once at startup and passed explicitly into
//! the behavior, chat and feedback services.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lower bound every computed delay is clamped to.
pub const MIN_DELAY_MS: u64 = 500;
/// Upper bound every computed delay is clamped to.
pub const MAX_DELAY_MS: u64 = 12_000;

/// Top-level configuration stored in `panel.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelConfig {
    pub humanizer: HumanizerConfig,
    pub delay: DelayConfig,
    pub panel: PanelSettings,
    pub chat: ChatSettings,
}

impl PanelConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.humanizer.validate()?;
        self.delay.validate()?;
        self.panel.validate()?;
        self.chat.validate()?;
        Ok(())
    }
}

// ============================================================================
// Humanizer
// ============================================================================

/// Lookup tables and probabilities for response humanization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HumanizerConfig {
    /// Assistant-style phrases stripped from generated text (case-insensitive)
    pub boilerplate_phrases: Vec<String>,
    /// Lower-cased avoided term -> plain replacement
    pub simplifications: BTreeMap<String, String>,
    /// Replacement for avoided terms missing from `simplifications`
    pub simplification_fallback: String,
    pub self_correction_markers: Vec<String>,
    /// Substrings that mark the text itself as confused
    pub confusion_markers: Vec<String>,

    pub filler_probability: f64,
    pub confused_filler_probability: f64,
    pub boundary_filler_probability: f64,
    pub common_phrase_probability: f64,
    pub occasional_correction_probability: f64,
    pub frequent_correction_probability: f64,
    pub frustration_ellipsis_probability: f64,
    pub excitement_exclamation_probability: f64,
    pub late_night_ellipsis_probability: f64,

    /// Sentences above this many words are split for short-sentence personas
    pub short_sentence_max_words: usize,
    /// Sentences below this many words are merged for long-sentence personas
    pub long_sentence_merge_below_words: usize,
    /// Text longer than this many characters counts as complex
    pub complex_text_chars: usize,
}

impl Default for HumanizerConfig {
    fn default() -> Self {
        let boilerplate_phrases = [
            "How may I assist you today?",
            "How can I help you?",
            "What can I do for you?",
            "Is there anything else I can help with?",
            "I'm here to help",
            "I'm an AI assistant",
            "As an AI",
            "I'm designed to",
            "My purpose is to",
        ];
        let simplifications = [
            ("utilize", "use"),
            ("facilitate", "help"),
            ("implement", "do"),
            ("leverage", "use"),
            ("optimize", "improve"),
            ("synthesize", "combine"),
            ("paradigm", "way"),
            ("methodology", "method"),
            ("comprehensive", "complete"),
            ("sophisticated", "complex"),
            ("amortization", "payment schedule"),
            ("apr", "interest rate"),
            ("debt-to-income ratio", "how much you owe vs earn"),
        ];
        let markers = ["I mean,", "Actually,", "Wait,", "Let me think,", "Hmm,", "Well,"];

        Self {
            boilerplate_phrases: boilerplate_phrases.iter().map(|s| s.to_string()).collect(),
            simplifications: simplifications
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            simplification_fallback: "thing".to_string(),
            self_correction_markers: markers.iter().map(|s| s.to_string()).collect(),
            confusion_markers: vec!["?".into(), "not sure".into(), "confused".into()],
            filler_probability: 0.15,
            confused_filler_probability: 0.3,
            boundary_filler_probability: 0.2,
            common_phrase_probability: 0.25,
            occasional_correction_probability: 0.2,
            frequent_correction_probability: 0.4,
            frustration_ellipsis_probability: 0.3,
            excitement_exclamation_probability: 0.2,
            late_night_ellipsis_probability: 0.1,
            short_sentence_max_words: 15,
            long_sentence_merge_below_words: 6,
            complex_text_chars: 100,
        }
    }
}

impl HumanizerConfig {
    pub fn validate(&self) -> Result<(), String> {
        let probabilities = [
            ("fillerProbability", self.filler_probability),
            ("confusedFillerProbability", self.confused_filler_probability),
            ("boundaryFillerProbability", self.boundary_filler_probability),
            ("commonPhraseProbability", self.common_phrase_probability),
            ("occasionalCorrectionProbability", self.occasional_correction_probability),
            ("frequentCorrectionProbability", self.frequent_correction_probability),
            ("frustrationEllipsisProbability", self.frustration_ellipsis_probability),
            ("excitementExclamationProbability", self.excitement_exclamation_probability),
            ("lateNightEllipsisProbability", self.late_night_ellipsis_probability),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{} must be within 0..=1, got {}", name, p));
            }
        }

        if self.short_sentence_max_words == 0 {
            return Err("shortSentenceMaxWords must be at least 1".to_string());
        }
        if self.simplification_fallback.trim().is_empty() {
            return Err("simplificationFallback cannot be empty".to_string());
        }
        if self.simplifications.keys().any(|k| k.to_lowercase() != *k) {
            return Err("simplification keys must be lower-case".to_string());
        }

        Ok(())
    }

    /// Replacement for an avoided term.
    pub fn simplification_for(&self, term: &str) -> &str {
        self.simplifications
            .get(&term.to_lowercase())
            .map(String::as_str)
            .unwrap_or(&self.simplification_fallback)
    }
}

// ============================================================================
// Delay model
// ============================================================================

/// Constants of the multiplicative response-delay model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DelayConfig {
    pub base_delay_ms: f64,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub jitter_min: f64,
    pub jitter_max: f64,
    /// Combined word count is divided by this to get the complexity factor
    pub complexity_divisor: f64,
    pub complexity_cap: f64,
    /// Conversation factor grows by this much per prior turn
    pub conversation_step: f64,
    pub conversation_cap: f64,
    pub night_factor: f64,
    pub confusion_factor: f64,
    pub patience_floor: f64,
    /// Used when the persona has no patience rating
    pub default_patience: f64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 800.0,
            min_delay_ms: MIN_DELAY_MS,
            max_delay_ms: MAX_DELAY_MS,
            jitter_min: 0.75,
            jitter_max: 1.25,
            complexity_divisor: 40.0,
            complexity_cap: 2.5,
            conversation_step: 0.1,
            conversation_cap: 1.5,
            night_factor: 1.2,
            confusion_factor: 1.5,
            patience_floor: 0.3,
            default_patience: 5.0,
        }
    }
}

impl DelayConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.min_delay_ms < MIN_DELAY_MS || self.max_delay_ms > MAX_DELAY_MS {
            return Err(format!(
                "delay bounds must stay within {}..={} ms",
                MIN_DELAY_MS, MAX_DELAY_MS
            ));
        }
        if self.min_delay_ms > self.max_delay_ms {
            return Err(format!(
                "minDelayMs ({}) exceeds maxDelayMs ({})",
                self.min_delay_ms, self.max_delay_ms
            ));
        }
        if self.jitter_min <= 0.0 || self.jitter_min > self.jitter_max {
            return Err(format!(
                "invalid jitter range {}..={}",
                self.jitter_min, self.jitter_max
            ));
        }
        if self.complexity_divisor <= 0.0 {
            return Err("complexityDivisor must be positive".to_string());
        }
        if self.base_delay_ms <= 0.0 {
            return Err("baseDelayMs must be positive".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// Panel and chat
// ============================================================================

/// Settings of the design-review panel fan-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelSettings {
    /// Per-agent generator timeout
    pub agent_timeout_secs: u64,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            agent_timeout_secs: 30,
            temperature: 0.3,
            max_tokens: 2000,
        }
    }
}

impl PanelSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.agent_timeout_secs == 0 {
            return Err("agentTimeoutSecs must be at least 1".to_string());
        }
        if self.max_tokens == 0 {
            return Err("panel maxTokens must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Settings of the chat-turn path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatSettings {
    /// Number of most recent history messages sent to the generator
    pub history_window: usize,
    pub timeout_secs: u64,
    pub top_p: f32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            history_window: 10,
            timeout_secs: 30,
            top_p: 0.9,
            presence_penalty: 0.6,
            frequency_penalty: 0.5,
        }
    }
}

impl ChatSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("chat timeoutSecs must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(format!("topP must be within 0..=1, got {}", self.top_p));
        }
        Ok(())
    }
}
