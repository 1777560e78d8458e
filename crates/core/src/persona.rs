//! Persona Profiles
//!
//! Immutable persona data consumed by every behavior and critique component.
//! Profiles are owned by an external store and are read-only for the duration
//! of a request.
//!
//! Every field is optional on the wire. A missing sub-profile or field turns the
//! step that consumes it into a no-op, so a half-filled persona is never fatal.
//! Unrecognized enum values deserialize into an `Other` variant for the same reason.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

// ============================================================================
// Enums
// ============================================================================

/// Preferred sentence length of a persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentenceLength {
    Short,
    Medium,
    Long,
    #[serde(other)]
    Other,
}

/// How quickly a persona reads and understands a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComprehensionSpeed {
    Slow,
    Medium,
    Fast,
    #[serde(other)]
    Other,
}

/// How often a persona corrects itself mid-sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfCorrectionFrequency {
    Never,
    /// Too rare to show up in a single reply
    Rare,
    Occasional,
    Frequent,
    #[serde(other)]
    Other,
}

/// Baseline mood of a persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalBaseline {
    Positive,
    Neutral,
    Negative,
    Anxious,
    Enthusiastic,
    #[serde(other)]
    Other,
}

impl EmotionalBaseline {
    /// Lowercase label used in prompts and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionalBaseline::Positive => "positive",
            EmotionalBaseline::Neutral => "neutral",
            EmotionalBaseline::Negative => "negative",
            EmotionalBaseline::Anxious => "anxious",
            EmotionalBaseline::Enthusiastic => "enthusiastic",
            EmotionalBaseline::Other => "neutral",
        }
    }
}

impl std::fmt::Display for EmotionalBaseline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the persona can be resolved for new requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaStatus {
    #[default]
    Active,
    Inactive,
}

impl std::fmt::Display for PersonaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersonaStatus::Active => write!(f, "active"),
            PersonaStatus::Inactive => write!(f, "inactive"),
        }
    }
}

// ============================================================================
// Sub-profiles
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpeechPatterns {
    #[serde(alias = "filler_words")]
    pub filler_words: Vec<String>,
    #[serde(alias = "common_phrases")]
    pub common_phrases: Vec<String>,
    #[serde(
        alias = "self_correction_frequency",
        alias = "selfCorrections",
        alias = "self_corrections"
    )]
    pub self_correction_frequency: Option<SelfCorrectionFrequency>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommunicationStyle {
    #[serde(alias = "sentence_length")]
    pub sentence_length: Option<SentenceLength>,
    /// 1 (very casual) to 10 (very formal)
    pub formality: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CognitiveProfile {
    #[serde(alias = "comprehension_speed")]
    pub comprehension_speed: Option<ComprehensionSpeed>,
    /// 1 (impatient) to 10 (very patient)
    pub patience: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmotionalProfile {
    pub baseline: Option<EmotionalBaseline>,
    #[serde(alias = "frustration_triggers")]
    pub frustration_triggers: Vec<String>,
    #[serde(alias = "excitement_triggers")]
    pub excitement_triggers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VocabularyProfile {
    #[serde(alias = "avoided_words")]
    pub avoided_words: Vec<String>,
}

// ============================================================================
// PersonaProfile
// ============================================================================

/// A synthetic human persona.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonaProfile {
    pub id: String,
    pub name: String,
    pub status: PersonaStatus,
    /// Base system prompt describing who the persona is
    #[serde(alias = "master_system_prompt")]
    pub master_system_prompt: Option<String>,
    pub occupation: Option<String>,
    #[serde(alias = "personality_traits")]
    pub personality_traits: Vec<String>,
    pub goals: Vec<String>,
    #[serde(alias = "pain_points")]
    pub pain_points: Vec<String>,
    pub motivations: Vec<String>,
    pub apprehensions: Vec<String>,
    /// Free-form habits, e.g. "late-night work"
    pub habits: Vec<String>,
    #[serde(alias = "speech_patterns")]
    pub speech_patterns: Option<SpeechPatterns>,
    #[serde(alias = "communication_style")]
    pub communication_style: Option<CommunicationStyle>,
    #[serde(alias = "cognitive_profile")]
    pub cognitive_profile: Option<CognitiveProfile>,
    #[serde(alias = "emotional_profile")]
    pub emotional_profile: Option<EmotionalProfile>,
    #[serde(alias = "vocabulary_profile")]
    pub vocabulary_profile: Option<VocabularyProfile>,
}

impl PersonaProfile {
    /// Create a bare persona with only an id and a name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse a JSON array of profiles. Every profile needs a non-blank id.
    pub fn list_from_json(json: &str) -> CoreResult<Vec<Self>> {
        let profiles: Vec<Self> = serde_json::from_str(json)?;
        if let Some(pos) = profiles.iter().position(|p| p.id.trim().is_empty()) {
            return Err(CoreError::validation(format!(
                "persona at index {} has no id",
                pos
            )));
        }
        Ok(profiles)
    }

    pub fn is_active(&self) -> bool {
        self.status == PersonaStatus::Active
    }

    pub fn filler_words(&self) -> &[String] {
        self.speech_patterns
            .as_ref()
            .map(|s| s.filler_words.as_slice())
            .unwrap_or(&[])
    }

    pub fn common_phrases(&self) -> &[String] {
        self.speech_patterns
            .as_ref()
            .map(|s| s.common_phrases.as_slice())
            .unwrap_or(&[])
    }

    pub fn self_correction_frequency(&self) -> Option<SelfCorrectionFrequency> {
        self.speech_patterns
            .as_ref()
            .and_then(|s| s.self_correction_frequency)
    }

    pub fn sentence_length(&self) -> Option<SentenceLength> {
        self.communication_style
            .as_ref()
            .and_then(|c| c.sentence_length)
    }

    pub fn formality(&self) -> Option<f32> {
        self.communication_style.as_ref().and_then(|c| c.formality)
    }

    pub fn comprehension_speed(&self) -> Option<ComprehensionSpeed> {
        self.cognitive_profile
            .as_ref()
            .and_then(|c| c.comprehension_speed)
    }

    pub fn patience(&self) -> Option<f32> {
        self.cognitive_profile.as_ref().and_then(|c| c.patience)
    }

    pub fn baseline(&self) -> Option<EmotionalBaseline> {
        self.emotional_profile.as_ref().and_then(|e| e.baseline)
    }

    pub fn avoided_words(&self) -> &[String] {
        self.vocabulary_profile
            .as_ref()
            .map(|v| v.avoided_words.as_slice())
            .unwrap_or(&[])
    }

    /// Whether any frustration trigger occurs (case-insensitively) in `text`.
    pub fn has_frustration_trigger(&self, text: &str) -> bool {
        self.emotional_profile
            .as_ref()
            .is_some_and(|e| contains_any(text, &e.frustration_triggers))
    }

    /// Whether any excitement trigger occurs (case-insensitively) in `text`.
    pub fn has_excitement_trigger(&self, text: &str) -> bool {
        self.emotional_profile
            .as_ref()
            .is_some_and(|e| contains_any(text, &e.excitement_triggers))
    }

    /// Whether the persona lists a habit containing `needle` (case-insensitive).
    pub fn has_habit(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.habits
            .iter()
            .any(|h| h.to_lowercase().contains(&needle))
    }

    /// Collect non-fatal problems with this profile.
    ///
    /// Nothing here blocks a request; callers log the warnings and carry on
    /// with the affected steps degraded to no-ops.
    pub fn validation_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.id.trim().is_empty() {
            warnings.push("persona has an empty id".to_string());
        }
        if self.name.trim().is_empty() {
            warnings.push(format!("persona '{}' has an empty name", self.id));
        }
        if let Some(patience) = self.patience() {
            if !(0.0..=10.0).contains(&patience) {
                warnings.push(format!("patience {} is outside 0..=10", patience));
            }
        }
        if let Some(formality) = self.formality() {
            if !(0.0..=10.0).contains(&formality) {
                warnings.push(format!("formality {} is outside 0..=10", formality));
            }
        }
        if self.sentence_length() == Some(SentenceLength::Other) {
            warnings.push("unrecognized sentence length".to_string());
        }
        if self.comprehension_speed() == Some(ComprehensionSpeed::Other) {
            warnings.push("unrecognized comprehension speed".to_string());
        }
        if self.self_correction_frequency() == Some(SelfCorrectionFrequency::Other) {
            warnings.push("unrecognized self-correction frequency".to_string());
        }
        if self.baseline() == Some(EmotionalBaseline::Other) {
            warnings.push("unrecognized emotional baseline".to_string());
        }
        if self.filler_words().iter().any(|w| w.trim().is_empty()) {
            warnings.push("filler word list contains blank entries".to_string());
        }

        warnings
    }
}

fn contains_any(text: &str, needles: &[String]) -> bool {
    let lower = text.to_lowercase();
    needles
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .any(|n| lower.contains(&n.to_lowercase()))
}
