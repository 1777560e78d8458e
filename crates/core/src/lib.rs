//! Persona Panel Core
//!
//! Foundational data types and error types for the Persona Panel workspace.
//! This crate has zero dependencies on the service layer (generators, stores,
//! configuration files).
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `persona` - Read-only persona profiles (`PersonaProfile` and sub-profiles)
//! - `context` - Per-turn generation context (`GenerationContext`, `TimeOfDay`)

pub mod context;
pub mod error;
pub mod persona;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Persona Profiles ───────────────────────────────────────────────────
pub use persona::{
    CognitiveProfile, CommunicationStyle, ComprehensionSpeed, EmotionalBaseline,
    EmotionalProfile, PersonaProfile, PersonaStatus, SelfCorrectionFrequency, SentenceLength,
    SpeechPatterns, VocabularyProfile,
};

// ── Generation Context ─────────────────────────────────────────────────
pub use context::{GenerationContext, TimeOfDay};
