//! Persona Panel - Rust Backend Library
//!
//! Simulated user personas for product research. It includes:
//! - Chat turns answered in a persona's voice, with humanized texture,
//!   simulated latency and typing checkpoints
//! - Design review panels: concurrent per-persona critiques aggregated
//!   into consensus, disagreement and critical-issue reports
//! - Configuration storage and data models
//!
//! The text generator is injected through `persona_panel_llm::Generator`;
//! persona lookup through `services::persona::AgentStore`.

pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use models::behavior::{Emotion, TypingEvent};
pub use models::response::*;
pub use models::settings::{
    ChatSettings, DelayConfig, HumanizerConfig, PanelConfig, PanelSettings, MAX_DELAY_MS,
    MIN_DELAY_MS,
};
pub use services::{AgentStore, ChatResponder, FeedbackCollector, InMemoryAgentStore};
pub use storage::ConfigService;
pub use utils::error::{AppError, AppResult};
