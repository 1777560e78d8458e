//! Chat Module
//!
//! The chat-turn path: persona replies with humanized texture, simulated
//! latency and typing checkpoints.

pub mod fallback;
pub mod responder;

pub use fallback::persona_fallback_reply;
pub use responder::{tune_temperature, ChatResponder};
