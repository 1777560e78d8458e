//! Services
//!
//! Business logic for the two persona paths.
//! - `persona`: persona lookup and system instructions
//! - `behavior`: humanizer, delay model, emotion detection
//! - `chat`: single-turn persona replies
//! - `feedback`: multi-agent design review

pub mod behavior;
pub mod chat;
pub mod feedback;
pub mod persona;

pub use chat::ChatResponder;
pub use feedback::FeedbackCollector;
pub use persona::{AgentStore, InMemoryAgentStore};
