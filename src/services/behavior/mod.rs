//! Behavior Services
//!
//! Synchronous, I/O-free transforms that make persona replies feel human:
//! - `humanizer`: persona-specific texture on generated text
//! - `delay`: simulated reply latency and typing checkpoints
//! - `emotion`: keyword emotion detection on user messages

pub mod delay;
pub mod emotion;
pub mod humanizer;

pub use delay::{compute_delay, generate_typing_progress};
pub use emotion::detect_emotion;
pub use humanizer::humanize;
