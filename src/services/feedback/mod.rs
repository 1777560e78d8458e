//! Feedback Module
//!
//! Multi-agent design review: concurrent per-persona critiques followed by
//! consensus aggregation.

pub mod collector;

pub use collector::FeedbackCollector;
