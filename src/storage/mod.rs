//! Storage Layer
//!
//! Loads the JSON panel configuration. Persona profiles live behind the
//! `AgentStore` seam in `services::persona`.

pub mod config;

pub use config::*;
