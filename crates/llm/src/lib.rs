//! Persona Panel LLM
//!
//! The seam between the simulation core and the upstream text generator.
//! Concrete generators (hosted APIs, local models) live with the transport
//! layer that embeds this workspace; this crate only defines:
//!
//! - `provider` - The `Generator` trait and the default history transcript
//! - `types` - `GenerationParams`, `ChatMessage`, `LlmError`

pub mod provider;
pub mod types;

pub use provider::{render_transcript, Generator};
pub use types::*;
