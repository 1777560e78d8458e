//! Persona Module
//!
//! Persona lookup and persona-specific system instructions.
//!
//! | Path | Instruction |
//! |------|-------------|
//! | Chat turn | base prompt + mood / interaction / status appendix |
//! | Review panel | base prompt + critique schema + usability heuristics |

pub mod prompt_builder;
pub mod store;

pub use prompt_builder::{
    build_chat_system_instruction, build_panel_system_prompt, persona_base_prompt,
};
pub use store::{AgentStore, InMemoryAgentStore};
