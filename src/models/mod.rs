//! Data Models
//!
//! Configuration, behavior values and the request/response shapes of the
//! review and chat paths.

pub mod behavior;
pub mod response;
pub mod settings;

pub use behavior::*;
pub use response::*;
pub use settings::*;
