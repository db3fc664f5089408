//! rusty-inbox/crates/services/src/lib.rs
//!
//! Application services orchestrating the domain against the repository port.

pub mod inbox;
pub mod tripcode;

pub use inbox::{InboxService, PageRequest};
pub use tripcode::TripcodeGenerator;
