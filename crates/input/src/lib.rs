//! Terminal input module.
//!
//! Maps `crossterm` key and mouse events into [`crate::types::Command`]s. Mouse
//! clicks are reported as terminal cells; projecting a cell into the play area is the
//! renderer's job because only it knows the current viewport.

pub mod map;

pub use trio_stack_types as types;

pub use map::{handle_key_event, handle_mouse_event, should_quit};
