//! Trio Stack (workspace facade crate).
//!
//! Re-exports the member crates under short names so integration tests, benches and
//! the `trio-stack` binary can reach everything through `trio_stack::{core, ...}`.

pub mod cli;

pub use trio_stack_core as core;
pub use trio_stack_input as input;
pub use trio_stack_leaderboard as leaderboard;
pub use trio_stack_term as term;
pub use trio_stack_types as types;
