//! Block puzzle (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so hosts and tests can use
//! `block_puzzle::{core, adapter, types}`.

pub use block_puzzle_adapter as adapter;
pub use block_puzzle_core as core;
pub use block_puzzle_types as types;
