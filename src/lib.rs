//! Tetros (workspace facade crate).
//!
//! Re-exports the member crates under `tetros::{core,input,types}` and hosts
//! the headless demo runner used by the `tetros` binary.

pub mod demo;

pub use tetros_core as core;
pub use tetros_input as input;
pub use tetros_types as types;
