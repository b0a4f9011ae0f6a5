//! Input module (engine-facing).
//!
//! Independent of any device or UI framework. A host implements
//! [`InputSource`] over its own key state; [`InputController`] polls it once
//! per frame and turns edge and level triggers into engine operations, with
//! auto-repeat for horizontal movement.

pub mod controller;
pub mod source;

pub use tetros_types as types;

pub use controller::InputController;
pub use source::{InputSource, ScriptedInput};
