//! Equation input editor
//!
//! This module provides pure text editing for the equation field with no
//! knowledge of mathematics: a buffer with cursor/selection, calculator
//! token insertion, and keystroke filtering.
//!
//! ## Modules
//!
//! - `buffer`: Equation text storage, selection, token insertion
//! - `keys`: Keystroke allow-list filtering and Enter semantics

pub mod buffer;
pub mod keys;

// Re-exports for convenience
pub use buffer::{EquationBuffer, Selection, CLEAR_TOKEN};
pub use keys::{filter_keystroke, on_enter, EnterAction, KeyDecision, Modifiers};
