//! Models module for the solver UI
//!
//! This module contains the data models shared across the crate:
//! the formatted solution document and the WASM-owned session state.

pub mod blocks;
pub mod session;

// Re-export commonly used types
pub use blocks::{Block, FormattedDocument};
pub use session::{Session, SessionSnapshot};
