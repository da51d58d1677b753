//! Solver UI WASM API
//!
//! This module provides the JavaScript-facing API for the solver UI.
//! It includes shared utilities for serialization, validation, and error
//! handling, as well as the session-level API functions and the fetch
//! transport to the solving service.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, validation, error handling, and logging
//! - `session`: Session lifecycle, equation editing, condition fields, submission
//! - `transport`: Fetch POST to the solve endpoint and the full async flow

pub mod helpers;
pub mod session;
pub mod transport;

// Re-export all public functions to keep a flat JS-facing API
pub use session::{
    add_condition, begin_submit, complete_submit, filter_keystroke_api, format_solution_html,
    format_solution_text, get_session_snapshot, handle_enter, init_session, insert_token,
    remove_condition, set_condition, set_equation_text, set_selection, BeginSubmitResult,
};
pub use transport::{post_solve, solve_equation};
