//! ODE Solver UI WASM Module
//!
//! This is the WASM module behind the equation-solving page. It owns the
//! interaction state (equation buffer, initial-condition fields, submission
//! state machine) and the solution-text formatting pipeline; the page
//! renders whatever the session snapshot says.

pub mod models;
pub mod format;
pub mod editor;
pub mod conditions;
pub mod submit;
pub mod api;

// Re-export commonly used types
pub use conditions::{ConditionList, MAX_CONDITIONS};
pub use editor::{EquationBuffer, Selection};
pub use models::{Block, FormattedDocument, Session, SessionSnapshot};
pub use submit::{SolveOutcome, SolveRequest, SubmissionController, SubmissionState, SubmitAction};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("Solver UI WASM module initialized");
}
