//! Session state management
//!
//! This module contains the Session struct which represents the complete
//! state of the solver UI: the equation buffer, the initial-condition list,
//! and the submission state machine.
//!
//! This is the WASM-owned source of truth for all UI-relevant state; the
//! page only mirrors what these values say.

use serde::{Deserialize, Serialize};

use crate::conditions::ConditionList;
use crate::editor::EquationBuffer;
use crate::models::FormattedDocument;
use crate::submit::SubmissionController;

/// Complete session state (WASM-owned source of truth)
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// The equation being edited
    pub editor: EquationBuffer,

    /// Initial-condition fields (always 1 to 3 entries)
    pub conditions: ConditionList,

    /// Submission state machine
    pub submission: SubmissionController,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the session for the view layer
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.submission.state();
        SessionSnapshot {
            equation: self.editor.text().to_string(),
            cursor: self.editor.selection().start,
            conditions: self.conditions.values().to_vec(),
            condition_labels: self.conditions.labels(),
            can_add_condition: self.conditions.can_add(),
            can_remove_condition: self.conditions.can_remove(),
            loading: state.is_loading(),
            error: state.error_message().map(|m| m.to_string()),
            solution: state.document().cloned(),
        }
    }
}

/// View-facing projection of the session, returned after every state
/// transition so the page can re-render without reaching into shared state.
///
/// Button enablement and loading visibility are derived here, not owned by
/// the page; shake/press animations stay on the JS side, keyed off the
/// `error`/`loading` fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Current equation text
    pub equation: String,

    /// Cursor position in the equation (character index)
    pub cursor: usize,

    /// Current condition field values, in order
    pub conditions: Vec<String>,

    /// 1-based display labels for the condition fields
    pub condition_labels: Vec<String>,

    /// Whether the "add condition" control should be enabled
    pub can_add_condition: bool,

    /// Whether the "remove condition" control should be enabled
    pub can_remove_condition: bool,

    /// Whether a request is in flight
    pub loading: bool,

    /// User-visible error message, if the last submission failed
    pub error: Option<String>,

    /// Formatted solution document, if the last submission succeeded
    pub solution: Option<FormattedDocument>,
}
