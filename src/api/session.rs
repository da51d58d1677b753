//! Session-level WASM API
//!
//! JavaScript-facing functions over the WASM-owned session (canonical
//! source of truth for the equation buffer, condition list, and submission
//! state). Every mutation returns a fresh `SessionSnapshot` so the page can
//! re-render from it instead of keeping its own counters in the DOM.

use wasm_bindgen::prelude::*;

use crate::api::helpers::{serialize, validate_index, validation_error};
use crate::conditions::MAX_CONDITIONS;
use crate::editor::{filter_keystroke, on_enter, EnterAction, Modifiers};
use crate::models::Session;
use crate::submit::{SolveOutcome, SolveRequest, SubmitAction};
use crate::{wasm_info, wasm_log, wasm_warn};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};

// WASM-owned session storage (canonical source of truth)
lazy_static! {
    static ref SESSION: Mutex<Session> = Mutex::new(Session::new());
}

/// Lock the global session for the duration of one API call
pub(crate) fn lock_session() -> MutexGuard<'static, Session> {
    SESSION.lock().unwrap()
}

fn snapshot_js(session: &Session) -> Result<JsValue, JsValue> {
    serialize(&session.snapshot(), "Snapshot serialization error")
}

// ============================================================================
// Session lifecycle
// ============================================================================

/// Reset the session to its initial state (empty equation, one empty
/// condition field, idle submission) and return the fresh snapshot.
#[wasm_bindgen(js_name = initSession)]
pub fn init_session() -> Result<JsValue, JsValue> {
    wasm_info!("initSession called");

    let mut session = lock_session();
    *session = Session::new();
    snapshot_js(&session)
}

/// Current view of the session without mutating anything
#[wasm_bindgen(js_name = getSessionSnapshot)]
pub fn get_session_snapshot() -> Result<JsValue, JsValue> {
    let session = lock_session();
    snapshot_js(&session)
}

// ============================================================================
// Equation editing
// ============================================================================

/// Insert a calculator token at the current selection. The clear token
/// ("C") empties the buffer instead.
#[wasm_bindgen(js_name = insertToken)]
pub fn insert_token(token: &str) -> Result<JsValue, JsValue> {
    wasm_info!("insertToken called: token={:?}", token);

    let mut session = lock_session();
    session.editor.insert_token(token);
    snapshot_js(&session)
}

/// Mirror a direct textarea edit into the buffer, with the host's
/// selection positions (clamped on our side)
#[wasm_bindgen(js_name = setEquationText)]
pub fn set_equation_text(text: &str, start: usize, end: usize) -> Result<JsValue, JsValue> {
    wasm_log!("setEquationText: {} chars, selection {}..{}", text.chars().count(), start, end);

    let mut session = lock_session();
    session.editor.set_text(text, start, end);
    snapshot_js(&session)
}

/// Mirror a cursor/selection move from the host textarea
#[wasm_bindgen(js_name = setSelection)]
pub fn set_selection(start: usize, end: usize) -> Result<JsValue, JsValue> {
    wasm_log!("setSelection: {}..{}", start, end);

    let mut session = lock_session();
    session.editor.set_selection(start, end);
    snapshot_js(&session)
}

/// Decide whether a keystroke may reach the equation input.
/// Returns true to let it through, false to suppress it.
#[wasm_bindgen(js_name = filterKeystroke)]
pub fn filter_keystroke_api(key: &str, ctrl: bool, alt: bool, shift: bool, meta: bool) -> bool {
    let modifiers = Modifiers {
        ctrl,
        alt,
        shift,
        meta,
    };
    filter_keystroke(key, modifiers).is_accepted()
}

/// Enter-key semantics: returns true when the host should suppress the
/// default newline and trigger submission
#[wasm_bindgen(js_name = handleEnter)]
pub fn handle_enter(shift_held: bool) -> bool {
    on_enter(shift_held) == EnterAction::Submit
}

// ============================================================================
// Condition fields
// ============================================================================

/// Add an initial-condition field (up to three)
#[wasm_bindgen(js_name = addCondition)]
pub fn add_condition() -> Result<JsValue, JsValue> {
    wasm_info!("addCondition called");

    let mut session = lock_session();
    if !session.conditions.add_condition() {
        wasm_warn!("addCondition ignored: already at {} fields", MAX_CONDITIONS);
    }
    snapshot_js(&session)
}

/// Remove the last initial-condition field (at least one remains)
#[wasm_bindgen(js_name = removeCondition)]
pub fn remove_condition() -> Result<JsValue, JsValue> {
    wasm_info!("removeCondition called");

    let mut session = lock_session();
    if !session.conditions.remove_condition() {
        wasm_warn!("removeCondition ignored: only one field left");
    }
    snapshot_js(&session)
}

/// Write a condition field's value back from the page
#[wasm_bindgen(js_name = setCondition)]
pub fn set_condition(index: usize, value: &str) -> Result<JsValue, JsValue> {
    wasm_log!("setCondition: field {}", index);

    let mut session = lock_session();
    validate_index(index, session.conditions.len(), "Condition").map_err(validation_error)?;
    session.conditions.set_condition(index, value);
    snapshot_js(&session)
}

// ============================================================================
// Submission
// ============================================================================

/// Result of `beginSubmit`: what happened plus the request to send when the
/// machine entered Loading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeginSubmitResult {
    /// "send", "invalid", or "alreadyLoading"
    pub action: String,
    /// The request body to POST, present only for "send"
    pub request: Option<SolveRequest>,
    /// Session view after the transition
    pub snapshot: crate::models::SessionSnapshot,
}

/// Validate and start a submission. Hosts that drive their own transport
/// POST the returned request to the solve endpoint, then report back
/// through `completeSubmit`. Hosts that don't can use `solveEquation`.
#[wasm_bindgen(js_name = beginSubmit)]
pub fn begin_submit() -> Result<JsValue, JsValue> {
    wasm_info!("beginSubmit called");

    let mut session = lock_session();
    let action = begin_submit_locked(&mut session);

    let (action, request) = match action {
        SubmitAction::Send(request) => ("send", Some(request)),
        SubmitAction::Invalid => ("invalid", None),
        SubmitAction::AlreadyLoading => ("alreadyLoading", None),
    };

    serialize(
        &BeginSubmitResult {
            action: action.to_string(),
            request,
            snapshot: session.snapshot(),
        },
        "Submit result serialization error",
    )
}

/// Feed the outcome of an externally-driven request back into the state
/// machine. Expects `{ kind: "solution" | "rejected" | "transportFailed", value? }`.
#[wasm_bindgen(js_name = completeSubmit)]
pub fn complete_submit(outcome: JsValue) -> Result<JsValue, JsValue> {
    let outcome: SolveOutcome =
        crate::api::helpers::deserialize(outcome, "Outcome deserialization error")?;

    let mut session = lock_session();
    session.submission.complete_submit(outcome);
    snapshot_js(&session)
}

/// Shared with the fetch-driven flow in `transport`
pub(crate) fn begin_submit_locked(session: &mut Session) -> SubmitAction {
    let equation = session.editor.trimmed().to_string();
    let conditions = session.conditions.collect();
    session.submission.begin_submit(&equation, conditions)
}

/// Start a submission and return the result with the session lock already
/// released. Callers that hand the snapshot to a JS callback must use this
/// rather than holding the guard across the call: the callback re-renders
/// the page, and any synchronous re-entry into this API from that render
/// would hit the mutex again on the same thread.
pub(crate) fn begin_submit_snapshot() -> (SubmitAction, crate::models::SessionSnapshot) {
    let mut session = lock_session();
    let action = begin_submit_locked(&mut session);
    let snapshot = session.snapshot();
    (action, snapshot)
}

/// Finish the in-flight submission and return the snapshot, lock released
pub(crate) fn complete_submit_snapshot(outcome: SolveOutcome) -> crate::models::SessionSnapshot {
    let mut session = lock_session();
    session.submission.complete_submit(outcome);
    session.snapshot()
}

// ============================================================================
// Formatting (pure entry points)
// ============================================================================

/// Format raw solver text into the block document, without touching the
/// session
#[wasm_bindgen(js_name = formatSolutionText)]
pub fn format_solution_text(raw: &str) -> Result<JsValue, JsValue> {
    serialize(&crate::format::format(raw), "Document serialization error")
}

/// Format raw solver text straight to the HTML fragment the page injects
/// into the solution pane (math delimiters retained for MathJax)
#[wasm_bindgen(js_name = formatSolutionHtml)]
pub fn format_solution_html(raw: &str) -> String {
    crate::format::format(raw).html()
}

#[cfg(test)]
mod tests {
    use super::*;

    // The page callback fires after these helpers return. A guard leaking
    // past them would deadlock any re-entrant API call made from the
    // render the callback triggers, so the mutex must already be free.
    #[test]
    fn test_submission_transitions_release_the_session_lock() {
        {
            let mut session = lock_session();
            *session = Session::new();
            session.editor.set_text("y'=x", 4, 4);
        }

        let (action, snapshot) = begin_submit_snapshot();
        assert!(matches!(action, SubmitAction::Send(_)));
        assert!(snapshot.loading);
        assert!(SESSION.try_lock().is_ok());

        let snapshot = complete_submit_snapshot(SolveOutcome::TransportFailed);
        assert!(!snapshot.loading);
        assert_eq!(
            snapshot.error.as_deref(),
            Some("Error de conexión con el servidor.")
        );
        assert!(SESSION.try_lock().is_ok());
    }
}
