//! Submission state machine and solver wire contract
//!
//! The controller owns the `Idle → Loading → (Success | Error) → Idle`
//! cycle. It performs no IO itself: `begin_submit` validates and hands back
//! the request to send, `complete_submit` consumes the outcome the
//! transport observed. The `Loading` state is itself the re-entry guard;
//! there is no separate in-flight counter, and there is no timeout — a
//! request that never resolves leaves the machine in `Loading`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format;
use crate::models::FormattedDocument;

/// Endpoint of the solving service
pub const SOLVE_ENDPOINT: &str = "/solve_ode";

/// User-visible submission errors (messages are shown verbatim)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Validation failure: nothing to solve. Never reaches the service.
    #[error("Por favor, ingresa una ecuación.")]
    EmptyEquation,

    /// The service answered with an explicit error message
    #[error("{0}")]
    Solver(String),

    /// The service answered, but with nothing recognizable
    #[error("Ocurrió un error al resolver la ecuación.")]
    UnrecognizedResponse,

    /// No response was obtained at all
    #[error("Error de conexión con el servidor.")]
    Transport,
}

/// Request body for the solving service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveRequest {
    pub equation: String,
    pub initial_conditions: Vec<String>,
}

/// Response body from the solving service. Either field may be absent;
/// a payload carrying neither is treated as a generic error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SolveResponse {
    #[serde(default)]
    pub solution: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// What the transport observed for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum SolveOutcome {
    /// Success status with a solution payload
    Solution(String),
    /// Non-success status; message from the payload if it carried one
    Rejected(Option<String>),
    /// The request could not be completed at all
    TransportFailed,
}

/// Map a raw HTTP response (status + body) to an outcome
pub fn interpret_response(status_ok: bool, body: &str) -> SolveOutcome {
    let parsed: SolveResponse = serde_json::from_str(body).unwrap_or_default();
    if status_ok {
        match parsed.solution {
            Some(solution) => SolveOutcome::Solution(solution),
            None => SolveOutcome::Rejected(parsed.error),
        }
    } else {
        SolveOutcome::Rejected(parsed.error)
    }
}

/// One-of submission state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SubmissionState {
    Idle,
    Loading,
    Success { document: FormattedDocument },
    Error { message: String },
}

impl Default for SubmissionState {
    fn default() -> Self {
        SubmissionState::Idle
    }
}

impl SubmissionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SubmissionState::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionState::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn document(&self) -> Option<&FormattedDocument> {
        match self {
            SubmissionState::Success { document } => Some(document),
            _ => None,
        }
    }
}

/// Result of asking the controller to submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAction {
    /// Transitioned to Loading; the caller must send this request and feed
    /// the outcome back through `complete_submit`
    Send(SolveRequest),
    /// Validation failed; the machine moved straight to Error
    Invalid,
    /// A request is already in flight; nothing changed
    AlreadyLoading,
}

/// The submission state machine
#[derive(Debug, Clone, Default)]
pub struct SubmissionController {
    state: SubmissionState,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Start a submission with the current equation text and collected
    /// conditions. The equation is trimmed here; an empty result is a
    /// validation error that never reaches the service.
    pub fn begin_submit(&mut self, equation: &str, initial_conditions: Vec<String>) -> SubmitAction {
        if self.state.is_loading() {
            return SubmitAction::AlreadyLoading;
        }

        let equation = equation.trim();
        if equation.is_empty() {
            self.state = SubmissionState::Error {
                message: SubmitError::EmptyEquation.to_string(),
            };
            return SubmitAction::Invalid;
        }

        self.state = SubmissionState::Loading;
        SubmitAction::Send(SolveRequest {
            equation: equation.to_string(),
            initial_conditions,
        })
    }

    /// Finish the in-flight submission with what the transport observed.
    /// A solution is run through the formatting pipeline; formatting never
    /// fails, so a successful response always lands in `Success`.
    pub fn complete_submit(&mut self, outcome: SolveOutcome) {
        self.state = match outcome {
            SolveOutcome::Solution(text) => SubmissionState::Success {
                document: format::format(&text),
            },
            SolveOutcome::Rejected(message) => {
                let error = match message {
                    Some(message) if !message.is_empty() => SubmitError::Solver(message),
                    _ => SubmitError::UnrecognizedResponse,
                };
                SubmissionState::Error {
                    message: error.to_string(),
                }
            }
            SolveOutcome::TransportFailed => SubmissionState::Error {
                message: SubmitError::Transport.to_string(),
            },
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Block;

    #[test]
    fn test_empty_equation_is_rejected_locally() {
        let mut controller = SubmissionController::new();
        let action = controller.begin_submit("   ", vec![]);
        assert_eq!(action, SubmitAction::Invalid);
        assert_eq!(
            controller.state().error_message(),
            Some("Por favor, ingresa una ecuación.")
        );
    }

    #[test]
    fn test_begin_submit_trims_and_carries_conditions() {
        let mut controller = SubmissionController::new();
        let action = controller.begin_submit("  y'=x ", vec!["y(0)=1".to_string()]);
        assert_eq!(
            action,
            SubmitAction::Send(SolveRequest {
                equation: "y'=x".to_string(),
                initial_conditions: vec!["y(0)=1".to_string()],
            })
        );
        assert!(controller.state().is_loading());
    }

    #[test]
    fn test_loading_blocks_reentry() {
        let mut controller = SubmissionController::new();
        controller.begin_submit("y'=x", vec![]);
        let action = controller.begin_submit("y'=2x", vec![]);
        assert_eq!(action, SubmitAction::AlreadyLoading);
        assert!(controller.state().is_loading());
    }

    #[test]
    fn test_solution_lands_in_success_formatted() {
        let mut controller = SubmissionController::new();
        controller.begin_submit("y'=x", vec![]);
        controller.complete_submit(SolveOutcome::Solution(
            "**Paso 1:** Integrar.\n\\[ y = x^2/2 + C \\]".to_string(),
        ));

        let document = controller.state().document().unwrap();
        assert_eq!(
            document.blocks[0],
            Block::Heading("Paso 1: Integrar.".to_string())
        );
        assert_eq!(
            document.blocks[2],
            Block::MathBlock("\\[ y = x^2/2 + C \\]".to_string())
        );
    }

    #[test]
    fn test_solver_error_surfaced_verbatim() {
        let mut controller = SubmissionController::new();
        controller.begin_submit("y'=x", vec![]);
        controller.complete_submit(SolveOutcome::Rejected(Some("formato inválido".to_string())));
        assert_eq!(controller.state().error_message(), Some("formato inválido"));
    }

    #[test]
    fn test_rejection_without_message_uses_fallback() {
        let mut controller = SubmissionController::new();
        controller.begin_submit("y'=x", vec![]);
        controller.complete_submit(SolveOutcome::Rejected(None));
        assert_eq!(
            controller.state().error_message(),
            Some("Ocurrió un error al resolver la ecuación.")
        );
    }

    #[test]
    fn test_transport_failure_message() {
        let mut controller = SubmissionController::new();
        controller.begin_submit("y'=x", vec![]);
        controller.complete_submit(SolveOutcome::TransportFailed);
        assert_eq!(
            controller.state().error_message(),
            Some("Error de conexión con el servidor.")
        );
    }

    #[test]
    fn test_error_state_allows_resubmit() {
        let mut controller = SubmissionController::new();
        controller.begin_submit("", vec![]);
        let action = controller.begin_submit("y'=x", vec![]);
        assert!(matches!(action, SubmitAction::Send(_)));
        assert!(controller.state().is_loading());
    }

    #[test]
    fn test_interpret_response_success() {
        let outcome = interpret_response(true, r#"{"solution": "y = C e^x"}"#);
        assert_eq!(outcome, SolveOutcome::Solution("y = C e^x".to_string()));
    }

    #[test]
    fn test_interpret_response_error_payload() {
        let outcome = interpret_response(false, r#"{"error": "formato inválido"}"#);
        assert_eq!(
            outcome,
            SolveOutcome::Rejected(Some("formato inválido".to_string()))
        );
    }

    #[test]
    fn test_interpret_response_unrecognizable() {
        assert_eq!(interpret_response(true, "no es json"), SolveOutcome::Rejected(None));
        assert_eq!(interpret_response(true, r#"{"otro": 1}"#), SolveOutcome::Rejected(None));
    }
}
