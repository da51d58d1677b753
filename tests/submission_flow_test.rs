// Submission lifecycle: Idle → Loading → (Success | Error) → Idle

use solver_ui_wasm::models::{Block, Session};
use solver_ui_wasm::submit::{
    interpret_response, SolveOutcome, SolveRequest, SubmissionController, SubmitAction,
};

#[test]
fn test_empty_equation_never_reaches_the_service() {
    let mut controller = SubmissionController::new();

    let action = controller.begin_submit("", vec![]);
    assert_eq!(action, SubmitAction::Invalid);
    assert_eq!(
        controller.state().error_message(),
        Some("Por favor, ingresa una ecuación.")
    );
    // Whitespace-only counts as empty too
    let action = controller.begin_submit(" \t ", vec![]);
    assert_eq!(action, SubmitAction::Invalid);
}

#[test]
fn test_request_carries_equation_and_conditions() {
    let mut controller = SubmissionController::new();
    let action = controller.begin_submit(
        "y'' + y = 0",
        vec!["y(0)=1".to_string(), "y'(0)=0".to_string()],
    );

    match action {
        SubmitAction::Send(request) => {
            assert_eq!(request.equation, "y'' + y = 0");
            assert_eq!(request.initial_conditions, vec!["y(0)=1", "y'(0)=0"]);
        }
        other => panic!("expected Send, got {:?}", other),
    }
}

#[test]
fn test_request_serializes_to_wire_shape() {
    let request = SolveRequest {
        equation: "y'=x".to_string(),
        initial_conditions: vec!["y(0)=1".to_string()],
    };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "equation": "y'=x",
            "initial_conditions": ["y(0)=1"],
        })
    );
}

#[test]
fn test_explicit_error_payload_surfaced_verbatim() {
    let mut controller = SubmissionController::new();
    controller.begin_submit("y'=x", vec![]);

    let outcome = interpret_response(false, r#"{"error": "formato inválido"}"#);
    controller.complete_submit(outcome);

    assert_eq!(controller.state().error_message(), Some("formato inválido"));
}

#[test]
fn test_unrecognizable_payload_becomes_generic_error() {
    let mut controller = SubmissionController::new();
    controller.begin_submit("y'=x", vec![]);

    let outcome = interpret_response(true, r#"{"respuesta": 42}"#);
    controller.complete_submit(outcome);

    assert_eq!(
        controller.state().error_message(),
        Some("Ocurrió un error al resolver la ecuación.")
    );
}

#[test]
fn test_success_formats_solution() {
    let mut controller = SubmissionController::new();
    controller.begin_submit("y'=x", vec![]);

    let outcome = interpret_response(
        true,
        r#"{"solution": "**Paso 1:** Integrar.\n\\[ y = x^2/2 + C \\]"}"#,
    );
    controller.complete_submit(outcome);

    let document = controller.state().document().expect("expected Success");
    assert_eq!(
        document.blocks,
        vec![
            Block::Heading("Paso 1: Integrar.".to_string()),
            Block::LineBreak,
            Block::MathBlock("\\[ y = x^2/2 + C \\]".to_string()),
        ]
    );
}

#[test]
fn test_loading_is_the_only_guard() {
    let mut controller = SubmissionController::new();
    controller.begin_submit("y'=x", vec![]);

    // Re-entry while Loading is blocked by the state itself
    assert_eq!(
        controller.begin_submit("y'=2x", vec![]),
        SubmitAction::AlreadyLoading
    );

    // Once the outcome arrives the cycle is open again
    controller.complete_submit(SolveOutcome::TransportFailed);
    assert!(matches!(
        controller.begin_submit("y'=2x", vec![]),
        SubmitAction::Send(_)
    ));
}

#[test]
fn test_error_leaves_editor_and_conditions_untouched() {
    let mut session = Session::new();
    session.editor.set_text("y'=x", 4, 4);
    session.conditions.set_condition(0, "y(0)=1");

    let equation = session.editor.trimmed().to_string();
    let conditions = session.conditions.collect();
    session.submission.begin_submit(&equation, conditions);
    session.submission.complete_submit(SolveOutcome::TransportFailed);

    // The user can retry with exactly what they had
    assert_eq!(session.editor.text(), "y'=x");
    assert_eq!(session.conditions.values(), &["y(0)=1".to_string()]);

    let snap = session.snapshot();
    assert_eq!(
        snap.error.as_deref(),
        Some("Error de conexión con el servidor.")
    );
    assert!(!snap.loading);
}

#[test]
fn test_snapshot_reflects_loading() {
    let mut session = Session::new();
    session.editor.set_text("y'=x", 4, 4);

    let equation = session.editor.trimmed().to_string();
    session.submission.begin_submit(&equation, vec![]);

    let snap = session.snapshot();
    assert!(snap.loading);
    assert!(snap.error.is_none());
    assert!(snap.solution.is_none());
}
