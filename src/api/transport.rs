//! Fetch transport to the solving service
//!
//! POSTs the solve request as JSON and maps whatever comes back into a
//! `SolveOutcome`. Any failure to obtain a response at all (network down,
//! fetch rejected, unreadable body) collapses to `TransportFailed`; the
//! state machine turns that into the connection-error message. There is no
//! timeout: a request that never resolves leaves the session in Loading.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::api::helpers::serialize;
use crate::api::session::{begin_submit_snapshot, complete_submit_snapshot};
use crate::models::SessionSnapshot;
use crate::submit::{interpret_response, SolveOutcome, SolveRequest, SubmitAction, SOLVE_ENDPOINT};
use crate::{wasm_error, wasm_info};

/// POST one solve request and classify the result
pub async fn post_solve(request: &SolveRequest) -> SolveOutcome {
    match try_post_solve(request).await {
        Ok(outcome) => outcome,
        Err(e) => {
            wasm_error!("Solve request failed: {:?}", e);
            SolveOutcome::TransportFailed
        }
    }
}

async fn try_post_solve(request: &SolveRequest) -> Result<SolveOutcome, JsValue> {
    let body = serde_json::to_string(request)
        .map_err(|e| JsValue::from_str(&format!("Request serialization error: {}", e)))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::SameOrigin);
    opts.set_body(&JsValue::from_str(&body));

    let req = Request::new_with_str_and_init(SOLVE_ENDPOINT, &opts)?;
    req.headers().set("Content-Type", "application/json")?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp: Response = JsFuture::from(window.fetch_with_request(&req))
        .await?
        .dyn_into()?;

    let status_ok = resp.ok();
    let text = JsFuture::from(resp.text()?).await?;
    let payload = text.as_string().unwrap_or_default();

    Ok(interpret_response(status_ok, &payload))
}

/// Full submission flow: validate, POST, and complete, notifying the page
/// after each state transition.
///
/// `on_update` receives the serialized session snapshot — once immediately
/// (Loading, or Error for an empty equation) and once more when the request
/// resolves. Re-entry while Loading is swallowed by the state machine; the
/// callback still fires so the page can re-assert its disabled controls.
///
/// The session lock is released before the callback runs. The callback
/// re-renders the page, and a render handler may call straight back into
/// this API; it must find the mutex free and be guarded by the Loading
/// state, not by a lock it cannot re-acquire.
#[wasm_bindgen(js_name = solveEquation)]
pub fn solve_equation(on_update: js_sys::Function) -> Result<(), JsValue> {
    wasm_info!("solveEquation called");

    let (action, snapshot) = begin_submit_snapshot();
    notify(&on_update, &snapshot)?;

    if let SubmitAction::Send(request) = action {
        spawn_local(async move {
            let outcome = post_solve(&request).await;

            let snapshot = complete_submit_snapshot(outcome);
            if let Err(e) = notify(&on_update, &snapshot) {
                wasm_error!("Snapshot callback failed: {:?}", e);
            }
        });
    }

    Ok(())
}

fn notify(on_update: &js_sys::Function, snapshot: &SessionSnapshot) -> Result<(), JsValue> {
    let snapshot = serialize(snapshot, "Snapshot serialization error")?;
    on_update.call1(&JsValue::NULL, &snapshot)?;
    Ok(())
}
