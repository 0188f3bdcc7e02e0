//! The single page handler.
//!
//! Runs top to bottom per request: decide the outcome from the method and
//! body, collect diagnostics, render.

use axum::{
    extract::{rejection::FormRejection, State},
    http::{HeaderMap, Method, StatusCode, Uri, Version},
    response::{Html, IntoResponse, Response},
    Form,
};

use crate::diagnostics::{self, RequestInfo};
use crate::form::name::{NameForm, SubmittedName};
use crate::form::page::{render_page, FormOutcome};
use crate::http::server::AppState;
use crate::observability::metrics;

/// Decoded `application/x-www-form-urlencoded` pairs, in body order.
pub type FormPairs = Vec<(String, String)>;

/// Decide what to show above the form.
///
/// Only `POST` is a submission. An undecodable body counts as a missing
/// name, which is the validation branch. A body cut off by the size limit
/// is handed back so the caller can answer `413`.
pub fn resolve_outcome(
    method: &Method,
    form: Result<FormPairs, FormRejection>,
    request_id: &str,
) -> Result<FormOutcome, FormRejection> {
    if *method != Method::POST {
        return Ok(FormOutcome::Form);
    }

    let form = match form {
        Ok(pairs) => NameForm::from_pairs(pairs),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            tracing::warn!(request_id = %request_id, "Form body over size limit");
            return Err(rejection);
        }
        Err(rejection) => {
            tracing::debug!(
                request_id = %request_id,
                rejection = %rejection,
                "Form body not usable, treating name as missing"
            );
            NameForm::default()
        }
    };

    Ok(match SubmittedName::parse(form.name.as_deref()) {
        Some(name) => FormOutcome::Greeting(name),
        None => FormOutcome::Validation,
    })
}

pub async fn form_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    version: Version,
    headers: HeaderMap,
    form: Result<Form<FormPairs>, FormRejection>,
) -> Response {
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let outcome = match resolve_outcome(&method, form.map(|Form(pairs)| pairs), &request_id) {
        Ok(outcome) => outcome,
        Err(rejection) => return rejection.into_response(),
    };

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        outcome = outcome.as_str(),
        "Rendering form page"
    );
    metrics::record_request(method.as_str(), outcome.as_str());

    let report = diagnostics::collect(
        &state.config,
        state.started_at,
        RequestInfo {
            method: &method,
            uri: &uri,
            version,
            headers: &headers,
        },
    );

    Html(render_page(&outcome, &diagnostics::render_html(&report))).into_response()
}
