use super::AppState;
use crate::adapters::view::{BASE_VIEW, ERROR_VIEW, LISTING_VIEW};
use crate::utils::error::AnnuaireError;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};

const HTML: &str = "text/html; charset=utf-8";

/// Shown for every 5xx; error details only go to the log.
const UNAVAILABLE_MESSAGE: &str = "L'annuaire est momentanément indisponible.";

pub(crate) async fn landing_handler(State(state): State<AppState>) -> Response {
    render_page(&state, StatusCode::OK, BASE_VIEW, &Value::Null)
}

pub(crate) async fn listing_handler(State(state): State<AppState>) -> Response {
    let personnes = match state.listing.list_all().await {
        Ok(personnes) => personnes,
        Err(e) => return error_page(&state, StatusCode::INTERNAL_SERVER_ERROR, &e),
    };

    match serde_json::to_value(&personnes) {
        Ok(personnes) => render_page(
            &state,
            StatusCode::OK,
            LISTING_VIEW,
            &json!({ "personnes": personnes }),
        ),
        Err(e) => error_page(&state, StatusCode::INTERNAL_SERVER_ERROR, &AnnuaireError::from(e)),
    }
}

pub(crate) async fn not_found_handler(State(state): State<AppState>) -> Response {
    let bindings = json!({ "status": 404, "message": "Page introuvable." });
    render_page(&state, StatusCode::NOT_FOUND, ERROR_VIEW, &bindings)
}

fn render_page(state: &AppState, status: StatusCode, view: &str, bindings: &Value) -> Response {
    match state.renderer.render(view, bindings) {
        Ok(page) => (status, [(header::CONTENT_TYPE, HTML)], page).into_response(),
        Err(e) => error_page(state, StatusCode::INTERNAL_SERVER_ERROR, &e),
    }
}

fn error_page(state: &AppState, status: StatusCode, err: &AnnuaireError) -> Response {
    tracing::error!(
        status = status.as_u16(),
        category = ?err.category(),
        error = %err,
        "request failed"
    );

    let bindings = json!({ "status": status.as_u16(), "message": UNAVAILABLE_MESSAGE });
    match state.renderer.render(ERROR_VIEW, &bindings) {
        Ok(page) => (status, [(header::CONTENT_TYPE, HTML)], page).into_response(),
        Err(render_err) => {
            tracing::error!(error = %render_err, "error view failed");
            (status, UNAVAILABLE_MESSAGE).into_response()
        }
    }
}
