//! HTTP request handlers for the intéressement API.
//!
//! This module contains the handler functions for all endpoints.

use std::time::Instant;

use axum::{
    Form, Json, Router,
    extract::{
        State,
        rejection::{FormRejection as AxumFormRejection, JsonRejection},
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::estimate;
use crate::error::ValidationError;

use super::html::{render_form_page, render_result_page};
use super::request::{EstimateRequest, FormRejection, FormSubmission};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/calculate", post(calculate_form_handler))
        .route("/api/estimate", post(estimate_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Handler for GET /: the empty form.
async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(render_form_page(state.scheme_name(), None, None))
}

/// Handler for GET /health.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Handler for POST /calculate: the form submission.
///
/// Renders the result page, or the form again with an error message and the
/// values the user typed.
async fn calculate_form_handler(
    State(state): State<AppState>,
    payload: Result<Form<FormSubmission>, AxumFormRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing form submission");

    let form = match payload {
        Ok(Form(form)) => form,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Unreadable form body");
            let message = FormRejection::Invalid(ValidationError::InvalidNumericInput {
                field: "form".to_string(),
                message: rejection.body_text(),
            })
            .user_message();
            return form_error(&state, &message, None);
        }
    };

    let constants = state.constants();
    let outcome = form
        .to_input(constants)
        .and_then(|input| estimate(&input, constants).map_err(FormRejection::from));

    match outcome {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                gross_estimate = %result.gross_estimate,
                net_estimate = %result.net_estimate,
                duration_us = result.audit_trace.duration_us,
                "Estimate rendered"
            );
            Html(render_result_page(state.scheme_name(), &form, &result)).into_response()
        }
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                code = rejection.code(),
                "Form submission rejected"
            );
            form_error(&state, &rejection.user_message(), Some(&form))
        }
    }
}

fn form_error(state: &AppState, message: &str, values: Option<&FormSubmission>) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(render_form_page(state.scheme_name(), Some(message), values)),
    )
        .into_response()
}

/// Handler for POST /api/estimate: the JSON endpoint.
async fn estimate_handler(
    State(state): State<AppState>,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing estimate request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let start_time = Instant::now();
    let constants = state.constants();
    let outcome = request
        .to_input(constants)
        .and_then(|input| estimate(&input, constants));

    match outcome {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                gross_estimate = %result.gross_estimate,
                duration_us = start_time.elapsed().as_micros(),
                "Estimate completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Estimate rejected"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}
