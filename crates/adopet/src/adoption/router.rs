use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde_json::json;

use super::domain::{AdoptionApproval, AdoptionRejection, AdoptionSubmission, PetId, RequestId};
use super::error::AdoptionError;
use super::service::AdoptionService;

/// Router builder exposing HTTP endpoints for submission, review, and scoring.
pub fn adoption_router(service: Arc<AdoptionService>) -> Router {
    Router::new()
        .route("/api/v1/adoptions", post(submit_handler))
        .route("/api/v1/adoptions/approve", put(approve_handler))
        .route("/api/v1/adoptions/reject", put(reject_handler))
        .route("/api/v1/adoptions/:request_id", get(status_handler))
        .route("/api/v1/pets/available", get(available_pets_handler))
        .route("/api/v1/pets/:pet_id/adoptability", get(adoptability_handler))
        .with_state(service)
}

pub(crate) async fn submit_handler(
    State(service): State<Arc<AdoptionService>>,
    axum::Json(submission): axum::Json<AdoptionSubmission>,
) -> Response {
    match service.submit(submission) {
        Ok(request) => (StatusCode::ACCEPTED, axum::Json(request.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn approve_handler(
    State(service): State<Arc<AdoptionService>>,
    axum::Json(approval): axum::Json<AdoptionApproval>,
) -> Response {
    match service.approve(approval) {
        Ok(request) => (StatusCode::OK, axum::Json(request.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reject_handler(
    State(service): State<Arc<AdoptionService>>,
    axum::Json(rejection): axum::Json<AdoptionRejection>,
) -> Response {
    match service.reject(rejection) {
        Ok(request) => (StatusCode::OK, axum::Json(request.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler(
    State(service): State<Arc<AdoptionService>>,
    Path(request_id): Path<String>,
) -> Response {
    match service.get(&RequestId(request_id)) {
        Ok(request) => (StatusCode::OK, axum::Json(request.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn available_pets_handler(
    State(service): State<Arc<AdoptionService>>,
) -> Response {
    match service.available_pets() {
        Ok(pets) => (StatusCode::OK, axum::Json(pets)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn adoptability_handler(
    State(service): State<Arc<AdoptionService>>,
    Path(pet_id): Path<String>,
) -> Response {
    match service.score(&PetId(pet_id)) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) fn status_for(error: &AdoptionError) -> StatusCode {
    match error {
        AdoptionError::NotFound { .. } => StatusCode::NOT_FOUND,
        AdoptionError::Violation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AdoptionError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        AdoptionError::InvalidState(_) => StatusCode::CONFLICT,
        AdoptionError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: AdoptionError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (status_for(&error), axum::Json(payload)).into_response()
}
