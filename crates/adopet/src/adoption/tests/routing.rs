use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::adoption::domain::{AdoptionRejection, AdoptionStatus};
use crate::adoption::router::{adoption_router, reject_handler, status_handler};
use crate::adoption::service::{AdoptionPolicy, AdoptionService, AdoptionStores};

fn json_request(method: &str, uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

#[tokio::test]
async fn post_adoption_returns_accepted_view() {
    let harness = Harness::seeded();
    let router = adoption_router(Arc::new(harness.service()));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/adoptions",
            json!({ "pet_id": REX, "tutor_id": ANA, "reason": "Loves dogs" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "awaiting_review");
    assert_eq!(payload["pet_id"], REX);
    assert!(payload.get("request_id").is_some());
}

#[tokio::test]
async fn post_adoption_for_adopted_pet_is_unprocessable() {
    let harness = Harness::seeded();
    let router = adoption_router(Arc::new(harness.service()));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/adoptions",
            json!({ "pet_id": BOB, "tutor_id": ANA, "reason": "Loves dogs" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("already been adopted"));
    assert!(harness.notifier.sent().is_empty());
}

#[tokio::test]
async fn approve_route_then_second_approval_conflicts() {
    let harness = Harness::seeded();
    let service = Arc::new(harness.service());
    let request = service.submit(submission(REX, ANA)).expect("submit");
    let router = adoption_router(service);

    let approve = || {
        json_request(
            "PUT",
            "/api/v1/adoptions/approve",
            json!({ "request_id": request.id().0 }),
        )
    };

    let first = router.clone().oneshot(approve()).await.expect("dispatch");
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(read_json_body(first).await["status"], "approved");

    let second = router.oneshot(approve()).await.expect("dispatch");
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn reject_handler_maps_blank_justification_to_bad_request() {
    let harness = Harness::seeded();
    let service = Arc::new(harness.service());
    let request = service.submit(submission(REX, ANA)).expect("submit");

    let response = reject_handler(
        State(service.clone()),
        axum::Json(AdoptionRejection {
            request_id: request.id().clone(),
            justification: " ".to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        harness.requests.get(request.id()).status(),
        AdoptionStatus::AwaitingReview
    );
}

#[tokio::test]
async fn status_handler_returns_not_found_for_unknown_request() {
    let harness = Harness::seeded();
    let service = Arc::new(harness.service());

    let response = status_handler(State(service), Path("adoption-404".to_string())).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("adoption-404"));
}

#[tokio::test]
async fn status_route_reports_rejection_justification() {
    let harness = Harness::seeded();
    let service = Arc::new(harness.service());
    let request = service.submit(submission(REX, ANA)).expect("submit");
    service
        .reject(AdoptionRejection {
            request_id: request.id().clone(),
            justification: "No fenced yard".to_string(),
        })
        .expect("reject");

    let response = adoption_router(service)
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/adoptions/{}", request.id().0))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "rejected");
    assert_eq!(payload["justification"], "No fenced yard");
}

#[tokio::test]
async fn adoptability_route_returns_assessment() {
    let harness = Harness::seeded();
    let router = adoption_router(Arc::new(harness.service()));

    let response = router
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/pets/{MIMI}/adoptability"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["tier"], "LOW");
    assert_eq!(payload["score"], 3);
}

#[tokio::test]
async fn available_pets_route_lists_unadopted_pets() {
    let harness = Harness::seeded();
    let router = adoption_router(Arc::new(harness.service()));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/pets/available")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let pets = payload.as_array().expect("array payload");
    assert_eq!(pets.len(), 2);
    assert!(pets.iter().all(|pet| pet["adopted"] == false));
    assert_eq!(pets[1]["name"], "Rex");
    assert_eq!(pets[1]["tier"], "HIGH");
}

#[tokio::test]
async fn repository_outage_is_internal_error() {
    let harness = Harness::seeded();
    let stores = AdoptionStores {
        requests: Arc::new(UnavailableRequests),
        ..harness.stores()
    };
    let service = Arc::new(AdoptionService::new(
        stores,
        harness.notifier.clone(),
        AdoptionPolicy::default(),
    ));

    let response = status_handler(State(service), Path("adoption-000001".to_string())).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
