#![allow(dead_code)]

use axum::http::{HeaderMap, StatusCode, header::CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Requests seen by a stub server: content type and decoded body.
pub type Seen = Arc<Mutex<Vec<(String, Value)>>>;

pub fn sample_plan() -> Value {
    json!([
        {"month": 1, "principal": 100.5, "interest": 5},
        {"month": 2, "principal": 101.25, "interest": 4.9}
    ])
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// `POST /loan/` answers every request with `plan`, recording what it got.
pub fn plan_router(plan: Value, seen: Seen) -> Router {
    Router::new().route(
        "/loan/",
        post(move |headers: HeaderMap, body: String| {
            let plan = plan.clone();
            let seen = seen.clone();
            async move {
                let content_type = headers
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let body: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
                seen.lock().unwrap().push((content_type, body));
                Json(plan)
            }
        }),
    )
}

/// `POST /loan/` rejects every request the way the loan server reports
/// validation errors.
pub fn rejecting_router(message: &'static str) -> Router {
    Router::new().route(
        "/loan/",
        post(move || async move {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "detail": [
                        {"loc": ["body", "term_years"], "msg": message, "type": "value_error"},
                        {"loc": ["body", "principal"], "msg": "ignored", "type": "value_error"}
                    ]
                })),
            )
                .into_response()
        }),
    )
}

/// `POST /loan/` answers with `status` and a body without `detail`.
pub fn broken_router(status: StatusCode) -> Router {
    Router::new().route(
        "/loan/",
        post(move || async move { (status, "Internal Server Error").into_response() }),
    )
}

/// `POST /loan/` answers with `plan` only after `delay`.
pub fn slow_router(delay: Duration, plan: Value) -> Router {
    Router::new().route(
        "/loan/",
        post(move || {
            let plan = plan.clone();
            async move {
                tokio::time::sleep(delay).await;
                Json(plan)
            }
        }),
    )
}

pub fn seen() -> Seen {
    Arc::new(Mutex::new(Vec::new()))
}
