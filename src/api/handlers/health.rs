use axum::{response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "ok": true, "time": Utc::now().to_rfc3339() }))
}
