use axum::{
    body::Body,
    extract::Request,
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{attendee, health, session};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))

        // Public browsing & creation
        .route("/api/sessions", get(session::list_public_sessions).post(session::create_session))
        .route("/api/sessions/code/{code}", get(session::get_session_by_code))

        // Session read & owner management
        .route("/api/sessions/{id}", get(session::get_session).patch(session::update_session).delete(session::delete_session))

        // Attendance
        .route("/api/sessions/{id}/attendees", get(attendee::list_attendees).post(attendee::join_session))
        .route("/api/sessions/{id}/attendees/count", get(attendee::count_attendees))
        .route("/api/sessions/{id}/attendees/{attendee_id}", delete(attendee::remove_attendee))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
