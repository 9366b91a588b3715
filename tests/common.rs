use hobby_planner_backend::{
    api::router::create_router,
    config::Config,
    infra::repositories::{
        sqlite_attendee_repo::SqliteAttendeeRepo,
        sqlite_session_repo::SqliteSessionRepo,
    },
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url,
            port: 0,
        };

        let state = Arc::new(AppState {
            config,
            session_repo: Arc::new(SqliteSessionRepo::new(pool.clone())),
            attendee_repo: Arc::new(SqliteAttendeeRepo::new(pool.clone())),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Creates a session and returns the 201 payload, including the one-time
    /// secrets.
    pub async fn create_session(&self, payload: Value) -> Value {
        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/sessions")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if response.status() != StatusCode::CREATED {
            panic!("Session create failed in test helper: status {}", response.status());
        }

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Joins a session and returns the 201 payload ({attendeeId, attendanceCode}).
    pub async fn join_session(&self, session_id: &str, display_name: Option<&str>) -> Value {
        let body = match display_name {
            Some(name) => json!({ "display_name": name }),
            None => json!({}),
        };

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/sessions/{}/attendees", session_id))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap()
        ).await.unwrap();

        if response.status() != StatusCode::CREATED {
            panic!("Join failed in test helper: status {}", response.status());
        }

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}

#[allow(dead_code)]
pub fn session_payload(session_type: &str, max_participants: i32) -> Value {
    json!({
        "hobby": "Bouldering",
        "title": "Evening climb",
        "date_time": (Utc::now() + Duration::days(3)).to_rfc3339(),
        "max_participants": max_participants,
        "type": session_type
    })
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
