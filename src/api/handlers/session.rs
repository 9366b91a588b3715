use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{CreateSessionRequest, UpdateSessionRequest};
use crate::api::dtos::responses::SessionCreatedResponse;
use crate::domain::models::session::{NewSessionParams, Session, SESSION_TYPE_PRIVATE, SESSION_TYPE_PUBLIC};
use crate::error::AppError;
use crate::state::AppState;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Deserialize)]
pub struct ManageQuery {
    pub manage: Option<String>,
}

pub async fn list_public_sessions(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let sessions = state.session_repo.list_public().await?;
    Ok(Json(sessions))
}

pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;
    Ok(Json(session))
}

pub async fn get_session_by_code(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session_repo.find_by_private_url_code(&code).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;
    Ok(Json(session))
}

pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let hobby = required_text(payload.hobby)?;
    let title = required_text(payload.title)?;
    let date_time = payload.date_time
        .ok_or(AppError::Validation("Missing required fields".into()))?;
    let max_participants = payload.max_participants
        .ok_or(AppError::Validation("Missing required fields".into()))?;
    if max_participants < 1 {
        return Err(AppError::Validation("max_participants must be positive".into()));
    }
    let session_type = payload.session_type
        .ok_or(AppError::Validation("Missing required fields".into()))?;
    validate_session_type(&session_type)?;

    let session = Session::new(NewSessionParams {
        hobby,
        title,
        description: payload.description,
        date_time,
        max_participants,
        session_type,
        location_text: payload.location_text,
        lat: payload.lat,
        lng: payload.lng,
    });

    let created = state.session_repo.create(&session).await?;
    info!("Session created: {} ({})", created.id, created.session_type);

    let manage_url = created.manage_url();
    Ok((StatusCode::CREATED, Json(SessionCreatedResponse {
        id: created.id,
        management_code: created.management_code,
        private_url_code: created.private_url_code,
        manage_url,
    })))
}

pub async fn update_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<ManageQuery>,
    Json(payload): Json<UpdateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let manage = query.manage
        .ok_or(AppError::Validation("Missing manage code".into()))?;

    let mut session = state.session_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    if session.management_code != manage {
        return Err(AppError::Forbidden("Invalid manage code".into()));
    }

    if !payload.has_updates() {
        return Err(AppError::Validation("No valid fields to update".into()));
    }

    if let Some(hobby) = payload.hobby { session.hobby = hobby; }
    if let Some(title) = payload.title { session.title = title; }
    if let Some(description) = payload.description { session.description = description; }
    if let Some(date_time) = payload.date_time { session.date_time = date_time; }
    if let Some(max) = payload.max_participants {
        if max < 1 {
            return Err(AppError::Validation("max_participants must be positive".into()));
        }
        // Lowering below current occupancy is allowed; the capacity guard
        // blocks new joins but never evicts.
        session.max_participants = max;
    }
    if let Some(session_type) = payload.session_type {
        validate_session_type(&session_type)?;
        session.session_type = session_type;
    }
    if let Some(location_text) = payload.location_text { session.location_text = location_text; }
    if let Some(lat) = payload.lat { session.lat = lat; }
    if let Some(lng) = payload.lng { session.lng = lng; }

    let updated = state.session_repo.update(&session).await?;
    info!("Session updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<ManageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let manage = query.manage
        .ok_or(AppError::Validation("Missing manage code".into()))?;

    let session = state.session_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    if session.management_code != manage {
        return Err(AppError::Forbidden("Invalid manage code".into()));
    }

    state.session_repo.delete(&id).await?;
    info!("Session deleted: {}", id);
    Ok(StatusCode::NO_CONTENT)
}

fn required_text(field: Option<String>) -> Result<String, AppError> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(AppError::Validation("Missing required fields".into()))
}

fn validate_session_type(session_type: &str) -> Result<(), AppError> {
    match session_type {
        SESSION_TYPE_PUBLIC | SESSION_TYPE_PRIVATE => Ok(()),
        _ => Err(AppError::Validation("type must be 'public' or 'private'".into())),
    }
}
