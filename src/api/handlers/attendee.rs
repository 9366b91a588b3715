use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::JoinSessionRequest;
use crate::api::dtos::responses::{AttendeeCountResponse, AttendeeJoinedResponse, AttendeeSummary};
use crate::domain::models::attendee::{Attendee, DISPLAY_NAME_MAX_LEN};
use crate::error::AppError;
use crate::state::AppState;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Deserialize)]
pub struct AttendeeAuthQuery {
    pub manage: Option<String>,
    pub attendance: Option<String>,
}

pub async fn join_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Option<Json<JoinSessionRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let display_name = payload
        .and_then(|Json(body)| body.display_name)
        .map(|name| name.trim().chars().take(DISPLAY_NAME_MAX_LEN).collect::<String>())
        .filter(|name| !name.is_empty());

    let attendee = Attendee::new(id, display_name);
    let created = state.attendee_repo.join(&attendee).await?;
    info!("Attendee {} joined session {}", created.id, created.session_id);

    Ok((StatusCode::CREATED, Json(AttendeeJoinedResponse {
        attendee_id: created.id,
        attendance_code: created.attendance_code,
    })))
}

pub async fn list_attendees(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<AttendeeAuthQuery>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    if session.is_private() && query.manage.as_deref() != Some(session.management_code.as_str()) {
        return Err(AppError::Forbidden("Manage code required for private session attendees".into()));
    }

    let attendees = state.attendee_repo.list_by_session(&id).await?;
    let rows: Vec<AttendeeSummary> = attendees
        .into_iter()
        .map(|a| AttendeeSummary {
            id: a.id,
            display_name: a.display_name,
            created_at: a.created_at,
        })
        .collect();

    Ok(Json(rows))
}

pub async fn count_attendees(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    let count = state.attendee_repo.count_by_session(&id).await?;
    Ok(Json(AttendeeCountResponse { count, max: session.max_participants }))
}

pub async fn remove_attendee(
    State(state): State<Arc<AppState>>,
    Path((id, attendee_id)): Path<(String, String)>,
    Query(query): Query<AttendeeAuthQuery>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(attendance) = query.attendance {
        state.attendee_repo.delete_own(&id, &attendee_id, &attendance).await?;
        info!("Attendee {} left session {}", attendee_id, id);
        return Ok(StatusCode::NO_CONTENT);
    }

    if let Some(manage) = query.manage {
        let session = state.session_repo.find_by_id(&id).await?
            .ok_or(AppError::NotFound("Session not found".into()))?;
        if session.management_code != manage {
            return Err(AppError::Forbidden("Invalid manage code".into()));
        }
        state.attendee_repo.delete_by_owner(&id, &attendee_id).await?;
        info!("Attendee {} removed from session {} by owner", attendee_id, id);
        return Ok(StatusCode::NO_CONTENT);
    }

    Err(AppError::Validation("Provide attendance=CODE or manage=CODE".into()))
}
