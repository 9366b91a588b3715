use crate::domain::models::{attendee::Attendee, session::Session};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<Session, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Session>, AppError>;
    async fn find_by_private_url_code(&self, code: &str) -> Result<Option<Session>, AppError>;
    async fn list_public(&self) -> Result<Vec<Session>, AppError>;
    async fn update(&self, session: &Session) -> Result<Session, AppError>;
    /// Removes the session and its attendees in one transaction.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait AttendeeRepository: Send + Sync {
    /// Capacity-guarded insert. The count of committed attendee rows for the
    /// target session never exceeds its `max_participants`, no matter how
    /// many joins race. NotFound if the session does not exist, Conflict if
    /// it is full; either way nothing is persisted.
    async fn join(&self, attendee: &Attendee) -> Result<Attendee, AppError>;
    /// Join order, oldest first.
    async fn list_by_session(&self, session_id: &str) -> Result<Vec<Attendee>, AppError>;
    async fn count_by_session(&self, session_id: &str) -> Result<i64, AppError>;
    /// Self-leave: deletes only when the attendance code matches. A miss is
    /// NotFound without revealing which predicate failed.
    async fn delete_own(&self, session_id: &str, attendee_id: &str, attendance_code: &str) -> Result<(), AppError>;
    /// Owner kick; the management code has already been checked by the caller.
    async fn delete_by_owner(&self, session_id: &str, attendee_id: &str) -> Result<(), AppError>;
}
