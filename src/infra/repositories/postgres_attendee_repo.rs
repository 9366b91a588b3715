use crate::domain::{models::attendee::Attendee, ports::AttendeeRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};

pub struct PostgresAttendeeRepo {
    pool: PgPool,
}

impl PostgresAttendeeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendeeRepository for PostgresAttendeeRepo {
    async fn join(&self, attendee: &Attendee) -> Result<Attendee, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Row lock on the session. Concurrent joins for the same session
        // serialize here and hold the lock across the count and the insert;
        // joins for other sessions are unaffected. Early returns drop the
        // transaction, which rolls it back.
        let max: Option<i32> = sqlx::query_scalar(
            "SELECT max_participants FROM sessions WHERE id = $1 FOR UPDATE"
        )
            .bind(&attendee.session_id)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?;

        let Some(max) = max else {
            return Err(AppError::NotFound("Session not found".into()));
        };

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendees WHERE session_id = $1")
            .bind(&attendee.session_id)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        if count >= max as i64 {
            return Err(AppError::Conflict("Session is full".into()));
        }

        let created = sqlx::query_as::<_, Attendee>(
            "INSERT INTO attendees (id, session_id, attendance_code, display_name, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *"
        )
            .bind(&attendee.id).bind(&attendee.session_id).bind(&attendee.attendance_code)
            .bind(&attendee.display_name).bind(attendee.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn list_by_session(&self, session_id: &str) -> Result<Vec<Attendee>, AppError> {
        sqlx::query_as::<_, Attendee>("SELECT * FROM attendees WHERE session_id = $1 ORDER BY created_at ASC")
            .bind(session_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn count_by_session(&self, session_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM attendees WHERE session_id = $1")
            .bind(session_id).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn delete_own(&self, session_id: &str, attendee_id: &str, attendance_code: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM attendees WHERE id = $1 AND session_id = $2 AND attendance_code = $3")
            .bind(attendee_id).bind(session_id).bind(attendance_code)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Not found or code mismatch".into()));
        }
        Ok(())
    }

    async fn delete_by_owner(&self, session_id: &str, attendee_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM attendees WHERE id = $1 AND session_id = $2")
            .bind(attendee_id).bind(session_id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Attendee not found".into()));
        }
        Ok(())
    }
}
