use crate::domain::{models::attendee::Attendee, ports::AttendeeRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

pub struct SqliteAttendeeRepo {
    pool: SqlitePool,
}

impl SqliteAttendeeRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendeeRepository for SqliteAttendeeRepo {
    async fn join(&self, attendee: &Attendee) -> Result<Attendee, AppError> {
        // SQLite has no FOR UPDATE. The occupancy check and the insert are
        // collapsed into one guarded statement; statements are atomic and
        // writers serialize, so two racing joins can never both observe a
        // free slot.
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let inserted = sqlx::query_as::<_, Attendee>(
            "INSERT INTO attendees (id, session_id, attendance_code, display_name, created_at)
             SELECT ?, ?, ?, ?, ?
             WHERE (SELECT COUNT(*) FROM attendees WHERE session_id = ?)
                 < (SELECT max_participants FROM sessions WHERE id = ?)
             RETURNING *"
        )
            .bind(&attendee.id).bind(&attendee.session_id).bind(&attendee.attendance_code)
            .bind(&attendee.display_name).bind(attendee.created_at)
            .bind(&attendee.session_id).bind(&attendee.session_id)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?;

        match inserted {
            Some(created) => {
                tx.commit().await.map_err(AppError::Database)?;
                Ok(created)
            }
            None => {
                // Disambiguate: a vanished session and a full one both leave
                // the guard unsatisfied.
                let exists = sqlx::query("SELECT id FROM sessions WHERE id = ?")
                    .bind(&attendee.session_id)
                    .fetch_optional(&mut *tx).await.map_err(AppError::Database)?;
                if exists.is_some() {
                    Err(AppError::Conflict("Session is full".into()))
                } else {
                    Err(AppError::NotFound("Session not found".into()))
                }
            }
        }
    }

    async fn list_by_session(&self, session_id: &str) -> Result<Vec<Attendee>, AppError> {
        sqlx::query_as::<_, Attendee>("SELECT * FROM attendees WHERE session_id = ? ORDER BY created_at ASC")
            .bind(session_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn count_by_session(&self, session_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM attendees WHERE session_id = ?")
            .bind(session_id).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn delete_own(&self, session_id: &str, attendee_id: &str, attendance_code: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM attendees WHERE id = ? AND session_id = ? AND attendance_code = ?")
            .bind(attendee_id).bind(session_id).bind(attendance_code)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Not found or code mismatch".into()));
        }
        Ok(())
    }

    async fn delete_by_owner(&self, session_id: &str, attendee_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM attendees WHERE id = ? AND session_id = ?")
            .bind(attendee_id).bind(session_id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Attendee not found".into()));
        }
        Ok(())
    }
}
