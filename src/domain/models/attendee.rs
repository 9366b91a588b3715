use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::services::tokens;

pub const ATTENDEE_ID_LEN: usize = 12;
pub const ATTENDANCE_CODE_LEN: usize = 12;
pub const DISPLAY_NAME_MAX_LEN: usize = 60;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Attendee {
    pub id: String,
    pub session_id: String,
    #[serde(skip_serializing)]
    pub attendance_code: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Attendee {
    pub fn new(session_id: String, display_name: Option<String>) -> Self {
        Self {
            id: tokens::generate(ATTENDEE_ID_LEN),
            session_id,
            attendance_code: tokens::generate(ATTENDANCE_CODE_LEN),
            display_name,
            created_at: Utc::now(),
        }
    }
}
