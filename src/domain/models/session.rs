use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::services::tokens;

pub const SESSION_ID_LEN: usize = 10;
pub const MANAGEMENT_CODE_LEN: usize = 12;
pub const PRIVATE_URL_CODE_LEN: usize = 12;

pub const SESSION_TYPE_PUBLIC: &str = "public";
pub const SESSION_TYPE_PRIVATE: &str = "private";

/// The two code columns are secrets. They never leave the server in a read
/// response, only in the one-time creation payload.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Session {
    pub id: String,
    pub hobby: String,
    pub title: String,
    pub description: Option<String>,
    pub date_time: DateTime<Utc>,
    pub max_participants: i32,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub session_type: String,
    pub location_text: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    #[serde(skip_serializing)]
    pub management_code: String,
    #[serde(skip_serializing)]
    pub private_url_code: Option<String>,
}

pub struct NewSessionParams {
    pub hobby: String,
    pub title: String,
    pub description: Option<String>,
    pub date_time: DateTime<Utc>,
    pub max_participants: i32,
    pub session_type: String,
    pub location_text: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl Session {
    pub fn new(params: NewSessionParams) -> Self {
        let private_url_code = (params.session_type == SESSION_TYPE_PRIVATE)
            .then(|| tokens::generate(PRIVATE_URL_CODE_LEN));

        Self {
            id: tokens::generate(SESSION_ID_LEN),
            hobby: params.hobby,
            title: params.title,
            description: params.description,
            date_time: params.date_time,
            max_participants: params.max_participants,
            session_type: params.session_type,
            location_text: params.location_text,
            lat: params.lat,
            lng: params.lng,
            management_code: tokens::generate(MANAGEMENT_CODE_LEN),
            private_url_code,
        }
    }

    pub fn is_private(&self) -> bool {
        self.session_type == SESSION_TYPE_PRIVATE
    }

    /// Relative management link handed to the creator; the only place the
    /// management code survives outside the creation response.
    pub fn manage_url(&self) -> String {
        format!("/session/{}/manage?code={}", self.id, self.management_code)
    }
}
