use chrono::{DateTime, Utc};
use serde::Serialize;

/// Creation is the only response that ever carries the session secrets.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreatedResponse {
    pub id: String,
    pub management_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_url_code: Option<String>,
    pub manage_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeJoinedResponse {
    pub attendee_id: String,
    pub attendance_code: String,
}

#[derive(Serialize)]
pub struct AttendeeSummary {
    pub id: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct AttendeeCountResponse {
    pub count: i64,
    pub max: i32,
}
