use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Required fields arrive as `Option` so a missing field surfaces as a 400
/// from the handler's own validation instead of a deserializer rejection.
#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub hobby: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date_time: Option<DateTime<Utc>>,
    pub max_participants: Option<i32>,
    #[serde(rename = "type")]
    pub session_type: Option<String>,
    pub location_text: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Partial update. Nullable columns use a double `Option` so an explicit
/// JSON `null` clears the column while an absent field leaves it untouched.
#[derive(Deserialize)]
pub struct UpdateSessionRequest {
    pub hobby: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub date_time: Option<DateTime<Utc>>,
    pub max_participants: Option<i32>,
    #[serde(rename = "type")]
    pub session_type: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub location_text: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub lat: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub lng: Option<Option<f64>>,
}

impl UpdateSessionRequest {
    pub fn has_updates(&self) -> bool {
        self.hobby.is_some()
            || self.title.is_some()
            || self.description.is_some()
            || self.date_time.is_some()
            || self.max_participants.is_some()
            || self.session_type.is_some()
            || self.location_text.is_some()
            || self.lat.is_some()
            || self.lng.is_some()
    }
}

#[derive(Deserialize)]
pub struct JoinSessionRequest {
    pub display_name: Option<String>,
}

fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}
