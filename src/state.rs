use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{AttendeeRepository, SessionRepository};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub session_repo: Arc<dyn SessionRepository>,
    pub attendee_repo: Arc<dyn AttendeeRepository>,
}
