//! Mock user session for layout and private-page development.

use serde::Serialize;
use time::macros::datetime;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMetadata {
    #[serde(with = "time::serde::rfc3339::option")]
    pub login_time: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockUserSession {
    pub id: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub initial: Option<String>,
    pub is_authenticated: bool,
    pub session_metadata: Option<SessionMetadata>,
}

/// The stock signed-in user.
pub fn mock_user_session() -> MockUserSession {
    MockUserSession {
        id: "mock-user-001".to_string(),
        username: Some("johndoe".to_string()),
        email: Some("john.doe@example.com".to_string()),
        avatar: None,
        initial: Some("JD".to_string()),
        is_authenticated: true,
        session_metadata: Some(SessionMetadata {
            login_time: Some(datetime!(2026-01-10 10:00:00 UTC)),
            expires_at: None,
            role: Some("user".to_string()),
        }),
    }
}
