use chrono::{DateTime, Utc};
use fake::Dummy;

/// Defines the authenticated user data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct UserHandle {
    pub local_id: String,
    pub email: String,
}

/// Defines one exercise performed within a session. Weight, sets, and reps
/// are recorded as entered, without numeric interpretation.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Eq)]
pub struct Exercise {
    pub name: String,
    pub weight: String,
    pub sets: String,
    pub reps: String,
}

/// Defines one recorded workout session.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct Session {
    pub category: String,
    pub date: DateTime<Utc>,
    pub exercises: Vec<Exercise>,
}

/// Defines a session as persisted by the document store, together with the
/// opaque document identifier the store assigned to it.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct StoredSession {
    pub id: String,
    pub session: Session,
}
