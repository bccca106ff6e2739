use serde::{Deserialize, Serialize};

use crate::domain::UserId;

/// Server-owned user entity. The client only ever holds a cached copy; the
/// id is assigned by the server and stable for the record's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// The `{ name, email }` body sent verbatim by both create and update.
/// No client-side validation; empty strings go over the wire as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFields {
    pub name: String,
    pub email: String,
}

/// Envelope returned by `GET /api/users`; `data` is the full authoritative
/// collection and replaces local state wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub data: Vec<UserRecord>,
}
