//! Thin HTTP layer over the remote user collection.

use reqwest::Client;
use shared::{
    domain::UserId,
    protocol::{ListUsersResponse, UserFields, UserRecord},
};

use crate::error::RemoteCallFailure;

/// The four calls backing the user list, all rooted at
/// `{server_url}/api/users`. No timeouts are configured beyond the
/// transport's own behavior, and requests are never cancelled once sent.
pub struct UsersApi {
    http: Client,
    server_url: String,
}

impl UsersApi {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            server_url: server_url.into(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/users", self.server_url.trim_end_matches('/'))
    }

    pub async fn list(&self) -> Result<Vec<UserRecord>, RemoteCallFailure> {
        let body: ListUsersResponse = self
            .http
            .get(self.collection_url())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.data)
    }

    pub async fn create(&self, fields: &UserFields) -> Result<UserRecord, RemoteCallFailure> {
        let created = self
            .http
            .post(self.collection_url())
            .json(fields)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(created)
    }

    pub async fn update(
        &self,
        id: UserId,
        fields: &UserFields,
    ) -> Result<UserRecord, RemoteCallFailure> {
        let updated = self
            .http
            .put(format!("{}/{}", self.collection_url(), id.0))
            .json(fields)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: UserId) -> Result<(), RemoteCallFailure> {
        // Response body is unspecified; only the status class matters.
        self.http
            .delete(format!("{}/{}", self.collection_url(), id.0))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
