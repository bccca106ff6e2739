//! Client-side state synchronization for the remote user collection.
//!
//! [`UserListController`] owns the client-visible copy of the collection plus
//! the ephemeral drafts behind the create/update forms and the pending delete
//! selection. Every successful create or update re-fetches the authoritative
//! collection from the server rather than trusting the local edit long-term;
//! on failure, local state is left exactly as it was and the error is logged.
//!
//! The controller is driven from a single task (`&mut self` operations, one
//! command at a time). Nothing prevents a caller from issuing a second
//! mutation before the first resolves, but within one controller that simply
//! serializes on the borrow; there is no in-flight guard or de-duplication.

pub mod error;
pub mod rest;

use shared::{
    domain::UserId,
    protocol::{UserFields, UserRecord},
};
use tracing::{debug, warn};

pub use error::RemoteCallFailure;
pub use rest::UsersApi;

/// In-flight edit of an existing user. Client-only, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateDraft {
    pub id: UserId,
    pub fields: UserFields,
}

/// Point-in-time copy of controller state for rendering layers.
#[derive(Debug, Clone, Default)]
pub struct ControllerSnapshot {
    pub users: Vec<UserRecord>,
    pub create_draft: UserFields,
    pub update_draft: Option<UpdateDraft>,
    pub delete_selection: Option<UserRecord>,
}

/// Mediates create/update/delete intents against the remote collection and
/// keeps the local copy consistent with the server afterwards.
pub struct UserListController {
    api: UsersApi,
    users: Vec<UserRecord>,
    create_draft: UserFields,
    update_draft: Option<UpdateDraft>,
    delete_selection: Option<UserRecord>,
}

impl UserListController {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_api(UsersApi::new(server_url))
    }

    pub fn with_api(api: UsersApi) -> Self {
        Self {
            api,
            users: Vec::new(),
            create_draft: UserFields::default(),
            update_draft: None,
            delete_selection: None,
        }
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn create_draft(&self) -> &UserFields {
        &self.create_draft
    }

    pub fn set_create_draft(&mut self, fields: UserFields) {
        self.create_draft = fields;
    }

    pub fn update_draft(&self) -> Option<&UpdateDraft> {
        self.update_draft.as_ref()
    }

    /// Overwrites the fields of the current update draft, if any. The target
    /// id is fixed by [`select_for_edit`](Self::select_for_edit).
    pub fn set_update_fields(&mut self, fields: UserFields) {
        if let Some(draft) = self.update_draft.as_mut() {
            draft.fields = fields;
        }
    }

    pub fn delete_selection(&self) -> Option<&UserRecord> {
        self.delete_selection.as_ref()
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            users: self.users.clone(),
            create_draft: self.create_draft.clone(),
            update_draft: self.update_draft.clone(),
            delete_selection: self.delete_selection.clone(),
        }
    }

    /// Fetches the full collection and replaces local state wholesale.
    ///
    /// Called once at startup and after every successful create/update. On
    /// failure the cached state is kept unchanged; no partial update, no
    /// retry.
    pub async fn refresh(&mut self) {
        match self.api.list().await {
            Ok(users) => {
                debug!(count = users.len(), "refreshed user list");
                self.users = users;
            }
            Err(err) => {
                warn!(error = %err, "user list refresh failed; keeping cached state");
            }
        }
    }

    /// Sends the create draft as-is. On success the returned record is
    /// appended, the draft cleared, and the collection re-fetched. On failure
    /// the draft stays populated so the user can re-submit.
    pub async fn create(&mut self) {
        match self.api.create(&self.create_draft).await {
            Ok(record) => {
                debug!(user_id = record.id.0, "user created");
                // The append is provisional; the refetch below is authoritative.
                self.users.push(record);
                self.create_draft = UserFields::default();
                self.refresh().await;
            }
            Err(err) => {
                warn!(error = %err, "user create failed; draft kept for retry");
            }
        }
    }

    /// Copies a record's fields into the update draft. No network traffic;
    /// the actual PUT happens in [`confirm_update`](Self::confirm_update).
    pub fn select_for_edit(&mut self, record: &UserRecord) {
        self.update_draft = Some(UpdateDraft {
            id: record.id,
            fields: UserFields {
                name: record.name.clone(),
                email: record.email.clone(),
            },
        });
    }

    /// Sends the update draft for its selected id. On success the matching
    /// record is replaced, the draft cleared (closing any confirmation
    /// affordance), and the collection re-fetched.
    pub async fn confirm_update(&mut self) {
        let Some(draft) = self.update_draft.clone() else {
            debug!("confirm_update without an update draft; ignoring");
            return;
        };

        match self.api.update(draft.id, &draft.fields).await {
            Ok(updated) => {
                debug!(user_id = updated.id.0, "user updated");
                if let Some(user) = self.users.iter_mut().find(|user| user.id == updated.id) {
                    *user = updated;
                }
                self.update_draft = None;
                self.refresh().await;
            }
            Err(err) => {
                warn!(user_id = draft.id.0, error = %err, "user update failed; draft kept for retry");
            }
        }
    }

    pub fn cancel_update(&mut self) {
        self.update_draft = None;
    }

    /// Marks a record for deletion while the confirmation dialog is open.
    pub fn request_delete(&mut self, record: &UserRecord) {
        self.delete_selection = Some(record.clone());
    }

    /// Deletes the pending selection. On success the matching record is
    /// removed locally and the selection cleared; on failure both are left
    /// untouched, so the confirmation stays exactly where it was.
    pub async fn confirm_delete(&mut self) {
        let Some(selected) = self.delete_selection.clone() else {
            debug!("confirm_delete without a pending selection; ignoring");
            return;
        };

        match self.api.delete(selected.id).await {
            Ok(()) => {
                debug!(user_id = selected.id.0, "user deleted");
                self.users.retain(|user| user.id != selected.id);
                self.delete_selection = None;
            }
            Err(err) => {
                warn!(user_id = selected.id.0, error = %err, "user delete failed; selection kept");
            }
        }
    }

    pub fn cancel_delete(&mut self) {
        self.delete_selection = None;
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
