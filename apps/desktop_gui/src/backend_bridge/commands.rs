//! Commands queued from the UI thread to the backend worker.

use shared::protocol::{UserFields, UserRecord};

pub enum BackendCommand {
    CreateUser { fields: UserFields },
    SelectForEdit { record: UserRecord },
    ConfirmUpdate { fields: UserFields },
    CancelUpdate,
    RequestDelete { record: UserRecord },
    ConfirmDelete,
    CancelDelete,
}
