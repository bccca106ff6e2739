//! Dispatch from UI actions to the backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::CreateUser { .. } => "create_user",
        BackendCommand::SelectForEdit { .. } => "select_for_edit",
        BackendCommand::ConfirmUpdate { .. } => "confirm_update",
        BackendCommand::CancelUpdate => "cancel_update",
        BackendCommand::RequestDelete { .. } => "request_delete",
        BackendCommand::ConfirmDelete => "confirm_delete",
        BackendCommand::CancelDelete => "cancel_delete",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "Command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Backend worker disconnected; restart the application".to_string();
        }
    }
}
