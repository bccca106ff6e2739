//! Worker thread owning the controller: drains UI commands, emits snapshots.

use std::thread;

use client_core::UserListController;
use crossbeam_channel::{Receiver, Sender};
use tracing::error;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                error!(error = %err, "failed to build backend runtime");
                let _ = ui_tx.send(UiEvent::BackendUnavailable(err.to_string()));
                return;
            }
        };

        runtime.block_on(async move {
            let mut controller = UserListController::new(server_url);
            // Initial fetch, the GUI equivalent of fetch-on-mount.
            controller.refresh().await;
            if ui_tx
                .send(UiEvent::StateChanged(controller.snapshot()))
                .is_err()
            {
                return;
            }

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::CreateUser { fields } => {
                        controller.set_create_draft(fields);
                        controller.create().await;
                    }
                    BackendCommand::SelectForEdit { record } => controller.select_for_edit(&record),
                    BackendCommand::ConfirmUpdate { fields } => {
                        controller.set_update_fields(fields);
                        controller.confirm_update().await;
                    }
                    BackendCommand::CancelUpdate => controller.cancel_update(),
                    BackendCommand::RequestDelete { record } => controller.request_delete(&record),
                    BackendCommand::ConfirmDelete => controller.confirm_delete().await,
                    BackendCommand::CancelDelete => controller.cancel_delete(),
                }

                if ui_tx
                    .send(UiEvent::StateChanged(controller.snapshot()))
                    .is_err()
                {
                    break;
                }
            }
        });
    });
}
