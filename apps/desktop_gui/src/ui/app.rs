//! Single-window shell: create form, user list, update panel, and the two
//! confirmation dialogs. All state shown here comes from controller
//! snapshots; the UI never mutates the collection directly.

use client_core::ControllerSnapshot;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{domain::UserId, protocol::UserFields};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

pub struct UserDirectoryApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    snapshot: ControllerSnapshot,
    create_name: String,
    create_email: String,
    update_name: String,
    update_email: String,
    /// Id of the update draft the edit boxes were last loaded from. Keeps a
    /// new Edit click from being clobbered by stale snapshots and vice versa.
    loaded_update_id: Option<UserId>,
    update_dialog_open: bool,
    /// Set while a submitted create is waiting for its snapshot, so the form
    /// can be synced exactly once: cleared on success, kept on failure.
    awaiting_create: bool,
    status: String,
}

impl UserDirectoryApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            snapshot: ControllerSnapshot::default(),
            create_name: String::new(),
            create_email: String::new(),
            update_name: String::new(),
            update_email: String::new(),
            loaded_update_id: None,
            update_dialog_open: false,
            awaiting_create: false,
            status: String::new(),
        }
    }

    fn drain_backend_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::StateChanged(snapshot) => self.apply_snapshot(snapshot),
                UiEvent::BackendUnavailable(message) => {
                    self.status = format!("Backend unavailable: {message}");
                }
            }
        }
    }

    fn apply_snapshot(&mut self, snapshot: ControllerSnapshot) {
        if self.awaiting_create {
            self.create_name = snapshot.create_draft.name.clone();
            self.create_email = snapshot.create_draft.email.clone();
            self.awaiting_create = false;
        }

        match &snapshot.update_draft {
            Some(draft) => {
                if self.loaded_update_id != Some(draft.id) {
                    self.update_name = draft.fields.name.clone();
                    self.update_email = draft.fields.email.clone();
                    self.loaded_update_id = Some(draft.id);
                }
            }
            None => {
                self.loaded_update_id = None;
                self.update_dialog_open = false;
                self.update_name.clear();
                self.update_email.clear();
            }
        }

        self.snapshot = snapshot;
    }

    fn update_fields(&self) -> UserFields {
        UserFields {
            name: self.update_name.clone(),
            email: self.update_email.clone(),
        }
    }
}

impl eframe::App for UserDirectoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_backend_events();
        // Snapshots arrive without user interaction; poll for them.
        ctx.request_repaint_after(std::time::Duration::from_millis(250));

        let mut pending: Vec<BackendCommand> = Vec::new();
        let users = self.snapshot.users.clone();
        let editing = self.snapshot.update_draft.is_some();
        let delete_selection = self.snapshot.delete_selection.clone();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("User Directory");
            });
            if !self.status.is_empty() {
                ui.label(egui::RichText::new(&self.status).weak());
            }
            ui.add_space(8.0);

            ui.group(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.create_name)
                        .hint_text("Enter new user name")
                        .desired_width(f32::INFINITY),
                );
                ui.add(
                    egui::TextEdit::singleline(&mut self.create_email)
                        .hint_text("Enter new user email")
                        .desired_width(f32::INFINITY),
                );
                if ui.button("Add User").clicked() {
                    self.awaiting_create = true;
                    pending.push(BackendCommand::CreateUser {
                        fields: UserFields {
                            name: self.create_name.clone(),
                            email: self.create_email.clone(),
                        },
                    });
                }
            });

            if editing {
                ui.add_space(8.0);
                ui.group(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.update_name)
                            .hint_text("Update user name")
                            .desired_width(f32::INFINITY),
                    );
                    ui.add(
                        egui::TextEdit::singleline(&mut self.update_email)
                            .hint_text("Update user email")
                            .desired_width(f32::INFINITY),
                    );
                    if ui.button("Update User").clicked() {
                        self.update_dialog_open = true;
                    }
                });
            }

            ui.add_space(8.0);
            ui.heading("User List");
            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink(false)
                .show(ui, |ui| {
                    for user in &users {
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.label(egui::RichText::new(&user.name).strong());
                                ui.label(egui::RichText::new(&user.email).weak());
                            });
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.button("Delete").clicked() {
                                        pending.push(BackendCommand::RequestDelete {
                                            record: user.clone(),
                                        });
                                    }
                                    if ui.button("Edit").clicked() {
                                        pending.push(BackendCommand::SelectForEdit {
                                            record: user.clone(),
                                        });
                                    }
                                },
                            );
                        });
                        ui.separator();
                    }
                });
        });

        if let Some(selected) = &delete_selection {
            egui::Window::new("Confirm Delete")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(format!("Are you sure you want to delete {}?", selected.name));
                    ui.horizontal(|ui| {
                        if ui.button("Cancel").clicked() {
                            pending.push(BackendCommand::CancelDelete);
                        }
                        if ui.button("Delete").clicked() {
                            pending.push(BackendCommand::ConfirmDelete);
                        }
                    });
                });
        }

        if self.update_dialog_open && editing {
            egui::Window::new("Confirm Update")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(format!(
                        "Are you sure you want to update the user to name: {} and email: {}?",
                        self.update_name, self.update_email
                    ));
                    ui.horizontal(|ui| {
                        if ui.button("Cancel").clicked() {
                            self.update_dialog_open = false;
                            pending.push(BackendCommand::CancelUpdate);
                        }
                        if ui.button("Update").clicked() {
                            // The dialog closes via the snapshot once the
                            // draft clears; on failure it stays open.
                            pending.push(BackendCommand::ConfirmUpdate {
                                fields: self.update_fields(),
                            });
                        }
                    });
                });
        }

        for cmd in pending {
            dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
        }
    }
}
