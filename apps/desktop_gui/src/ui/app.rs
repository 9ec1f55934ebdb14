//! The search widget itself plus the backend worker bridge.

use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};

use client_core::{
    project, reduce, RenderPayload, SearchClient, SearchCommand, SearchEvent, SearchState,
};
use shared::error::QueryError;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

pub const SETTINGS_STORAGE_KEY: &str = "search_gui_settings";

const INPUT_HINT: &str = "What art thee looking f'r?";
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3001";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedSettings {
    pub server_url: String,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

pub struct SearchGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    server_url: String,
    state: SearchState,
    status: String,
}

impl SearchGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: PersistedSettings,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            server_url: settings.server_url,
            state: SearchState::new(),
            status: "Backend worker starting...".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::BackendFailed(message) => self.status = message,
                UiEvent::Search(event) => self.apply(event),
            }
        }
    }

    /// Routes every widget event through the reducer and hands any requested
    /// side effect to the backend queue.
    fn apply(&mut self, event: SearchEvent) {
        let (next, command) = reduce(&self.state, event);
        self.state = next;
        if let Some(SearchCommand::Dispatch { request, query }) = command {
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::Search {
                    request,
                    query,
                    server_url: self.server_url.trim_end_matches('/').to_string(),
                },
                &mut self.status,
            );
        }
    }

    fn submit(&mut self) {
        self.apply(SearchEvent::SubmitRequested);
    }

    fn show_results_area(&self, ui: &mut egui::Ui, payload: &RenderPayload) {
        match payload {
            RenderPayload::Entries(entries) => {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for entry in entries {
                            ui.label(entry.formatted());
                            ui.add_space(4.0);
                        }
                    });
            }
            RenderPayload::Notice(notice) => {
                ui.label(*notice);
            }
            // Placeholders are drawn by the caller; nothing to list here.
            RenderPayload::Placeholder { .. } | RenderPayload::ValidationNotice(_) => {}
        }
    }
}

impl eframe::App for SearchGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let payload = project(&self.state);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.style_mut().spacing.item_spacing = egui::vec2(8.0, 8.0);

            ui.horizontal(|ui| {
                if ui.button("Search").clicked() {
                    self.submit();
                }

                let mut input_buf = self.state.input.clone();
                let response = ui.add_sized(
                    egui::vec2(ui.available_width() - 180.0, 24.0),
                    egui::TextEdit::singleline(&mut input_buf).hint_text(INPUT_HINT),
                );
                if response.changed() {
                    self.apply(SearchEvent::InputChanged(input_buf));
                }
                let enter_pressed = ctx.input(|i| i.key_pressed(egui::Key::Enter));
                if response.lost_focus() && enter_pressed {
                    self.submit();
                }

                let mut server_url_buf = self.server_url.clone();
                ui.add_sized(
                    egui::vec2(170.0, 24.0),
                    egui::TextEdit::singleline(&mut server_url_buf).hint_text("Server URL"),
                );
                self.server_url = server_url_buf;
            });

            if let RenderPayload::ValidationNotice(notice) = &payload {
                ui.colored_label(egui::Color32::from_rgb(220, 53, 69), *notice);
            }

            ui.separator();

            match &payload {
                RenderPayload::Entries(_) | RenderPayload::Notice(_) => {
                    self.show_results_area(ui, &payload);
                }
                RenderPayload::Placeholder { searching: true } => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(48.0);
                        ui.spinner();
                        ui.weak("Searching...");
                    });
                }
                // Validation clears prior results; the slot stays decorative.
                RenderPayload::Placeholder { searching: false }
                | RenderPayload::ValidationNotice(_) => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(48.0);
                        ui.label(egui::RichText::new("🔍").size(48.0));
                        ui.weak("Results will appear here.");
                    });
                }
            }

            ui.separator();
            ui.horizontal_wrapped(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
            });
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedSettings {
            server_url: self.server_url.clone(),
        };
        if let Ok(serialized) = serde_json::to_string(&settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}

pub fn start_backend_bridge(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Ready to search".to_string()));

            // One client per server URL; rebuilt only when the URL changes.
            let mut cached: Option<(String, Arc<SearchClient>)> = None;
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Search {
                        request,
                        query,
                        server_url,
                    } => {
                        let client = match &cached {
                            Some((cached_url, client)) if *cached_url == server_url => {
                                client.clone()
                            }
                            _ => match SearchClient::new(&server_url) {
                                Ok(client) => {
                                    let client = Arc::new(client);
                                    cached = Some((server_url.clone(), client.clone()));
                                    client
                                }
                                Err(err) => {
                                    tracing::error!(
                                        request = request.0,
                                        "failed to build search client: {err:#}"
                                    );
                                    let _ = ui_tx.try_send(UiEvent::Search(
                                        SearchEvent::QuerySettled {
                                            request,
                                            outcome: Err(QueryError::Transport(format!(
                                                "invalid server url: {err:#}"
                                            ))),
                                        },
                                    ));
                                    continue;
                                }
                            },
                        };

                        // Each submit runs as an independent task; settles
                        // arrive in completion order and the last one wins.
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let settled = client_core::execute(
                                client.as_ref(),
                                SearchCommand::Dispatch { request, query },
                            )
                            .await;
                            let _ = ui_tx.try_send(UiEvent::Search(settled));
                        });
                    }
                }
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::SearchPhase;
    use crossbeam_channel::bounded;
    use shared::domain::RequestId;

    fn app_with_channels() -> (SearchGuiApp, Receiver<BackendCommand>) {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(8);
        let (_ui_tx, ui_rx) = bounded::<UiEvent>(8);
        let app = SearchGuiApp::new(cmd_tx, ui_rx, PersistedSettings::default());
        (app, cmd_rx)
    }

    #[test]
    fn submit_queues_one_search_command_with_the_live_input() {
        let (mut app, cmd_rx) = app_with_channels();
        app.apply(SearchEvent::InputChanged("the lady doth".to_string()));
        app.submit();

        match cmd_rx.try_recv().expect("command queued") {
            BackendCommand::Search {
                request,
                query,
                server_url,
            } => {
                assert_eq!(request, RequestId(1));
                assert_eq!(query, "the lady doth");
                assert_eq!(server_url, DEFAULT_SERVER_URL);
            }
        }
        assert!(cmd_rx.try_recv().is_err(), "exactly one command per submit");
    }

    #[test]
    fn empty_submit_queues_nothing_and_flags_validation() {
        let (mut app, cmd_rx) = app_with_channels();
        app.submit();

        assert!(cmd_rx.try_recv().is_err());
        assert_eq!(app.state.phase, SearchPhase::ValidationFailed);
    }

    #[test]
    fn settled_ui_events_overwrite_the_results_phase() {
        let (mut app, _cmd_rx) = app_with_channels();
        app.apply(SearchEvent::InputChanged("hamlet".to_string()));
        app.submit();

        app.apply(SearchEvent::QuerySettled {
            request: RequestId(1),
            outcome: Ok(vec!["hit".to_string()]),
        });
        assert_eq!(app.state.phase, SearchPhase::Success(vec!["hit".to_string()]));
    }

    #[test]
    fn persisted_settings_roundtrip_through_json() {
        let settings = PersistedSettings {
            server_url: "http://example.test:3001".to_string(),
        };
        let text = serde_json::to_string(&settings).expect("serialize");
        let restored: PersistedSettings = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(restored.server_url, settings.server_url);
    }
}
