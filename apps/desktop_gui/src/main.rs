mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;

use backend_bridge::commands::BackendCommand;
use backend_bridge::runtime;
use controller::events::UiEvent;
use ui::app::{PersistedSettings, SearchGuiApp, SETTINGS_STORAGE_KEY};

#[derive(Parser, Debug)]
struct Args {
    /// Search endpoint base URL; overrides the persisted setting.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    runtime::launch(cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Folio Search")
            .with_inner_size([760.0, 560.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Folio Search",
        options,
        Box::new(move |cc| {
            let mut settings = cc
                .storage
                .and_then(|storage| {
                    storage
                        .get_string(SETTINGS_STORAGE_KEY)
                        .and_then(|text| serde_json::from_str::<PersistedSettings>(&text).ok())
                })
                .unwrap_or_default();
            if let Some(server_url) = args.server_url.clone() {
                settings.server_url = server_url;
            }
            Ok(Box::new(SearchGuiApp::new(cmd_tx, ui_rx, settings)))
        }),
    )
}
