mod backend_bridge;
mod config;
mod controller;
mod ui;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Desktop front end for the user directory service")]
struct Args {
    /// Base URL of the server hosting /api/users; overrides config and env.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut settings = config::load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    tracing::info!(server_url = %settings.server_url, "starting user directory gui");

    let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(64);
    let (ui_tx, ui_rx) = crossbeam_channel::unbounded();
    backend_bridge::runtime::launch(settings.server_url.clone(), cmd_rx, ui_tx);

    let app = ui::UserDirectoryApp::new(cmd_tx, ui_rx);
    eframe::run_native(
        "User Directory",
        eframe::NativeOptions::default(),
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
