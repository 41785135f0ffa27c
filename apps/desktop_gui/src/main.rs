use std::time::Duration;

use anyhow::Context;
use backend_client::BackendConfig;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use navigation::{MemoryRouter, NavigationConfig, NavigationController, SectionSequence};
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::PortfolioApp;

/// Full-page portfolio viewer: wheel or paging keys move one section at a time.
#[derive(Parser, Debug)]
struct Args {
    /// Backend project URL; content panels stay empty without one.
    #[arg(long, env = "BACKEND_URL")]
    backend_url: Option<String>,
    #[arg(long, env = "BACKEND_ANON_KEY", default_value = "")]
    anon_key: String,
    #[arg(long, env = "APP__SCROLL_COOLDOWN_MS", default_value_t = 1000)]
    cooldown_ms: u64,
    #[arg(long, default_value = "/")]
    start_path: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    // Drives the navigation cooldown timers while the UI thread runs egui.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_time()
        .build()
        .context("failed to build navigation runtime")?;
    let _guard = runtime.enter();

    let backend = args
        .backend_url
        .map(|url| BackendConfig::new(url, args.anon_key));
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(backend, cmd_rx, ui_tx);

    let nav = NavigationController::attach(
        MemoryRouter::new(args.start_path),
        NavigationConfig {
            sequence: SectionSequence::portfolio(),
            cooldown: Duration::from_millis(args.cooldown_ms),
        },
    )?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Portfolio")
            .with_inner_size([1024.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Portfolio",
        options,
        Box::new(move |_cc| Ok(Box::new(PortfolioApp::new(nav, cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow::anyhow!("viewer exited with error: {err}"))
}
