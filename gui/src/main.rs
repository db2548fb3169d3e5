// GUI main entry point using Dioxus
use std::sync::Arc;

use anyhow::Context;
use dioxus::prelude::*;
use dioxus_desktop::{Config as DesktopConfig, LogicalSize, WindowBuilder};

use client::HttpBackend;
use gui::app::App;
use gui::config::AppConfig;
use gui::services::AppController;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("Starting Stock Trading Simulator dashboard...");

    let app_config = AppConfig::load().context("failed to load configuration")?;
    tracing::info!(
        version = %app_config.version,
        backend = %app_config.backend.base_url,
        "Configuration loaded"
    );

    let backend = HttpBackend::new(app_config.backend.clone())
        .context("failed to initialise the simulator backend client")?;
    let controller = AppController::new(Arc::new(backend)).on_trade_created(|record| {
        tracing::info!(trade = %record.summary(), "Trade recorded");
    });

    let desktop_config = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Stock Trading Simulator")
            .with_inner_size(LogicalSize::new(1280.0, 900.0)),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_config)
        .with_context(app_config)
        .with_context(controller)
        .launch(App);

    tracing::info!("Dashboard closed.");
    Ok(())
}
