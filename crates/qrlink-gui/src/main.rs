mod app;
mod convert;
mod messages;
mod panels;
mod states;
mod workers;

use qrlink_core::config::AppConfig;
use tracing::warn;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = AppConfig::resolve(None).unwrap_or_else(|e| {
        warn!("using default settings: {e}");
        AppConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 720.0])
            .with_min_inner_size([360.0, 520.0])
            .with_title("QR Link"),
        ..Default::default()
    };

    eframe::run_native(
        "QrLink",
        options,
        Box::new(|cc| Ok(Box::new(app::QrLinkApp::new(&cc.egui_ctx, config)))),
    )
}
