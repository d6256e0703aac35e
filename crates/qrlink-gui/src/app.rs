use std::sync::mpsc;
use std::time::Instant;

use qrlink_core::config::AppConfig;
use qrlink_core::scan::SessionOptions;
use tracing::error;

use crate::messages::{ScanSource, WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{PreviewState, Route, UIState};
use crate::workers;

pub struct QrLinkApp {
    pub cmd_tx: Option<mpsc::Sender<WorkerCommand>>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub ui_state: UIState,
    pub preview: PreviewState,
    pub config: AppConfig,
    pub show_about: bool,
}

impl QrLinkApp {
    pub fn new(ctx: &egui::Context, config: AppConfig) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let mut ui_state = UIState::default();
        let cmd_tx = match workers::spawn_worker(result_tx.clone(), ctx.clone()) {
            Ok(tx) => Some(tx),
            Err(e) => {
                error!("failed to spawn worker thread: {e}");
                ui_state.toast(format!("Worker unavailable: {e}"));
                None
            }
        };

        Self {
            cmd_tx,
            result_tx,
            result_rx,
            ui_state,
            preview: PreviewState::default(),
            config,
            show_about: false,
        }
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::Generated { image, modules } => {
                    let texture = ctx.load_texture("generated", image, egui::TextureOptions::NEAREST);
                    self.preview.generated = Some(texture);
                    self.ui_state.on_generated();
                    self.ui_state.add_log(format!("QR code ready ({modules} modules)"));
                }
                WorkerResult::ImageSaved { path } => {
                    self.ui_state.busy = false;
                    self.ui_state.toast(format!("Image saved to {}", path.display()));
                }
                WorkerResult::Decoded { text } => {
                    // Stop the capture loop before leaving the main screen.
                    self.preview.cancel_scan();
                    self.show_result(text);
                }
                WorkerResult::ScanDetected { session, text } => {
                    if self.preview.scan_finished(session) {
                        self.show_result(text);
                    } else {
                        self.ui_state
                            .add_log(format!("Ignored a payload from stopped scan #{session}"));
                    }
                }
                WorkerResult::NotFound { message } => {
                    self.ui_state.busy = false;
                    self.ui_state.toast(message);
                }
                WorkerResult::Preview { session, image } => {
                    if self.preview.is_current(session) {
                        let texture = ctx.load_texture("camera", image, egui::TextureOptions::LINEAR);
                        self.preview.camera = Some(texture);
                    }
                }
                WorkerResult::ScanStopped { session, message } => {
                    if self.preview.scan_finished(session) {
                        self.ui_state.end_live_scan();
                        self.ui_state.toast(message);
                    } else {
                        self.ui_state.add_log(format!("Scan #{session}: {message}"));
                    }
                }
                WorkerResult::FramesFolderPicked { dir } => {
                    self.start_scan(ScanSource::Frames { dir });
                }
                WorkerResult::ConfigImported { config } => {
                    self.config = *config;
                    self.ui_state.toast("Settings imported");
                }
                WorkerResult::Sent { outcome } => {
                    self.ui_state.busy = false;
                    self.ui_state.toast(outcome.to_string());
                }
                WorkerResult::Toast { message } => {
                    self.ui_state.toast(message);
                }
                WorkerResult::Error { message } => {
                    self.ui_state.busy = false;
                    self.ui_state.toast(message.clone());
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    fn show_result(&mut self, text: String) {
        if !self.ui_state.show_result(text) {
            self.ui_state.add_log("Ignored a second decoded payload".into());
        }
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        if let Some(ref tx) = self.cmd_tx {
            let _ = tx.send(cmd);
        }
    }

    pub fn generate(&mut self) {
        let Some(text) = self.ui_state.encodable_text() else {
            self.ui_state.toast("Enter some text to encode");
            return;
        };
        self.ui_state.busy = true;
        self.send_command(WorkerCommand::Generate {
            text,
            config: self.config.encode.clone(),
        });
    }

    pub fn save_image(&mut self) {
        self.ui_state.busy = true;
        self.send_command(WorkerCommand::SaveImage {
            storage: self.config.storage.clone(),
        });
    }

    /// Start a live scan from `source`, replacing any session still running.
    pub fn start_scan(&mut self, source: ScanSource) {
        let (session, cancel) = self.preview.begin_scan();
        self.ui_state.begin_live_scan();
        self.send_command(WorkerCommand::StartScan {
            session,
            source,
            options: SessionOptions {
                analyzers: self.config.scan.analyzers,
                max_frames: None,
            },
            cancel,
        });
    }

    /// "Scan with Camera": the configured camera, or a folder of frames when
    /// built without camera support.
    pub fn scan_with_camera(&mut self) {
        if cfg!(feature = "camera") {
            self.start_scan(ScanSource::Camera {
                index: self.config.scan.camera_index,
            });
            return;
        }

        let result_tx = self.result_tx.clone();
        std::thread::spawn(move || {
            if let Some(dir) = rfd::FileDialog::new()
                .set_title("Pick a folder of camera frames")
                .pick_folder()
            {
                let _ = result_tx.send(WorkerResult::FramesFolderPicked { dir });
            }
        });
    }

    pub fn cancel_scan(&mut self) {
        self.preview.cancel_scan();
        self.ui_state.end_live_scan();
    }

    pub fn scan_image_file(&mut self) {
        let cmd_tx = self.cmd_tx.clone();
        std::thread::spawn(move || {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "gif", "webp"])
                .add_filter("All files", &["*"])
                .pick_file()
            {
                if let Some(tx) = cmd_tx {
                    let _ = tx.send(WorkerCommand::ScanImage { path });
                }
            }
        });
    }

    pub fn back_to_main(&mut self) {
        self.ui_state.back_to_main();
    }
}

impl eframe::App for QrLinkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);
        self.ui_state.expire_toasts(Instant::now());

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        match self.ui_state.route.clone() {
            Route::Main => panels::main_screen::show(ctx, self),
            Route::Result { text } => panels::result_screen::show(ctx, self, &text),
        }
        panels::toasts::show(ctx, self);

        if self.show_about {
            egui::Window::new("About QR Link")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("QR Link");
                        ui.label("Generate, scan and forward QR codes");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
