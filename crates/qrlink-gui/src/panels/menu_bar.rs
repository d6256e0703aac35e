use qrlink_core::config::AppConfig;

use crate::app::QrLinkApp;
use crate::messages::WorkerResult;

pub fn show(ctx: &egui::Context, app: &mut QrLinkApp) {
    let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
    let save_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
    let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .add(
                        egui::Button::new("Scan from Image...")
                            .shortcut_text(ctx.format_shortcut(&open_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    app.scan_image_file();
                }

                let can_save = app.ui_state.show_save_button;
                if ui
                    .add_enabled(
                        can_save,
                        egui::Button::new("Save Image")
                            .shortcut_text(ctx.format_shortcut(&save_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    app.save_image();
                }

                ui.separator();

                if ui.button("Import Settings...").clicked() {
                    ui.close();
                    import_config(app);
                }

                if ui.button("Export Settings...").clicked() {
                    ui.close();
                    export_config(app);
                }

                ui.separator();

                if ui
                    .add(
                        egui::Button::new("Quit")
                            .shortcut_text(ctx.format_shortcut(&quit_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Reset Settings").clicked() {
                    ui.close();
                    app.config = AppConfig::default();
                    app.ui_state.toast("Settings reset to defaults");
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&open_shortcut)) {
            app.scan_image_file();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&save_shortcut)) && app.ui_state.show_save_button {
            app.save_image();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&quit_shortcut)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn import_config(app: &mut QrLinkApp) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let result = match AppConfig::load(&path) {
            Ok(config) => WorkerResult::ConfigImported {
                config: Box::new(config),
            },
            Err(e) => WorkerResult::Error {
                message: e.to_string(),
            },
        };
        let _ = result_tx.send(result);
    });
}

fn export_config(app: &mut QrLinkApp) {
    let result_tx = app.result_tx.clone();
    let config = app.config.clone();

    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("qrlink.toml")
            .save_file()
        else {
            return;
        };
        let written = config
            .to_toml()
            .map_err(|e| e.to_string())
            .and_then(|content| std::fs::write(&path, content).map_err(|e| e.to_string()));
        let result = match written {
            Ok(()) => WorkerResult::Toast {
                message: format!("Settings exported to {}", path.display()),
            },
            Err(message) => WorkerResult::Error { message },
        };
        let _ = result_tx.send(result);
    });
}
