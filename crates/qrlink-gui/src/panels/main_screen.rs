use qrlink_core::config::EcLevelChoice;

use crate::app::QrLinkApp;
use crate::panels::helpers::{enum_combo, wide_button};

const IMAGE_EDGE: f32 = 300.0;

pub fn show(ctx: &egui::Context, app: &mut QrLinkApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.vertical_centered_justified(|ui| {
                ui.add_space(8.0);
                generate_section(ui, app);
                ui.add_space(12.0);
                ui.separator();
                ui.add_space(12.0);
                scan_section(ui, app);
                ui.add_space(12.0);
                options_section(ui, app);
            });
        });
    });
}

fn generate_section(ui: &mut egui::Ui, app: &mut QrLinkApp) {
    let response = ui.add(
        egui::TextEdit::singleline(&mut app.ui_state.input_text)
            .hint_text("Enter text for QR code")
            .desired_width(f32::INFINITY),
    );
    let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

    ui.add_space(4.0);
    let busy = app.ui_state.busy;
    if wide_button(ui, "Generate QR Code", !busy) || (submitted && !busy) {
        app.generate();
    }

    if let Some(texture) = app.preview.generated.clone() {
        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            ui.add(egui::Image::new(&texture).max_size(egui::vec2(IMAGE_EDGE, IMAGE_EDGE)));
        });
    }

    if app.ui_state.show_save_button {
        ui.add_space(4.0);
        if wide_button(ui, "Save Image", !busy) {
            app.save_image();
        }
    }
}

fn scan_section(ui: &mut egui::Ui, app: &mut QrLinkApp) {
    if app.ui_state.show_preview {
        ui.vertical_centered(|ui| match app.preview.camera.clone() {
            Some(texture) => {
                ui.add(egui::Image::new(&texture).max_size(egui::vec2(IMAGE_EDGE, IMAGE_EDGE)));
            }
            None => {
                ui.add_space(IMAGE_EDGE / 3.0);
                ui.spinner();
                ui.label("Waiting for frames...");
                ui.add_space(IMAGE_EDGE / 3.0);
            }
        });
        ui.add_space(4.0);
        if wide_button(ui, "Cancel", true) {
            app.cancel_scan();
        }
        return;
    }

    if wide_button(ui, "Scan with Camera", true) {
        app.scan_with_camera();
    }
    ui.add_space(4.0);
    if wide_button(ui, "Scan from Image\u{2026}", !app.ui_state.busy) {
        app.scan_image_file();
    }
}

fn options_section(ui: &mut egui::Ui, app: &mut QrLinkApp) {
    egui::CollapsingHeader::new("Options")
        .default_open(false)
        .show(ui, |ui| {
            enum_combo(
                ui,
                "Error correction",
                &mut app.config.encode.ec_level,
                &[
                    EcLevelChoice::Low,
                    EcLevelChoice::Medium,
                    EcLevelChoice::Quartile,
                    EcLevelChoice::High,
                ],
            );
            ui.horizontal(|ui| {
                ui.label("Image size");
                ui.add(
                    egui::DragValue::new(&mut app.config.encode.size)
                        .range(64..=2048)
                        .suffix(" px"),
                );
            });
            ui.horizontal(|ui| {
                ui.label("Send to");
                ui.add(
                    egui::TextEdit::singleline(&mut app.config.remote.endpoint)
                        .desired_width(f32::INFINITY),
                );
            });
        });
}
