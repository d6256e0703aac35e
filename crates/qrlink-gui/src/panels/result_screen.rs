use qrlink_core::payload::is_url;

use crate::app::QrLinkApp;
use crate::messages::WorkerCommand;
use crate::panels::helpers::wide_button;

pub fn show(ctx: &egui::Context, app: &mut QrLinkApp, text: &str) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered_justified(|ui| {
            ui.add_space(8.0);
            ui.heading("QR Code Result");
            ui.add_space(12.0);

            egui::Frame::group(ui.style())
                .inner_margin(12.0)
                .show(ui, |ui| {
                    egui::ScrollArea::vertical()
                        .max_height(240.0)
                        .show(ui, |ui| payload(ui, app, text));
                });

            ui.add_space(12.0);
            let busy = app.ui_state.busy;
            if wide_button(ui, "Copy", true) {
                ui.ctx().copy_text(text.to_string());
                app.ui_state.toast("Text copied to clipboard");
            }
            ui.add_space(4.0);
            if wide_button(ui, "Share", true) {
                app.send_command(WorkerCommand::Share {
                    text: text.to_string(),
                });
            }
            ui.add_space(4.0);
            if wide_button(ui, "Send", !busy) {
                app.ui_state.busy = true;
                app.send_command(WorkerCommand::SendRemote {
                    text: text.to_string(),
                    remote: app.config.remote.clone(),
                });
            }

            ui.add_space(16.0);
            if wide_button(ui, "Back", true) {
                app.back_to_main();
            }
        });
    });
}

/// The payload, link-styled and clickable when it is a URL.
fn payload(ui: &mut egui::Ui, app: &QrLinkApp, text: &str) {
    if is_url(text) {
        let link = ui
            .link(egui::RichText::new(text).size(16.0))
            .on_hover_text("Open in browser");
        if link.clicked() {
            app.send_command(WorkerCommand::OpenLink {
                text: text.to_string(),
            });
        }
    } else {
        ui.add(egui::Label::new(egui::RichText::new(text).size(16.0)).wrap());
    }
}
