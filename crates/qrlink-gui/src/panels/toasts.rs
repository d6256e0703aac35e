use std::time::Duration;

use crate::app::QrLinkApp;

pub fn show(ctx: &egui::Context, app: &QrLinkApp) {
    if app.ui_state.toasts.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -140.0])
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(ctx, |ui| {
            for toast in &app.ui_state.toasts {
                egui::Frame::popup(ui.style())
                    .corner_radius(12.0)
                    .inner_margin(egui::Margin::symmetric(14, 8))
                    .show(ui, |ui| {
                        ui.label(&toast.message);
                    });
                ui.add_space(4.0);
            }
        });

    // Keep repainting so expired toasts disappear without input.
    ctx.request_repaint_after(Duration::from_millis(250));
}
