/// Show a ComboBox for enum selection. Returns `true` if the value changed.
pub(crate) fn enum_combo<T: PartialEq + Copy + ToString>(
    ui: &mut egui::Ui,
    label: &str,
    current: &mut T,
    options: &[T],
) -> bool {
    let resp = egui::ComboBox::from_label(label)
        .selected_text(current.to_string())
        .show_ui(ui, |ui| {
            let mut changed = false;
            for &choice in options {
                if ui
                    .selectable_value(current, choice, choice.to_string())
                    .changed()
                {
                    changed = true;
                }
            }
            changed
        });
    resp.inner == Some(true)
}

/// Full-width button used for the primary actions.
pub(crate) fn wide_button(ui: &mut egui::Ui, label: &str, enabled: bool) -> bool {
    let size = egui::vec2(ui.available_width(), 36.0);
    ui.add_enabled(enabled, egui::Button::new(label).min_size(size))
        .clicked()
}
