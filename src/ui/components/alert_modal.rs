use eframe::egui;

use crate::analysis::alert::DISMISS_LABEL;
use crate::analysis::Alert;

pub struct AlertModal<'a> {
    pub alert: &'a Alert,
}

impl<'a> AlertModal<'a> {
    /// Returns `true` once the user dismisses the alert.
    pub fn show(self, ctx: &egui::Context) -> bool {
        let mut dismissed = false;
        egui::Window::new(self.alert.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(self.alert.message.as_str());
                ui.add_space(8.0);
                if ui.button(DISMISS_LABEL).clicked() {
                    dismissed = true;
                }
            });
        dismissed
    }
}
