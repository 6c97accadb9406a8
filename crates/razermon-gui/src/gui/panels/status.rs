//! Device status and remaining-time lines above the chart.

use egui::{self, RichText};

use razermon_core::ProductView;

use crate::gui::app::RazermonApp;

impl RazermonApp {
    /// Render whichever status lines have arrived.
    pub(crate) fn render_status(&self, ui: &mut egui::Ui, view: &ProductView) {
        if let Some(line) = view.status_line() {
            let color = view
                .device_status()
                .and_then(|status| status.percentage)
                .map_or(self.theme.text_primary, |level| {
                    self.theme.charge_color(level)
                });
            ui.label(
                RichText::new(line)
                    .size(self.theme.typography.subheading)
                    .strong()
                    .color(color),
            );
        }

        if let Some(remaining) = view.remaining_line() {
            ui.label(
                RichText::new(remaining)
                    .size(self.theme.typography.body)
                    .color(self.theme.text_secondary),
            );
        }
    }
}
