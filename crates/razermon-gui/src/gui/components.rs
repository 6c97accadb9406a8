//! Reusable UI components for the razermon window.

use egui::{self, Color32, RichText, Ui};

use super::theme::Theme;

/// Centered placeholder shown when there is nothing to chart.
pub fn empty_state(ui: &mut Ui, theme: &Theme, title: &str, description: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(theme.spacing.xl * 2.0);
        ui.label(
            RichText::new("---")
                .color(theme.text_muted)
                .size(theme.typography.heading),
        );
        ui.add_space(theme.spacing.md);
        ui.label(
            RichText::new(title)
                .color(theme.text_secondary)
                .size(theme.typography.subheading)
                .strong(),
        );
        ui.add_space(theme.spacing.xs);
        ui.label(
            RichText::new(description)
                .color(theme.text_muted)
                .size(theme.typography.body),
        );
    });
}

/// Small tinted badge.
pub fn status_badge(ui: &mut Ui, theme: &Theme, text: &str, color: Color32) {
    egui::Frame::new()
        .fill(theme.tint_bg(color, 35))
        .inner_margin(egui::Margin::symmetric(8, 4))
        .corner_radius(egui::CornerRadius::same(theme.rounding.sm as u8))
        .show(ui, |ui| {
            ui.label(
                RichText::new(text)
                    .color(color)
                    .size(theme.typography.caption),
            );
        });
}

/// Spinner with an optional message.
pub fn loading_indicator(ui: &mut Ui, theme: &Theme, message: Option<&str>) {
    ui.horizontal(|ui| {
        ui.spinner();
        if let Some(msg) = message {
            ui.add_space(theme.spacing.sm);
            ui.label(RichText::new(msg).color(theme.text_muted));
        }
    });
}

/// Card frame used around the chart.
pub fn card(theme: &Theme) -> egui::Frame {
    egui::Frame::new()
        .fill(theme.bg_card)
        .inner_margin(egui::Margin::same(theme.spacing.md as i8))
        .corner_radius(egui::CornerRadius::same(theme.rounding.md as u8))
        .stroke(egui::Stroke::new(1.0, theme.border_subtle))
        .shadow(theme.card_shadow())
}
