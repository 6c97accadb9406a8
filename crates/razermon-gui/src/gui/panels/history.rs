//! Charge history chart.

use egui::{self, RichText};
use egui_plot::{GridMark, Line, Plot, PlotPoint, PlotPoints};

use razermon_core::ProductView;

use crate::gui::app::RazermonApp;
use crate::gui::components;
use crate::gui::helpers::{axis_label, point_count_label, span_label, tooltip_text};

const PLOT_ID: &str = "charge_history_plot";

impl RazermonApp {
    /// Render the charge chart for a loaded history.
    pub(crate) fn render_history_panel(&self, ui: &mut egui::Ui, view: &ProductView) {
        let history = view.points();
        let offset = self.offset;

        components::card(&self.theme).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Charge history")
                        .size(self.theme.typography.subheading)
                        .strong()
                        .color(self.theme.text_primary),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    components::status_badge(
                        ui,
                        &self.theme,
                        &point_count_label(history.len()),
                        self.theme.accent,
                    );
                    if let Some(span) = span_label(history) {
                        ui.label(
                            RichText::new(span)
                                .size(self.theme.typography.caption)
                                .color(self.theme.text_muted),
                        );
                    }
                });
            });
            ui.add_space(self.theme.spacing.sm);

            let points: PlotPoints<'static> = history.iter().map(|p| p.xy()).collect();

            Plot::new(PLOT_ID)
                .height(self.chart_height)
                .show_axes(true)
                .show_grid(true)
                .allow_scroll(false)
                // Time navigation only; the charge axis stays 0-100
                .allow_drag([true, false])
                .allow_zoom([true, false])
                .allow_boxed_zoom(false)
                .allow_double_click_reset(true)
                .include_y(0.0)
                .include_y(100.0)
                .set_margin_fraction(egui::vec2(0.02, 0.05))
                .x_axis_formatter(move |mark: GridMark, _range| axis_label(mark.value, offset))
                .y_axis_formatter(|mark: GridMark, _range| format!("{}%", mark.value))
                .label_formatter(move |name: &str, value: &PlotPoint| {
                    // Empty name means the cursor is not on the series
                    if name.is_empty() {
                        return String::new();
                    }
                    tooltip_text(value.x, value.y, offset).unwrap_or_default()
                })
                .show(ui, |plot_ui| {
                    plot_ui.line(
                        Line::new("Charge", points)
                            .color(self.theme.chart_charge)
                            .fill(0.0)
                            .width(2.0),
                    );
                });
        });
    }
}
