//! Main application state and UI rendering for the razermon window.
//!
//! [`RazermonApp`] owns the [`ViewState`]. Each frame it drains worker events
//! into the state machine, forwards the commands the machine returns, and
//! draws whatever [`RenderState`] results.

use std::sync::mpsc as std_mpsc;
use std::time::{Duration, Instant};

use egui::{self, RichText};
use time::UtcOffset;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use razermon_core::{Command, RenderState, ViewEvent, ViewState};

use super::components;
use super::theme::{Theme, ThemeMode};

/// Repaint period while waiting for the worker.
const BUSY_REPAINT: Duration = Duration::from_millis(50);
/// Repaint period when idle; keeps auto-refresh and late events flowing.
const IDLE_REPAINT: Duration = Duration::from_millis(250);

/// Settings the window starts with.
#[derive(Debug, Clone, Copy)]
pub struct AppOptions {
    pub theme_mode: ThemeMode,
    pub chart_height: f32,
    /// Auto-refresh period; `None` disables it.
    pub refresh_interval: Option<Duration>,
    /// Offset used for chart timestamps.
    pub offset: UtcOffset,
    pub demo: bool,
}

/// Main application state.
pub struct RazermonApp {
    /// Channel to send commands to the worker.
    command_tx: mpsc::Sender<Command>,
    /// Channel to receive events from the worker (via std mpsc for non-async).
    event_rx: std_mpsc::Receiver<ViewEvent>,
    /// Screen state machine.
    pub(crate) state: ViewState,
    theme_mode: ThemeMode,
    pub(crate) theme: Theme,
    pub(crate) chart_height: f32,
    pub(crate) offset: UtcOffset,
    refresh_interval: Option<Duration>,
    /// When the selection was last (re-)resolved.
    last_refresh: Instant,
    demo_mode: bool,
}

impl RazermonApp {
    /// Create the app. The initial selection lookup is already queued.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        command_tx: mpsc::Sender<Command>,
        event_rx: std_mpsc::Receiver<ViewEvent>,
        options: AppOptions,
    ) -> Self {
        let theme = Theme::for_mode(options.theme_mode);
        cc.egui_ctx.set_style(theme.to_style());

        Self {
            command_tx,
            event_rx,
            state: ViewState::new(),
            theme_mode: options.theme_mode,
            theme,
            chart_height: options.chart_height,
            offset: options.offset,
            refresh_interval: options.refresh_interval,
            last_refresh: Instant::now(),
            demo_mode: options.demo,
        }
    }

    /// Process all pending events from the worker.
    fn process_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            if let Some(cmd) = self.state.apply(event) {
                self.send_command(cmd);
            }
        }
    }

    /// Send a command to the worker.
    fn send_command(&self, cmd: Command) {
        if let Err(e) = self.command_tx.try_send(cmd) {
            warn!("Failed to send command to worker: {}", e);
        }
    }

    /// Ask the host for its selection again.
    fn refresh(&mut self) {
        debug!("Refreshing selection");
        self.last_refresh = Instant::now();
        self.send_command(Command::ResolveSelection);
    }

    /// Refresh if auto-refresh is enabled and due.
    fn check_auto_refresh(&mut self) {
        let Some(interval) = self.refresh_interval else {
            return;
        };
        if !self.state.is_busy() && self.last_refresh.elapsed() >= interval {
            self.refresh();
        }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.theme_mode.toggle();
        self.theme = Theme::for_mode(self.theme_mode);
        ctx.set_style(self.theme.to_style());
    }

    /// Title bar with refresh and theme buttons.
    fn render_header(&mut self, ctx: &egui::Context) {
        let mut refresh = false;
        let mut toggle_theme = false;

        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::new()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(egui::Margin::symmetric(
                        self.theme.spacing.md as i8,
                        self.theme.spacing.sm as i8,
                    )),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Battery")
                            .size(self.theme.typography.heading)
                            .strong()
                            .color(self.theme.text_primary),
                    );
                    if self.demo_mode {
                        components::status_badge(ui, &self.theme, "Demo", self.theme.info);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .button(self.theme_mode.toggle_label())
                            .on_hover_text("Toggle theme (T)")
                            .clicked()
                        {
                            toggle_theme = true;
                        }

                        let busy = self.state.is_busy();
                        if ui
                            .add_enabled(!busy, egui::Button::new("Refresh"))
                            .on_hover_text("Reload from the host (F5)")
                            .clicked()
                        {
                            refresh = true;
                        }
                        if busy {
                            ui.spinner();
                        }
                    });
                });
            });

        if refresh {
            self.refresh();
        }
        if toggle_theme {
            self.toggle_theme(ctx);
        }
    }

    fn render_body(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(self.theme.spacing.sm);
            match self.state.render_state() {
                RenderState::Nothing => {}
                RenderState::Empty => components::empty_state(
                    ui,
                    &self.theme,
                    "No device selected",
                    "Pick a device in the host app to see its charge history",
                ),
                RenderState::Loading(view) => {
                    self.render_status(ui, view);
                    ui.add_space(self.theme.spacing.md);
                    components::loading_indicator(
                        ui,
                        &self.theme,
                        Some("Loading charge history..."),
                    );
                }
                RenderState::Loaded(view) => {
                    self.render_status(ui, view);
                    ui.add_space(self.theme.spacing.md);
                    self.render_history_panel(ui, view);
                }
            }
        });
    }
}

impl eframe::App for RazermonApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_events();
        self.check_auto_refresh();

        // Handle keyboard shortcuts
        let (refresh, toggle_theme) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::F5),
                i.key_pressed(egui::Key::T) && !i.modifiers.command && !i.modifiers.ctrl,
            )
        });
        if refresh && !self.state.is_busy() {
            self.refresh();
        }
        if toggle_theme {
            self.toggle_theme(ctx);
        }

        self.render_header(ctx);
        self.render_body(ctx);

        let repaint = if self.state.is_busy() {
            BUSY_REPAINT
        } else {
            IDLE_REPAINT
        };
        ctx.request_repaint_after(repaint);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Sending shutdown command");
        let _ = self.command_tx.try_send(Command::Shutdown);
    }
}
