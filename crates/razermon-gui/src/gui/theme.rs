//! Theme and styling for the razermon window.
//!
//! Dark and light palettes plus the spacing, typography and rounding scales
//! the panels lay themselves out with.

use egui::{Color32, CornerRadius, Margin, Shadow, Stroke, Style, Visuals};
use serde::{Deserialize, Serialize};

/// Theme mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    /// Toggle between light and dark mode.
    pub fn toggle(&mut self) {
        *self = match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        };
    }

    /// Label for the button that switches away from this mode.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "Light Mode",
            ThemeMode::Light => "Dark Mode",
        }
    }
}

/// Spacing constants on a 4px grid.
#[derive(Debug, Clone, Copy)]
pub struct Spacing {
    pub xs: f32,
    pub sm: f32,
    pub md: f32,
    pub lg: f32,
    pub xl: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            xs: 4.0,
            sm: 8.0,
            md: 16.0,
            lg: 24.0,
            xl: 32.0,
        }
    }
}

/// Typography sizes.
#[derive(Debug, Clone, Copy)]
pub struct Typography {
    /// Caption/small text (11px)
    pub caption: f32,
    /// Body text (14px)
    pub body: f32,
    /// Subheading (18px)
    pub subheading: f32,
    /// Heading (22px)
    pub heading: f32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            caption: 11.0,
            body: 14.0,
            subheading: 18.0,
            heading: 22.0,
        }
    }
}

/// Rounding constants for corner radii.
#[derive(Debug, Clone, Copy)]
pub struct Rounding {
    pub sm: f32,
    pub md: f32,
}

impl Default for Rounding {
    fn default() -> Self {
        Self { sm: 4.0, md: 8.0 }
    }
}

/// Application color theme.
#[derive(Debug, Clone)]
pub struct Theme {
    pub is_dark: bool,
    // Backgrounds
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_card: Color32,
    // Text
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,
    pub text_on_accent: Color32,
    // Borders
    pub border: Color32,
    pub border_subtle: Color32,
    // Accent and semantic colors
    pub accent: Color32,
    pub accent_hover: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub danger: Color32,
    pub info: Color32,
    /// Line color of the charge chart.
    pub chart_charge: Color32,
    pub spacing: Spacing,
    pub typography: Typography,
    pub rounding: Rounding,
}

impl Theme {
    /// Dark theme with zinc backgrounds.
    pub fn dark() -> Self {
        Self {
            is_dark: true,
            bg_primary: Color32::from_rgb(9, 9, 11),       // zinc-950
            bg_secondary: Color32::from_rgb(24, 24, 27),   // zinc-900
            bg_card: Color32::from_rgb(39, 39, 42),        // zinc-800
            text_primary: Color32::from_rgb(250, 250, 250), // zinc-50
            text_secondary: Color32::from_rgb(212, 212, 216), // zinc-300
            text_muted: Color32::from_rgb(161, 161, 170),  // zinc-400
            text_on_accent: Color32::WHITE,
            border: Color32::from_rgb(63, 63, 70),         // zinc-700
            border_subtle: Color32::from_rgb(39, 39, 42),  // zinc-800
            accent: Color32::from_rgb(68, 214, 44),        // razer green
            accent_hover: Color32::from_rgb(110, 231, 92),
            success: Color32::from_rgb(34, 197, 94),  // green-500
            warning: Color32::from_rgb(250, 204, 21), // yellow-400
            danger: Color32::from_rgb(239, 68, 68),   // red-500
            info: Color32::from_rgb(56, 189, 248),    // sky-400
            chart_charge: Color32::from_rgb(74, 222, 128), // green-400
            spacing: Spacing::default(),
            typography: Typography::default(),
            rounding: Rounding::default(),
        }
    }

    /// Light theme with neutral backgrounds.
    pub fn light() -> Self {
        Self {
            is_dark: false,
            bg_primary: Color32::from_rgb(250, 250, 250),
            bg_secondary: Color32::from_rgb(244, 244, 245), // zinc-100
            bg_card: Color32::WHITE,
            text_primary: Color32::from_rgb(17, 24, 39),    // gray-900
            text_secondary: Color32::from_rgb(55, 65, 81),  // gray-700
            text_muted: Color32::from_rgb(107, 114, 128),   // gray-500
            text_on_accent: Color32::WHITE,
            border: Color32::from_rgb(209, 213, 219),       // gray-300
            border_subtle: Color32::from_rgb(229, 231, 235), // gray-200
            accent: Color32::from_rgb(22, 163, 74),         // green-600
            accent_hover: Color32::from_rgb(21, 128, 61),   // green-700
            success: Color32::from_rgb(22, 163, 74),
            warning: Color32::from_rgb(202, 138, 4),
            danger: Color32::from_rgb(220, 38, 38),
            info: Color32::from_rgb(2, 132, 199),
            chart_charge: Color32::from_rgb(22, 163, 74),
            spacing: Spacing::default(),
            typography: Typography::default(),
            rounding: Rounding::default(),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Color for a charge level.
    pub fn charge_color(&self, percentage: u8) -> Color32 {
        if percentage > 60 {
            self.success
        } else if percentage > 20 {
            self.warning
        } else {
            self.danger
        }
    }

    /// Background tint of `color` at the given alpha.
    pub fn tint_bg(&self, color: Color32, alpha: u8) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
    }

    pub fn card_shadow(&self) -> Shadow {
        let alpha = if self.is_dark { 50 } else { 30 };
        Shadow {
            offset: [0, 2],
            blur: 8,
            spread: 0,
            color: Color32::from_black_alpha(alpha),
        }
    }

    /// Create an egui Style from this theme.
    pub fn to_style(&self) -> Style {
        Style {
            visuals: self.to_visuals(),
            spacing: egui::style::Spacing {
                item_spacing: egui::vec2(self.spacing.sm, self.spacing.sm),
                window_margin: Margin::same(self.spacing.md as i8),
                button_padding: egui::vec2(12.0, 6.0),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Create egui Visuals from this theme.
    pub fn to_visuals(&self) -> Visuals {
        let mut visuals = if self.is_dark {
            Visuals::dark()
        } else {
            Visuals::light()
        };
        visuals.dark_mode = self.is_dark;

        visuals.panel_fill = self.bg_primary;
        visuals.window_fill = self.bg_secondary;
        visuals.extreme_bg_color = self.bg_card;
        visuals.faint_bg_color = self.bg_secondary;
        visuals.window_shadow = self.card_shadow();
        visuals.popup_shadow = self.card_shadow();

        visuals.widgets.inactive.bg_fill = self.bg_card;
        visuals.widgets.inactive.weak_bg_fill = self.bg_card;
        visuals.widgets.hovered.bg_fill = self.accent_hover;
        visuals.widgets.hovered.weak_bg_fill = self.tint_bg(self.accent, 50);
        visuals.widgets.active.bg_fill = self.accent;
        visuals.widgets.active.weak_bg_fill = self.accent;

        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_primary);
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_secondary);
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.5, self.text_on_accent);
        visuals.widgets.active.fg_stroke = Stroke::new(1.5, self.text_on_accent);

        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border_subtle);
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, self.border);
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, self.accent);

        let rounding = CornerRadius::same(self.rounding.md as u8);
        visuals.widgets.noninteractive.corner_radius = rounding;
        visuals.widgets.inactive.corner_radius = rounding;
        visuals.widgets.hovered.corner_radius = rounding;
        visuals.widgets.active.corner_radius = rounding;

        visuals.selection.bg_fill = self.tint_bg(self.accent, 70);
        visuals.selection.stroke = Stroke::new(1.0, self.accent);
        visuals.hyperlink_color = self.accent;
        visuals.error_fg_color = self.danger;
        visuals.warn_fg_color = self.warning;

        visuals
    }
}
