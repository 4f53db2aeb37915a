//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::alerts::Severity;
use crate::settings::ThemePreference;
use crate::sim::OccupancyStatus;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// True for the dark variant; used when toggling.
    pub is_dark: bool,
    /// Accent color for highlights, charts and active elements.
    pub highlight: Color,
    /// Color for informational alerts.
    pub info: Color,
    /// Color for nearly-full buses and warning alerts.
    pub warning: Color,
    /// Color for overcrowded buses and danger alerts.
    pub danger: Color,
    /// Color for buses with spare capacity.
    pub normal: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            is_dark: true,
            highlight: Color::Rgb(59, 130, 246),
            info: Color::Cyan,
            warning: Color::Rgb(245, 158, 11),
            danger: Color::Rgb(239, 68, 68),
            normal: Color::Rgb(16, 185, 129),
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            is_dark: false,
            highlight: Color::Blue,
            info: Color::Blue,
            warning: Color::Rgb(180, 83, 9),
            danger: Color::Red,
            normal: Color::Green,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn from_preference(preference: ThemePreference) -> Self {
        match preference {
            ThemePreference::Dark => Self::dark(),
            ThemePreference::Light => Self::light(),
            ThemePreference::Auto => Self::auto_detect(),
        }
    }

    /// The other variant.
    pub fn toggled(&self) -> Self {
        if self.is_dark {
            Self::light()
        } else {
            Self::dark()
        }
    }

    pub fn name(&self) -> &'static str {
        if self.is_dark {
            "dark"
        } else {
            "light"
        }
    }

    /// Color for an occupancy band.
    pub fn status_color(&self, status: OccupancyStatus) -> Color {
        match status {
            OccupancyStatus::Normal => self.normal,
            OccupancyStatus::NearlyFull => self.warning,
            OccupancyStatus::Overcrowded => self.danger,
        }
    }

    /// Get style for an occupancy band
    pub fn status_style(&self, status: OccupancyStatus) -> Style {
        match status {
            OccupancyStatus::Overcrowded => {
                Style::default().fg(self.danger).add_modifier(Modifier::BOLD)
            }
            other => Style::default().fg(self.status_color(other)),
        }
    }

    /// Get style for an alert severity
    pub fn severity_style(&self, severity: Severity) -> Style {
        match severity {
            Severity::Info => Style::default().fg(self.info),
            Severity::Warning => Style::default().fg(self.warning),
            Severity::Danger => Style::default().fg(self.danger).add_modifier(Modifier::BOLD),
        }
    }
}
