use ratatui::style::{Color, Modifier, Style};

use reltrace_core::config::UiConfig;
use reltrace_core::database::DatabaseType;

pub const BRAND_RED: Color = Color::Rgb(220, 50, 47);
pub const BRAND_ORANGE: Color = Color::Rgb(203, 75, 22);
pub const BRAND_GREEN: Color = Color::Rgb(133, 153, 0);
pub const BRAND_BLUE: Color = Color::Rgb(38, 139, 210);
pub const BRAND_CYAN: Color = Color::Rgb(42, 161, 152);

/// Palette shared by every view. Built once from [`UiConfig`] and never
/// changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub title: Style,
    pub selected: Style,
    pub normal: Style,
    pub dim: Style,
    pub success: Style,
    pub error: Style,
    pub info: Style,
    pub focused_border: Style,
    pub blurred_border: Style,
    pub placeholder: Style,
    pub cursor: Style,
    mono: bool,
}

impl Theme {
    pub fn from_config(ui: &UiConfig) -> Self {
        match ui.theme.as_str() {
            "mono" | "monochrome" => Self::mono(),
            "default" => Self::brand(),
            other => {
                tracing::warn!(theme = other, "Unknown theme, using default");
                Self::brand()
            }
        }
    }

    pub fn brand() -> Self {
        Self {
            title: Style::default().fg(BRAND_BLUE).add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::Black).bg(BRAND_BLUE),
            normal: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            success: Style::default().fg(BRAND_GREEN),
            error: Style::default().fg(BRAND_RED),
            info: Style::default().fg(BRAND_CYAN),
            focused_border: Style::default().fg(Color::Cyan),
            blurred_border: Style::default().fg(Color::DarkGray),
            placeholder: Style::default().fg(Color::DarkGray),
            cursor: Style::default().bg(Color::White).fg(Color::Black),
            mono: false,
        }
    }

    pub fn mono() -> Self {
        Self {
            title: Style::default().add_modifier(Modifier::BOLD),
            selected: Style::default().add_modifier(Modifier::REVERSED),
            normal: Style::default(),
            dim: Style::default().add_modifier(Modifier::DIM),
            success: Style::default().add_modifier(Modifier::BOLD),
            error: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            info: Style::default().add_modifier(Modifier::ITALIC),
            focused_border: Style::default().add_modifier(Modifier::BOLD),
            blurred_border: Style::default().add_modifier(Modifier::DIM),
            placeholder: Style::default().add_modifier(Modifier::DIM),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            mono: true,
        }
    }

    pub fn database_style(&self, db_type: DatabaseType) -> Style {
        if self.mono {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        let color = match db_type {
            DatabaseType::MySql => BRAND_ORANGE,
            DatabaseType::PostgreSql => BRAND_BLUE,
            DatabaseType::Sqlite => BRAND_CYAN,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, focused: bool, invalid: bool) -> Style {
        if invalid {
            self.error
        } else if focused {
            self.focused_border
        } else {
            self.blurred_border
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::brand()
    }
}
