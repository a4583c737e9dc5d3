/*
[INPUT]:  Selected theme and hex accent colours from the summary
[OUTPUT]: Ratatui styles for the light and dark themes
[POS]:    TUI UI styling helpers
[UPDATE]: When adjusting theme colours
*/

use ratatui::style::{Color, Modifier, Style};
use tasksmart_client::Priority;

use tasksmart::summary::priority_color;
use tasksmart::theme::Theme;

#[derive(Debug, Clone, Copy)]
pub(in crate::tui) struct Palette {
    fg: Color,
    bg: Color,
    border: Color,
    highlight_fg: Color,
    highlight_bg: Color,
    muted: Color,
}

impl Palette {
    pub(in crate::tui) fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                fg: Color::White,
                bg: Color::Black,
                border: Color::Magenta,
                highlight_fg: Color::White,
                highlight_bg: Color::Blue,
                muted: Color::DarkGray,
            },
            Theme::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                border: Color::Blue,
                highlight_fg: Color::Black,
                highlight_bg: Color::LightCyan,
                muted: Color::Gray,
            },
        }
    }

    pub(in crate::tui) fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub(in crate::tui) fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub(in crate::tui) fn header(&self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.border)
            .add_modifier(Modifier::BOLD)
    }

    pub(in crate::tui) fn highlight(&self) -> Style {
        Style::default()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub(in crate::tui) fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub(in crate::tui) fn error(&self) -> Style {
        Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)
    }

    pub(in crate::tui) fn key(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    /// Foreground for an optional hex accent, falling back to the theme
    pub(in crate::tui) fn accent(&self, hex: Option<&str>) -> Style {
        let color = hex.and_then(hex_color).unwrap_or(self.fg);
        Style::default().fg(color)
    }

    pub(in crate::tui) fn priority(&self, priority: Priority) -> Style {
        self.accent(Some(priority_color(priority)))
    }
}

/// Parse `#rrggbb`
pub(in crate::tui) fn hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
