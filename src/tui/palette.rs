//! Terminal colors for the light and dark themes.

use ratatui::style::{Color, Modifier, Style};

use crate::model::Theme;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub muted: Style,
    pub normal: Style,
    pub highlight: Style,
    /// Chosen options.
    pub selected: Style,
    /// Controls that can't be used right now.
    pub disabled: Style,
    pub gauge: Style,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                muted: Style::default().fg(Color::DarkGray),
                normal: Style::default().fg(Color::Gray),
                highlight: Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
                selected: Style::default().fg(Color::LightGreen),
                disabled: Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM),
                gauge: Style::default().fg(Color::Green).bg(Color::Black),
            },
            Theme::Light => Self {
                muted: Style::default().fg(Color::Gray),
                normal: Style::default().fg(Color::DarkGray),
                highlight: Style::default()
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
                selected: Style::default().fg(Color::Green),
                disabled: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
                gauge: Style::default().fg(Color::Green).bg(Color::White),
            },
        }
    }
}
