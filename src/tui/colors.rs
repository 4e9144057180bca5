use ratatui::style::{Color, Modifier, Style};

/// Trilogy-era color for a film's release year
pub fn color_for_year(year: Option<i32>) -> Color {
    match year {
        Some(y) if y < 1990 => Color::Yellow,      // original trilogy
        Some(y) if y < 2010 => Color::LightBlue,   // prequels
        Some(_) => Color::Magenta,                 // sequels and beyond
        None => Color::White,
    }
}

pub fn header_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

pub fn status_style() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn error_style() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

pub fn loading_style() -> Style {
    Style::default().fg(Color::Yellow)
}
