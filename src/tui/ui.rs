use crate::tui::app::App;
use crate::tui::colors;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use unicode_width::UnicodeWidthStr;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(5),    // Table
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_search_bar(frame, app, chunks[0]);
    draw_table(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);

    // Show cursor in search bar when focused
    if app.search.focused {
        // Account for border (1) + space (1) + search icon (approx 3 display cols)
        let cursor_x =
            chunks[0].x + 1 + 3 + cursor_column(&app.search.query, app.search.cursor_pos);
        let cursor_y = chunks[0].y + 1;
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.search.focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Search films ");

    let search_text = format!(" \u{1F50D} {}", app.search.query);
    let paragraph = Paragraph::new(search_text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn draw_table(frame: &mut Frame, app: &mut App, area: Rect) {
    // Visible rows = area height minus borders minus header
    let table_inner_height = area.height.saturating_sub(3) as usize;
    app.table.visible_rows = table_inner_height;

    let header = Row::new(
        ["Title", "Year", "Director", "Release Date", "Species"]
            .iter()
            .map(|name| Cell::from(*name).style(colors::header_style())),
    )
    .height(1);

    // Title column width for truncation (borders + other columns)
    let title_width = area.width.saturating_sub(2 + 6 + 24 + 14 + 9) as usize;

    let start = app.table.scroll_offset;
    let end = (start + table_inner_height).min(app.visible_indices.len());

    let rows: Vec<Row> = (start..end)
        .map(|logical_idx| {
            let film_idx = app.visible_indices[logical_idx];
            let film = &app.catalog.films()[film_idx];

            let year = film.release_year();
            let year_str = year.map(|y| y.to_string()).unwrap_or_default();
            let species = if film.species.is_empty() {
                String::new()
            } else {
                film.species.len().to_string()
            };

            let title_style = Style::default().fg(colors::color_for_year(year));
            let row = Row::new([
                Cell::from(truncate_to_width(&film.title, title_width)).style(title_style),
                Cell::from(year_str),
                Cell::from(truncate_to_width(&film.director, 24)),
                Cell::from(film.release_date.clone()),
                Cell::from(species),
            ]);

            if app.table.selected == Some(logical_idx) {
                row.style(colors::selected_style())
            } else {
                row
            }
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(6),
        Constraint::Length(24),
        Constraint::Length(14),
        Constraint::Length(8),
    ];

    let count = app.visible_indices.len();
    let title = if app.search.query.trim().is_empty() {
        format!(" Films ({count}) ")
    } else {
        format!(" Films ({count} matching) ")
    };

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title),
    );

    frame.render_widget(table, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if let Some(error) = &app.last_error {
        (
            format!(" Fetch failed: {error}  (press Down at the bottom or F5 to retry)"),
            colors::error_style(),
        )
    } else if app.is_loading {
        (" Fetching next page...".to_string(), colors::loading_style())
    } else {
        let more = if app.catalog.has_more() {
            "  \u{2193} at bottom loads more"
        } else {
            ""
        };
        (
            format!(
                " {}  |  Tab: search  Esc: quit{}",
                app.status_message, more
            ),
            colors::status_style(),
        )
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}

/// Terminal column of a byte position in the query: multibyte characters
/// occupy fewer columns than bytes
fn cursor_column(query: &str, cursor_pos: usize) -> u16 {
    query[..cursor_pos].width() as u16
}

/// Truncate to a display width, appending an ellipsis when cut
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('\u{2026}');
    out
}

#[cfg(test)]
mod tests {
    use super::{cursor_column, truncate_to_width};

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("A New Hope", 20), "A New Hope");
        assert_eq!(truncate_to_width("The Empire Strikes Back", 10), "The Empir\u{2026}");
    }

    #[test]
    fn cursor_column_counts_display_cells_not_bytes() {
        // 'é' is two bytes but one column wide
        assert_eq!(cursor_column("héllo", 3), 2);
        assert_eq!(cursor_column("héllo", 0), 0);
        assert_eq!(cursor_column("héllo", "héllo".len()), 5);
    }
}
