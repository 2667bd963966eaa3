use crate::app::App;
use ratatui::{prelude::*, widgets::Paragraph};

/// Draw the title bar at the top of the screen
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let hints = " q quit | k kill pending | r reset series | c clear log ";

    // Right-align the app name
    let title = "tapgesture";
    let padding = area
        .width
        .saturating_sub(hints.len() as u16 + title.len() as u16 + 1);
    let full_text = format!("{}{}{} ", hints, " ".repeat(padding as usize), title);

    let style = Style::default()
        .fg(app.theme.titlebar_fg)
        .bg(app.theme.titlebar_bg);

    frame.render_widget(Paragraph::new(full_text).style(style), area);
}
