mod event_log;
mod pad;
mod status_bar;
mod title_bar;

use crate::app::App;
use ratatui::prelude::*;

/// Draw the entire UI
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Check minimum size
    if area.width < 60 || area.height < 12 {
        draw_size_warning(frame, area);
        return;
    }

    // Main layout: title bar, content, status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(8),    // Pad + log
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    title_bar::draw(frame, app, main_chunks[0]);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_chunks[1]);

    pad::draw(frame, app, content[0]);
    event_log::draw(frame, app, content[1]);

    status_bar::draw(frame, app, main_chunks[2]);
}

/// Draw a warning when terminal is too small
fn draw_size_warning(frame: &mut Frame, area: Rect) {
    use ratatui::widgets::{Block, Borders, Paragraph};

    let warning = Paragraph::new("Terminal too small!\nMinimum: 60x12")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("tapgesture"));

    frame.render_widget(warning, area);
}
