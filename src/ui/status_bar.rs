use crate::app::App;
use ratatui::{prelude::*, widgets::Paragraph};

/// Draw the status bar at the bottom of the screen
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let style = Style::default()
        .fg(app.theme.statusbar_fg)
        .bg(app.theme.statusbar_bg);

    let thresholds = app.config.thresholds();
    let left_status = format!(
        " tap: {}ms / {} cells | xor: {}ms",
        thresholds.speed.as_millis(),
        thresholds.distance,
        app.config.xor_speed().as_millis(),
    );

    let right_status = if app.has_pending_action() {
        " pending "
    } else {
        " idle "
    };

    // Calculate padding
    let total_len = left_status.len() + right_status.len();
    let padding = area.width.saturating_sub(total_len as u16);

    let full_text = format!(
        "{}{}{}",
        left_status,
        " ".repeat(padding as usize),
        right_status
    );

    frame.render_widget(Paragraph::new(full_text).style(style), area);
}
