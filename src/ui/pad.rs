use crate::app::App;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Draw the tap pad, the only area that reacts to the mouse
pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let border_color = if app.has_pending_action() {
        app.theme.border_pending
    } else {
        app.theme.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" pad ")
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Store the pad area for mouse hit detection
    app.pad_area = Some(inner);

    let text = vec![
        Line::from("Click here."),
        Line::from(""),
        Line::from("1 click  -> select (after the debounce window)"),
        Line::from("2 clicks -> open (after the debounce window)"),
        Line::from("3 clicks -> inspect (immediately)"),
    ];
    let help = Paragraph::new(text)
        .style(Style::default().fg(app.theme.fg))
        .wrap(Wrap { trim: true });
    frame.render_widget(help, inner);
}
